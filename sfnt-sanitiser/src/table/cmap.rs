// Copyright 2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! 'cmap' table.
//!
//! Only a narrow allow-list of Unicode subtables survives sanitisation:
//!
//! | Platform | Encoding | Format |                        |
//! |----------|----------|--------|------------------------|
//! | 3        | 1        | 4      | Unicode BMP            |
//! | 3        | 10       | 12     | Unicode UCS-4          |
//! | 3        | 10       | 13     | UCS-4 fallback mapping |
//!
//! Format 4 subtables are complex; rather than expanding and recompacting
//! them, they are validated - including a simulated lookup of every code
//! point they define - and echoed verbatim. Formats 12 and 13 are simple
//! and are fully reconstructed from their validated groups.

use byteorder::{BigEndian, ByteOrder};

use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// The maximum number of groups in a format 12 or 13 subtable, set so that
/// parsing one allocates at most ~8 MiB. This is still far in excess of the
/// number of Unicode code points currently assigned.
const MAX_CMAP_GROUPS: u32 = 699_050;

/// Conservative cap on format 12/13 field values, vastly larger than any
/// assigned code point; keeps downstream parsers away from overflows.
const MAX_CMAP_VALUE: u32 = 0x4000_0000;

/// A contiguous mapping group in a format 12 or 13 subtable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SubtableRange {
    pub(crate) start_range: u32,
    pub(crate) end_range: u32,
    pub(crate) start_glyph_id: u32,
}

/// Directory entry of a cmap subtable, with the format and length peeked
/// from the subtable body.
struct SubtableHeader {
    platform: u16,
    encoding: u16,
    offset: u32,
    format: u16,
    length: u32,
}

/// One segment of a format 4 subtable, as read during validation.
struct Format4Segment {
    start: u16,
    end: u16,
    id_delta: i16,
    id_range_offset: u16,
    /// Subtable-relative offset of the idRangeOffset field itself; the
    /// lookup indirection is defined relative to this position.
    id_range_offset_offset: u32,
}

/// 'cmap' table, reduced to the allow-listed subtables.
#[derive(Debug, Default)]
pub struct TableCmap {
    /// Validated (3, 1, 4) subtable, byte-exact.
    pub(crate) unicode_bmp: Option<Vec<u8>>,
    /// Groups of the (3, 10, 12) subtable.
    pub(crate) unicode_full: Vec<SubtableRange>,
    /// Groups of the (3, 10, 13) subtable.
    pub(crate) unicode_fallback: Vec<SubtableRange>,
}

/// Validates a format 4 subtable and returns an owned copy for byte-exact
/// re-emission.
fn parse_format4(
    data: &[u8],
    num_glyphs: u16,
) -> Result<Vec<u8>, SanitiseError> {
    let mut subtable = Buffer::new(data);

    // Format and length were peeked by the caller.
    subtable.skip(4)?;
    let language = subtable.read_u16()?;
    if language != 0 {
        return Err(reject(FontTag::CMAP, "format 4 language is non-zero"));
    }

    let seg_count_x2 = subtable.read_u16()?;
    let search_range = subtable.read_u16()?;
    let entry_selector = subtable.read_u16()?;
    let range_shift = subtable.read_u16()?;

    if seg_count_x2 & 1 != 0 || search_range & 1 != 0 {
        return Err(reject(FontTag::CMAP, "format 4 odd segment parameters"));
    }
    let seg_count = seg_count_x2 >> 1;
    // There must be at least one segment according to the OpenType spec.
    if seg_count < 1 {
        return Err(reject(FontTag::CMAP, "format 4 has no segments"));
    }

    let log2_seg_count = (seg_count as u32).ilog2() as u16;
    if search_range != 2 << log2_seg_count
        || entry_selector != log2_seg_count
        || range_shift != seg_count_x2 - search_range
    {
        return Err(reject(
            FontTag::CMAP,
            "format 4 search parameters do not match the segment count",
        ));
    }

    let mut segments = Vec::with_capacity(seg_count as usize);
    for _ in 0..seg_count {
        segments.push(Format4Segment {
            start: 0,
            end: subtable.read_u16()?,
            id_delta: 0,
            id_range_offset: 0,
            id_range_offset_offset: 0,
        });
    }

    let padding = subtable.read_u16()?;
    if padding != 0 {
        return Err(reject(FontTag::CMAP, "format 4 reserved pad is non-zero"));
    }

    for segment in &mut segments {
        segment.start = subtable.read_u16()?;
    }
    for segment in &mut segments {
        segment.id_delta = subtable.read_i16()?;
    }
    for segment in &mut segments {
        segment.id_range_offset_offset = subtable.offset() as u32;
        segment.id_range_offset = subtable.read_u16()?;
        if segment.id_range_offset & 1 != 0 {
            return Err(reject(FontTag::CMAP, "format 4 odd idRangeOffset"));
        }
    }

    // Segments must be in ascending order, based on the end code, and may
    // not overlap.
    for i in 1..segments.len() {
        if segments[i].end <= segments[i - 1].end
            || segments[i].start <= segments[i - 1].end
        {
            return Err(reject(
                FontTag::CMAP,
                "format 4 segments out of order or overlapping",
            ));
        }
    }

    // The last segment must end at 0xffff.
    if segments[segments.len() - 1].end != 0xffff {
        return Err(reject(
            FontTag::CMAP,
            "format 4 does not cover through U+FFFF",
        ));
    }

    // A format 4 subtable is complex. To be safe, simulate a lookup of every
    // code point defined in the table and make sure each one resolves to a
    // valid glyph without touching anything out of bounds.
    for segment in &segments {
        for code_point in segment.start..=segment.end {
            if segment.id_range_offset == 0 {
                // The addition is explicitly allowed to overflow.
                let glyph = code_point.wrapping_add(segment.id_delta as u16);
                if glyph >= num_glyphs {
                    return Err(reject(
                        FontTag::CMAP,
                        "format 4 lookup yields an out-of-range glyph",
                    ));
                }
            } else {
                // This might seem odd, but it's true: the offset is relative
                // to the location of the idRangeOffset value itself.
                let range_delta = u32::from(code_point - segment.start) * 2;
                let glyph_offset = (segment.id_range_offset_offset
                    + u32::from(segment.id_range_offset)
                    + range_delta) as usize;
                // A 16-bit value has to be readable from this offset.
                if glyph_offset + 2 > data.len() {
                    return Err(reject(
                        FontTag::CMAP,
                        "format 4 lookup dereferences out of bounds",
                    ));
                }
                let glyph = BigEndian::read_u16(&data[glyph_offset..]);
                if glyph >= num_glyphs {
                    return Err(reject(
                        FontTag::CMAP,
                        "format 4 lookup yields an out-of-range glyph",
                    ));
                }
            }
        }
    }

    // The subtable is accepted; keep its bytes for verbatim re-emission.
    Ok(data.to_vec())
}

/// Parses and validates the groups of a format 12 or 13 subtable.
///
/// The two formats share their layout; they differ in what `start_glyph_id`
/// means (first glyph of a run vs. the single glyph every code point in the
/// range maps to), which changes the glyph-range check.
fn parse_groups(
    data: &[u8],
    num_glyphs: u16,
    fallback: bool,
) -> Result<Vec<SubtableRange>, SanitiseError> {
    let mut subtable = Buffer::new(data);

    // Format, reserved and length were peeked by the caller.
    subtable.skip(8)?;
    let language = subtable.read_u32()?;
    if language != 0 {
        return Err(reject(FontTag::CMAP, "group subtable language is non-zero"));
    }

    let num_groups = subtable.read_u32()?;
    if num_groups == 0 || num_groups > MAX_CMAP_GROUPS {
        return Err(reject(FontTag::CMAP, "unreasonable group count"));
    }

    let mut groups = Vec::with_capacity(num_groups as usize);
    for _ in 0..num_groups {
        let group = SubtableRange {
            start_range: subtable.read_u32()?,
            end_range: subtable.read_u32()?,
            start_glyph_id: subtable.read_u32()?,
        };

        if group.start_range > MAX_CMAP_VALUE
            || group.end_range > MAX_CMAP_VALUE
            || group.start_glyph_id > MAX_CMAP_VALUE
        {
            return Err(reject(FontTag::CMAP, "group value exceeds 2^30"));
        }

        // The value caps above keep these additions from overflowing.
        if fallback {
            if group.start_glyph_id >= u32::from(num_glyphs) {
                return Err(reject(
                    FontTag::CMAP,
                    "group maps to an out-of-range glyph",
                ));
            }
        } else if group.end_range + group.start_glyph_id
            > u32::from(num_glyphs)
        {
            return Err(reject(
                FontTag::CMAP,
                "group maps to an out-of-range glyph",
            ));
        }

        groups.push(group);
    }

    // Groups must be sorted by start code and may not overlap.
    for i in 1..groups.len() {
        if groups[i].start_range <= groups[i - 1].start_range
            || groups[i].start_range <= groups[i - 1].end_range
        {
            return Err(reject(
                FontTag::CMAP,
                "groups out of order or overlapping",
            ));
        }
    }

    Ok(groups)
}

/// Writes a reconstructed format 12 or 13 subtable.
fn write_groups(
    out: &mut dyn FontSink,
    format: u16,
    groups: &[SubtableRange],
) -> Result<(), SanitiseError> {
    out.write_u16(format)?;
    out.write_u16(0)?; // reserved
    out.write_u32(groups.len() as u32 * 12 + 16)?;
    out.write_u32(0)?; // language
    out.write_u32(groups.len() as u32)?;
    for group in groups {
        out.write_u32(group.start_range)?;
        out.write_u32(group.end_range)?;
        out.write_u32(group.start_glyph_id)?;
    }
    Ok(())
}

impl TableCmap {
    pub(crate) fn parse(
        num_glyphs: u16,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let version = table.read_u16()?;
        if version != 0 {
            return Err(reject(FontTag::CMAP, "unsupported table version"));
        }
        let num_tables = table.read_u16()?;

        let mut headers = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            headers.push(SubtableHeader {
                platform: table.read_u16()?,
                encoding: table.read_u16()?,
                offset: table.read_u32()?,
                format: 0,
                length: 0,
            });
        }
        let data_offset = table.offset();

        // Make sure all the subtable offsets are valid.
        for header in &headers {
            if header.offset as usize > 1024 * 1024 * 1024
                || (header.offset as usize) < data_offset
                || header.offset as usize >= data.len()
            {
                return Err(reject(
                    FontTag::CMAP,
                    "subtable offset lies outside the table",
                ));
            }
        }

        // The format is the first couple of bytes of each subtable; the
        // length follows in a format-specific position.
        for header in &mut headers {
            table.set_offset(header.offset as usize);
            header.format = table.read_u16()?;
            match header.format {
                4 => header.length = u32::from(table.read_u16()?),
                12 | 13 => {
                    table.skip(2)?;
                    header.length = table.read_u32()?;
                }
                _ => header.length = 0,
            }
        }

        // Now verify that all the lengths are sane.
        for header in &headers {
            if header.length == 0 {
                continue;
            }
            if header.length > 1024 * 1024 * 1024 {
                return Err(reject(FontTag::CMAP, "unreasonable subtable length"));
            }
            // Offset and length are both bounded above, so the addition
            // cannot overflow.
            let end_byte = u64::from(header.offset) + u64::from(header.length);
            if end_byte > data.len() as u64 {
                return Err(reject(
                    FontTag::CMAP,
                    "subtable extends past the table",
                ));
            }
        }

        let mut cmap = TableCmap::default();
        for header in &headers {
            if header.platform != 3 {
                continue;
            }
            let body = &data[header.offset as usize
                ..(header.offset + header.length) as usize];
            match (header.encoding, header.format) {
                (1, 4) => {
                    cmap.unicode_bmp =
                        Some(parse_format4(body, num_glyphs)?);
                }
                (10, 12) => {
                    cmap.unicode_full =
                        parse_groups(body, num_glyphs, false)?;
                }
                (10, 13) => {
                    cmap.unicode_fallback =
                        parse_groups(body, num_glyphs, true)?;
                }
                _ => {}
            }
        }

        Ok(cmap)
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        let have_bmp = self.unicode_bmp.is_some();
        let have_full = !self.unicode_full.is_empty();
        let have_fallback = !self.unicode_fallback.is_empty();
        let num_subtables =
            have_bmp as u16 + have_full as u16 + have_fallback as u16;

        let table_start = out.tell()?;
        out.write_u16(0)?;
        out.write_u16(num_subtables)?;

        let record_offset = out.tell()?;
        out.pad(num_subtables as usize * 8)?;

        let offset_bmp = out.tell()?;
        if let Some(subtable) = &self.unicode_bmp {
            out.write(subtable)?;
        }

        let offset_full = out.tell()?;
        if have_full {
            write_groups(out, 12, &self.unicode_full)?;
        }

        let offset_fallback = out.tell()?;
        if have_fallback {
            write_groups(out, 13, &self.unicode_fallback)?;
        }

        let table_end = out.tell()?;
        // The format 4 echo may leave hanging bytes in the checksum; the
        // save/reset/restore protocol folds the backfilled directory records
        // in without disturbing the stream's word phase.
        let saved = out.save_checksum();
        out.reset_checksum();

        // Seek back and write the table of subtable records.
        out.seek(record_offset)?;
        if have_bmp {
            out.write_u16(3)?;
            out.write_u16(1)?;
            out.write_u32((offset_bmp - table_start) as u32)?;
        }
        if have_full {
            out.write_u16(3)?;
            out.write_u16(10)?;
            out.write_u32((offset_full - table_start) as u32)?;
        }
        // The fallback subtable also goes out under encoding 10; ambiguous
        // in the directory, but consumers key on the format field.
        if have_fallback {
            out.write_u16(3)?;
            out.write_u16(10)?;
            out.write_u32((offset_fallback - table_start) as u32)?;
        }

        out.seek(table_end)?;
        out.restore_checksum(saved);
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    font.cmap = Some(TableCmap::parse(num_glyphs, data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.cmap.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.cmap, FontTag::CMAP)?.serialise(out)
}

#[cfg(test)]
#[path = "cmap_test.rs"]
mod tests;
