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

//! 'glyf' table.
//!
//! The glyf table is pretty complicated, but most of the complexity can be
//! skipped: for simple glyphs only the hinting bytecode has to go, and
//! composite glyphs pass through whole since their components are simple
//! glyphs that have already been stripped. (A composite can carry its own
//! trailing instruction block; that block is passed through as-is.)

use super::loca::TableLoca;
use crate::{
    buffer::Buffer,
    error::{fail, reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// Minimum size of a rewritten glyph body: the 10-byte header, one end-point
/// entry, the zeroed instruction length and one byte of outline data.
const MIN_GLYPH_SIZE: usize = 14;

/// 'glyf' table, retained as the ordered segments of the rewritten glyph
/// bodies. The loca offsets are rewritten to match during parsing.
#[derive(Debug, Default)]
pub struct TableGlyf {
    pub(crate) segments: Vec<Vec<u8>>,
}

impl TableGlyf {
    pub(crate) fn parse(
        num_glyphs: u16,
        loca: &mut TableLoca,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let offsets = &loca.offsets;
        if offsets.len() != num_glyphs as usize + 1 {
            return Err(reject(
                FontTag::GLYF,
                "loca does not hold one offset per glyph plus one",
            ));
        }

        let mut segments = Vec::new();
        let mut out_offsets = vec![0_u32; num_glyphs as usize + 1];
        let mut current_offset = 0_u32;

        for i in 0..num_glyphs as usize {
            let gly_offset = offsets[i] as usize;
            // The loca parser checked that the offsets are monotonic.
            let gly_length = (offsets[i + 1] - offsets[i]) as usize;
            if gly_length == 0 {
                // This glyph has no outline (e.g. the space character).
                out_offsets[i] = current_offset;
                continue;
            }

            if gly_offset >= data.len() {
                return Err(reject(
                    FontTag::GLYF,
                    "glyph offset lies outside the table",
                ));
            }
            let gly_end = gly_offset.checked_add(gly_length).ok_or_else(
                || reject(FontTag::GLYF, "glyph range overflows"),
            )?;
            if gly_end > data.len() {
                return Err(reject(
                    FontTag::GLYF,
                    "glyph range extends past the table",
                ));
            }

            table.set_offset(gly_offset);
            let num_contours = table.read_i16()?;
            let x_min = table.read_i16()?;
            let y_min = table.read_i16()?;
            let x_max = table.read_i16()?;
            let y_max = table.read_i16()?;
            if x_min > x_max || y_min > y_max {
                return Err(reject(
                    FontTag::GLYF,
                    "glyph bounding box is inverted",
                ));
            }

            let new_size = if num_contours >= 0 {
                // A simple glyph, which might contain bytecode. Skip the
                // end-point array to reach the instruction length.
                table.skip(num_contours as usize * 2)?;
                let bytecode_length = table.read_u16()? as usize;

                let header_length = 10 + num_contours as usize * 2 + 2;
                if gly_length < header_length + bytecode_length {
                    return Err(reject(
                        FontTag::GLYF,
                        "glyph is shorter than its header and bytecode",
                    ));
                }

                // Three segments: the glyph up to the instruction length,
                // two zero bytes overwriting that length, and the rest of
                // the glyph after the bytecode. The bytecode is thereby
                // dropped.
                segments.push(
                    data[gly_offset..gly_offset + header_length - 2].to_vec(),
                );
                segments.push(vec![0, 0]);
                segments.push(
                    data[gly_offset + header_length + bytecode_length..gly_end]
                        .to_vec(),
                );
                gly_length - bytecode_length
            } else {
                // A composite glyph; it passes through whole.
                segments.push(data[gly_offset..gly_end].to_vec());
                gly_length
            };

            out_offsets[i] = current_offset;
            if new_size < MIN_GLYPH_SIZE {
                return Err(reject(
                    FontTag::GLYF,
                    "rewritten glyph is shorter than a glyph header",
                ));
            }

            // Glyphs must stay four-byte aligned once concatenated.
            let padding = (4 - (new_size & 3)) % 4;
            if padding != 0 {
                segments.push(vec![0; padding]);
            }
            current_offset = current_offset
                .checked_add((new_size + padding) as u32)
                .ok_or_else(|| {
                    reject(FontTag::GLYF, "rewritten table overflows")
                })?;
        }
        out_offsets[num_glyphs as usize] = current_offset;

        loca.offsets = out_offsets;

        Ok(TableGlyf { segments })
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        for segment in &self.segments {
            out.write(segment)?;
        }
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    let mut loca = font
        .loca
        .take()
        .ok_or_else(|| fail(SanitiseError::MissingTable(FontTag::LOCA)))?;
    let glyf = TableGlyf::parse(num_glyphs, &mut loca, data)?;
    font.loca = Some(loca);
    font.glyf = Some(glyf);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.glyf.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.glyf, FontTag::GLYF)?.serialise(out)
}

#[cfg(test)]
#[path = "glyf_test.rs"]
mod tests;
