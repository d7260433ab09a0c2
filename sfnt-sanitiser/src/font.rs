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

//! Container orchestrator: directory validation, registry-order parsing and
//! the two-pass output protocol.

use crate::{
    buffer::Buffer,
    error::{fail, SanitiseError},
    magic::{known_container, SFNT_VERSION_TRUETYPE},
    table,
    table::{
        TableCmap, TableGlyf, TableHead, TableHhea, TableHmtx, TableLoca,
        TableMaxp, TableName, TableOs2, TablePost,
    },
    tag::FontTag,
    FontSink,
};

/// All inputs above 1 GiB are refused for sanity.
const MAX_FONT_SIZE: usize = 1024 * 1024 * 1024;

/// searchRange is (maximum power of 2 <= numTables) x 16; to keep that from
/// overflowing, numTables is at most 2^16 / 16 = 2^12.
const MAX_TABLES: u16 = 4096;

/// The parsed representation of a font being sanitised: one slot per
/// recognized table, populated in registry order during the parse phase.
#[derive(Debug, Default)]
pub struct SanitisedFont {
    pub(crate) maxp: Option<TableMaxp>,
    pub(crate) cmap: Option<TableCmap>,
    pub(crate) head: Option<TableHead>,
    pub(crate) hhea: Option<TableHhea>,
    pub(crate) hmtx: Option<TableHmtx>,
    pub(crate) name: Option<TableName>,
    pub(crate) os2: Option<TableOs2>,
    pub(crate) post: Option<TablePost>,
    pub(crate) loca: Option<TableLoca>,
    pub(crate) glyf: Option<TableGlyf>,
}

/// Borrows a table slot a later parser or serializer depends on. The
/// registry order guarantees the slot is populated; an empty one is a logic
/// error reported as the missing table.
pub(crate) fn required<T>(
    slot: &Option<T>,
    tag: FontTag,
) -> Result<&T, SanitiseError> {
    slot.as_ref()
        .ok_or_else(|| fail(SanitiseError::MissingTable(tag)))
}

/// A table descriptor in the static registry.
struct TableHandler {
    tag: FontTag,
    parse: fn(&mut SanitisedFont, &[u8]) -> Result<(), SanitiseError>,
    should_serialise: fn(&SanitisedFont) -> bool,
    serialise:
        fn(&SanitisedFont, &mut dyn FontSink) -> Result<(), SanitiseError>,
    required: bool,
}

/// The registry. The order is fixed and load-bearing: it is both the parse
/// order and the serialize order, and parsers consume state of earlier
/// entries (maxp feeds nearly everything; head feeds loca; loca feeds glyf;
/// hhea feeds hmtx).
const TABLE_HANDLERS: [TableHandler; 10] = [
    TableHandler {
        tag: FontTag::MAXP,
        parse: table::maxp::parse,
        should_serialise: table::maxp::should_serialise,
        serialise: table::maxp::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::CMAP,
        parse: table::cmap::parse,
        should_serialise: table::cmap::should_serialise,
        serialise: table::cmap::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::HEAD,
        parse: table::head::parse,
        should_serialise: table::head::should_serialise,
        serialise: table::head::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::HHEA,
        parse: table::hhea::parse,
        should_serialise: table::hhea::should_serialise,
        serialise: table::hhea::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::HMTX,
        parse: table::hmtx::parse,
        should_serialise: table::hmtx::should_serialise,
        serialise: table::hmtx::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::NAME,
        parse: table::name::parse,
        should_serialise: table::name::should_serialise,
        serialise: table::name::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::OS2,
        parse: table::os2::parse,
        should_serialise: table::os2::should_serialise,
        serialise: table::os2::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::POST,
        parse: table::post::parse,
        should_serialise: table::post::should_serialise,
        serialise: table::post::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::LOCA,
        parse: table::loca::parse,
        should_serialise: table::loca::should_serialise,
        serialise: table::loca::serialise,
        required: true,
    },
    TableHandler {
        tag: FontTag::GLYF,
        parse: table::glyf::parse,
        should_serialise: table::glyf::should_serialise,
        serialise: table::glyf::serialise,
        required: true,
    },
];

/// A record of the input font's directory.
struct DirectoryRecord {
    tag: FontTag,
    offset: u32,
    length: u32,
}

/// A record of the output font's directory, collected while the tables are
/// emitted and backfilled afterwards.
struct OutputRecord {
    tag: FontTag,
    checksum: u32,
    offset: u32,
    length: u32,
}

/// Computes the directory search parameters for a table count:
/// `(searchRange, entrySelector, rangeShift)`. The caller guarantees
/// `0 < num_tables < 4096`.
fn search_parameters(num_tables: u16) -> (u16, u16, u16) {
    let entry_selector = (num_tables as u32).ilog2() as u16;
    let search_range = 16 << entry_selector;
    let range_shift = 16 * num_tables - search_range;
    (search_range, entry_selector, range_shift)
}

/// Round a value up to the nearest multiple of 4.
fn round_up_4(value: u64) -> u64 {
    (value + 3) & !3
}

/// Sanitises the font in `input`, writing the result to `output`.
///
/// On success the sink holds a structurally valid TrueType font containing
/// only the allow-listed tables, with hinting bytecode removed. On failure
/// whatever was partially written is left in the sink as-is.
pub fn process(
    output: &mut dyn FontSink,
    input: &[u8],
) -> Result<(), SanitiseError> {
    if input.len() > MAX_FONT_SIZE {
        return Err(fail(SanitiseError::InputTooLarge(input.len())));
    }

    let mut file = Buffer::new(input);

    let version = file.read_u32()?;
    if version != SFNT_VERSION_TRUETYPE {
        return Err(fail(match known_container(version) {
            Some(container) => SanitiseError::UnsupportedContainer(container),
            None => SanitiseError::UnknownMagic(version),
        }));
    }

    let num_tables = file.read_u16()?;
    let search_range = file.read_u16()?;
    let entry_selector = file.read_u16()?;
    let range_shift = file.read_u16()?;

    if num_tables < 1 || num_tables >= MAX_TABLES {
        return Err(fail(SanitiseError::InvalidTableCount(num_tables)));
    }
    if (search_range, entry_selector, range_shift)
        != search_parameters(num_tables)
    {
        return Err(fail(SanitiseError::InvalidSearchParameters));
    }

    tracing::trace!(num_tables, "parsing font directory");

    let mut records = Vec::with_capacity(num_tables as usize);
    for _ in 0..num_tables {
        let tag = file.read_tag()?;
        // The directory checksum is not trusted; it is recomputed on output.
        let _checksum = file.read_u32()?;
        let offset = file.read_u32()?;
        let length = file.read_u32()?;
        records.push(DirectoryRecord {
            tag,
            offset,
            length,
        });
    }
    let data_offset = file.offset();

    for (i, record) in records.iter().enumerate() {
        // The records must be sorted by tag (taken as big-endian numbers),
        // which also rules out duplicate tables.
        if i > 0 && record.tag <= records[i - 1].tag {
            return Err(fail(SanitiseError::UnorderedTableDirectory));
        }
        if record.offset % 4 != 0 {
            return Err(fail(SanitiseError::TableMisaligned(record.tag)));
        }
        if (record.offset as usize) < data_offset
            || record.length as usize > MAX_FONT_SIZE
        {
            return Err(fail(SanitiseError::TableOutOfBounds(record.tag)));
        }
        // A zero-length table may sit exactly at the end of the input; only
        // a table with bytes needs its offset inside it.
        if record.length > 0 && record.offset as usize >= input.len() {
            return Err(fail(SanitiseError::TableOutOfBounds(record.tag)));
        }
        // Computed in u64, so the addition cannot overflow.
        let end_byte =
            round_up_4(u64::from(record.offset) + u64::from(record.length));
        if end_byte > input.len() as u64 {
            return Err(fail(SanitiseError::TableOutOfBounds(record.tag)));
        }
    }

    // Parse phase: walk the registry, not the directory, so every parser
    // runs after the tables it depends on.
    let mut font = SanitisedFont::default();
    for handler in &TABLE_HANDLERS {
        let Some(record) = records.iter().find(|r| r.tag == handler.tag)
        else {
            if handler.required {
                return Err(fail(SanitiseError::MissingTable(handler.tag)));
            }
            continue;
        };
        tracing::trace!(tag = %handler.tag, "parsing table");
        let start = record.offset as usize;
        (handler.parse)(&mut font, &input[start..start + record.length as usize])?;
    }

    // Serialize phase. Every registry entry is required, so the output
    // count is never zero.
    let num_output = TABLE_HANDLERS
        .iter()
        .filter(|handler| (handler.should_serialise)(&font))
        .count() as u16;
    let (search_range, entry_selector, range_shift) =
        search_parameters(num_output);

    output.write_u32(SFNT_VERSION_TRUETYPE)?;
    output.write_u16(num_output)?;
    output.write_u16(search_range)?;
    output.write_u16(entry_selector)?;
    output.write_u16(range_shift)?;

    // Reserve the directory; its records are only known once the tables
    // they describe have been written.
    let record_offset = output.tell()?;
    output.pad(16 * num_output as usize)?;

    let mut out_records = Vec::with_capacity(num_output as usize);
    for handler in &TABLE_HANDLERS {
        if !(handler.should_serialise)(&font) {
            continue;
        }
        tracing::trace!(tag = %handler.tag, "serialising table");
        let offset = output.tell()?;
        output.reset_checksum();
        (handler.serialise)(&font, output)?;
        let end = output.tell()?;
        // Tables are padded to four bytes; the pad is not part of the
        // recorded length, but it completes any partial checksum word, so
        // the checksum read below is final.
        output.pad(((4 - (end & 3)) % 4) as usize)?;
        out_records.push(OutputRecord {
            tag: handler.tag,
            checksum: output.checksum().unwrap_or(0),
            offset: offset as u32,
            length: (end - offset) as u32,
        });
    }
    let end_of_file = output.tell()?;

    // The directory is sorted by tag, not by the order the tables went out.
    out_records.sort_by_key(|record| record.tag);

    let saved = output.save_checksum();
    output.reset_checksum();
    output.seek(record_offset)?;
    for record in &out_records {
        output.write_tag(record.tag)?;
        output.write_u32(record.checksum)?;
        output.write_u32(record.offset)?;
        output.write_u32(record.length)?;
    }
    output.restore_checksum(saved);
    output.seek(end_of_file)?;

    tracing::debug!(
        tables = num_output,
        bytes = end_of_file,
        "sanitised font emitted"
    );
    Ok(())
}

#[cfg(test)]
#[path = "font_test.rs"]
mod tests;
