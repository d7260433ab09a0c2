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

//! 'name' table.
//!
//! The table is required, but nothing in it is worth trusting: the input's
//! name table is discarded without being parsed, and a fixed synthesized
//! replacement is emitted instead.

use crate::{
    error::SanitiseError,
    font::SanitisedFont,
    FontSink,
};

/// The synthesized name strings, indexed by name ID. `None` slots produce no
/// record. All records go out as Windows / Unicode BMP / US English.
const NAME_STRINGS: [Option<&str>; 10] = [
    Some("Sanitised font data"), // 0: copyright
    Some("Sanitised font"),      // 1: family
    Some("Unspecified"),         // 2: subfamily
    Some("UniqueID"),            // 3: unique identifier
    Some("Sanitised font"),      // 4: full name
    Some("Version 0.0"),         // 5: version
    Some("SanitisedFont"),       // 6: PostScript name
    None,                        // 7: trademark
    Some("Unknown"),             // 8: manufacturer
    Some("Unknown"),             // 9: designer
];

/// 'name' table. Nothing is retained from the input; serialization emits the
/// fixed replacement table.
#[derive(Debug, Default)]
pub struct TableName;

impl TableName {
    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        let count = NAME_STRINGS.iter().flatten().count() as u16;

        out.write_u16(0)?; // version
        out.write_u16(count)?;
        out.write_u16(6 + count * 12)?; // string storage offset

        let mut string_offset = 0_u16;
        for (name_id, string) in NAME_STRINGS.iter().enumerate() {
            let Some(string) = string else {
                continue;
            };
            let length = string.len() as u16 * 2;
            out.write_u16(3)?; // Windows
            out.write_u16(1)?; // Unicode BMP
            out.write_u16(0x0409)?; // US English
            out.write_u16(name_id as u16)?;
            out.write_u16(length)?;
            out.write_u16(string_offset)?;
            string_offset += length;
        }

        // The strings are ASCII; widening each byte to a big-endian u16
        // yields their UTF-16BE form.
        for string in NAME_STRINGS.iter().flatten() {
            for byte in string.bytes() {
                out.write_u16(u16::from(byte))?;
            }
        }
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    _data: &[u8],
) -> Result<(), SanitiseError> {
    // The input's name table is hostile or redundant; don't even look at it.
    font.name = Some(TableName);
    Ok(())
}

pub(crate) fn should_serialise(_font: &SanitisedFont) -> bool {
    true
}

pub(crate) fn serialise(
    _font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    TableName.serialise(out)
}

#[cfg(test)]
#[path = "name_test.rs"]
mod tests;
