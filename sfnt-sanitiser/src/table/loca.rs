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

//! 'loca' table.
//!
//! Offsets are canonicalized to bytes in memory regardless of the stored
//! format, and are rewritten wholesale by the glyf parser once the glyph
//! bodies have been stripped of bytecode.

use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// 'loca' table: `num_glyphs + 1` monotonically non-decreasing byte offsets
/// into the glyf table.
#[derive(Debug, Default)]
pub struct TableLoca {
    pub(crate) offsets: Vec<u32>,
}

impl TableLoca {
    pub(crate) fn parse(
        num_glyphs: u16,
        index_to_loc_format: i16,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        // There is one more offset than the number of glyphs, to give the
        // length of the final glyph.
        let count = num_glyphs as usize + 1;
        let mut offsets = Vec::with_capacity(count);
        let mut last_offset = 0_u32;

        for _ in 0..count {
            let offset = if index_to_loc_format == 0 {
                // Format 0 stores half the byte offset in 16 bits.
                u32::from(table.read_u16()?) * 2
            } else {
                table.read_u32()?
            };
            if offset < last_offset {
                return Err(reject(
                    FontTag::LOCA,
                    "offsets are not monotonically non-decreasing",
                ));
            }
            last_offset = offset;
            offsets.push(offset);
        }

        Ok(TableLoca { offsets })
    }

    pub(crate) fn serialise(
        &self,
        index_to_loc_format: i16,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        for &offset in &self.offsets {
            if index_to_loc_format == 0 {
                let half = u16::try_from(offset >> 1).map_err(|_| {
                    reject(
                        FontTag::LOCA,
                        "offset does not fit the 16-bit loca format",
                    )
                })?;
                out.write_u16(half)?;
            } else {
                out.write_u32(offset)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    let index_to_loc_format =
        required(&font.head, FontTag::HEAD)?.index_to_loc_format;
    font.loca = Some(TableLoca::parse(num_glyphs, index_to_loc_format, data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.loca.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    let index_to_loc_format =
        required(&font.head, FontTag::HEAD)?.index_to_loc_format;
    required(&font.loca, FontTag::LOCA)?.serialise(index_to_loc_format, out)
}

#[cfg(test)]
#[path = "loca_test.rs"]
mod tests;
