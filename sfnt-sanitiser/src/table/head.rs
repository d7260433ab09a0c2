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

//! 'head' table.

use crate::{
    buffer::Buffer,
    error::{fail, reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// Magic number the OpenType spec mandates for the 'head' table.
const HEAD_TABLE_MAGIC_NUMBER: u32 = 0x5f0f3cf5;

/// Mask of the `flags` bits the sanitiser lets through (0..4, 11..13).
const FLAGS_MASK: u16 = 0x381f;

/// Mask of the `macStyle` bits the sanitiser lets through (0..5).
const MAC_STYLE_MASK: u16 = 0x003f;

/// 'head' table, with its checksum adjustment and direction hint dropped
/// (both are re-synthesized on output).
#[derive(Debug)]
pub struct TableHead {
    pub(crate) revision: u32,
    pub(crate) flags: u16,
    pub(crate) units_per_em: u16,
    pub(crate) created: u64,
    pub(crate) modified: u64,
    pub(crate) x_min: i16,
    pub(crate) y_min: i16,
    pub(crate) x_max: i16,
    pub(crate) y_max: i16,
    pub(crate) mac_style: u16,
    pub(crate) lowest_rec_ppem: u16,
    /// 0 for 16-bit loca offsets, 1 for 32-bit. Consulted by the loca
    /// parser and serializer.
    pub(crate) index_to_loc_format: i16,
}

impl TableHead {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let version = table.read_u32()?;
        if version >> 16 != 1 {
            return Err(reject(FontTag::HEAD, "unsupported table version"));
        }
        let revision = table.read_u32()?;

        // Skip the checksum adjustment; it is recomputed (as zero) on output.
        table.skip(4)?;

        let magic = table.read_u32()?;
        if magic != HEAD_TABLE_MAGIC_NUMBER {
            return Err(fail(SanitiseError::InvalidHeadMagicNumber(magic)));
        }

        let raw_flags = table.read_u16()?;
        let flags = raw_flags & FLAGS_MASK;
        if flags != raw_flags {
            tracing::warn!(raw_flags, flags, "masked disallowed 'head' flags");
        }

        let units_per_em = table.read_u16()?;
        if !(16..=16384).contains(&units_per_em)
            || !units_per_em.is_power_of_two()
        {
            return Err(reject(
                FontTag::HEAD,
                "unitsPerEm is not a power of two in [16, 16384]",
            ));
        }

        let created = table.read_u64()?;
        let modified = table.read_u64()?;

        let x_min = table.read_i16()?;
        let y_min = table.read_i16()?;
        let x_max = table.read_i16()?;
        let y_max = table.read_i16()?;

        let mac_style = table.read_u16()? & MAC_STYLE_MASK;
        let lowest_rec_ppem = table.read_u16()?;

        // The font direction hint is deprecated; a fixed value is written on
        // output.
        table.skip(2)?;

        let index_to_loc_format = table.read_i16()?;
        if index_to_loc_format != 0 && index_to_loc_format != 1 {
            return Err(reject(FontTag::HEAD, "invalid indexToLocFormat"));
        }

        let glyph_data_format = table.read_i16()?;
        if glyph_data_format != 0 {
            return Err(reject(FontTag::HEAD, "invalid glyphDataFormat"));
        }

        Ok(TableHead {
            revision,
            flags,
            units_per_em,
            created,
            modified,
            x_min,
            y_min,
            x_max,
            y_max,
            mac_style,
            lowest_rec_ppem,
            index_to_loc_format,
        })
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        out.write_u32(0x00010000)?;
        out.write_u32(self.revision)?;
        out.write_u32(0)?; // checkSumAdjustment
        out.write_u32(HEAD_TABLE_MAGIC_NUMBER)?;
        out.write_u16(self.flags)?;
        out.write_u16(self.units_per_em)?;
        out.write_u64(self.created)?;
        out.write_u64(self.modified)?;
        out.write_i16(self.x_min)?;
        out.write_i16(self.y_min)?;
        out.write_i16(self.x_max)?;
        out.write_i16(self.y_max)?;
        out.write_u16(self.mac_style)?;
        out.write_u16(self.lowest_rec_ppem)?;
        out.write_i16(2)?; // fontDirectionHint
        out.write_i16(self.index_to_loc_format)?;
        out.write_i16(0)?; // glyphDataFormat
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    font.head = Some(TableHead::parse(data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.head.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.head, FontTag::HEAD)?.serialise(out)
}

#[cfg(test)]
#[path = "head_test.rs"]
mod tests;
