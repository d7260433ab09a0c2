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

//! 'maxp' table.
//!
//! Most of version 1 relates to the limits of the hinting machine, which the
//! sanitiser removes anyway; those fields are re-emitted with forced-safe
//! values so the output advertises "no hinting" to its consumer.

use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// 'maxp' table, reduced to the fields the sanitiser keeps.
#[derive(Debug, Default)]
pub struct TableMaxp {
    /// Number of glyphs in the font. Every other table that indexes glyphs
    /// is validated against this.
    pub(crate) num_glyphs: u16,
    /// Whether the input carried a version 1.0 table.
    pub(crate) version_1: bool,
    pub(crate) max_points: u16,
    pub(crate) max_contours: u16,
    pub(crate) max_composite_points: u16,
    pub(crate) max_composite_contours: u16,
    pub(crate) max_component_elements: u16,
    pub(crate) max_component_depth: u16,
}

impl TableMaxp {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let version = table.read_u32()?;
        if version >> 16 > 1 {
            return Err(reject(FontTag::MAXP, "unsupported table version"));
        }

        let mut maxp = TableMaxp {
            num_glyphs: table.read_u16()?,
            version_1: version >> 16 == 1,
            ..TableMaxp::default()
        };

        if maxp.version_1 {
            maxp.max_points = table.read_u16()?;
            maxp.max_contours = table.read_u16()?;
            maxp.max_composite_points = table.read_u16()?;
            maxp.max_composite_contours = table.read_u16()?;
            // Skip over the fields relating to hinting bytecode; they are
            // replaced with forced-safe values on output.
            table.skip(14)?;
            maxp.max_component_elements = table.read_u16()?;
            maxp.max_component_depth = table.read_u16()?;
        }

        Ok(maxp)
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        out.write_u32(if self.version_1 { 0x00010000 } else { 0x00005000 })?;
        out.write_u16(self.num_glyphs)?;

        if !self.version_1 {
            return Ok(());
        }

        out.write_u16(self.max_points)?;
        out.write_u16(self.max_contours)?;
        out.write_u16(self.max_composite_points)?;
        out.write_u16(self.max_composite_contours)?;
        out.write_u16(1)?; // maxZones
        out.write_u16(0)?; // maxTwilightPoints
        out.write_u16(0)?; // maxStorage
        out.write_u16(0)?; // maxFunctionDefs
        out.write_u16(0)?; // maxInstructionDefs
        out.write_u16(0)?; // maxStackElements
        out.write_u16(0)?; // maxSizeOfInstructions
        out.write_u16(self.max_component_elements)?;
        out.write_u16(self.max_component_depth)?;
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    font.maxp = Some(TableMaxp::parse(data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.maxp.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.maxp, FontTag::MAXP)?.serialise(out)
}

#[cfg(test)]
#[path = "maxp_test.rs"]
mod tests;
