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

//! 'post' table.

use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// Glyph name indices below this refer to the standard Macintosh glyph name
/// set; higher values index the table's own Pascal-string name list.
const NUM_STANDARD_NAMES: u16 = 258;

/// 'post' table.
///
/// Versions 1.0 and 3.0 carry only the common header. Version 2.0 adds one
/// name index per glyph and a list of Pascal-string glyph names; the names
/// are retained as raw bytes, since nothing guarantees they are UTF-8 and
/// they are echoed rather than interpreted.
#[derive(Debug, Default)]
pub struct TablePost {
    pub(crate) version: u32,
    pub(crate) italic_angle: u32,
    pub(crate) underline_position: i16,
    pub(crate) underline_thickness: i16,
    pub(crate) is_fixed_pitch: u32,
    pub(crate) glyph_name_index: Vec<u16>,
    pub(crate) names: Vec<Vec<u8>>,
}

impl TablePost {
    pub(crate) fn parse(
        num_glyphs: u16,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let mut post = TablePost {
            version: table.read_u32()?,
            italic_angle: table.read_u32()?,
            underline_position: table.read_i16()?,
            underline_thickness: table.read_i16()?,
            is_fixed_pitch: table.read_u32()?,
            ..TablePost::default()
        };

        match post.version {
            0x00010000 | 0x00030000 => return Ok(post),
            0x00020000 => {}
            _ => return Err(reject(FontTag::POST, "unsupported table version")),
        }

        // A version 2 table, with a list of Pascal strings at the end. The
        // memory-usage hints are ignored; they are zeroed when serialising.
        table.skip(16)?;

        let table_num_glyphs = table.read_u16()?;
        if table_num_glyphs != num_glyphs {
            return Err(reject(
                FontTag::POST,
                "glyph count disagrees with maxp",
            ));
        }

        post.glyph_name_index = Vec::with_capacity(num_glyphs as usize);
        for _ in 0..num_glyphs {
            let index = table.read_u16()?;
            if index >= 32768 {
                return Err(reject(FontTag::POST, "glyph name index too large"));
            }
            post.glyph_name_index.push(index);
        }

        // The Pascal strings must consume the remainder of the table
        // exactly; a length byte that runs past the end is a rejection, not
        // a truncation.
        while table.remaining() > 0 {
            if post.names.len() >= num_glyphs as usize {
                return Err(reject(
                    FontTag::POST,
                    "more glyph names than glyphs",
                ));
            }
            let length = table.read_u8()? as usize;
            let name = table.read_bytes(length)?;
            post.names.push(name.to_vec());
        }

        // Check that all the name references are within bounds.
        for &index in &post.glyph_name_index {
            if index < NUM_STANDARD_NAMES {
                continue;
            }
            if usize::from(index - NUM_STANDARD_NAMES) >= post.names.len() {
                return Err(reject(
                    FontTag::POST,
                    "glyph name index has no matching name",
                ));
            }
        }

        Ok(post)
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        out.write_u32(self.version)?;
        out.write_u32(self.italic_angle)?;
        out.write_i16(self.underline_position)?;
        out.write_i16(self.underline_thickness)?;
        out.write_u32(self.is_fixed_pitch)?;
        // The four memory-usage hints are not worth trusting; zero them.
        out.write_u32(0)?;
        out.write_u32(0)?;
        out.write_u32(0)?;
        out.write_u32(0)?;

        if self.version != 0x00020000 {
            return Ok(());
        }

        out.write_u16(self.glyph_name_index.len() as u16)?;
        for &index in &self.glyph_name_index {
            out.write_u16(index)?;
        }
        for name in &self.names {
            out.write(&[name.len() as u8])?;
            out.write(name)?;
        }
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    font.post = Some(TablePost::parse(num_glyphs, data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.post.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.post, FontTag::POST)?.serialise(out)
}

#[cfg(test)]
#[path = "post_test.rs"]
mod tests;
