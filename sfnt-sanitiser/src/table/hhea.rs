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

//! 'hhea' table.

use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// 'hhea' table.
#[derive(Debug)]
pub struct TableHhea {
    pub(crate) ascent: i16,
    pub(crate) descent: i16,
    /// Clamped to zero if the input is negative.
    pub(crate) line_gap: i16,
    pub(crate) advance_width_max: u16,
    pub(crate) min_left_side_bearing: i16,
    pub(crate) min_right_side_bearing: i16,
    pub(crate) x_max_extent: i16,
    pub(crate) caret_slope_rise: i16,
    pub(crate) caret_slope_run: i16,
    pub(crate) caret_offset: i16,
    /// Number of entries in the hmtx table's full-metric array.
    pub(crate) num_hmetrics: u16,
}

impl TableHhea {
    pub(crate) fn parse(
        num_glyphs: u16,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let version = table.read_u32()?;
        if version >> 16 != 1 {
            return Err(reject(FontTag::HHEA, "unsupported table version"));
        }

        let ascent = table.read_i16()?;
        let descent = table.read_i16()?;
        let mut line_gap = table.read_i16()?;
        let advance_width_max = table.read_u16()?;
        let min_left_side_bearing = table.read_i16()?;
        let min_right_side_bearing = table.read_i16()?;
        let x_max_extent = table.read_i16()?;
        let caret_slope_rise = table.read_i16()?;
        let caret_slope_run = table.read_i16()?;
        let caret_offset = table.read_i16()?;

        if line_gap < 0 {
            tracing::warn!(line_gap, "clamping negative lineGap to zero");
            line_gap = 0;
        }

        // Skip the reserved bytes.
        table.skip(8)?;

        let metric_data_format = table.read_i16()?;
        if metric_data_format != 0 {
            return Err(reject(FontTag::HHEA, "invalid metricDataFormat"));
        }

        let num_hmetrics = table.read_u16()?;
        if num_hmetrics > num_glyphs {
            return Err(reject(
                FontTag::HHEA,
                "numberOfHMetrics exceeds the glyph count",
            ));
        }

        Ok(TableHhea {
            ascent,
            descent,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            num_hmetrics,
        })
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        out.write_u32(0x00010000)?;
        out.write_i16(self.ascent)?;
        out.write_i16(self.descent)?;
        out.write_i16(self.line_gap)?;
        out.write_u16(self.advance_width_max)?;
        out.write_i16(self.min_left_side_bearing)?;
        out.write_i16(self.min_right_side_bearing)?;
        out.write_i16(self.x_max_extent)?;
        out.write_i16(self.caret_slope_rise)?;
        out.write_i16(self.caret_slope_run)?;
        out.write_i16(self.caret_offset)?;
        out.write_u64(0)?; // reserved
        out.write_i16(0)?; // metricDataFormat
        out.write_u16(self.num_hmetrics)?;
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    font.hhea = Some(TableHhea::parse(num_glyphs, data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.hhea.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.hhea, FontTag::HHEA)?.serialise(out)
}

#[cfg(test)]
#[path = "hhea_test.rs"]
mod tests;
