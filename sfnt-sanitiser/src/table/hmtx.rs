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

//! 'hmtx' table.

use super::hhea::TableHhea;
use crate::{
    buffer::Buffer,
    error::{reject, SanitiseError},
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// 'hmtx' table: one (advance, left side bearing) pair per metric, then bare
/// left side bearings for the remaining glyphs.
///
/// Both counts come from previously validated tables (`numberOfHMetrics` is
/// a u16 bounded by the glyph count), which caps the allocation here.
#[derive(Debug, Default)]
pub struct TableHmtx {
    pub(crate) metrics: Vec<(u16, i16)>,
    pub(crate) side_bearings: Vec<i16>,
}

impl TableHmtx {
    pub(crate) fn parse(
        num_glyphs: u16,
        hhea: &TableHhea,
        data: &[u8],
    ) -> Result<Self, SanitiseError> {
        let mut table = Buffer::new(data);

        let num_hmetrics = hhea.num_hmetrics;
        if num_hmetrics > num_glyphs {
            return Err(reject(
                FontTag::HMTX,
                "numberOfHMetrics exceeds the glyph count",
            ));
        }
        let num_side_bearings = num_glyphs - num_hmetrics;

        let mut metrics = Vec::with_capacity(num_hmetrics as usize);
        for _ in 0..num_hmetrics {
            let advance = table.read_u16()?;
            let side_bearing = table.read_i16()?;
            if advance > hhea.advance_width_max {
                return Err(reject(
                    FontTag::HMTX,
                    "advance width exceeds hhea advanceWidthMax",
                ));
            }
            if side_bearing < hhea.min_left_side_bearing {
                return Err(reject(
                    FontTag::HMTX,
                    "left side bearing below hhea minLeftSideBearing",
                ));
            }
            metrics.push((advance, side_bearing));
        }

        let mut side_bearings =
            Vec::with_capacity(num_side_bearings as usize);
        for _ in 0..num_side_bearings {
            let side_bearing = table.read_i16()?;
            if side_bearing < hhea.min_left_side_bearing {
                return Err(reject(
                    FontTag::HMTX,
                    "left side bearing below hhea minLeftSideBearing",
                ));
            }
            side_bearings.push(side_bearing);
        }

        Ok(TableHmtx {
            metrics,
            side_bearings,
        })
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        for &(advance, side_bearing) in &self.metrics {
            out.write_u16(advance)?;
            out.write_i16(side_bearing)?;
        }
        for &side_bearing in &self.side_bearings {
            out.write_i16(side_bearing)?;
        }
        Ok(())
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    let num_glyphs = required(&font.maxp, FontTag::MAXP)?.num_glyphs;
    let hhea = required(&font.hhea, FontTag::HHEA)?;
    let hmtx = TableHmtx::parse(num_glyphs, hhea, data)?;
    font.hmtx = Some(hmtx);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.hmtx.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.hmtx, FontTag::HMTX)?.serialise(out)
}

#[cfg(test)]
#[path = "hmtx_test.rs"]
mod tests;
