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

//! Tests for the 'hhea' table

use std::io::Cursor;

use super::*;
use crate::OutputStream;

/// A well-formed 36-byte 'hhea' table for a two-glyph font.
fn hhea_fixture() -> Vec<u8> {
    vec![
        0x00, 0x01, 0x00, 0x00, // version 1.0
        0x03, 0x00, // ascender = 768
        0xff, 0x00, // descender = -256
        0x00, 0x10, // lineGap = 16
        0x02, 0x00, // advanceWidthMax = 512
        0xff, 0xf0, // minLeftSideBearing = -16
        0x00, 0x00, // minRightSideBearing
        0x02, 0x00, // xMaxExtent
        0x00, 0x01, // caretSlopeRise
        0x00, 0x00, // caretSlopeRun
        0x00, 0x00, // caretOffset
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reserved
        0x00, 0x00, // metricDataFormat
        0x00, 0x02, // numberOfHMetrics
    ]
}

#[test]
fn test_parse_valid_hhea() {
    let hhea = TableHhea::parse(2, &hhea_fixture()).unwrap();
    assert_eq!(hhea.ascent, 768);
    assert_eq!(hhea.descent, -256);
    assert_eq!(hhea.line_gap, 16);
    assert_eq!(hhea.advance_width_max, 512);
    assert_eq!(hhea.min_left_side_bearing, -16);
    assert_eq!(hhea.num_hmetrics, 2);
}

#[test]
fn test_negative_line_gap_is_clamped() {
    let mut data = hhea_fixture();
    data[8] = 0xff; // lineGap = -1
    data[9] = 0xff;
    let hhea = TableHhea::parse(2, &data).unwrap();
    assert_eq!(hhea.line_gap, 0);
}

#[test]
fn test_metrics_exceeding_glyph_count_are_rejected() {
    let result = TableHhea::parse(1, &hhea_fixture());
    assert!(matches!(
        result,
        Err(SanitiseError::InvalidTable {
            tag: FontTag::HHEA,
            ..
        })
    ));
}

#[test]
fn test_nonzero_metric_data_format_is_rejected() {
    let mut data = hhea_fixture();
    data[33] = 0x01;
    assert!(TableHhea::parse(2, &data).is_err());
}

#[test]
fn test_unsupported_version_is_rejected() {
    let mut data = hhea_fixture();
    data[0] = 0x00;
    data[1] = 0x02;
    assert!(TableHhea::parse(2, &data).is_err());
}

#[test]
fn test_serialise_round_trips_and_zeroes_reserved() {
    let hhea = TableHhea::parse(2, &hhea_fixture()).unwrap();
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    hhea.serialise(&mut sink).unwrap();
    assert_eq!(sink.into_inner().into_inner(), hhea_fixture());
}
