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

//! Tests for the 'glyf' table

use std::io::Cursor;

use super::*;
use crate::OutputStream;

/// A 20-byte simple glyph: one contour, two points, no bytecode.
fn simple_glyph() -> Vec<u8> {
    vec![
        0x00, 0x01, // numberOfContours = 1
        0x00, 0x00, // xMin
        0x00, 0x00, // yMin
        0x00, 0x01, // xMax
        0x00, 0x01, // yMax
        0x00, 0x01, // endPtsOfContours[0] = 1
        0x00, 0x00, // instructionLength = 0
        0x37, 0x37, // flags: two short positive points
        0x01, 0x01, // x deltas
        0x01, 0x01, // y deltas
    ]
}

/// The same glyph carrying four bytes of hinting bytecode.
fn hinted_glyph() -> Vec<u8> {
    vec![
        0x00, 0x01, // numberOfContours = 1
        0x00, 0x00, // xMin
        0x00, 0x00, // yMin
        0x00, 0x01, // xMax
        0x00, 0x01, // yMax
        0x00, 0x01, // endPtsOfContours[0] = 1
        0x00, 0x04, // instructionLength = 4
        0xb0, 0x00, 0x4d, 0x18, // bytecode
        0x37, 0x37, // flags
        0x01, 0x01, // x deltas
        0x01, 0x01, // y deltas
    ]
}

fn rewritten(glyf: &TableGlyf) -> Vec<u8> {
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    glyf.serialise(&mut sink).unwrap();
    sink.into_inner().into_inner()
}

#[test]
fn test_unhinted_glyph_passes_through() {
    let data = simple_glyph();
    let mut loca = TableLoca {
        offsets: vec![0, 20],
    };
    let glyf = TableGlyf::parse(1, &mut loca, &data).unwrap();
    assert_eq!(rewritten(&glyf), data);
    assert_eq!(loca.offsets, vec![0, 20]);
}

#[test]
fn test_bytecode_is_stripped() {
    let data = hinted_glyph();
    let mut loca = TableLoca {
        offsets: vec![0, 24],
    };
    let glyf = TableGlyf::parse(1, &mut loca, &data).unwrap();
    // The rewritten glyph is the unhinted one: length field zeroed, the
    // four bytecode bytes gone.
    assert_eq!(rewritten(&glyf), simple_glyph());
    assert_eq!(loca.offsets, vec![0, 20]);
}

#[test]
fn test_empty_glyph_emits_nothing() {
    let data = simple_glyph();
    let mut loca = TableLoca {
        offsets: vec![0, 0, 20],
    };
    let glyf = TableGlyf::parse(2, &mut loca, &data).unwrap();
    assert_eq!(rewritten(&glyf), simple_glyph());
    assert_eq!(loca.offsets, vec![0, 0, 20]);
}

#[test]
fn test_composite_glyph_passes_through_verbatim() {
    // numberOfContours = -1 marks a composite; the sanitiser does not look
    // inside it.
    let mut data = vec![
        0xff, 0xff, // numberOfContours = -1
        0x00, 0x00, // xMin
        0x00, 0x00, // yMin
        0x00, 0x01, // xMax
        0x00, 0x01, // yMax
    ];
    data.extend_from_slice(&[
        0x00, 0x02, // flags
        0x00, 0x00, // glyphIndex
        0x00, 0x00, 0x00, 0x00, // args and padding up to 20 bytes
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]);
    let mut loca = TableLoca {
        offsets: vec![0, 20],
    };
    let glyf = TableGlyf::parse(1, &mut loca, &data).unwrap();
    assert_eq!(rewritten(&glyf), data);
}

#[test]
fn test_rewritten_glyphs_are_padded_to_four_bytes() {
    // A 17-byte glyph (one point) grows a 3-byte pad; the recorded length
    // still reflects the padded span since loca offsets are aligned.
    let data = vec![
        0x00, 0x01, // numberOfContours = 1
        0x00, 0x00, // xMin
        0x00, 0x00, // yMin
        0x00, 0x01, // xMax
        0x00, 0x01, // yMax
        0x00, 0x00, // endPtsOfContours[0] = 0
        0x00, 0x00, // instructionLength
        0x37, // flag
        0x01, // x delta
        0x01, // y delta
    ];
    let mut loca = TableLoca {
        offsets: vec![0, 17],
    };
    let glyf = TableGlyf::parse(1, &mut loca, &data).unwrap();
    let mut expected = data.clone();
    expected.extend_from_slice(&[0, 0, 0]);
    assert_eq!(rewritten(&glyf), expected);
    assert_eq!(loca.offsets, vec![0, 20]);
}

#[test]
fn test_inverted_bounding_box_is_rejected() {
    let mut data = simple_glyph();
    data[2] = 0x00;
    data[3] = 0x02; // xMin = 2 > xMax = 1
    let mut loca = TableLoca {
        offsets: vec![0, 20],
    };
    let result = TableGlyf::parse(1, &mut loca, &data);
    assert!(matches!(
        result,
        Err(SanitiseError::InvalidTable {
            tag: FontTag::GLYF,
            ..
        })
    ));
}

#[test]
fn test_glyph_range_past_table_is_rejected() {
    let data = simple_glyph();
    let mut loca = TableLoca {
        offsets: vec![0, 24], // claims 24 bytes, table has 20
    };
    assert!(TableGlyf::parse(1, &mut loca, &data).is_err());
}

#[test]
fn test_bytecode_longer_than_glyph_is_rejected() {
    let mut data = simple_glyph();
    data[13] = 0xff; // instructionLength = 255
    let mut loca = TableLoca {
        offsets: vec![0, 20],
    };
    assert!(TableGlyf::parse(1, &mut loca, &data).is_err());
}

#[test]
fn test_undersized_rewritten_glyph_is_rejected() {
    // 12 bytes of glyph: a header plus an empty contour list leaves the
    // rewritten body under the 14-byte floor.
    let data = vec![
        0x00, 0x00, // numberOfContours = 0
        0x00, 0x00, // xMin
        0x00, 0x00, // yMin
        0x00, 0x01, // xMax
        0x00, 0x01, // yMax
        0x00, 0x00, // instructionLength = 0
    ];
    let mut loca = TableLoca {
        offsets: vec![0, 12],
    };
    assert!(TableGlyf::parse(1, &mut loca, &data).is_err());
}

#[test]
fn test_loca_glyph_count_mismatch_is_rejected() {
    let data = simple_glyph();
    let mut loca = TableLoca {
        offsets: vec![0, 20],
    };
    // Two glyphs but only two loca entries.
    assert!(TableGlyf::parse(2, &mut loca, &data).is_err());
}
