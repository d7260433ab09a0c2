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

//! Tests for the 'head' table

use std::io::Cursor;

use super::*;
use crate::OutputStream;

/// A well-formed 54-byte 'head' table.
fn head_fixture() -> Vec<u8> {
    vec![
        0x00, 0x01, 0x00, 0x00, // version 1.0
        0x00, 0x00, 0x00, 0x01, // fontRevision
        0x12, 0x34, 0x56, 0x78, // checkSumAdjustment (ignored)
        0x5f, 0x0f, 0x3c, 0xf5, // magicNumber
        0x00, 0x03, // flags
        0x04, 0x00, // unitsPerEm = 1024
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2a, // created
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2b, // modified
        0xff, 0x00, // xMin = -256
        0xff, 0x00, // yMin = -256
        0x01, 0x00, // xMax = 256
        0x01, 0x00, // yMax = 256
        0x00, 0x01, // macStyle
        0x00, 0x08, // lowestRecPPEM
        0x00, 0x01, // fontDirectionHint (ignored)
        0x00, 0x00, // indexToLocFormat = 0
        0x00, 0x00, // glyphDataFormat
    ]
}

#[test]
fn test_parse_valid_head() {
    let head = TableHead::parse(&head_fixture()).unwrap();
    assert_eq!(head.revision, 1);
    assert_eq!(head.flags, 0x0003);
    assert_eq!(head.units_per_em, 1024);
    assert_eq!(head.created, 0x2a);
    assert_eq!(head.modified, 0x2b);
    assert_eq!(head.x_min, -256);
    assert_eq!(head.y_max, 256);
    assert_eq!(head.mac_style, 1);
    assert_eq!(head.lowest_rec_ppem, 8);
    assert_eq!(head.index_to_loc_format, 0);
}

#[test]
fn test_disallowed_flag_bits_are_masked() {
    let mut data = head_fixture();
    data[16] = 0xff; // flags = 0xffff
    data[17] = 0xff;
    let head = TableHead::parse(&data).unwrap();
    // Only bits 0..4 and 11..13 survive.
    assert_eq!(head.flags, 0x381f);
}

#[test]
fn test_mac_style_bits_are_masked() {
    let mut data = head_fixture();
    data[44] = 0xff; // macStyle = 0xffff
    data[45] = 0xff;
    let head = TableHead::parse(&data).unwrap();
    assert_eq!(head.mac_style, 0x003f);
}

#[test]
fn test_bad_magic_is_rejected() {
    let mut data = head_fixture();
    data[12] = 0x00;
    let result = TableHead::parse(&data);
    assert!(matches!(
        result,
        Err(SanitiseError::InvalidHeadMagicNumber(0x000f3cf5))
    ));
}

#[test]
fn test_non_power_of_two_units_per_em_is_rejected() {
    let mut data = head_fixture();
    data[18] = 0x03; // unitsPerEm = 0x0300
    assert!(TableHead::parse(&data).is_err());
}

#[test]
fn test_units_per_em_out_of_range_is_rejected() {
    let mut data = head_fixture();
    data[18] = 0x00;
    data[19] = 0x08; // unitsPerEm = 8, below the floor of 16
    assert!(TableHead::parse(&data).is_err());
}

#[test]
fn test_invalid_index_to_loc_format_is_rejected() {
    let mut data = head_fixture();
    data[51] = 0x02;
    assert!(TableHead::parse(&data).is_err());

    // Negative values are just as invalid as large ones.
    let mut data = head_fixture();
    data[50] = 0xff;
    data[51] = 0xff;
    assert!(TableHead::parse(&data).is_err());
}

#[test]
fn test_nonzero_glyph_data_format_is_rejected() {
    let mut data = head_fixture();
    data[53] = 0x01;
    assert!(TableHead::parse(&data).is_err());
}

#[test]
fn test_serialise_normalizes_adjustment_and_direction_hint() {
    let head = TableHead::parse(&head_fixture()).unwrap();
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    head.serialise(&mut sink).unwrap();
    let bytes = sink.into_inner().into_inner();
    assert_eq!(bytes.len(), 54);
    // checkSumAdjustment comes out zeroed.
    assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x00]);
    // fontDirectionHint comes out as 2.
    assert_eq!(&bytes[48..50], &[0x00, 0x02]);
    // Everything before the adjustment and after the magic is preserved.
    assert_eq!(&bytes[0..8], &head_fixture()[0..8]);
    assert_eq!(&bytes[12..48], &head_fixture()[12..48]);
    assert_eq!(&bytes[50..54], &head_fixture()[50..54]);
}
