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

//! Tests for the 'loca' table

use std::io::Cursor;

use super::*;
use crate::OutputStream;

#[test]
fn test_format_0_offsets_are_scaled_to_bytes() {
    let data = vec![
        0x00, 0x00, // 0
        0x00, 0x0a, // 10 -> 20 bytes
        0x00, 0x14, // 20 -> 40 bytes
    ];
    let loca = TableLoca::parse(2, 0, &data).unwrap();
    assert_eq!(loca.offsets, vec![0, 20, 40]);
}

#[test]
fn test_format_1_offsets_are_taken_verbatim() {
    let data = vec![
        0x00, 0x00, 0x00, 0x00, // 0
        0x00, 0x00, 0x00, 0x14, // 20
        0x00, 0x00, 0x00, 0x14, // 20 (empty final glyph)
    ];
    let loca = TableLoca::parse(2, 1, &data).unwrap();
    assert_eq!(loca.offsets, vec![0, 20, 20]);
}

#[test]
fn test_decreasing_offsets_are_rejected() {
    let data = vec![
        0x00, 0x00, 0x00, 0x14, // 20
        0x00, 0x00, 0x00, 0x00, // 0, decreasing
    ];
    let result = TableLoca::parse(1, 1, &data);
    assert!(matches!(
        result,
        Err(SanitiseError::InvalidTable {
            tag: FontTag::LOCA,
            ..
        })
    ));
}

#[test]
fn test_missing_final_offset_is_rejected() {
    // Two glyphs need three offsets; only two are present.
    let data = vec![
        0x00, 0x00, //
        0x00, 0x0a, //
    ];
    assert!(matches!(
        TableLoca::parse(2, 0, &data),
        Err(SanitiseError::UnexpectedEof)
    ));
}

#[test]
fn test_serialise_format_0_halves_offsets() {
    let loca = TableLoca {
        offsets: vec![0, 20, 40],
    };
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    loca.serialise(0, &mut sink).unwrap();
    assert_eq!(
        sink.into_inner().into_inner(),
        vec![
            0x00, 0x00, //
            0x00, 0x0a, //
            0x00, 0x14, //
        ]
    );
}

#[test]
fn test_serialise_format_1_writes_bytes() {
    let loca = TableLoca {
        offsets: vec![0, 20],
    };
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    loca.serialise(1, &mut sink).unwrap();
    assert_eq!(
        sink.into_inner().into_inner(),
        vec![
            0x00, 0x00, 0x00, 0x00, //
            0x00, 0x00, 0x00, 0x14, //
        ]
    );
}

#[test]
fn test_serialise_format_0_rejects_oversized_offset() {
    // 0x2000_0000 halves to 0x1000_0000, which does not fit in 16 bits.
    let loca = TableLoca {
        offsets: vec![0, 0x2000_0000],
    };
    let mut sink = OutputStream::new(Cursor::new(Vec::new()));
    assert!(loca.serialise(0, &mut sink).is_err());
}
