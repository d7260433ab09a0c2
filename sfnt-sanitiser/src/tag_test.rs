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

//! Tests for the font tag module

use super::*;

#[test]
fn test_tag_data_round_trip() {
    let tag = FontTag::new(*b"glyf");
    assert_eq!(tag.data(), *b"glyf");
    assert_eq!(tag, FontTag::GLYF);
}

#[test]
fn test_tag_display() {
    assert_eq!(FontTag::OS2.to_string(), "OS/2");
    assert_eq!(format!("{:?}", FontTag::HEAD), "FontTag(head)");
}

#[test]
fn test_tag_ordering_matches_big_endian_numeric_order() {
    // 'OS/2' (0x4f532f32) sorts before 'cmap' (0x636d6170), which is the
    // ASCII-uppercase-first order the sfnt directory relies on.
    assert!(FontTag::OS2 < FontTag::CMAP);
    assert!(FontTag::CMAP < FontTag::GLYF);
    assert!(FontTag::GLYF < FontTag::HEAD);
    assert!(FontTag::LOCA < FontTag::MAXP);

    let mut tags = vec![FontTag::POST, FontTag::OS2, FontTag::GLYF];
    tags.sort();
    assert_eq!(tags, vec![FontTag::OS2, FontTag::GLYF, FontTag::POST]);
}

#[test]
fn test_tag_ordering_is_unsigned() {
    // A tag with the high bit set must sort after ASCII tags.
    let high = FontTag::new([0xff, 0x00, 0x00, 0x00]);
    assert!(FontTag::POST < high);
}
