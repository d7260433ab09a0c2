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

//! Sniffing of the sfnt version field.
//!
//! Everything except TrueType outlines is refused, but refusing a WOFF as
//! "unknown magic" sends whoever reads the diagnostic in the wrong
//! direction. The well-known container magics are kept around purely so the
//! rejection can name what was actually handed in.

/// sfnt version of a font with TrueType outlines; the only container the
/// sanitiser accepts.
pub const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;

/// Container magics recognized only to be refused by name.
const KNOWN_CONTAINERS: &[([u8; 4], &str)] = &[
    (*b"OTTO", "OpenType with CFF outlines ('OTTO')"),
    (*b"ttcf", "TrueType collection ('ttcf')"),
    (*b"true", "Apple legacy TrueType ('true')"),
    (*b"typ1", "PostScript Type 1 ('typ1')"),
    (*b"wOFF", "WOFF 1.0 ('wOFF')"),
    (*b"wOF2", "WOFF 2.0 ('wOF2')"),
];

/// Names the container format behind a version field, if it is one of the
/// well-known ones.
pub(crate) fn known_container(version: u32) -> Option<&'static str> {
    let tag = version.to_be_bytes();
    KNOWN_CONTAINERS
        .iter()
        .find(|(magic, _)| *magic == tag)
        .map(|(_, name)| *name)
}

#[cfg(test)]
#[path = "magic_test.rs"]
mod tests;
