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

//! 'OS/2' table.
//!
//! The OS/2 table has a lot of members, none of which influence parsing of
//! any other table, so the whole thing is kept as an opaque byte copy and
//! written back out verbatim.

use crate::{
    error::SanitiseError,
    font::{required, SanitisedFont},
    tag::FontTag,
    FontSink,
};

/// 'OS/2' table, retained as an opaque passthrough.
#[derive(Debug, Default)]
pub struct TableOs2 {
    pub(crate) data: Vec<u8>,
}

impl TableOs2 {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, SanitiseError> {
        Ok(TableOs2 {
            data: data.to_vec(),
        })
    }

    pub(crate) fn serialise(
        &self,
        out: &mut dyn FontSink,
    ) -> Result<(), SanitiseError> {
        out.write(&self.data)
    }
}

pub(crate) fn parse(
    font: &mut SanitisedFont,
    data: &[u8],
) -> Result<(), SanitiseError> {
    font.os2 = Some(TableOs2::parse(data)?);
    Ok(())
}

pub(crate) fn should_serialise(font: &SanitisedFont) -> bool {
    font.os2.is_some()
}

pub(crate) fn serialise(
    font: &SanitisedFont,
    out: &mut dyn FontSink,
) -> Result<(), SanitiseError> {
    required(&font.os2, FontTag::OS2)?.serialise(out)
}

#[cfg(test)]
#[path = "os2_test.rs"]
mod tests;
