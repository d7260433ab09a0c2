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

//! Errors related to font sanitisation.
//!
//! A sanitiser has exactly one outcome for a bad input: rejection. The
//! variants below only exist to make the rejection reason visible in
//! diagnostics; callers should treat every value as "this font was refused".

use super::tag::FontTag;

/// Errors related to font sanitisation.
#[derive(Debug, thiserror::Error)]
pub enum SanitiseError {
    /// A read would pass the end of the input buffer.
    #[error("attempted to read past the end of the input")]
    UnexpectedEof,
    /// The input is larger than the 1 GiB sanity limit.
    #[error("input of {0} bytes exceeds the 1 GiB limit")]
    InputTooLarge(usize),
    /// A recognized but unsupported container format (CFF, WOFF, ...).
    #[error("unsupported font container: {0}")]
    UnsupportedContainer(&'static str),
    /// When determining the type of font, the magic number was not recognized.
    #[error("an unknown magic number was encountered: {0:#010x}")]
    UnknownMagic(u32),
    /// The directory table count is outside the permitted range.
    #[error("invalid table count: {0}")]
    InvalidTableCount(u16),
    /// The directory search parameters do not match the table count.
    #[error("directory search parameters do not match the table count")]
    InvalidSearchParameters,
    /// The directory tags are not strictly ascending.
    #[error("table directory tags are not strictly ascending")]
    UnorderedTableDirectory,
    /// A table offset is not 4-byte aligned.
    #[error("table {0} is not 4-byte aligned")]
    TableMisaligned(FontTag),
    /// A table's byte range lies outside the input.
    #[error("table {0} lies outside the input")]
    TableOutOfBounds(FontTag),
    /// A required table is missing from the directory.
    #[error("required table {0} is missing")]
    MissingTable(FontTag),
    /// The magic number in the 'head' table is invalid.
    #[error("invalid magic number in the 'head' table; expected 0x5f0f3cf5, got {0:#010x}")]
    InvalidHeadMagicNumber(u32),
    /// A table failed validation.
    #[error("table {tag} rejected: {reason}")]
    InvalidTable {
        /// The table that was rejected.
        tag: FontTag,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// An error occurred while writing to the output sink.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// The single funnel every rejection passes through.
///
/// With the `fail-fast` feature enabled this panics at the rejection site,
/// which turns any reachable rejection into a crash a fuzzer can bisect.
/// Release builds log and return the error unchanged.
pub(crate) fn fail(error: SanitiseError) -> SanitiseError {
    if cfg!(feature = "fail-fast") {
        panic!("rejecting font: {error}");
    }
    tracing::debug!(%error, "rejecting font");
    error
}

/// Shorthand for the per-table validation failure.
pub(crate) fn reject(tag: FontTag, reason: &'static str) -> SanitiseError {
    fail(SanitiseError::InvalidTable { tag, reason })
}
