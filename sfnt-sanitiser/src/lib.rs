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

//! Sanitiser for untrusted OpenType/TrueType font files.
//!
//! Given a byte buffer that purports to be a TrueType-outline font, the
//! sanitiser either emits a structurally valid font containing only
//! recognized, validated tables - with hinting bytecode removed and all
//! structural metadata (directory, search parameters, offsets, checksums)
//! rebuilt - or fails hard. Malformed inputs are rejected, never repaired;
//! the point is defense in depth against font-parser exploits in whatever
//! rasterizer consumes the output.
//!
//! The headline property is idempotence: sanitising the sanitiser's own
//! output reproduces it byte for byte.
//!
//! # Example
//! ```no_run
//! use std::io::Cursor;
//! use sfnt_sanitiser::{process, OutputStream};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let input = std::fs::read("font.ttf")?;
//!     let mut sink = OutputStream::new(Cursor::new(Vec::new()));
//!     process(&mut sink, &input)?;
//!     std::fs::write("font.clean.ttf", sink.into_inner().into_inner())?;
//!     Ok(())
//! }
//! ```

use checksum::ChecksumState;
use error::SanitiseError;
use tag::FontTag;

pub mod buffer;
pub mod checksum;
pub mod error;
pub mod font;
pub mod magic;
pub mod stream;
pub mod table;
pub mod tag;

pub use font::process;
pub use stream::OutputStream;

/// The output contract of the sanitiser: an append-with-seek byte sink that
/// keeps a running OpenType checksum over everything written through it.
///
/// Backward seeks exist solely so the orchestrator can backfill directory
/// records whose offsets are only known after the tables they describe have
/// been written. The save/reset/restore surface keeps those backfills from
/// corrupting the checksum of the surrounding stream: save before seeking
/// back, reset, write the records, restore, seek forward again.
///
/// Implementations may back the sink with a file, a memory buffer, or a
/// pipe; a non-seekable destination has to buffer internally.
pub trait FontSink {
    /// Writes `bytes` at the current position and feeds them to the running
    /// checksum.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SanitiseError>;

    /// Returns the current position.
    fn tell(&mut self) -> Result<u64, SanitiseError>;

    /// Repositions the sink at `position` (absolute).
    fn seek(&mut self, position: u64) -> Result<(), SanitiseError>;

    /// Returns the running checksum, or `None` while a partial word is
    /// buffered.
    fn checksum(&self) -> Option<u32>;

    /// Captures the running checksum state.
    fn save_checksum(&self) -> ChecksumState;

    /// Zeroes the running checksum state.
    fn reset_checksum(&mut self);

    /// Folds a previously saved checksum state back into the running one.
    fn restore_checksum(&mut self, saved: ChecksumState);

    /// Writes `count` zero bytes, e.g. to reserve space for a later
    /// backfill or to pad a table to its 4-byte alignment.
    fn pad(&mut self, mut count: usize) -> Result<(), SanitiseError> {
        const ZEROS: [u8; 4] = [0; 4];
        while count >= ZEROS.len() {
            self.write(&ZEROS)?;
            count -= ZEROS.len();
        }
        if count > 0 {
            self.write(&ZEROS[..count])?;
        }
        Ok(())
    }

    /// Writes a big-endian unsigned 16-bit value.
    fn write_u16(&mut self, value: u16) -> Result<(), SanitiseError> {
        self.write(&value.to_be_bytes())
    }

    /// Writes a big-endian signed 16-bit value.
    fn write_i16(&mut self, value: i16) -> Result<(), SanitiseError> {
        self.write(&value.to_be_bytes())
    }

    /// Writes a big-endian unsigned 32-bit value.
    fn write_u32(&mut self, value: u32) -> Result<(), SanitiseError> {
        self.write(&value.to_be_bytes())
    }

    /// Writes a big-endian 64-bit value (the opaque longDateTime).
    fn write_u64(&mut self, value: u64) -> Result<(), SanitiseError> {
        self.write(&value.to_be_bytes())
    }

    /// Writes a four-character table tag, unswapped.
    fn write_tag(&mut self, tag: FontTag) -> Result<(), SanitiseError> {
        self.write(&tag.data())
    }
}
