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

//! Checksumming output stream.

use std::io::{Seek, SeekFrom, Write};

use crate::{checksum::ChecksumState, error::SanitiseError, FontSink};

/// [`FontSink`] implementation over anything that is `Write + Seek` - a
/// file, or an in-memory `Cursor<Vec<u8>>`.
pub struct OutputStream<W: Write + Seek> {
    inner: W,
    checksum: ChecksumState,
}

impl<W: Write + Seek> OutputStream<W> {
    /// Creates a sink writing to `inner`, positioned wherever `inner`
    /// currently is.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            checksum: ChecksumState::default(),
        }
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Seek> FontSink for OutputStream<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SanitiseError> {
        self.inner.write_all(bytes)?;
        self.checksum.update(bytes);
        Ok(())
    }

    fn tell(&mut self) -> Result<u64, SanitiseError> {
        Ok(self.inner.stream_position()?)
    }

    fn seek(&mut self, position: u64) -> Result<(), SanitiseError> {
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    fn checksum(&self) -> Option<u32> {
        self.checksum.value()
    }

    fn save_checksum(&self) -> ChecksumState {
        self.checksum
    }

    fn reset_checksum(&mut self) {
        self.checksum.reset();
    }

    fn restore_checksum(&mut self, saved: ChecksumState) {
        self.checksum.fold(saved);
    }
}

#[cfg(test)]
#[path = "stream_test.rs"]
mod tests;
