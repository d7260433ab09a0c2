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

//! Bounds-checked cursor over an untrusted input buffer.
//!
//! Every parser in this crate reads through [`Buffer`] exclusively; a read
//! that would pass the end of the slice fails with
//! [`SanitiseError::UnexpectedEof`] instead of being clamped or wrapped.

use byteorder::{BigEndian, ByteOrder};

use crate::{
    error::{fail, SanitiseError},
    tag::FontTag,
};

/// A cursor over an immutable byte slice with big-endian primitive reads.
pub struct Buffer<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Buffer<'a> {
    /// Creates a new cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Takes the next `count` bytes, advancing the cursor.
    fn take(&mut self, count: usize) -> Result<&'a [u8], SanitiseError> {
        if count > self.data.len().saturating_sub(self.offset) {
            return Err(fail(SanitiseError::UnexpectedEof));
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    /// Advances the cursor by `count` bytes without reading them.
    pub fn skip(&mut self, count: usize) -> Result<(), SanitiseError> {
        self.take(count).map(|_| ())
    }

    /// Reads an unsigned 8-bit value.
    pub fn read_u8(&mut self) -> Result<u8, SanitiseError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a big-endian unsigned 16-bit value.
    pub fn read_u16(&mut self) -> Result<u16, SanitiseError> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    /// Reads a big-endian signed 16-bit value.
    pub fn read_i16(&mut self) -> Result<i16, SanitiseError> {
        Ok(self.read_u16()? as i16)
    }

    /// Reads a big-endian unsigned 32-bit value.
    pub fn read_u32(&mut self) -> Result<u32, SanitiseError> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    /// Reads a 64-bit value.
    ///
    /// The only 64-bit quantity in the format is the opaque longDateTime;
    /// reading it big-endian round-trips the bytes exactly.
    pub fn read_u64(&mut self) -> Result<u64, SanitiseError> {
        Ok(BigEndian::read_u64(self.take(8)?))
    }

    /// Reads a four-character table tag. Tags are not byte-swapped.
    pub fn read_tag(&mut self) -> Result<FontTag, SanitiseError> {
        let bytes = self.take(FontTag::SIZE)?;
        Ok(FontTag::new([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], SanitiseError> {
        self.take(count)
    }

    /// Returns the current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Repositions the cursor. Positions past the end are permitted; any
    /// subsequent read will fail its own bounds check.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Returns the number of bytes between the cursor and the end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod tests;
