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

//! Incremental OpenType-style checksum.
//!
//! The checksum over a byte stream is defined by grouping it into
//! consecutive 4-byte big-endian words and summing those words modulo 2^32.
//! It is fed incrementally, so a partial trailing word is parked in a
//! holding buffer and folded into the sum only once it completes.

use std::num::Wrapping;

use byteorder::{BigEndian, ByteOrder};

/// Running 32-bit word-sum state.
///
/// The state is a plain value; the output sink hands copies of it out for
/// its save/reset/restore protocol, which is what lets a backward seek (to
/// backfill a directory) contribute its bytes to the checksum without
/// disturbing the word phase of the stream around it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChecksumState {
    sum: Wrapping<u32>,
    hold: [u8; 4],
    held: usize,
}

impl ChecksumState {
    /// Feeds `bytes` into the running sum.
    pub fn update(&mut self, mut bytes: &[u8]) {
        // Finish off any partial word left over from the previous update.
        while self.held != 0 && !bytes.is_empty() {
            self.hold[self.held] = bytes[0];
            self.held += 1;
            bytes = &bytes[1..];
            if self.held == 4 {
                self.sum += Wrapping(u32::from_be_bytes(self.hold));
                self.held = 0;
            }
        }
        let mut words = bytes.chunks_exact(4);
        for word in words.by_ref() {
            self.sum += Wrapping(BigEndian::read_u32(word));
        }
        for &byte in words.remainder() {
            self.hold[self.held] = byte;
            self.held += 1;
        }
    }

    /// Returns the checksum, or `None` while a partial word is held.
    pub fn value(&self) -> Option<u32> {
        (self.held == 0).then_some(self.sum.0)
    }

    /// Zeroes the sum and the holding buffer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Folds a previously saved state back in: the saved sum is added to the
    /// current one and the saved partial word is reinstated. Callers only do
    /// this at word-aligned positions, where the current holding buffer is
    /// empty.
    pub fn fold(&mut self, saved: ChecksumState) {
        self.sum += saved.sum;
        self.hold = saved.hold;
        self.held = saved.held;
    }
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
