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

//! Tests for the incremental checksum

use super::*;

#[test]
fn test_whole_words() {
    let mut state = ChecksumState::default();
    state.update(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x03]);
    assert_eq!(state.value(), Some(0x00010000 + 0x00020003));
}

#[test]
fn test_partial_word_is_held() {
    let mut state = ChecksumState::default();
    state.update(&[0x00, 0x01]);
    assert_eq!(state.value(), None);
    // Completing the word folds it in.
    state.update(&[0x02, 0x03]);
    assert_eq!(state.value(), Some(0x00010203));
}

#[test]
fn test_byte_at_a_time_matches_single_update() {
    let bytes = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x02, 0x03];
    let mut whole = ChecksumState::default();
    whole.update(&bytes);
    let mut pieces = ChecksumState::default();
    for byte in bytes {
        pieces.update(&[byte]);
    }
    assert_eq!(whole, pieces);
}

#[test]
fn test_sum_wraps() {
    let mut state = ChecksumState::default();
    state.update(&[0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x02]);
    assert_eq!(state.value(), Some(1));
}

#[test]
fn test_reset() {
    let mut state = ChecksumState::default();
    state.update(&[0x01, 0x02, 0x03]);
    state.reset();
    assert_eq!(state, ChecksumState::default());
    assert_eq!(state.value(), Some(0));
}

#[test]
fn test_fold_restores_saved_partial() {
    // Simulates the backfill protocol: a stream with a dangling partial word
    // is saved, the backfilled words accumulate from zero, and the fold adds
    // them together while reinstating the partial.
    let mut state = ChecksumState::default();
    state.update(&[0x00, 0x00, 0x00, 0x05, 0xaa]); // one word + partial
    let saved = state;

    state.reset();
    state.update(&[0x00, 0x00, 0x00, 0x07]); // the backfilled word
    state.fold(saved);

    // The partial 0xaa is completed by the bytes that follow the restore.
    state.update(&[0xbb, 0xcc, 0xdd]);
    assert_eq!(state.value(), Some(0x05 + 0x07 + 0xaabbccdd));
}
