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

//! Per-table validators and serializers.
//!
//! One module per allow-listed tag. Each owns the in-memory model the
//! sanitiser retains for its table, plus `parse`/`should_serialise`/
//! `serialise` entry points wired into the registry in [`crate::font`].

pub mod cmap;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;

// Export the retained table models
pub use cmap::TableCmap;
pub use glyf::TableGlyf;
pub use head::TableHead;
pub use hhea::TableHhea;
pub use hmtx::TableHmtx;
pub use loca::TableLoca;
pub use maxp::TableMaxp;
pub use name::TableName;
pub use os2::TableOs2;
pub use post::TablePost;
