// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Capability contracts for the storage tiers of the virtual file system.
//!
//! The search-path registry never decodes a container format itself. It sees
//! a session pak through [`PakFile`] and multi-part archives through
//! [`ArchiveOpener`], [`Archive`] and [`ArchiveEntry`]. All names handed to
//! these traits are already normalized (see [`crate::path::normalize_path`]).

mod archive;
mod pak;

pub use archive::{Archive, ArchiveEntry, ArchiveOpener};
pub use pak::PakFile;
