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

//! # Cairn Core
//!
//! Foundational crate containing the capability traits, path rules, and error
//! types shared by the search-path layer.
//!
//! Nothing in here touches the disk. Archive formats, descriptor parsing and
//! the session pak are consumed through the traits in [`vfs`] and
//! [`keyvalues`], so hosts can plug in whichever implementation they ship.

#![warn(missing_docs)]

pub mod error;
pub mod keyvalues;
pub mod path;
pub mod vfs;

pub use error::{BoxError, FsError, InvalidPathCollection};
pub use keyvalues::{KeyValue, KeyValueNode};
pub use path::normalize_path;
pub use vfs::{Archive, ArchiveEntry, ArchiveOpener, PakFile};
