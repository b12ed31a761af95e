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

//! # Cairn IO
//!
//! I/O services for asset lookup: the prioritized search-path registry and
//! its construction from a GameInfo descriptor.
//!
//! ```rust,no_run
//! use cairn_core::{Archive, BoxError, KeyValue};
//! use cairn_io::{load_game_info, LoadOptions};
//!
//! # fn open_vpk(path: &str) -> Result<Box<dyn Archive>, BoxError> { Err(path.into()) }
//! # fn main() -> Result<(), cairn_core::FsError> {
//! let descriptor = KeyValue::section("GameInfo", vec![]);
//! let load = load_game_info("/games/demo/demo", &descriptor, &open_vpk, LoadOptions::lenient())?;
//! if let Some(rejected) = load.rejected() {
//!     log::warn!("some archives were skipped: {rejected}");
//! }
//! let filesystem = load.into_parts().0;
//! let bytes = filesystem.read("materials/brick/wall01.vmt")?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod filesystem;
pub mod gameinfo;
pub mod options;

pub use filesystem::FileSystem;
pub use gameinfo::{load_game_info, GameInfoLoad};
pub use options::{EnginePathsRoot, LoadOptions};
