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

//! Loader options for GameInfo-driven initialization.
//!
//! Options can be built in code or read from a small TOML manifest:
//!
//! ```toml
//! allow_invalid_locations = true
//! engine_paths_root = "base_path"
//! ```

use cairn_core::FsError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The directory `|all_source_engine_paths|` expands to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnginePathsRoot {
    /// The directory containing the GameInfo descriptor.
    BasePath,
    /// The parent of that directory, where sibling game directories live.
    #[default]
    ParentDirectory,
}

/// Policy switches for [`load_game_info`](crate::gameinfo::load_game_info).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Skip archives that fail to open and report them together instead of
    /// aborting on the first one.
    pub allow_invalid_locations: bool,
    /// Where `|all_source_engine_paths|` points.
    pub engine_paths_root: EnginePathsRoot,
}

impl LoadOptions {
    /// Options that abort on the first archive that fails to open.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Options that collect archives that fail to open and keep going.
    pub fn lenient() -> Self {
        Self {
            allow_invalid_locations: true,
            ..Self::default()
        }
    }

    /// Sets the directory `|all_source_engine_paths|` expands to.
    pub fn with_engine_paths_root(mut self, root: EnginePathsRoot) -> Self {
        self.engine_paths_root = root;
        self
    }

    /// Parses options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, FsError> {
        toml::from_str(source).map_err(|e| FsError::Config(e.to_string()))
    }

    /// Loads options from a TOML manifest on disk.
    /// If the file does not exist, the default (strict) options are returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FsError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No '{}' found. Using default loader options.", path.display());
            return Ok(Self::default());
        }
        let source = fs::read_to_string(path).map_err(|source| FsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
