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

//! Builds a [`FileSystem`] from the `SearchPaths` section of a GameInfo
//! descriptor.
//!
//! GameInfo definitions are unreliable in the wild: shipped descriptors often
//! reference archives that were renamed or never installed. With
//! [`LoadOptions::allow_invalid_locations`] set, such entries are skipped and
//! reported together alongside a usable registry.

use crate::filesystem::FileSystem;
use crate::options::{EnginePathsRoot, LoadOptions};
use cairn_core::path::{is_absolute_location, to_forward_slashes};
use cairn_core::{ArchiveOpener, FsError, InvalidPathCollection, KeyValueNode};
use std::path::Path;
use walkdir::WalkDir;

const GAME_INFO_KEY: &str = "GameInfo";
const FILE_SYSTEM_KEY: &str = "FileSystem";
const SEARCH_PATHS_KEY: &str = "SearchPaths";

const GAMEINFO_PATH_TOKEN: &str = "|gameinfo_path|";
const ALL_SOURCE_ENGINE_PATHS_TOKEN: &str = "|all_source_engine_paths|";

const ARCHIVE_EXTENSION: &str = ".vpk";
const DIR_ARCHIVE_SUFFIX: &str = "_dir.vpk";

/// The outcome of [`load_game_info`]: a usable registry, plus the entries
/// that were skipped when invalid locations are allowed.
#[derive(Debug)]
pub struct GameInfoLoad {
    filesystem: FileSystem,
    rejected: Option<InvalidPathCollection>,
}

impl GameInfoLoad {
    /// The populated registry.
    pub fn filesystem(&self) -> &FileSystem {
        &self.filesystem
    }

    /// Mutable access to the populated registry, e.g. to register a pak.
    pub fn filesystem_mut(&mut self) -> &mut FileSystem {
        &mut self.filesystem
    }

    /// The archives that failed to open, in encounter order. Always `None`
    /// in strict mode, and never an empty collection.
    ///
    /// Each entry is the path handed to the archive opener (anchored at the
    /// base path, with `.vpk` or `_dir.vpk` stripped), not the raw
    /// `SearchPaths` template. A sibling `pak01_dir.vpk` found through
    /// `|gameinfo_path|` is reported as `<base>/pak01`.
    pub fn rejected(&self) -> Option<&InvalidPathCollection> {
        self.rejected.as_ref()
    }

    /// Splits the outcome into the registry and the rejected entries.
    pub fn into_parts(self) -> (FileSystem, Option<InvalidPathCollection>) {
        (self.filesystem, self.rejected)
    }

    /// Returns the registry, or [`FsError::InvalidPaths`] if anything was
    /// rejected.
    pub fn into_strict(self) -> Result<FileSystem, FsError> {
        match self.rejected {
            Some(rejected) => Err(FsError::InvalidPaths(rejected)),
            None => Ok(self.filesystem),
        }
    }
}

/// Reads search paths from a GameInfo descriptor into a new [`FileSystem`].
///
/// `root` is either the `GameInfo` node itself or a node that has it as a
/// direct child. `base_path` is the directory holding the descriptor; it
/// anchors `|gameinfo_path|`, relative entries and `mod` entries.
///
/// Every entry of `GameInfo/FileSystem/SearchPaths` becomes either a
/// directory or, when it ends in `.vpk`, an archive opened through `opener`.
/// Expanding `|gameinfo_path|` also opens every `*_dir.vpk` found directly in
/// `base_path`.
///
/// # Errors
/// [`FsError::InvalidGameInfo`] when no `GameInfo` node exists. In strict
/// mode, the first [`FsError::ArchiveOpen`] aborts the load.
pub fn load_game_info<N: KeyValueNode>(
    base_path: impl AsRef<Path>,
    root: &N,
    opener: &dyn ArchiveOpener,
    options: LoadOptions,
) -> Result<GameInfoLoad, FsError> {
    let game_info = if root.key() == GAME_INFO_KEY {
        root
    } else {
        root.find(GAME_INFO_KEY).ok_or(FsError::InvalidGameInfo)?
    };

    // A missing FileSystem or SearchPaths section just means no entries.
    let entries = game_info
        .find(FILE_SYSTEM_KEY)
        .and_then(|node| node.find(SEARCH_PATHS_KEY))
        .map(|node| node.children())
        .unwrap_or_default();

    let mut loader = SearchPathLoader::new(base_path.as_ref(), opener, options);
    for entry in entries {
        let Some(template) = entry.as_str() else {
            log::debug!("Skipping search path section '{}'", entry.key());
            continue;
        };
        loader.add_entry(entry.key(), template)?;
    }

    Ok(loader.finish())
}

struct SearchPathLoader<'o> {
    base_path: String,
    game_dir: String,
    engine_root: String,
    opener: &'o dyn ArchiveOpener,
    allow_invalid_locations: bool,
    filesystem: FileSystem,
    rejected: InvalidPathCollection,
}

impl<'o> SearchPathLoader<'o> {
    fn new(base_path: &Path, opener: &'o dyn ArchiveOpener, options: LoadOptions) -> Self {
        let base_path = canonical_base_path(base_path);

        // The last segment of the base path is the game directory (e.g.
        // `cstrike`); its parent holds the sibling game directories.
        let (parent, game_dir) = match base_path.rfind('/') {
            Some(index) => (&base_path[..index], &base_path[index + 1..]),
            None => (base_path.as_str(), ""),
        };
        let engine_root = match options.engine_paths_root {
            EnginePathsRoot::BasePath => base_path.clone(),
            EnginePathsRoot::ParentDirectory => parent.to_string(),
        };
        let game_dir = game_dir.to_string();

        Self {
            base_path,
            game_dir,
            engine_root,
            opener,
            allow_invalid_locations: options.allow_invalid_locations,
            filesystem: FileSystem::new(),
            rejected: InvalidPathCollection::new(),
        }
    }

    fn add_entry(&mut self, category: &str, template: &str) -> Result<(), FsError> {
        let mut path = trim_location(template).to_string();

        let gameinfo_root = format!("{}/", self.base_path);
        if let Some(expanded) = replace_token(&path, GAMEINFO_PATH_TOKEN, &gameinfo_root) {
            path = expanded;
            self.register_sibling_archives()?;
        }

        let engine_root = format!("{}/", self.engine_root);
        if let Some(expanded) = replace_token(&path, ALL_SOURCE_ENGINE_PATHS_TOKEN, &engine_root) {
            path = expanded;
        }

        // Entries written relative to the engine root may name the game
        // directory itself.
        if !self.game_dir.is_empty() {
            if let Some(rest) = path.strip_prefix(&format!("{}/", self.game_dir)) {
                path = rest.to_string();
            }
        }

        if category.to_ascii_lowercase().contains("mod") && !path.starts_with(&self.base_path) {
            path = format!("{}/{}", self.base_path, path);
        }

        let path = collapse_separators(&path);
        let path = trim_location(&path);

        if let Some(stem) = strip_archive_extension(path) {
            let archive_path = self.anchor(stem);
            return self.open_archive(archive_path.clone(), archive_path);
        }

        let directory = clean_directory(&self.anchor(path.strip_suffix("/*").unwrap_or(path)));
        self.filesystem.register_directory(directory);
        Ok(())
    }

    /// Opens every `*_dir.vpk` directly inside the base path.
    fn register_sibling_archives(&mut self) -> Result<(), FsError> {
        // Symlinked `_dir.vpk` files count as siblings too.
        let names: Vec<String> = WalkDir::new(&self.base_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
            .filter(|name| name.ends_with(DIR_ARCHIVE_SUFFIX))
            .collect();

        for name in names {
            let key = self.join_base(&name);
            let archive_path = key[..key.len() - DIR_ARCHIVE_SUFFIX.len()].to_string();
            self.open_archive(archive_path, key)?;
        }
        Ok(())
    }

    fn open_archive(&mut self, path: String, key: String) -> Result<(), FsError> {
        match self.opener.open(&path) {
            Ok(archive) => {
                self.filesystem.register_archive(key, archive);
                Ok(())
            }
            Err(source) if self.allow_invalid_locations => {
                log::warn!("Skipping archive '{path}': {source}");
                self.rejected.push(path);
                Ok(())
            }
            Err(source) => Err(FsError::ArchiveOpen { path, source }),
        }
    }

    /// Anchors a relative location at the base path.
    fn anchor(&self, path: &str) -> String {
        if is_absolute_location(path) {
            path.to_string()
        } else {
            self.join_base(path)
        }
    }

    /// Joins `rest` onto the base path without doubling the separator.
    fn join_base(&self, rest: &str) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), rest)
    }

    fn finish(self) -> GameInfoLoad {
        log::info!(
            "Loaded {} search paths from GameInfo ({} rejected)",
            self.filesystem.list_search_paths().len(),
            self.rejected.len()
        );
        let rejected = (self.allow_invalid_locations && !self.rejected.is_empty())
            .then_some(self.rejected);
        GameInfoLoad {
            filesystem: self.filesystem,
            rejected,
        }
    }
}

/// Makes `base_path` absolute, with forward slashes and no trailing slash.
fn canonical_base_path(base_path: &Path) -> String {
    let absolute = std::path::absolute(base_path).unwrap_or_else(|_| base_path.to_path_buf());
    let mut path = to_forward_slashes(&absolute.to_string_lossy());
    while path.len() > 1 && path.ends_with('/') && !path.ends_with(":/") {
        path.pop();
    }
    path
}

fn trim_location(path: &str) -> &str {
    path.trim_matches(|c: char| c == '"' || c.is_whitespace())
}

/// Replaces every ASCII case-insensitive occurrence of `token`, which must be
/// lowercase. Returns `None` when `token` does not occur.
fn replace_token(haystack: &str, token: &str, replacement: &str) -> Option<String> {
    // ASCII lowercasing keeps byte offsets, so indices map back onto `haystack`.
    let lowered = haystack.to_ascii_lowercase();
    let mut matches = lowered.match_indices(token).peekable();
    matches.peek()?;

    let mut expanded = String::with_capacity(haystack.len() + replacement.len());
    let mut last = 0;
    for (start, _) in matches {
        expanded.push_str(&haystack[last..start]);
        expanded.push_str(replacement);
        last = start + token.len();
    }
    expanded.push_str(&haystack[last..]);
    Some(expanded)
}

fn collapse_separators(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

fn strip_archive_extension(path: &str) -> Option<&str> {
    let split = path.len().checked_sub(ARCHIVE_EXTENSION.len())?;
    let (stem, extension) = (path.get(..split)?, path.get(split..)?);
    extension
        .eq_ignore_ascii_case(ARCHIVE_EXTENSION)
        .then_some(stem)
}

/// Drops `.` segments and the trailing separator of a directory location.
fn clean_directory(path: &str) -> String {
    let mut path = path.to_string();
    while path.contains("/./") {
        path = path.replace("/./", "/");
    }
    if let Some(stripped) = path.strip_suffix("/.") {
        path = stripped.to_string();
    }
    while path.len() > 1 && path.ends_with('/') && !path.ends_with(":/") {
        path.pop();
    }
    path
}
