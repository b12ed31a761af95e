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

//! The search-path registry: a read-only view over a pak, local directories
//! and package archives, consulted in that order.

use ahash::AHashMap;
use cairn_core::path::{join_location, normalize_path};
use cairn_core::{Archive, FsError, PakFile};
use std::fmt;
use std::fs;
use std::io::{self, Cursor, Read};

/// Resolves resource names across three prioritized tiers.
///
/// 1. the pak, if one is registered (at most one at a time);
/// 2. local directories, in registration order;
/// 3. package archives, in no particular order.
///
/// The pak shadows everything so that per-session content (a map's embedded
/// resources) overrides installed files. Archives are the bulk fallback.
///
/// The registry does no locking. Share it behind a lock owned by the caller.
#[derive(Default)]
pub struct FileSystem {
    archives: AHashMap<String, Box<dyn Archive>>,
    directories: Vec<String>,
    pak: Option<Box<dyn PakFile>>,
}

impl FileSystem {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an opened archive under `key`, replacing any archive already
    /// registered under that key.
    pub fn register_archive(&mut self, key: impl Into<String>, archive: Box<dyn Archive>) {
        let key = key.into();
        log::debug!("Registering archive '{key}'");
        self.archives.insert(key, archive);
    }

    /// Removes the archive registered under `key`, if any.
    pub fn unregister_archive(&mut self, key: &str) {
        self.archives.remove(key);
    }

    /// Appends a local directory to the search list. Duplicates are kept.
    pub fn register_directory(&mut self, directory: impl Into<String>) {
        let directory = directory.into();
        log::debug!("Registering directory '{directory}'");
        self.directories.push(directory);
    }

    /// Removes the first occurrence of `directory` from the search list.
    pub fn unregister_directory(&mut self, directory: &str) {
        if let Some(index) = self.directories.iter().position(|d| d == directory) {
            self.directories.remove(index);
        }
    }

    /// Sets the pak, replacing the current one.
    ///
    /// This would normally be called on every map load.
    pub fn register_pak(&mut self, pak: Box<dyn PakFile>) {
        self.pak = Some(pak);
    }

    /// Removes the current pak.
    pub fn unregister_pak(&mut self) {
        self.pak = None;
    }

    /// The currently registered pak.
    pub fn pak(&self) -> Option<&dyn PakFile> {
        self.pak.as_deref()
    }

    /// The registered directories, in search order.
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// The keys of the registered archives, in no particular order.
    pub fn archive_keys(&self) -> impl Iterator<Item = &str> {
        self.archives.keys().map(String::as_str)
    }

    /// Returns `true` if an archive is registered under `key`.
    pub fn has_archive(&self, key: &str) -> bool {
        self.archives.contains_key(key)
    }

    /// Lists every registered search path: archive keys first, then
    /// directories. The pak is not listed.
    pub fn list_search_paths(&self) -> Vec<String> {
        self.archives
            .keys()
            .cloned()
            .chain(self.directories.iter().cloned())
            .collect()
    }

    /// Opens a stream over the resource `name`.
    ///
    /// The name is normalized first, so `Foo\Bar.TXT` and `foo/bar.txt`
    /// resolve identically. A pak that errors or returns nothing is a miss.
    /// A directory file that exists but cannot be read is a hard error.
    ///
    /// # Errors
    /// [`FsError::NotFound`] carrying `name` as given when no tier has it,
    /// [`FsError::Io`] when a located file or archive entry fails to open.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Read + '_>, FsError> {
        let search_path = normalize_path(name);

        if let Some(bytes) = self.read_pak(&search_path) {
            log::trace!("'{search_path}' resolved from pak");
            return Ok(Box::new(Cursor::new(bytes)));
        }

        for directory in &self.directories {
            let location = join_location(directory, &search_path);
            match fs::metadata(&location) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(err) => {
                    if err.kind() != io::ErrorKind::NotFound {
                        log::trace!("Skipping '{location}': {err}");
                    }
                    continue;
                }
            }
            let bytes = fs::read(&location).map_err(|source| FsError::Io {
                path: location.clone(),
                source,
            })?;
            log::trace!("'{search_path}' resolved from directory '{directory}'");
            return Ok(Box::new(Cursor::new(bytes)));
        }

        for (key, archive) in &self.archives {
            let Some(entry) = archive.entry(&search_path) else {
                continue;
            };
            let reader = entry.open().map_err(|source| FsError::Io {
                path: format!("{key}:{search_path}"),
                source,
            })?;
            log::trace!("'{search_path}' resolved from archive '{key}'");
            return Ok(reader);
        }

        Err(FsError::not_found(name))
    }

    /// Resolves `name` and reads it to the end.
    pub fn read(&self, name: &str) -> Result<Vec<u8>, FsError> {
        let mut reader = self.resolve(name)?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| FsError::Io {
                path: name.to_string(),
                source,
            })?;
        Ok(bytes)
    }

    /// Returns `true` if `name` resolves without error.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    fn read_pak(&self, search_path: &str) -> Option<Vec<u8>> {
        let pak = self.pak.as_ref()?;
        match pak.get_file(search_path) {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => None,
            Err(err) => {
                log::trace!("Pak miss for '{search_path}': {err}");
                None
            }
        }
    }
}

impl fmt::Debug for FileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystem")
            .field("archives", &self.archives.keys().collect::<Vec<_>>())
            .field("directories", &self.directories)
            .field("pak", &self.pak.is_some())
            .finish()
    }
}
