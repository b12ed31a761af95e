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

//! In-memory capabilities shared by the integration tests.

#![allow(dead_code)]

use cairn_core::{Archive, ArchiveEntry, ArchiveOpener, BoxError, PakFile};
use std::collections::HashMap;
use std::io::{self, Read};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A pak backed by a map of normalized names to bytes.
#[derive(Default)]
pub struct MemoryPak {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryPak {
    pub fn with(mut self, name: &str, bytes: &[u8]) -> Self {
        self.files.insert(name.to_string(), bytes.to_vec());
        self
    }
}

impl PakFile for MemoryPak {
    fn get_file(&self, path: &str) -> Result<Vec<u8>, BoxError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("{path} not in pak").into())
    }
}

/// An archive backed by a map of normalized names to bytes.
#[derive(Default, Clone)]
pub struct MemoryArchive {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn with(mut self, name: &str, bytes: &[u8]) -> Self {
        self.entries.insert(name.to_string(), bytes.to_vec());
        self
    }
}

struct MemoryEntry<'a> {
    data: &'a [u8],
}

impl<'a> ArchiveEntry<'a> for MemoryEntry<'a> {
    fn open(&self) -> io::Result<Box<dyn Read + 'a>> {
        Ok(Box::new(self.data))
    }
}

impl Archive for MemoryArchive {
    fn entry<'a>(&'a self, path: &str) -> Option<Box<dyn ArchiveEntry<'a> + 'a>> {
        self.entries
            .get(path)
            .map(|data| Box::new(MemoryEntry { data }) as Box<dyn ArchiveEntry<'a> + 'a>)
    }
}

/// An archive whose entries exist but cannot be opened.
pub struct BrokenArchive;

struct BrokenEntry;

impl<'a> ArchiveEntry<'a> for BrokenEntry {
    fn open(&self) -> io::Result<Box<dyn Read + 'a>> {
        Err(io::Error::new(io::ErrorKind::InvalidData, "corrupt chunk"))
    }
}

impl Archive for BrokenArchive {
    fn entry<'a>(&'a self, _path: &str) -> Option<Box<dyn ArchiveEntry<'a> + 'a>> {
        Some(Box::new(BrokenEntry))
    }
}

/// An opener that knows a fixed set of archive paths and records every
/// path it was asked to open.
#[derive(Default)]
pub struct MemoryOpener {
    archives: HashMap<String, MemoryArchive>,
    pub requests: std::cell::RefCell<Vec<String>>,
}

impl MemoryOpener {
    pub fn with(mut self, path: &str, archive: MemoryArchive) -> Self {
        self.archives.insert(path.to_string(), archive);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ArchiveOpener for MemoryOpener {
    fn open(&self, path: &str) -> Result<Box<dyn Archive>, BoxError> {
        self.requests.borrow_mut().push(path.to_string());
        match self.archives.get(path) {
            Some(archive) => Ok(Box::new(archive.clone())),
            None => Err(Box::new(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path}_dir.vpk does not exist"),
            ))),
        }
    }
}
