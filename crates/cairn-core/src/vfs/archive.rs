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

use crate::error::BoxError;
use std::io::{self, Read};

/// Opens multi-part package archives by path.
///
/// The path has its extension stripped (`pak01` for `pak01_dir.vpk`); the
/// implementation decides how the directory file and the numbered parts are
/// located from it.
pub trait ArchiveOpener {
    /// Opens the archive rooted at `path`.
    fn open(&self, path: &str) -> Result<Box<dyn Archive>, BoxError>;
}

impl<F> ArchiveOpener for F
where
    F: Fn(&str) -> Result<Box<dyn Archive>, BoxError>,
{
    fn open(&self, path: &str) -> Result<Box<dyn Archive>, BoxError> {
        self(path)
    }
}

/// An opened multi-part archive.
pub trait Archive: Send + Sync {
    /// Looks up the entry stored under `path`, if any.
    fn entry<'a>(&'a self, path: &str) -> Option<Box<dyn ArchiveEntry<'a> + 'a>>;
}

/// A single entry of an [`Archive`].
///
/// The stream returned by [`open`](ArchiveEntry::open) borrows the archive,
/// not the entry, so it can outlive the lookup.
pub trait ArchiveEntry<'a> {
    /// Opens the entry for reading.
    fn open(&self) -> io::Result<Box<dyn Read + 'a>>;
}
