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

//! Defines the error types of the search-path layer.

use std::error::Error;
use std::io;

/// A boxed, thread-safe error produced by a host-provided capability.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// The ordered list of search-path entries rejected while loading a GameInfo
/// descriptor.
///
/// An empty collection means nothing was rejected. The collection renders as
/// the rejected paths joined by `|`.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .paths.join("|"))]
pub struct InvalidPathCollection {
    paths: Vec<String>,
}

impl InvalidPathCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Appends a rejected path.
    pub fn push(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    /// The rejected paths, in the order they were encountered.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns the number of rejected paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Consumes the collection, returning the rejected paths.
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

/// The errors produced while building or querying a search-path registry.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The requested resource was not found in any tier.
    #[error("{name} not found in filesystem")]
    NotFound {
        /// The name as the caller requested it, before normalization.
        name: String,
    },

    /// The descriptor has no `GameInfo` node.
    #[error("gameinfo is not valid: no GameInfo node found")]
    InvalidGameInfo,

    /// Some search-path entries could not be opened. The registry that
    /// accompanies this error is still usable.
    #[error("invalid search paths: {0}")]
    InvalidPaths(InvalidPathCollection),

    /// The archive capability failed to open an archive.
    #[error("failed to open archive '{path}'")]
    ArchiveOpen {
        /// The archive path handed to the opener, without extension.
        path: String,
        /// The error reported by the archive capability.
        #[source]
        source: BoxError,
    },

    /// A local file or archive entry exists but could not be read.
    #[error("failed to read '{path}'")]
    Io {
        /// The location that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Loader options could not be parsed.
    #[error("invalid loader options: {0}")]
    Config(String),
}

impl FsError {
    /// Creates a [`FsError::NotFound`] for `name`.
    pub fn not_found(name: impl Into<String>) -> Self {
        FsError::NotFound { name: name.into() }
    }

    /// Returns `true` if this error only reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}
