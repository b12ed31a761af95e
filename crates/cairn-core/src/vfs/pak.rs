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

/// A single, session-scoped resource bundle consulted before every other tier.
///
/// A typical pak is the resource lump embedded in the currently loaded map.
pub trait PakFile: Send + Sync {
    /// Returns the bytes stored under `path`.
    ///
    /// The registry treats an error or an empty buffer as a miss, so
    /// implementors are free to report a missing entry either way.
    fn get_file(&self, path: &str) -> Result<Vec<u8>, BoxError>;
}
