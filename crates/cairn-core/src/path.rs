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

//! Path rules shared by registration and lookup.
//!
//! Resource names are compared in a single canonical form: lowercase, with
//! forward slashes. Archive entries are stored that way, so every lookup
//! boundary runs names through [`normalize_path`] before probing a tier.

/// Normalizes a resource name for lookup.
///
/// Lowercases the name and rewrites every `\` into `/`. The transform is
/// idempotent, and two names that differ only by case or separator style
/// normalize to the same string.
///
/// # Example
///
/// ```rust
/// use cairn_core::path::normalize_path;
///
/// assert_eq!(normalize_path("Materials\\Brick/Wall01.VMT"), "materials/brick/wall01.vmt");
/// ```
pub fn normalize_path(name: &str) -> String {
    to_forward_slashes(&name.to_lowercase())
}

/// Rewrites `\` separators into `/` without touching case.
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns `true` if `path` is anchored on its own.
///
/// A location is absolute when it starts with a separator (`/` or `\`) or
/// with a drive letter followed by one (`C:/`, `C:\`). Anything else is read
/// relative to the game directory by the GameInfo loader.
pub fn is_absolute_location(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with('\\') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

/// Joins a registered directory and a normalized resource name.
pub fn join_location(directory: &str, name: &str) -> String {
    let directory = directory.trim_end_matches(['/', '\\']);
    let name = name.trim_start_matches('/');
    format!("{directory}/{name}")
}
