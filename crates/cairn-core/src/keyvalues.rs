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

//! The hierarchical descriptor interface and an in-memory tree implementing it.
//!
//! GameInfo descriptors are KeyValues documents: nested sections of ordered,
//! keyed children where a key may repeat (`game` usually does). Parsing the
//! text is left to the host; the loader only walks a tree through
//! [`KeyValueNode`]. [`KeyValue`] is the owned tree used when a host has no
//! node type of its own, and in fixtures.

use serde::{Deserialize, Serialize};

/// Read access to a node of a hierarchical descriptor.
pub trait KeyValueNode {
    /// The node's own key.
    fn key(&self) -> &str;

    /// The first direct child keyed `key`.
    fn find(&self, key: &str) -> Option<&Self>;

    /// The direct children, in document order.
    fn children(&self) -> Vec<&Self>;

    /// The node's value, if it is a leaf.
    fn as_str(&self) -> Option<&str>;
}

/// The value held by a [`KeyValue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A leaf string.
    String(String),
    /// A nested section with ordered children.
    Section(Vec<KeyValue>),
}

/// An owned descriptor node.
///
/// # Example
///
/// ```rust
/// use cairn_core::keyvalues::{KeyValue, KeyValueNode};
///
/// let root = KeyValue::section("GameInfo", vec![
///     KeyValue::section("FileSystem", vec![
///         KeyValue::section("SearchPaths", vec![
///             KeyValue::string("game", "|gameinfo_path|."),
///         ]),
///     ]),
/// ]);
///
/// let paths = root.find("FileSystem").and_then(|fs| fs.find("SearchPaths")).unwrap();
/// assert_eq!(paths.children()[0].as_str(), Some("|gameinfo_path|."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    key: String,
    value: Value,
}

impl KeyValue {
    /// Creates a leaf node.
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::String(value.into()),
        }
    }

    /// Creates a section node with the given children.
    pub fn section(key: impl Into<String>, children: Vec<KeyValue>) -> Self {
        Self {
            key: key.into(),
            value: Value::Section(children),
        }
    }

    /// Appends a child. A leaf is turned into an empty section first.
    pub fn push(&mut self, child: KeyValue) {
        match &mut self.value {
            Value::Section(children) => children.push(child),
            Value::String(_) => self.value = Value::Section(vec![child]),
        }
    }

    /// The node's value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl KeyValueNode for KeyValue {
    fn key(&self) -> &str {
        &self.key
    }

    fn find(&self, key: &str) -> Option<&Self> {
        match &self.value {
            Value::Section(children) => children.iter().find(|child| child.key == key),
            Value::String(_) => None,
        }
    }

    fn children(&self) -> Vec<&Self> {
        match &self.value {
            Value::Section(children) => children.iter().collect(),
            Value::String(_) => Vec::new(),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(value) => Some(value),
            Value::Section(_) => None,
        }
    }
}
