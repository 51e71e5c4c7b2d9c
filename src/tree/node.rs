//! Fixture tree value types.

use crate::error::FixtureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry in a fixture tree.
///
/// Serializes untagged: a file is a JSON string, a directory a JSON object,
/// a tombstone JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Full contents of a regular file.
    File(String),
    /// A subdirectory, possibly empty.
    Dir(DirTree),
    /// Delete-on-write marker; only meaningful as writer input.
    Tombstone,
}

impl TreeNode {
    /// Whether this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir(_))
    }

    /// File contents, when this node is a file.
    pub fn as_file(&self) -> Option<&str> {
        match self {
            TreeNode::File(contents) => Some(contents),
            _ => None,
        }
    }

    /// Child mapping, when this node is a directory.
    pub fn as_dir(&self) -> Option<&DirTree> {
        match self {
            TreeNode::Dir(tree) => Some(tree),
            _ => None,
        }
    }
}

impl From<&str> for TreeNode {
    fn from(contents: &str) -> Self {
        TreeNode::File(contents.to_string())
    }
}

impl From<String> for TreeNode {
    fn from(contents: String) -> Self {
        TreeNode::File(contents)
    }
}

impl From<DirTree> for TreeNode {
    fn from(tree: DirTree) -> Self {
        TreeNode::Dir(tree)
    }
}

/// A directory as a sorted name-to-node mapping.
///
/// Backed by a `BTreeMap` so iteration, comparison, and serialization all
/// see entries in name order, whatever order they were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirTree(pub BTreeMap<String, TreeNode>);

impl DirTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under a plain entry name (no path splitting).
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        node: impl Into<TreeNode>,
    ) -> Option<TreeNode> {
        self.0.insert(name.into(), node.into())
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TreeNode)> {
        self.0.iter()
    }

    /// Convert a JSON value into a tree.
    ///
    /// Every value must be a string, an object, or `null`; anything else is
    /// rejected with an error naming the offending entry.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, FixtureError> {
        match value {
            serde_json::Value::Object(entries) => Self::from_json_object(entries),
            other => Err(FixtureError::InvalidValue {
                name: "(root)".to_string(),
                found: json_kind(other).to_string(),
            }),
        }
    }

    fn from_json_object(
        entries: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, FixtureError> {
        let mut tree = DirTree::new();
        for (name, value) in entries {
            let node = match value {
                serde_json::Value::String(contents) => TreeNode::File(contents.clone()),
                serde_json::Value::Null => TreeNode::Tombstone,
                serde_json::Value::Object(nested) => TreeNode::Dir(Self::from_json_object(nested)?),
                other => {
                    return Err(FixtureError::InvalidValue {
                        name: name.clone(),
                        found: json_kind(other).to_string(),
                    })
                }
            };
            tree.0.insert(name.clone(), node);
        }
        Ok(tree)
    }

    /// JSON form of the tree.
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (name, node) in &self.0 {
            let value = match node {
                TreeNode::File(contents) => serde_json::Value::String(contents.clone()),
                TreeNode::Dir(tree) => tree.to_json_value(),
                TreeNode::Tombstone => serde_json::Value::Null,
            };
            object.insert(name.clone(), value);
        }
        serde_json::Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<TreeNode>> FromIterator<(K, V)> for DirTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = DirTree::new();
        for (name, node) in iter {
            tree.0.insert(name.into(), node.into());
        }
        tree
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
