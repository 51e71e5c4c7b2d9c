//! Fixture Tree
//!
//! Represents a directory as plain data: files are strings, directories are
//! nested mappings, and a `null`-equivalent tombstone marks deletions for
//! the writer.

mod builder;
pub mod node;

pub use node::{DirTree, TreeNode};
