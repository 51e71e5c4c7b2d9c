//! Fixtree: Directory Fixtures as Plain Data
//!
//! Captures directories into in-memory trees and reconciles trees back onto
//! disk. Files are strings, directories are nested maps, and a tombstone
//! marks an entry for deletion, which makes filesystem fixtures cheap to
//! build, diff, and assert on in tests.
//!
//! ```no_run
//! use fixtree::{read, write, DirTree, TreeNode};
//!
//! # fn main() -> Result<(), fixtree::FixtureError> {
//! let mut tree = DirTree::new();
//! tree.insert_file("src/main.rs", "fn main() {}")?;
//! tree.insert_file("Cargo.toml", "[package]")?;
//! write("fixtures/app", &tree)?;
//!
//! let captured = read("fixtures/app")?;
//! assert_eq!(captured, tree);
//!
//! // Tombstones delete on the next write; other entries are untouched.
//! let mut patch = DirTree::new();
//! patch.insert("Cargo.toml", TreeNode::Tombstone);
//! write("fixtures/app", &patch)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod logging;
pub mod matcher;
pub mod path;
pub mod reader;
pub mod storage;
pub mod tree;
pub mod walker;
pub mod writer;

pub use error::{FixtureError, TreeError};
pub use matcher::PatternSet;
pub use reader::{read, read_from, read_with, ReadOptions};
pub use storage::{DiskStorage, EntryKind, EntryMeta, Storage};
pub use tree::{DirTree, TreeNode};
pub use walker::{WalkEntry, WalkOptions, Walker};
pub use writer::{write, write_to};
