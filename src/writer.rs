//! Directory writer.
//!
//! Reconciles a real directory with a [`DirTree`]: files are written,
//! directories created, tombstones removed. Entries on disk that the tree
//! does not mention are left alone, so repeated writes layer on top of each
//! other instead of wiping state.

use crate::error::FixtureError;
use crate::storage::{DiskStorage, EntryKind, Storage};
use crate::tree::{DirTree, TreeNode};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{instrument, trace};

/// Write a tree into a directory, creating the directory if needed.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn write(dir: impl AsRef<Path>, tree: &DirTree) -> Result<(), FixtureError> {
    write_to(dir, tree, DiskStorage)
}

/// Write a tree into a directory through a custom storage backend.
pub fn write_to<S: Storage>(
    dir: impl AsRef<Path>,
    tree: &DirTree,
    storage: S,
) -> Result<(), FixtureError> {
    let dir = dir.as_ref();
    if dir.as_os_str().is_empty() {
        return Err(FixtureError::InvalidTarget);
    }
    storage.make_dir_all(dir)?;
    apply(dir, tree, &storage)
}

fn apply<S: Storage>(dir: &Path, tree: &DirTree, storage: &S) -> Result<(), FixtureError> {
    for (name, node) in tree.iter() {
        validate_entry_name(name)?;
        let full = dir.join(name);
        // One probe per entry; it follows symlinks, so a link to a directory
        // is handled as a directory here.
        let current = storage.kind(&full);
        match node {
            TreeNode::File(contents) => {
                if current == EntryKind::Dir {
                    storage.remove_all(&full)?;
                }
                trace!(path = %full.display(), bytes = contents.len(), "write file");
                storage.write_text(&full, contents)?;
            }
            TreeNode::Tombstone => {
                trace!(path = %full.display(), "remove");
                storage.remove_all(&full)?;
            }
            TreeNode::Dir(subtree) => {
                if current == EntryKind::File {
                    storage.remove_file(&full)?;
                }
                match storage.make_dir(&full) {
                    Ok(()) => {}
                    Err(FixtureError::Io { source, .. })
                        if source.kind() == ErrorKind::AlreadyExists => {}
                    Err(err) => return Err(err),
                }
                apply(&full, subtree, storage)?;
            }
        }
    }
    Ok(())
}

fn validate_entry_name(name: &str) -> Result<(), FixtureError> {
    if name.is_empty() {
        return Err(FixtureError::InvalidEntryName {
            name: name.to_string(),
            reason: "name may not be empty",
        });
    }
    if name == "." || name == ".." {
        return Err(FixtureError::InvalidEntryName {
            name: name.to_string(),
            reason: "name may not traverse directories",
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(FixtureError::InvalidEntryName {
            name: name.to_string(),
            reason: "name may not contain path separators, nest trees instead",
        });
    }
    Ok(())
}
