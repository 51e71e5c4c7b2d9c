//! Directory reader.
//!
//! Walks a directory and captures it as a [`DirTree`]: file contents become
//! strings, subdirectories become nested trees.

use crate::error::FixtureError;
use crate::storage::{DiskStorage, Storage};
use crate::tree::DirTree;
use crate::walker::{WalkOptions, Walker};
use std::path::Path;
use tracing::{instrument, trace, warn};

/// Options for [`read`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Capture only entries matching at least one of these globs.
    pub globs: Option<Vec<String>>,
    /// Skip entries matching any of these globs, including everything below
    /// a skipped directory.
    pub ignore: Option<Vec<String>>,
    /// Leave directories out of the tree unless a file below them was
    /// captured, so empty directories vanish from the result.
    pub ignore_empty_dirs: bool,
    /// Renamed to `globs`.
    #[deprecated(note = "use `globs` instead")]
    pub include: Option<Vec<String>>,
    /// Renamed to `ignore`.
    #[deprecated(note = "use `ignore` instead")]
    pub exclude: Option<Vec<String>>,
}

impl ReadOptions {
    /// Fold the deprecated aliases into the current field names.
    ///
    /// Setting both an alias and its replacement is an error rather than a
    /// silent pick.
    #[allow(deprecated)]
    fn resolved(&self) -> Result<(Option<Vec<String>>, Option<Vec<String>>), FixtureError> {
        let globs = match (&self.globs, &self.include) {
            (Some(_), Some(_)) => {
                return Err(FixtureError::ConfigConflict("include", "globs"));
            }
            (None, Some(include)) => {
                warn!("`include` is deprecated, use `globs` instead");
                Some(include.clone())
            }
            (globs, None) => globs.clone(),
        };
        let ignore = match (&self.ignore, &self.exclude) {
            (Some(_), Some(_)) => {
                return Err(FixtureError::ConfigConflict("exclude", "ignore"));
            }
            (None, Some(exclude)) => {
                warn!("`exclude` is deprecated, use `ignore` instead");
                Some(exclude.clone())
            }
            (ignore, None) => ignore.clone(),
        };
        Ok((globs, ignore))
    }
}

/// Read a directory into a tree with default options.
pub fn read(dir: impl AsRef<Path>) -> Result<DirTree, FixtureError> {
    read_with(dir, &ReadOptions::default())
}

/// Read a directory into a tree.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn read_with(dir: impl AsRef<Path>, options: &ReadOptions) -> Result<DirTree, FixtureError> {
    read_from(dir, options, DiskStorage)
}

/// Read a directory into a tree through a custom storage backend.
pub fn read_from<S: Storage>(
    dir: impl AsRef<Path>,
    options: &ReadOptions,
    storage: S,
) -> Result<DirTree, FixtureError> {
    let (globs, ignore) = options.resolved()?;
    let walk_options = WalkOptions {
        globs,
        ignore,
        // With directory entries suppressed, only file paths reach the
        // builder and empty directories never materialize in the tree.
        directories: !options.ignore_empty_dirs,
        ..Default::default()
    };
    let walker = Walker::with_storage(dir.as_ref(), walk_options, storage)?;

    let mut tree = DirTree::new();
    for entry in walker.entries()? {
        if entry.is_dir() {
            tree.ensure_dir(&entry.relative_path)?;
        } else {
            let contents = walker.storage().read_text(&entry.full_path())?;
            trace!(path = entry.relative_path, bytes = contents.len(), "captured file");
            tree.insert_file(&entry.relative_path, contents)?;
        }
    }
    Ok(tree)
}
