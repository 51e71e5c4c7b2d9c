//! Path normalization helpers shared by the walker and the writer.

use crate::error::FixtureError;
use std::path::{Path, PathBuf};

/// Resolve the real path of `path`, following every symlink.
///
/// Uses `dunce` so Windows results stay in legacy (non-UNC) form where
/// possible.
pub fn canonical(path: &Path) -> Result<PathBuf, FixtureError> {
    dunce::canonicalize(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Posix form of a base directory with trailing separators trimmed.
///
/// Used when prefixing relative paths with their base in path listings.
pub fn posix_base(dir: &Path) -> String {
    let mut base = dir.to_string_lossy().replace('\\', "/");
    while base.ends_with('/') {
        base.pop();
    }
    base
}
