//! Storage adapter behind the walker and the writer.
//!
//! All filesystem access goes through the [`Storage`] trait so tests and
//! alternative backends can swap in their own implementation. [`DiskStorage`]
//! is the `std::fs`-backed default.

use crate::error::FixtureError;
use crate::path;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Resolved type of a path, following symlinks.
///
/// A live symlink reports the type of its target; only a dangling link
/// reports [`EntryKind::Symlink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Absent,
}

/// Metadata for a walked entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMeta {
    pub is_dir: bool,
    /// Unix type and permission bits, 0 where unavailable.
    pub mode: u32,
    pub size: u64,
    /// Modification time in milliseconds since the Unix epoch, 0 where unavailable.
    pub mtime_ms: u64,
}

/// Filesystem capabilities required by the walker and the writer.
pub trait Storage {
    /// Names of the entries of a directory. Order is storage-defined; callers sort.
    fn list(&self, path: &Path) -> Result<Vec<String>, FixtureError>;

    /// Stat a path, following symlinks.
    ///
    /// Returns `Ok(None)` when the path cannot be statted for a tolerated
    /// reason: it does not exist, a parent component is not a directory, or
    /// permission is denied. Everything else is an error.
    fn stat(&self, path: &Path) -> Result<Option<EntryMeta>, FixtureError>;

    /// Probe the type of a path, following symlinks. Failures read as
    /// [`EntryKind::Absent`].
    fn kind(&self, path: &Path) -> EntryKind;

    fn read_text(&self, path: &Path) -> Result<String, FixtureError>;

    /// Write `contents` to a file, replacing any previous contents.
    fn write_text(&self, path: &Path, contents: &str) -> Result<(), FixtureError>;

    /// Create a single directory level. Fails if the directory already
    /// exists; the caller decides whether that is tolerable.
    fn make_dir(&self, path: &Path) -> Result<(), FixtureError>;

    /// Create a directory together with any missing ancestors.
    fn make_dir_all(&self, path: &Path) -> Result<(), FixtureError>;

    /// Remove a file, a symlink, or a whole directory tree. A symlink is
    /// removed as the link itself, never its target. Missing paths are fine.
    fn remove_all(&self, path: &Path) -> Result<(), FixtureError>;

    /// Remove a single file or symlink.
    fn remove_file(&self, path: &Path) -> Result<(), FixtureError>;

    /// Target of a symlink.
    fn read_link(&self, path: &Path) -> Result<PathBuf, FixtureError>;

    /// Create a symlink at `link` pointing at `target`.
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FixtureError>;

    /// Real path with every symlink resolved.
    fn canonical(&self, path: &Path) -> Result<PathBuf, FixtureError>;
}

fn annotate(path: &Path) -> impl FnOnce(io::Error) -> FixtureError + '_ {
    move |source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn tolerated_stat_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::PermissionDenied
    )
}

#[cfg(unix)]
fn mode_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_bits(_meta: &fs::Metadata) -> u32 {
    0
}

fn mtime_millis(meta: &fs::Metadata) -> u64 {
    meta.modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Default [`Storage`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStorage;

impl Storage for DiskStorage {
    fn list(&self, path: &Path) -> Result<Vec<String>, FixtureError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(annotate(path))? {
            let entry = entry.map_err(annotate(path))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> Result<Option<EntryMeta>, FixtureError> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(EntryMeta {
                is_dir: meta.is_dir(),
                mode: mode_bits(&meta),
                size: meta.len(),
                mtime_ms: mtime_millis(&meta),
            })),
            Err(err) if tolerated_stat_failure(&err) => Ok(None),
            Err(err) => Err(annotate(path)(err)),
        }
    }

    fn kind(&self, path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Dir,
            Ok(_) => EntryKind::File,
            Err(_) => match fs::symlink_metadata(path) {
                Ok(meta) if meta.file_type().is_symlink() => EntryKind::Symlink,
                _ => EntryKind::Absent,
            },
        }
    }

    fn read_text(&self, path: &Path) -> Result<String, FixtureError> {
        fs::read_to_string(path).map_err(annotate(path))
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), FixtureError> {
        fs::write(path, contents).map_err(annotate(path))
    }

    fn make_dir(&self, path: &Path) -> Result<(), FixtureError> {
        fs::create_dir(path).map_err(annotate(path))
    }

    fn make_dir_all(&self, path: &Path) -> Result<(), FixtureError> {
        fs::create_dir_all(path).map_err(annotate(path))
    }

    fn remove_all(&self, path: &Path) -> Result<(), FixtureError> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(annotate(path)(err)),
        };
        let removed = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match removed {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(annotate(path)(err)),
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), FixtureError> {
        fs::remove_file(path).map_err(annotate(path))
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf, FixtureError> {
        fs::read_link(path).map_err(annotate(path))
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FixtureError> {
        #[cfg(unix)]
        let created = std::os::unix::fs::symlink(target, link);
        #[cfg(windows)]
        let created = if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        created.map_err(annotate(link))
    }

    fn canonical(&self, path: &Path) -> Result<PathBuf, FixtureError> {
        path::canonical(path)
    }
}
