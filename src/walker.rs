//! Recursive directory walker with deterministic ordering.
//!
//! Produces the flat entry sequence the reader consumes. Ordering is
//! lexicographic over relative paths with directories carrying a trailing
//! `/`, so a file `foo.bar` sorts before a directory `foo/` no matter what
//! order the storage backend listed them in.

use crate::error::FixtureError;
use crate::matcher::PatternSet;
use crate::path;
use crate::storage::{DiskStorage, EntryMeta, Storage};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Emit only entries matching at least one of these globs. Directories
    /// that cannot contain a match are not descended into.
    pub globs: Option<Vec<String>>,
    /// Skip entries matching any of these globs entirely, including every
    /// descendant of a skipped directory.
    pub ignore: Option<Vec<String>>,
    /// Emit directory entries (default true). Files below a suppressed
    /// directory are still emitted.
    pub directories: bool,
    /// Prefix listed paths with the base directory in [`Walker::paths`].
    pub include_base_path: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            globs: None,
            ignore: None,
            directories: true,
            include_base_path: false,
        }
    }
}

/// A single walked entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// `/`-separated path relative to the walk base; directories end in `/`.
    pub relative_path: String,
    /// The directory the walk started from.
    pub base_path: PathBuf,
    /// Stat data, zeroed when the entry could not be statted.
    pub meta: EntryMeta,
}

impl WalkEntry {
    /// The walk base joined with the relative path.
    pub fn full_path(&self) -> PathBuf {
        self.base_path.join(&self.relative_path)
    }

    /// Whether the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.meta.is_dir
    }
}

/// Recursive directory walker.
pub struct Walker<S: Storage = DiskStorage> {
    base: PathBuf,
    options: WalkOptions,
    globs: Option<PatternSet>,
    ignore: Option<PatternSet>,
    storage: S,
}

impl Walker<DiskStorage> {
    /// Walker over the real filesystem with default options.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            options: WalkOptions::default(),
            globs: None,
            ignore: None,
            storage: DiskStorage,
        }
    }

    /// Walker over the real filesystem.
    pub fn with_options(
        base: impl Into<PathBuf>,
        options: WalkOptions,
    ) -> Result<Self, FixtureError> {
        Self::with_storage(base, options, DiskStorage)
    }
}

impl<S: Storage> Walker<S> {
    /// Walker over a custom storage backend.
    pub fn with_storage(
        base: impl Into<PathBuf>,
        options: WalkOptions,
        storage: S,
    ) -> Result<Self, FixtureError> {
        let globs = options.globs.as_deref().map(PatternSet::new).transpose()?;
        let ignore = options.ignore.as_deref().map(PatternSet::new).transpose()?;
        Ok(Self {
            base: base.into(),
            options,
            globs,
            ignore,
            storage,
        })
    }

    /// The storage backend this walker reads through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Walk and return every entry in deterministic order.
    ///
    /// The sequence is computed eagerly; call again to re-walk.
    #[instrument(skip(self), fields(base = %self.base.display()))]
    pub fn entries(&self) -> Result<Vec<WalkEntry>, FixtureError> {
        let mut visited = Vec::new();
        let entries = self.walk_dir("", &mut visited)?;
        debug!(count = entries.len(), "walk complete");
        Ok(entries)
    }

    /// Walk and return relative paths, base-prefixed when
    /// [`WalkOptions::include_base_path`] is set.
    pub fn paths(&self) -> Result<Vec<String>, FixtureError> {
        let entries = self.entries()?;
        if self.options.include_base_path {
            let base = path::posix_base(&self.base);
            Ok(entries
                .into_iter()
                .map(|entry| format!("{}/{}", base, entry.relative_path))
                .collect())
        } else {
            Ok(entries
                .into_iter()
                .map(|entry| entry.relative_path)
                .collect())
        }
    }

    /// One directory level, guarded against symlink cycles.
    ///
    /// The visited stack holds the canonical real path of every directory on
    /// the current recursion chain; push on entry, pop on exit, so sibling
    /// branches may legitimately revisit a path but a chain never loops.
    fn walk_dir(
        &self,
        prefix: &str,
        visited: &mut Vec<PathBuf>,
    ) -> Result<Vec<WalkEntry>, FixtureError> {
        let dir = self.dir_path(prefix);
        let real = self.storage.canonical(&dir)?;
        if visited.contains(&real) {
            trace!(dir = %dir.display(), "symlink cycle, skipping");
            return Ok(Vec::new());
        }
        visited.push(real);
        let result = self.walk_level(prefix, &dir, visited);
        visited.pop();
        result
    }

    fn walk_level(
        &self,
        prefix: &str,
        dir: &Path,
        visited: &mut Vec<PathBuf>,
    ) -> Result<Vec<WalkEntry>, FixtureError> {
        let mut results = Vec::new();

        if let Some(globs) = &self.globs {
            if !globs.may_contain(prefix) {
                trace!(prefix, "no pattern reaches below, pruning");
                return Ok(results);
            }
        }

        // Ignore filtering happens before stat, on the slash-less path, so
        // an ignored directory is never statted or descended into.
        let mut level = Vec::new();
        for name in self.storage.list(dir)? {
            let relative = format!("{prefix}{name}");
            if let Some(ignore) = &self.ignore {
                if ignore.is_match(&relative) {
                    trace!(path = relative, "ignored");
                    continue;
                }
            }

            let meta = self
                .storage
                .stat(&self.base.join(&relative))?
                .unwrap_or_default();
            let relative_path = if meta.is_dir {
                format!("{relative}/")
            } else {
                relative
            };
            level.push(WalkEntry {
                relative_path,
                base_path: self.base.clone(),
                meta,
            });
        }

        level.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        // Globs gate emission only; a non-matching directory is still
        // descended into because a deeper entry may match.
        for entry in level {
            let matched = match &self.globs {
                Some(globs) => globs.is_match(&entry.relative_path),
                None => true,
            };
            if entry.is_dir() {
                let child_prefix = entry.relative_path.clone();
                if self.options.directories && matched {
                    results.push(entry);
                }
                results.extend(self.walk_dir(&child_prefix, visited)?);
            } else if matched {
                results.push(entry);
            }
        }

        Ok(results)
    }

    fn dir_path(&self, prefix: &str) -> PathBuf {
        if prefix.is_empty() {
            self.base.clone()
        } else {
            self.base.join(prefix)
        }
    }
}
