//! Error types for fixture tree construction and directory reconciliation.

use std::path::PathBuf;
use thiserror::Error;

/// Tree-construction errors
#[derive(Debug, Error)]
pub enum TreeError {
    /// A relative path with no file-name segment was handed to the builder.
    #[error("Invalid file path: {0:?}")]
    InvalidPath(String),

    /// A name is already taken by a file where a directory is required.
    #[error("Path conflict: segment {segment:?} of {path:?} already names a file")]
    PathConflict { path: String, segment: String },
}

/// Errors surfaced by reading, writing, and walking fixture directories
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A legacy option alias and its replacement were both supplied.
    #[error("May not specify both `{0}` and `{1}`, use only `{1}`")]
    ConfigConflict(&'static str, &'static str),

    #[error("Target directory must be a non-empty path")]
    InvalidTarget,

    #[error("Invalid directory entry {name:?}: {reason}")]
    InvalidEntryName { name: String, reason: &'static str },

    /// A JSON value that is neither string, object, nor null.
    #[error("Entry {name:?}: expected string, object, or null, got {found}")]
    InvalidValue { name: String, found: String },

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
