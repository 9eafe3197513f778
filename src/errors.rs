//! Error types shared by the object store, the staging index and bootstrap.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using jit's error type.
pub type Result<T> = std::result::Result<T, JitError>;

/// Errors surfaced by the repository components.
///
/// None of these are retried; every variant is terminal for the operation
/// that produced it.
#[derive(Error, Debug)]
pub enum JitError {
    /// Bootstrap target already holds a repository.
    #[error("repository already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// A path or an object address does not resolve.
    #[error("not found: {target}")]
    NotFound { target: String },

    /// Stored object bytes are not a well-formed frame.
    #[error("malformed object {oid}: {reason}")]
    MalformedObject { oid: String, reason: String },

    /// A line of the index file cannot be parsed.
    #[error("malformed index entry at line {line}: {reason}")]
    MalformedIndex { line: usize, reason: String },

    /// Caller supplied an address or path of the wrong shape.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Stored bytes do not hash to the address they are filed under.
    #[error("object {oid} is corrupt: content hashes to {actual}")]
    ChecksumMismatch { oid: String, actual: String },

    /// Any other filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JitError {
    pub fn not_found(target: impl Into<String>) -> Self {
        JitError::NotFound {
            target: target.into(),
        }
    }

    pub fn malformed_object(oid: impl Into<String>, reason: impl Into<String>) -> Self {
        JitError::MalformedObject {
            oid: oid.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_index(line: usize, reason: impl Into<String>) -> Self {
        JitError::MalformedIndex {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        JitError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Wrap an I/O failure on `path`, reporting a missing file as `NotFound`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref();
        match source.kind() {
            std::io::ErrorKind::NotFound => JitError::not_found(path.display().to_string()),
            _ => JitError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Attach a path to an `io::Result`, the way `anyhow::Context` attaches a message.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| JitError::io(path, source))
    }
}
