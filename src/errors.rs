//! Error taxonomy shared by the object store, the staging index and the
//! working-tree materializer.
//!
//! Every failure falls into one of four buckets:
//!
//! - `NotFound`: an object or ref is absent
//! - `Corrupt`: stored bytes do not decode (bad frame, truncated tree entry,
//!   invalid compressed stream, missing commit field, unknown kind tag)
//! - `InvalidArgument`: caller supplied a malformed value (e.g. an object ID)
//! - `Io`: the filesystem refused an operation; carries the path and the
//!   operation that was attempted
//!
//! None of these are retried internally.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt: {0}")]
    Corrupt(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn corrupt(what: impl Into<String>) -> Self {
        Self::Corrupt(what.into())
    }

    pub fn invalid_argument(what: impl Into<String>) -> Self {
        Self::InvalidArgument(what.into())
    }

    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// Attach the attempted operation and path to a raw `io::Error`.
pub trait IoContext<T> {
    fn io_context(self, op: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::io(op, path, source))
    }
}
