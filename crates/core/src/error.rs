// Central Error Type for textflow

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which side of a TextProcessor call an I/O failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Library error type
///
/// Every variant keeps the `io::Error` reported by the filesystem untouched
/// as its source.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Access denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid path (parent directory does not exist): {}", path.display())]
    PathInvalid {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TextError {
    /// Classify an I/O failure on `path`
    ///
    /// `NotFound` while writing means the destination directory is missing,
    /// since opening for write creates the file itself.
    pub fn from_io(access: Access, path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match (source.kind(), access) {
            (io::ErrorKind::NotFound, Access::Read) => TextError::NotFound { path, source },
            (io::ErrorKind::NotFound, Access::Write) => TextError::PathInvalid { path, source },
            (io::ErrorKind::PermissionDenied, _) => TextError::AccessDenied { path, source },
            _ => TextError::Io { path, source },
        }
    }

    /// Path the failing operation was keyed by
    pub fn path(&self) -> &Path {
        match self {
            TextError::NotFound { path, .. }
            | TextError::AccessDenied { path, .. }
            | TextError::PathInvalid { path, .. }
            | TextError::Io { path, .. } => path,
        }
    }

    /// Kind of the underlying I/O error
    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            TextError::NotFound { source, .. }
            | TextError::AccessDenied { source, .. }
            | TextError::PathInvalid { source, .. }
            | TextError::Io { source, .. } => source,
        }
    }

    pub fn into_io_error(self) -> io::Error {
        match self {
            TextError::NotFound { source, .. }
            | TextError::AccessDenied { source, .. }
            | TextError::PathInvalid { source, .. }
            | TextError::Io { source, .. } => source,
        }
    }
}

/// Result type alias using TextError
pub type Result<T> = std::result::Result<T, TextError>;
