use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to enumerate one directory, or to resolve one of its children.
///
/// Always non-fatal: the engine skips the affected subtree and carries on.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("permission denied: {}", .path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error at {}", .path.display())]
    Other {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListingError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            _ => Self::Other { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied { path, .. }
            | Self::NotFound { path, .. }
            | Self::Other { path, .. } => path,
        }
    }

    /// Short tag used in diagnostics: `permission`, `not_found` or `other`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "permission",
            Self::NotFound { .. } => "not_found",
            Self::Other { .. } => "other",
        }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    // Config
    #[error("invalid depth {0}: must be at least 1")]
    InvalidDepth(usize),

    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no search roots provided")]
    NoRoots,

    // Per root
    #[error("not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),

    #[error("timed out while searching {}", .0.display())]
    Timeout(PathBuf),

    // Per subtree
    #[error("{} leads back to its ancestor {}", .path.display(), .ancestor.display())]
    Cycle { path: PathBuf, ancestor: PathBuf },

    #[error(transparent)]
    Listing(#[from] ListingError),
}

impl SearchError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RootNotADirectory(p) | Self::Timeout(p) => Some(p),
            Self::Cycle { path, .. } => Some(path),
            Self::Listing(e) => Some(e.path()),
            _ => None,
        }
    }

    /// Whether the search carried on after this error.
    ///
    /// Config errors are raised before any traversal and abort the call.
    /// Everything else only costs one root or one subtree.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RootNotADirectory(_)
                | Self::Timeout(_)
                | Self::Cycle { .. }
                | Self::Listing(_)
        )
    }
}
