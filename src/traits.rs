use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::entry::{Child, EntryMetadata, FsKind};
use crate::error::ListingError;

/// The result of listing one directory.
///
/// `errors` holds per-child failures. Each one suppressed exactly one child;
/// the rest of the directory is still in `children`.
#[derive(Debug, Default)]
pub struct Listing {
    pub children: Vec<Child>,
    pub errors: Vec<ListingError>,
}

/// Enumerates the immediate children of a directory.
///
/// Implement this to give the engine a different backend: a faster native
/// enumerator, a remote filesystem, or an in-memory fake for tests.
///
/// # Object Safety
///
/// `DirectoryLister` is object-safe. The engine holds it as
/// `Box<dyn DirectoryLister>`, chosen by the caller at construction.
///
/// # Error Handling
///
/// Return `Err` when the directory itself cannot be enumerated. The engine
/// records the error and skips that subtree; siblings are unaffected.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use dirseek::{Child, DirectoryLister, FsKind, Listing, ListingError};
///
/// struct Flat(Vec<&'static str>);
///
/// impl DirectoryLister for Flat {
///     fn list(&self, dir: &Path) -> Result<Listing, ListingError> {
///         let children = self.0.iter().map(|name| Child {
///             name: name.to_string(),
///             path: dir.join(name),
///             kind: FsKind::File,
///         }).collect();
///         Ok(Listing { children, errors: Vec::new() })
///     }
///
///     fn kind_of(&self, _path: &Path) -> FsKind {
///         FsKind::Directory
///     }
/// }
/// ```
pub trait DirectoryLister: Send + Sync {
    /// List the children of `dir`, in a backend-defined but stable order.
    fn list(&self, dir: &Path) -> Result<Listing, ListingError>;

    /// Resolve the kind of a single path, following links. Used to vet roots.
    fn kind_of(&self, path: &Path) -> FsKind;

    /// Size and modification time for `path`, if the backend can provide them.
    fn metadata(&self, path: &Path) -> Option<EntryMetadata> {
        std::fs::metadata(path).ok().map(EntryMetadata::from)
    }

    /// A stable identity for `dir`, equal for every path that reaches the
    /// same directory.
    ///
    /// The engine never expands a directory whose identity matches one of
    /// its ancestors, which breaks link cycles. `None` turns the check off
    /// for that directory.
    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        std::fs::canonicalize(dir).ok()
    }

    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for Box<L> {
    fn list(&self, dir: &Path) -> Result<Listing, ListingError> {
        (**self).list(dir)
    }

    fn kind_of(&self, path: &Path) -> FsKind {
        (**self).kind_of(path)
    }

    fn metadata(&self, path: &Path) -> Option<EntryMetadata> {
        (**self).metadata(path)
    }

    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        (**self).identity(dir)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Source of time for the per-root budget.
///
/// Polled once before every listing call. Swap in a fake to make timeouts
/// deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time via [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
