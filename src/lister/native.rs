use std::fs;
use std::io;
use std::path::Path;

use ignore::{DirEntry, WalkBuilder};

use crate::entry::{Child, FsKind};
use crate::error::ListingError;
use crate::traits::{DirectoryLister, Listing};

/// Link-following lister built on `ignore`'s walker, one level deep.
///
/// Links report their target's kind. A dangling link is reported as
/// [`FsKind::NotFound`] rather than dropped, unless canonicalization is on:
/// then it cannot be resolved, so it is dropped and recorded as a per-child
/// error.
///
/// Pick this lister for fidelity, not speed: it reports the full kind
/// taxonomy and can canonicalize, but sets up a one-level `ignore` walker
/// for every directory, which costs more than [`PortableLister`]'s plain
/// `read_dir`.
///
/// [`PortableLister`]: super::PortableLister
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLister {
    canonicalize: bool,
}

impl NativeLister {
    pub fn new() -> Self {
        Self { canonicalize: false }
    }

    /// Rewrite every child path to its canonical, link-free form.
    pub fn canonicalizing() -> Self {
        Self { canonicalize: true }
    }

    pub fn canonicalizes(&self) -> bool {
        self.canonicalize
    }

    fn resolve(&self, child: Child) -> Result<Child, ListingError> {
        if !self.canonicalize {
            return Ok(child);
        }

        let path = fs::canonicalize(&child.path)
            .map_err(|e| ListingError::from_io(&child.path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(child.name);

        Ok(Child {
            name,
            path,
            kind: child.kind,
        })
    }
}

impl DirectoryLister for NativeLister {
    fn list(&self, dir: &Path) -> Result<Listing, ListingError> {
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(true)
            .max_depth(Some(1))
            .build();

        let mut listing = Listing::default();

        for res in walker {
            let child = match res {
                Ok(dent) if dent.depth() == 0 => continue,
                Ok(dent) => child_from_entry(&dent),
                Err(err) => match classify(dir, err) {
                    Failure::Directory(e) => return Err(e),
                    Failure::Child(e) => {
                        listing.errors.push(e);
                        continue;
                    }
                    Failure::Resolved(child) => child,
                },
            };

            match self.resolve(child) {
                Ok(child) => listing.children.push(child),
                Err(e) => listing.errors.push(e),
            }
        }

        Ok(listing)
    }

    fn kind_of(&self, path: &Path) -> FsKind {
        match fs::metadata(path) {
            Ok(md) => FsKind::from_file_type(md.file_type()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => FsKind::NotFound,
            Err(_) => FsKind::None,
        }
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

fn child_from_entry(dent: &DirEntry) -> Child {
    Child {
        name: dent.file_name().to_string_lossy().into_owned(),
        path: dent.path().to_path_buf(),
        kind: dent
            .file_type()
            .map_or(FsKind::Unknown, FsKind::from_file_type),
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error onto the listing contract
// ---------------------------------------------------------------------------

enum Failure {
    /// `dir` itself could not be read.
    Directory(ListingError),
    /// One child could not be resolved.
    Child(ListingError),
    /// The walker complained, but the child is still usable.
    Resolved(Child),
}

fn classify(dir: &Path, err: ignore::Error) -> Failure {
    if let Some(child) = loop_child(&err) {
        // A link back to `dir` is still a directory. The engine refuses to
        // expand it through its ancestor check.
        let path = child.to_path_buf();
        return Failure::Resolved(Child {
            name: file_name(&path),
            path,
            kind: FsKind::Directory,
        });
    }

    let path = error_path(&err).map(Path::to_path_buf);
    let io_err = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("walk error"));

    match path {
        Some(path) if path != dir => {
            if io_err.kind() == io::ErrorKind::NotFound {
                // Dangling link: the entry exists, its target does not.
                Failure::Resolved(Child {
                    name: file_name(&path),
                    path,
                    kind: FsKind::NotFound,
                })
            } else {
                Failure::Child(ListingError::from_io(path, io_err))
            }
        }
        _ => Failure::Directory(ListingError::from_io(dir, io_err)),
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) if errs.len() == 1 => error_path(&errs[0]),
        _ => None,
    }
}

fn loop_child(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => loop_child(err),
        _ => None,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
