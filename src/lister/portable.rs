use std::fs;
use std::io;
use std::path::Path;

use crate::entry::{Child, FsKind};
use crate::error::ListingError;
use crate::traits::{DirectoryLister, Listing};

/// Fallback lister using only `read_dir` and `metadata`.
///
/// Every child resolves to exactly one of [`FsKind::File`] or
/// [`FsKind::Directory`]. Anything whose metadata cannot be read, such as a
/// dangling link, is dropped and recorded in [`Listing::errors`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableLister;

impl PortableLister {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for PortableLister {
    fn list(&self, dir: &Path) -> Result<Listing, ListingError> {
        let rd = fs::read_dir(dir).map_err(|e| ListingError::from_io(dir, e))?;
        let mut listing = Listing::default();

        for entry in rd {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    listing.errors.push(ListingError::from_io(dir, e));
                    continue;
                }
            };

            let path = entry.path();
            let kind = match fs::metadata(&path) {
                Ok(md) if md.is_dir() => FsKind::Directory,
                Ok(_) => FsKind::File,
                Err(e) => {
                    listing.errors.push(ListingError::from_io(path, e));
                    continue;
                }
            };

            listing.children.push(Child {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        Ok(listing)
    }

    fn kind_of(&self, path: &Path) -> FsKind {
        match fs::metadata(path) {
            Ok(md) if md.is_dir() => FsKind::Directory,
            Ok(_) => FsKind::File,
            Err(e) if e.kind() == io::ErrorKind::NotFound => FsKind::NotFound,
            Err(_) => FsKind::None,
        }
    }

    fn name(&self) -> &'static str {
        "portable"
    }
}
