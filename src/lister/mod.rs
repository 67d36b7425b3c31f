//! Built-in [`DirectoryLister`] backends.
//!
//! [`NativeLister`] follows links and reports the full [`FsKind`](crate::FsKind)
//! taxonomy, optionally canonicalizing every path. [`PortableLister`] only
//! needs `read_dir` and `metadata`, and reports files and directories.
//!
//! Deciding whether the native backend is usable on this machine is the
//! caller's job. Hand the answer to [`select`].

mod native;
mod portable;

pub use native::NativeLister;
pub use portable::PortableLister;

use crate::traits::DirectoryLister;

/// Pick a backend from an already-resolved availability flag.
///
/// `canonicalize` only has an effect on the native backend.
pub fn select(native_available: bool, canonicalize: bool) -> Box<dyn DirectoryLister> {
    match (native_available, canonicalize) {
        (true, true) => Box::new(NativeLister::canonicalizing()),
        (true, false) => Box::new(NativeLister::new()),
        (false, true) => {
            log::debug!("portable lister cannot canonicalize, using plain paths");
            Box::new(PortableLister::new())
        }
        (false, false) => Box::new(PortableLister::new()),
    }
}
