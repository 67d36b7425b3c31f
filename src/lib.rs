//! # dirseek
//!
//! Depth-guided filesystem search: a different filter at every level,
//! whole subtrees pruned before they are ever listed.
//!
//! dirseek owns the traversal engine, the listing contract
//! ([`DirectoryLister`]), the pattern matcher, the error type and the builder
//! API. It does **not** decide which backend your platform supports, parse
//! command lines, or format output; those belong to the caller.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dirseek::lister::NativeLister;
//!
//! // data-*/results/**.csv, at most three levels down
//! let results = dirseek::search()
//!     .root("/srv/experiments")
//!     .depthwise(["^data-", "^results$"])
//!     .pattern(r"\.csv$")
//!     .depth(3)
//!     .lister(NativeLister::new())
//!     .run()
//!     .unwrap();
//!
//! for path in &results.paths {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Depthwise filters
//!
//! `depthwise[0]` filters the root's children, `depthwise[1]` their
//! children, and so on. Anything failing its level is never descended into.
//! Entries at or above the last guided level are guides, not results: with
//! two depthwise filters, only entries at depth 3 or deeper are returned.
//!
//! # Custom listers
//!
//! Implement [`DirectoryLister`] to search something other than the local
//! disk, or to feed the engine a deterministic in-memory tree:
//!
//! ```rust
//! use std::path::Path;
//! use dirseek::{Child, DirectoryLister, FsKind, Listing, ListingError};
//!
//! struct OneFile;
//!
//! impl DirectoryLister for OneFile {
//!     fn list(&self, dir: &Path) -> Result<Listing, ListingError> {
//!         Ok(Listing {
//!             children: vec![Child {
//!                 name: "report.txt".into(),
//!                 path: dir.join("report.txt"),
//!                 kind: FsKind::File,
//!             }],
//!             errors: Vec::new(),
//!         })
//!     }
//!
//!     fn kind_of(&self, _path: &Path) -> FsKind {
//!         FsKind::Directory
//!     }
//! }
//!
//! let results = dirseek::search()
//!     .root("/virtual")
//!     .pattern("report")
//!     .depth(1)
//!     .lister(OneFile)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod lister;

mod builder;
mod config;
mod engine;
mod entry;
mod error;
mod pattern;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use config::{SearchConfig, SkipPredicate};
pub use engine::TraversalEngine;
pub use entry::{Child, EntryMetadata, FrontierEntry, FsKind};
pub use error::{ListingError, SearchError};
pub use pattern::{Pattern, PatternSet};
pub use results::{Fidelity, ResultAccumulator, Results, ScanStats};
pub use traits::{Clock, DirectoryLister, Listing, SystemClock};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
///
/// # Example
///
/// ```rust,no_run
/// let results = dirseek::search()
///     .root(".")
///     .pattern(r"\.rs$")
///     .skip(|p| p.ends_with("target"))
///     .run()
///     .unwrap();
///
/// println!("{} Rust files", results.len());
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}
