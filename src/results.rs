use std::path::PathBuf;
use std::time::Duration;

use crate::entry::{EntryMetadata, FrontierEntry, FsKind};
use crate::error::SearchError;
use crate::traits::DirectoryLister;

/// How much to report about each match.
///
/// Each level is a strict superset of the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Fidelity {
    /// Paths only.
    #[default]
    Paths,

    /// Paths and file names.
    Names,

    /// Paths, names, kinds, and size/mtime metadata.
    Full,
}

/// The output of a completed search.
///
/// `names`, `kinds` and `metadata` run parallel to `paths` and are `Some`
/// only when the requested [`Fidelity`] covers them.
#[derive(Debug)]
pub struct Results {
    /// Matched paths, in discovery order.
    pub paths: Vec<PathBuf>,

    /// File names. Populated for [`Fidelity::Names`] and above.
    pub names: Option<Vec<String>>,

    /// Resolved kinds. Populated for [`Fidelity::Full`].
    pub kinds: Option<Vec<FsKind>>,

    /// Size and mtime, `None` per entry where the lister could not provide
    /// them. Populated for [`Fidelity::Full`].
    pub metadata: Option<Vec<Option<EntryMetadata>>>,

    /// Non-fatal errors encountered along the way. Only populated if
    /// `.collect_errors(true)` was set on the builder.
    pub errors: Vec<SearchError>,

    /// Roots whose traversal hit the time budget.
    pub timed_out: Vec<PathBuf>,

    /// Scan performance statistics.
    pub stats: ScanStats,
}

impl Results {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Performance statistics for a completed scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Regular files discovered (matched or not).
    pub files: usize,

    /// Directories discovered.
    pub dirs: usize,

    /// Everything else discovered: devices, pipes, sockets, dangling links.
    pub other: usize,

    /// Directories actually listed.
    pub listed: usize,

    /// Wall-clock time from search start to completion.
    pub duration: Duration,

    /// Entries discovered per second, clamped to 0 on zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn record(&mut self, kind: FsKind) {
        match kind {
            FsKind::File => self.files += 1,
            FsKind::Directory => self.dirs += 1,
            _ => self.other += 1,
        }
    }

    pub(crate) fn finish(mut self, duration: Duration) -> Self {
        let total = self.files + self.dirs + self.other;
        self.entries_per_sec = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        self.duration = duration;
        self
    }
}

/// Collects matches across roots, enforcing the global cap.
///
/// Only the columns the [`Fidelity`] asks for are built; metadata is never
/// queried below [`Fidelity::Full`].
#[derive(Debug)]
pub struct ResultAccumulator {
    fidelity: Fidelity,
    cap: Option<usize>,
    paths: Vec<PathBuf>,
    names: Vec<String>,
    kinds: Vec<FsKind>,
    metadata: Vec<Option<EntryMetadata>>,
}

impl ResultAccumulator {
    pub fn new(fidelity: Fidelity, cap: Option<usize>) -> Self {
        Self {
            fidelity,
            cap,
            paths: Vec::new(),
            names: Vec::new(),
            kinds: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.paths.len() >= cap)
    }

    /// Add one fully filtered entry. Returns `false`, dropping the entry,
    /// once the cap is reached.
    pub fn push(&mut self, entry: FrontierEntry, lister: &dyn DirectoryLister) -> bool {
        if self.is_full() {
            return false;
        }

        if self.fidelity >= Fidelity::Names {
            self.names.push(entry.name);
        }
        if self.fidelity >= Fidelity::Full {
            self.kinds.push(entry.kind);
            self.metadata.push(lister.metadata(&entry.path));
        }
        self.paths.push(entry.path);

        true
    }

    pub fn finish(
        self,
        errors: Vec<SearchError>,
        timed_out: Vec<PathBuf>,
        stats: ScanStats,
    ) -> Results {
        let names = (self.fidelity >= Fidelity::Names).then_some(self.names);
        let (kinds, metadata) = if self.fidelity >= Fidelity::Full {
            (Some(self.kinds), Some(self.metadata))
        } else {
            (None, None)
        };

        Results {
            paths: self.paths,
            names,
            kinds,
            metadata,
            errors,
            timed_out,
            stats,
        }
    }
}
