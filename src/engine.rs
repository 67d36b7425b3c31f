use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, warn};

use crate::config::SearchConfig;
use crate::entry::{FrontierEntry, FsKind};
use crate::error::SearchError;
use crate::pattern::PatternSet;
use crate::results::{Fidelity, ResultAccumulator, Results, ScanStats};
use crate::traits::{Clock, DirectoryLister, SystemClock};

// ---------------------------------------------------------------------------
// TraversalEngine
// ---------------------------------------------------------------------------

/// Depth-guided traversal over one or more roots.
///
/// The engine owns an immutable [`SearchConfig`], the OR-combined main
/// patterns and the [`DirectoryLister`] it was given. Each root is walked
/// breadth-first through an append-only frontier with a read cursor, so
/// tree depth never turns into call-stack depth.
///
/// Per call state (frontier, counters, diagnostics) lives on the stack of
/// [`search_root`](Self::search_root) / [`run`](Self::run); the engine itself
/// is never mutated by a search.
pub struct TraversalEngine {
    config: SearchConfig,
    patterns: PatternSet,
    lister: Box<dyn DirectoryLister>,
    clock: Box<dyn Clock>,
    collect_errors: bool,
}

/// What one root produced before post-processing was applied.
struct Walk {
    frontier: Vec<FrontierEntry>,
    timed_out: bool,
}

impl TraversalEngine {
    pub fn new(config: SearchConfig, patterns: PatternSet, lister: Box<dyn DirectoryLister>) -> Self {
        Self {
            config,
            patterns,
            lister,
            clock: Box::new(SystemClock),
            collect_errors: false,
        }
    }

    /// Replace the clock polled for the time budget.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Keep non-fatal errors in [`Results::errors`] as well as logging them.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    // ── Single root ───────────────────────────────────────────────────────

    /// Search one root and return its matches in discovery order.
    ///
    /// A timeout is not an error here: the partial result is returned and
    /// the timeout is logged. The match cap applies to this root alone.
    ///
    /// # Errors
    ///
    /// [`SearchError::RootNotADirectory`] if `root` does not resolve to a
    /// directory.
    pub fn search_root(&self, root: &Path) -> Result<Vec<FrontierEntry>, SearchError> {
        let mut diag = Diagnostics::new(self.config.silent(), false);
        let mut stats = ScanStats::default();

        let root = self.vet_root(root)?;
        let walk = self.traverse(root, 0, &mut diag, &mut stats);
        let mut entries = self.post_process(walk.frontier);

        if let Some(cap) = self.config.stop_at_match() {
            entries.truncate(cap);
        }

        Ok(entries)
    }

    // ── Multiple roots ────────────────────────────────────────────────────

    /// Search every root in order and shape the output to `fidelity`.
    ///
    /// Per-root failures (not a directory, timeout) and per-subtree listing
    /// errors never abort the call; they are logged, and collected when
    /// [`collect_errors`](Self::collect_errors) is set.
    pub fn run<P: AsRef<Path>>(&self, roots: &[P], fidelity: Fidelity) -> Results {
        let start = Instant::now();

        let mut acc = ResultAccumulator::new(fidelity, self.config.stop_at_match());
        let mut diag = Diagnostics::new(self.config.silent(), self.collect_errors);
        let mut stats = ScanStats::default();
        let mut timed_out = Vec::new();

        for root in roots {
            if acc.is_full() {
                debug!("match cap reached, skipping remaining roots");
                break;
            }

            let root = match self.vet_root(root.as_ref()) {
                Ok(root) => root,
                Err(e) => {
                    diag.report(e);
                    continue;
                }
            };

            let walk = self.traverse(root.clone(), acc.len(), &mut diag, &mut stats);
            if walk.timed_out {
                timed_out.push(root);
            }

            for entry in self.post_process(walk.frontier) {
                if !acc.push(entry, self.lister.as_ref()) {
                    break;
                }
            }
        }

        acc.finish(diag.into_errors(), timed_out, stats.finish(start.elapsed()))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn vet_root(&self, root: &Path) -> Result<PathBuf, SearchError> {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        if self.lister.kind_of(&root).is_dir() {
            Ok(root)
        } else {
            Err(SearchError::RootNotADirectory(root))
        }
    }

    /// Expand the frontier of one root until it reaches its fixed point, the
    /// time budget runs out, or `already + matched` reaches the match cap.
    fn traverse(
        &self,
        root: PathBuf,
        already: usize,
        diag: &mut Diagnostics,
        stats: &mut ScanStats,
    ) -> Walk {
        let max_depth = self.config.depth();
        let chain = self.config.depthwise().len();
        let cap_left = self
            .config
            .stop_at_match()
            .map(|cap| cap.saturating_sub(already));

        debug!(
            "searching {} (depth {}, {} depthwise filters, {} lister)",
            root.display(),
            max_depth,
            chain,
            self.lister.name()
        );

        let started = self.clock.now();
        let mut frontier = vec![FrontierEntry::new(root, 0, FsKind::Directory)];
        // Parallel to `frontier`: the parent's index, and the identity of
        // every expanded directory.
        let mut parents: Vec<Option<usize>> = vec![None];
        let mut ids: Vec<Option<PathBuf>> = vec![None];
        let mut matched = 0usize;
        let mut timed_out = false;
        let mut i = 0;

        while i < frontier.len() {
            if cap_left.is_some_and(|left| matched >= left) {
                debug!("match cap reached after {} matches", already + matched);
                break;
            }

            let cursor = i;
            i += 1;

            let depth = frontier[cursor].depth;
            if depth >= max_depth || !frontier[cursor].kind.is_dir() {
                continue;
            }
            if self.config.is_skipped(&frontier[cursor].path) {
                continue;
            }

            if let Some(budget) = self.config.timeout() {
                if self.clock.now().saturating_duration_since(started) >= budget {
                    diag.report(SearchError::Timeout(frontier[0].path.clone()));
                    timed_out = true;
                    break;
                }
            }

            ids[cursor] = self.lister.identity(&frontier[cursor].path);
            if let Some(ancestor) = cycle_ancestor(cursor, &parents, &ids) {
                diag.report(SearchError::Cycle {
                    path: frontier[cursor].path.clone(),
                    ancestor: frontier[ancestor].path.clone(),
                });
                continue;
            }

            let listing = match self.lister.list(&frontier[cursor].path) {
                Ok(listing) => listing,
                Err(e) => {
                    diag.report(e.into());
                    continue;
                }
            };
            stats.listed += 1;

            for e in listing.errors {
                diag.report(e.into());
            }

            let child_depth = depth + 1;
            let guard = self
                .config
                .depthwise_at(child_depth)
                .filter(|p| !p.is_any());

            for child in listing.children {
                if guard.is_some_and(|p| !p.is_match(&child.name)) {
                    continue;
                }
                if self.config.is_skipped(&child.path) {
                    continue;
                }

                stats.record(child.kind);
                if child_depth > chain && self.patterns.is_match(&child.name) {
                    matched += 1;
                }
                frontier.push(FrontierEntry::from_child(child, child_depth));
                parents.push(Some(cursor));
                ids.push(None);
            }
        }

        debug!(
            "{} discovered {} entries, {} matching",
            frontier[0].path.display(),
            frontier.len() - 1,
            matched
        );

        Walk {
            frontier,
            timed_out,
        }
    }

    /// Drop the guide levels and apply the main patterns.
    fn post_process(&self, frontier: Vec<FrontierEntry>) -> Vec<FrontierEntry> {
        let chain = self.config.depthwise().len();
        frontier
            .into_iter()
            .filter(|e| e.depth > chain)
            .filter(|e| self.patterns.is_match(&e.name))
            .collect()
    }
}

/// The nearest ancestor of `entry` sharing its identity, if any.
fn cycle_ancestor(entry: usize, parents: &[Option<usize>], ids: &[Option<PathBuf>]) -> Option<usize> {
    let id = ids[entry].as_ref()?;
    let mut up = parents[entry];
    while let Some(ancestor) = up {
        if ids[ancestor].as_ref() == Some(id) {
            return Some(ancestor);
        }
        up = parents[ancestor];
    }
    None
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Routes non-fatal errors to the log and, optionally, into the results.
struct Diagnostics {
    silent: bool,
    collect: bool,
    errors: Vec<SearchError>,
}

impl Diagnostics {
    fn new(silent: bool, collect: bool) -> Self {
        Self {
            silent,
            collect,
            errors: Vec::new(),
        }
    }

    fn report(&mut self, err: SearchError) {
        if !self.silent {
            match &err {
                SearchError::RootNotADirectory(path) => {
                    warn!("root_not_a_directory path={}", path.display());
                }
                SearchError::Listing(e) => {
                    warn!(
                        "listing_error path={} kind={}: {}",
                        e.path().display(),
                        e.kind(),
                        std::error::Error::source(e).map_or_else(String::new, |s| s.to_string())
                    );
                }
                SearchError::Timeout(path) => {
                    warn!("timeout path={}", path.display());
                }
                SearchError::Cycle { path, ancestor } => {
                    warn!("cycle path={} ancestor={}", path.display(), ancestor.display());
                }
                other => warn!("{other}"),
            }
        }

        if self.collect {
            self.errors.push(err);
        }
    }

    fn into_errors(self) -> Vec<SearchError> {
        self.errors
    }
}
