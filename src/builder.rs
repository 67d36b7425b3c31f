use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{SearchConfig, SkipPredicate};
use crate::engine::TraversalEngine;
use crate::error::SearchError;
use crate::lister::PortableLister;
use crate::pattern::PatternSet;
use crate::results::{Fidelity, Results};
use crate::traits::{Clock, DirectoryLister};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a dirseek search.
///
/// Created via [`dirseek::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = dirseek::search()
///     .root("/data")
///     .depthwise(["^2024-", "^results$"])
///     .pattern(r"\.csv$")
///     .stop_at_match(100)
///     .lister(dirseek::lister::select(native_ok, false))
///     .run()?;
/// ```
pub struct SearchBuilder {
    roots:          Vec<PathBuf>,
    patterns:       Vec<String>,
    depthwise:      Vec<String>,
    depth:          usize,
    case_sensitive: bool,
    skip:           Option<SkipPredicate>,
    stop_at_match:  Option<usize>,
    timeout:        Option<Duration>,
    silent:         bool,
    fidelity:       Fidelity,
    lister:         Option<Box<dyn DirectoryLister>>,
    clock:          Option<Box<dyn Clock>>,
    collect_errors: bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            roots:          Vec::new(),
            patterns:       Vec::new(),
            depthwise:      Vec::new(),
            depth:          usize::MAX,
            case_sensitive: true,
            skip:           None,
            stop_at_match:  None,
            timeout:        None,
            silent:         false,
            fidelity:       Fidelity::Paths,
            lister:         None,
            clock:          None,
            collect_errors: false,
        }
    }
}

impl SearchBuilder {
    // ── Roots ─────────────────────────────────────────────────────────────

    /// Add one directory to search. Roots are searched in the order added.
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.roots.push(root.as_ref().to_path_buf());
        self
    }

    /// Add several roots at once.
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.roots
            .extend(roots.into_iter().map(|r| r.as_ref().to_path_buf()));
        self
    }

    // ── Patterns ──────────────────────────────────────────────────────────

    /// Add a main filename pattern (a regex, matched anywhere in the name).
    ///
    /// Multiple patterns are OR-combined. With none, everything matches.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the per-depth guide filters.
    ///
    /// The first filters the root's children, the second their children,
    /// and so on. Only directories passing every level are descended into,
    /// and nothing at or above the last guided level is ever returned.
    pub fn depthwise<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depthwise = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Match patterns case-sensitively (the default) or not.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Maximum depth below each root. `1` means the root's children only.
    /// Unlimited by default; raised automatically to cover the depthwise
    /// filters.
    ///
    /// Both built-in listers follow links. A directory that leads back to
    /// one of its own ancestors is reported as [`SearchError::Cycle`] and
    /// not expanded, so an unlimited depth still terminates on cyclic trees.
    pub fn depth(mut self, d: usize) -> Self {
        self.depth = d;
        self
    }

    /// Never descend into, or report, paths for which `skip` returns true.
    pub fn skip(mut self, skip: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.skip = Some(Box::new(skip));
        self
    }

    /// Stop after `n` matches across all roots. `0` yields an empty result.
    pub fn stop_at_match(mut self, n: usize) -> Self {
        self.stop_at_match = Some(n);
        self
    }

    /// Time budget per root. A root that runs out keeps what it found so far.
    pub fn timeout(mut self, budget: Duration) -> Self {
        self.timeout = Some(budget);
        self
    }

    /// Suppress warning-level diagnostics.
    pub fn silent(mut self, yes: bool) -> Self {
        self.silent = yes;
        self
    }

    /// How much to report per match. Defaults to [`Fidelity::Paths`].
    pub fn fidelity(mut self, fidelity: Fidelity) -> Self {
        self.fidelity = fidelity;
        self
    }

    /// Collect non-fatal errors into [`Results::errors`].
    ///
    /// Disabled by default; errors are still logged unless silent.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// Set the directory lister. Defaults to [`PortableLister`].
    pub fn lister(mut self, lister: impl DirectoryLister + 'static) -> Self {
        self.lister = Some(Box::new(lister));
        self
    }

    /// Set the clock polled for the time budget.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and assemble the engine without running it.
    ///
    /// Roots and fidelity are not part of the engine; pass them to
    /// [`TraversalEngine::run`] yourself.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidDepth`] and [`SearchError::InvalidPattern`].
    pub fn engine(self) -> Result<TraversalEngine, SearchError> {
        let config = SearchConfig::new(self.depth, &self.depthwise, self.case_sensitive)?
            .with_skip_predicate(self.skip)
            .with_stop_at_match(self.stop_at_match)
            .with_timeout(self.timeout)
            .with_silent(self.silent);

        let patterns = PatternSet::compile(&self.patterns, self.case_sensitive)?;

        let lister = self
            .lister
            .unwrap_or_else(|| Box::new(PortableLister::new()));

        let mut engine =
            TraversalEngine::new(config, patterns, lister).collect_errors(self.collect_errors);
        if let Some(clock) = self.clock {
            engine = engine.with_clock(clock);
        }

        Ok(engine)
    }

    /// Execute the search and return results.
    ///
    /// Blocks until every root is searched, the match cap is hit, or each
    /// root has used up its time budget.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration problems (no roots, zero depth,
    /// a pattern that does not compile), before anything is listed.
    /// Non-fatal errors during traversal are logged, and collected into
    /// [`Results::errors`] when `.collect_errors(true)` is set.
    pub fn run(mut self) -> Result<Results, SearchError> {
        if self.roots.is_empty() {
            return Err(SearchError::NoRoots);
        }

        let roots = std::mem::take(&mut self.roots);
        let fidelity = self.fidelity;
        let engine = self.engine()?;

        Ok(engine.run(&roots, fidelity))
    }
}
