use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::error::SearchError;
use crate::pattern::Pattern;

/// Predicate deciding whether a path is skipped outright.
pub type SkipPredicate = Box<dyn Fn(&Path) -> bool + Send + Sync>;

/// Validated parameters for one search.
///
/// Built once, then handed to the [`TraversalEngine`](crate::TraversalEngine),
/// which only reads it.
pub struct SearchConfig {
    depth: usize,
    depthwise: Vec<Pattern>,
    case_sensitive: bool,
    skip: Option<SkipPredicate>,
    stop_at_match: Option<usize>,
    timeout: Option<Duration>,
    silent: bool,
}

impl SearchConfig {
    /// Validate depth and compile the depthwise patterns.
    ///
    /// `depthwise[0]` filters children of the root, `depthwise[1]` their
    /// children, and so on. The effective depth is raised to
    /// `depthwise.len() + 1` when needed, so entries below the whole filter
    /// chain are always reachable.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidDepth`] for `depth == 0`, and
    /// [`SearchError::InvalidPattern`] for a depthwise pattern that does not
    /// compile.
    pub fn new<S: AsRef<str>>(
        depth: usize,
        depthwise: &[S],
        case_sensitive: bool,
    ) -> Result<Self, SearchError> {
        if depth == 0 {
            return Err(SearchError::InvalidDepth(depth));
        }

        let depthwise = depthwise
            .iter()
            .map(|raw| Pattern::compile(raw.as_ref(), case_sensitive))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            depth: depth.max(depthwise.len().saturating_add(1)),
            depthwise,
            case_sensitive,
            skip: None,
            stop_at_match: None,
            timeout: None,
            silent: false,
        })
    }

    pub fn with_skip(mut self, skip: impl Fn(&Path) -> bool + Send + Sync + 'static) -> Self {
        self.skip = Some(Box::new(skip));
        self
    }

    pub(crate) fn with_skip_predicate(mut self, skip: Option<SkipPredicate>) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_stop_at_match(mut self, cap: Option<usize>) -> Self {
        self.stop_at_match = cap;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Effective maximum depth. Root = 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn depthwise(&self) -> &[Pattern] {
        &self.depthwise
    }

    /// The depthwise filter guarding entries at `depth`, if any.
    pub fn depthwise_at(&self, depth: usize) -> Option<&Pattern> {
        depth.checked_sub(1).and_then(|i| self.depthwise.get(i))
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_skipped(&self, path: &Path) -> bool {
        self.skip.as_ref().is_some_and(|skip| skip(path))
    }

    pub fn stop_at_match(&self) -> Option<usize> {
        self.stop_at_match
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn silent(&self) -> bool {
        self.silent
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("depth", &self.depth)
            .field(
                "depthwise",
                &self.depthwise.iter().map(Pattern::as_str).collect::<Vec<_>>(),
            )
            .field("case_sensitive", &self.case_sensitive)
            .field("skip", &self.skip.is_some())
            .field("stop_at_match", &self.stop_at_match)
            .field("timeout", &self.timeout)
            .field("silent", &self.silent)
            .finish()
    }
}
