use regex::{Regex, RegexBuilder};

use crate::error::SearchError;

/// Raw forms that canonicalize to the match-anything sentinel.
const MATCH_ANYTHING: [&str; 2] = ["", ".*"];

/// A compiled filename pattern.
///
/// Matching is unanchored: `log` matches `changelog.md`. Anchor explicitly
/// with `^` and `$` for whole-name matches.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    // `None` is the match-anything sentinel.
    regex: Option<Regex>,
}

impl Pattern {
    /// Compile `raw`. `""` and `".*"` never touch the regex engine.
    pub fn compile(raw: &str, case_sensitive: bool) -> Result<Self, SearchError> {
        if MATCH_ANYTHING.contains(&raw) {
            return Ok(Self::any());
        }

        let regex = RegexBuilder::new(raw)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|source| SearchError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;

        Ok(Self {
            raw: raw.to_string(),
            regex: Some(regex),
        })
    }

    /// The match-anything sentinel.
    pub fn any() -> Self {
        Self {
            raw: String::new(),
            regex: None,
        }
    }

    pub fn is_any(&self) -> bool {
        self.regex.is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, name: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(name),
            None => true,
        }
    }
}

/// An OR-combination of patterns: any one match suffices.
///
/// An empty set matches everything, as does a set holding any
/// match-anything member.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(raws: &[S], case_sensitive: bool) -> Result<Self, SearchError> {
        let patterns = raws
            .iter()
            .map(|raw| Pattern::compile(raw.as_ref(), case_sensitive))
            .collect::<Result<Vec<_>, _>>()?;

        // One sentinel makes the whole disjunction trivially true.
        if patterns.iter().any(Pattern::is_any) {
            return Ok(Self::default());
        }

        Ok(Self { patterns })
    }

    pub fn is_any(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.is_any() || self.patterns.iter().any(|p| p.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_dot_star_are_sentinels() {
        assert!(Pattern::compile("", true).unwrap().is_any());
        assert!(Pattern::compile(".*", true).unwrap().is_any());
        assert!(!Pattern::compile(".+", true).unwrap().is_any());
        assert!(!Pattern::compile("data.*", true).unwrap().is_any());
    }

    #[test]
    fn matching_is_unanchored() {
        let p = Pattern::compile("log", true).unwrap();
        assert!(p.is_match("changelog.md"));

        let anchored = Pattern::compile("^log$", true).unwrap();
        assert!(!anchored.is_match("changelog"));
        assert!(anchored.is_match("log"));
    }

    #[test]
    fn case_flag_applies() {
        let insensitive = Pattern::compile("foo", false).unwrap();
        assert!(insensitive.is_match("FOO.TXT"));

        let sensitive = Pattern::compile("foo", true).unwrap();
        assert!(!sensitive.is_match("FOO.TXT"));
    }

    #[test]
    fn bad_regex_is_rejected() {
        let err = Pattern::compile("(unclosed", true).unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn set_is_or_combined() {
        let set = PatternSet::compile(&["\\.rs$", "\\.toml$"], true).unwrap();
        assert!(set.is_match("lib.rs"));
        assert!(set.is_match("Cargo.toml"));
        assert!(!set.is_match("README.md"));
    }

    #[test]
    fn set_with_sentinel_matches_everything() {
        let set = PatternSet::compile(&["\\.rs$", ".*"], true).unwrap();
        assert!(set.is_any());
        assert!(set.is_match("README.md"));

        let empty = PatternSet::compile::<&str>(&[], true).unwrap();
        assert!(empty.is_any());
    }
}
