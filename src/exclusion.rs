// Exclusion matcher - opt request paths out of minification

use regex::Regex;

use crate::error::MinifyError;

/// Ordered list of compiled path patterns
///
/// Patterns are unanchored regular expressions: `/raw/` matches any path
/// containing `/raw/`, while `^/raw/` only matches paths starting with it.
/// Compilation happens once, when configuration is loaded, so a malformed
/// pattern is reported as a configuration error rather than per request.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    patterns: Vec<Regex>,
}

impl ExclusionMatcher {
    /// Compile `patterns` in order, failing on the first invalid one
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, MinifyError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| MinifyError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// True if any pattern matches `path`; stops at the first match
    pub fn matches(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }

    /// Source text of the first pattern that matches `path`
    pub fn first_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(path))
            .map(|re| re.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One-shot form: compile `patterns` and test `path` against them
pub fn matches<S: AsRef<str>>(path: &str, patterns: &[S]) -> Result<bool, MinifyError> {
    Ok(ExclusionMatcher::new(patterns)?.matches(path))
}
