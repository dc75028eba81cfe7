//! Include/exclude glob matching relative to the classes root.

use glob::{MatchOptions, Pattern};

use super::ScanError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// True if `pattern` contains glob metacharacters.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Compiled include and exclude patterns.
///
/// A path is selected when it matches at least one include and no
/// exclude. `**` matches any number of directories; a trailing `/` is
/// shorthand for everything below that directory.
#[derive(Debug, Clone)]
pub struct PatternSet {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<'a, I, E>(includes: I, excludes: E) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = &'a String>,
        E: IntoIterator<Item = &'a String>,
    {
        Ok(PatternSet {
            includes: compile_all(includes)?,
            excludes: compile_all(excludes)?,
        })
    }

    /// Test a `/`-separated path relative to the classes root.
    pub fn matches(&self, relative_path: &str) -> bool {
        let included = self
            .includes
            .iter()
            .any(|p| p.matches_with(relative_path, MATCH_OPTIONS));
        included
            && !self
                .excludes
                .iter()
                .any(|p| p.matches_with(relative_path, MATCH_OPTIONS))
    }
}

fn compile_all<'a>(patterns: impl IntoIterator<Item = &'a String>) -> Result<Vec<Pattern>, ScanError> {
    patterns.into_iter().map(|p| compile(p)).collect()
}

fn compile(pattern: &str) -> Result<Pattern, ScanError> {
    let mut normalized = pattern
        .replace('\\', "/")
        .split('/')
        .map(collapse_stars)
        .collect::<Vec<_>>()
        .join("/");
    if normalized.ends_with('/') {
        normalized.push_str("**");
    }
    Pattern::new(&normalized).map_err(|source| ScanError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// A `**` that is not a whole path segment acts like `*`.
fn collapse_stars(segment: &str) -> String {
    if segment == "**" || !segment.contains("**") {
        return segment.to_string();
    }
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c != '*' || !out.ends_with('*') {
            out.push(c);
        }
    }
    out
}
