//! Staleness detection between the classes root and the stub root.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use walkdir::WalkDir;

use super::pattern::PatternSet;
use super::ScanError;
use crate::core::artifact::{CLASS_EXTENSION, STUB_SUFFIX};
use crate::util::fs::{modified, to_slash};

/// Maps a source file to the file generated from it by suffix replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMapping {
    source_suffix: String,
    target_suffix: String,
}

impl SuffixMapping {
    pub fn new(source_suffix: impl Into<String>, target_suffix: impl Into<String>) -> Self {
        SuffixMapping {
            source_suffix: source_suffix.into(),
            target_suffix: target_suffix.into(),
        }
    }

    /// `X.class` to `X_Stub.class`.
    pub fn stub() -> Self {
        SuffixMapping::new(
            CLASS_EXTENSION,
            format!("{}{}", STUB_SUFFIX, CLASS_EXTENSION),
        )
    }

    /// Relative target path, or `None` if the source suffix does not match.
    pub fn target_for(&self, relative_path: &str) -> Option<String> {
        relative_path
            .strip_suffix(&self.source_suffix)
            .map(|stem| format!("{}{}", stem, self.target_suffix))
    }
}

/// Selects sources whose generated output is missing or out of date.
#[derive(Debug, Clone)]
pub struct StaleSourceScanner {
    stale_after: Duration,
    patterns: PatternSet,
    mapping: SuffixMapping,
}

impl StaleSourceScanner {
    /// `stale_millis` is how much newer a source must be than its output
    /// before the output counts as out of date.
    pub fn new(stale_millis: u64, patterns: PatternSet, mapping: SuffixMapping) -> Self {
        StaleSourceScanner {
            stale_after: Duration::from_millis(stale_millis),
            patterns,
            mapping,
        }
    }

    /// Relative (`/`-separated) paths of stale sources under `source_dir`.
    pub fn scan(&self, source_dir: &Path, target_dir: &Path) -> Result<BTreeSet<String>, ScanError> {
        let mut stale = BTreeSet::new();

        for entry in WalkDir::new(source_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(source_dir) else {
                continue;
            };
            let relative = to_slash(relative);

            if !self.patterns.matches(&relative) {
                continue;
            }
            let Some(target) = self.mapping.target_for(&relative) else {
                continue;
            };

            if self.is_stale(entry.path(), &target_dir.join(&target))? {
                tracing::trace!("{} is stale", relative);
                stale.insert(relative);
            }
        }

        Ok(stale)
    }

    fn is_stale(&self, source: &Path, target: &Path) -> Result<bool, ScanError> {
        let Some(target_time) = modified(target) else {
            return Ok(true);
        };
        let source_time = std::fs::metadata(source)
            .and_then(|m| m.modified())
            .map_err(|e| ScanError::Io {
                path: source.to_path_buf(),
                source: e,
            })?;

        Ok(source_time > target_time + self.stale_after)
    }
}
