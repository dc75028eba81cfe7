//! Scanned class artifacts and the stub targets derived from them.

use std::fmt;

use serde::Serialize;

/// Extension of compiled class artifacts.
pub const CLASS_EXTENSION: &str = ".class";

/// Suffix the compiler appends to a type name for its stub.
pub const STUB_SUFFIX: &str = "_Stub";

/// Exclude pattern that keeps generated stubs out of future scans.
pub const STUB_CLASS_PATTERN: &str = "**/*_Stub.class";

/// Include pattern used when nothing else is configured.
pub const INCLUDE_ALL: &str = "**/*";

/// Convert a `/`-separated class file path into a binary type name.
///
/// `a/b/Remote.class` becomes `a.b.Remote`. Paths without the class
/// extension (literal includes naming a type) convert the same way.
pub fn file_to_class_name(relative_path: &str) -> String {
    relative_path
        .strip_suffix(CLASS_EXTENSION)
        .unwrap_or(relative_path)
        .trim_start_matches('/')
        .replace('/', ".")
}

/// Convert a binary type name into its internal (`/`-separated) form.
pub fn class_name_to_internal(class_name: &str) -> String {
    class_name.replace('.', "/")
}

/// A class file found under the classes root, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateArtifact {
    /// Fully qualified binary name (`a.b.Remote`)
    pub class_name: String,
    /// Path relative to the classes root, `/`-separated
    pub relative_path: String,
}

impl CandidateArtifact {
    /// Build a candidate from its path relative to the classes root.
    pub fn from_relative_path(relative_path: impl Into<String>) -> Self {
        let relative_path = relative_path.into();
        CandidateArtifact {
            class_name: file_to_class_name(&relative_path),
            relative_path,
        }
    }
}

/// A type accepted for stub generation.
///
/// Ordered by name, which is also the order targets are handed to the
/// compiler.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StubTarget {
    class_name: String,
}

impl StubTarget {
    /// Create a target from a binary type name.
    pub fn new(class_name: impl Into<String>) -> Self {
        StubTarget {
            class_name: class_name.into(),
        }
    }

    /// Fully qualified binary name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Relative path of the generated stub under the output directory.
    pub fn stub_artifact(&self) -> String {
        format!(
            "{}{}{}",
            class_name_to_internal(&self.class_name),
            STUB_SUFFIX,
            CLASS_EXTENSION
        )
    }
}

impl From<CandidateArtifact> for StubTarget {
    fn from(candidate: CandidateArtifact) -> Self {
        StubTarget::new(candidate.class_name)
    }
}

impl fmt::Display for StubTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name)
    }
}
