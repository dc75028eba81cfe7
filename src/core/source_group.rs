//! Source groups: a set of include/exclude rules plus compiler options.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::options::OptionLayer;

/// One `[[source]]` entry of the manifest.
///
/// Options are tri-state here; they only mean something once resolved
/// against the global defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    /// Optional label used in logs and reports
    #[serde(default)]
    pub name: Option<String>,

    /// Glob patterns of class files to consider
    #[serde(default)]
    pub includes: BTreeSet<String>,

    /// Glob patterns of class files to skip
    #[serde(default)]
    pub excludes: BTreeSet<String>,

    /// Compiler options for this group
    #[serde(flatten)]
    pub options: OptionLayer,
}

impl SourceGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Human-readable identity of a group in logs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum GroupLabel {
    /// The synthesized group used when no `[[source]]` is declared
    Default,
    /// A declared group with a name
    Named(String),
    /// A declared group without a name, by position (1-based)
    Index(usize),
}

impl GroupLabel {
    /// Label for the declared group at `index` (0-based).
    pub fn for_group(group: &SourceGroup, index: usize) -> Self {
        match group.name {
            Some(ref name) => GroupLabel::Named(name.clone()),
            None => GroupLabel::Index(index + 1),
        }
    }

    /// True if `name` selects this group.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            GroupLabel::Default => name == "default",
            GroupLabel::Named(n) => n == name,
            GroupLabel::Index(i) => name.parse::<usize>().map(|n| n == *i).unwrap_or(false),
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Default => write!(f, "default"),
            GroupLabel::Named(name) => write!(f, "{}", name),
            GroupLabel::Index(i) => write!(f, "source #{}", i),
        }
    }
}

impl From<GroupLabel> for String {
    fn from(label: GroupLabel) -> Self {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_deserializes_flattened_options() {
        let group: SourceGroup = toml::from_str(
            r#"
name = "api"
includes = ["a/b/*"]
iiop = true
poa = true
"#,
        )
        .unwrap();

        assert_eq!(group.name.as_deref(), Some("api"));
        assert!(group.includes.contains("a/b/*"));
        assert!(group.excludes.is_empty());
        assert_eq!(group.options.iiop, Some(true));
        assert_eq!(group.options.poa, Some(true));
        assert_eq!(group.options.idl, None);
    }

    #[test]
    fn test_labels() {
        let named = SourceGroup::new().named("api");
        assert_eq!(GroupLabel::for_group(&named, 0).to_string(), "api");

        let anonymous = GroupLabel::for_group(&SourceGroup::new(), 1);
        assert_eq!(anonymous.to_string(), "source #2");
        assert!(anonymous.matches("2"));
        assert!(GroupLabel::Default.matches("default"));
    }
}
