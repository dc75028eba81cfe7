//! Core data model: manifest, project layout, source groups and artifacts.

pub mod artifact;
pub mod manifest;
pub mod options;
pub mod project;
pub mod resolved;
pub mod source_group;

pub use artifact::{CandidateArtifact, StubTarget};
pub use manifest::Manifest;
pub use options::{CompilerOptions, OptionLayer};
pub use project::{Flavor, LayoutOverrides, Project};
pub use resolved::ResolvedConfiguration;
pub use source_group::{GroupLabel, SourceGroup};
