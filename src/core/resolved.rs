//! Fully resolved configuration for one compiler invocation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::options::CompilerOptions;
use crate::core::source_group::GroupLabel;

/// Everything one source group needs to be scanned and compiled.
///
/// Only the configuration resolver builds these, so `poa` never appears
/// without `iiop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    /// Which group this came from
    pub label: GroupLabel,

    /// Root of the compiled classes
    pub classes_dir: PathBuf,

    /// Root of the generated stubs
    pub output_dir: PathBuf,

    /// Compiler classpath (absolute, de-duplicated, classes dir included)
    pub classpath: Vec<String>,

    /// Include patterns
    pub includes: BTreeSet<String>,

    /// Exclude patterns (always contains the stub pattern)
    pub excludes: BTreeSet<String>,

    /// Grace period before an existing stub counts as stale
    pub stale_millis: u64,

    /// Concrete compiler options
    pub options: CompilerOptions,
}
