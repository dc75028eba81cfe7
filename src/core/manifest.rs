//! Stubgen.toml manifest parsing and schema.
//!
//! ```toml
//! [stubgen]
//! classpath = ["lib/api.jar"]
//! includes = ["com/example/**/*"]
//!
//! [[source]]
//! name = "corba"
//! includes = ["com/example/corba/*"]
//! iiop = true
//! poa = true
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::options::OptionLayer;
use crate::core::source_group::SourceGroup;

/// The `[stubgen]` table: project layout, scan defaults and global options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSection {
    /// Compiled classes to scan (default: target/classes)
    #[serde(default)]
    pub classes_dir: Option<PathBuf>,

    /// Where stubs are written (default: target/rmi-classes)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Compiled test classes (default: target/test-classes)
    #[serde(default)]
    pub test_classes_dir: Option<PathBuf>,

    /// Where test stubs are written (default: target/rmi-test-classes)
    #[serde(default)]
    pub test_output_dir: Option<PathBuf>,

    /// Compile classpath entries
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Extra classpath entries for the test flavor
    #[serde(default)]
    pub test_classpath: Vec<PathBuf>,

    /// Grace period before an existing stub counts as stale
    #[serde(default)]
    pub stale_millis: u64,

    /// Default include patterns
    #[serde(default)]
    pub includes: BTreeSet<String>,

    /// Default exclude patterns
    #[serde(default)]
    pub excludes: BTreeSet<String>,

    /// Global compiler options
    #[serde(flatten)]
    pub options: OptionLayer,
}

/// Keys of `[stubgen]` besides the compiler options.
const GLOBAL_KEYS: &[&str] = &[
    "classes_dir",
    "output_dir",
    "test_classes_dir",
    "test_output_dir",
    "classpath",
    "test_classpath",
    "stale_millis",
    "includes",
    "excludes",
];

/// Keys of a `[[source]]` entry besides the compiler options.
const SOURCE_KEYS: &[&str] = &["name", "includes", "excludes"];

/// The parsed Stubgen.toml manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Global settings
    #[serde(default)]
    pub stubgen: GlobalSection,

    /// Explicit source groups
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceGroup>,
}

impl Manifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = crate::util::fs::read_to_string(path)?;
        Self::parse(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse manifest text.
    ///
    /// Unknown keys are rejected; flattened option tables would otherwise
    /// drop them silently.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        check_keys(&table)?;
        Ok(toml::Value::Table(table).try_into()?)
    }
}

fn check_keys(table: &toml::Table) -> Result<()> {
    if let Some(key) = table.keys().find(|k| *k != "stubgen" && *k != "source") {
        bail!("unknown key `{}` in manifest", key);
    }
    if let Some(toml::Value::Table(global)) = table.get("stubgen") {
        reject_unknown(global, GLOBAL_KEYS, "[stubgen]")?;
    }
    if let Some(toml::Value::Array(sources)) = table.get("source") {
        for (i, source) in sources.iter().enumerate() {
            if let toml::Value::Table(source) = source {
                reject_unknown(source, SOURCE_KEYS, &format!("[[source]] entry {}", i + 1))?;
            }
        }
    }
    Ok(())
}

fn reject_unknown(table: &toml::Table, known: &[&str], section: &str) -> Result<()> {
    let unknown = table
        .keys()
        .find(|k| !known.contains(&k.as_str()) && !OptionLayer::FIELDS.contains(&k.as_str()));
    match unknown {
        Some(key) => bail!("unknown key `{}` in {}", key, section),
        None => Ok(()),
    }
}
