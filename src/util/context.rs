//! Global context for stubgen operations.
//!
//! Provides centralized access to the working directory, manifest discovery
//! and toolchain configuration paths.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::util::config::{global_toolchain_config_path, load_toolchain_config, ToolchainConfig};

/// Name of the project manifest.
pub const MANIFEST_NAME: &str = "Stubgen.toml";

/// Global context shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Explicit manifest path (from --manifest-path)
    manifest_path: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            manifest_path: None,
            verbose: false,
        }
    }

    /// Use an explicit manifest instead of searching for one.
    pub fn with_manifest_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_path = path.map(|p| crate::util::fs::absolutize(&self.cwd, &p));
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Locate the project manifest.
    ///
    /// An explicit `--manifest-path` must exist. Otherwise the working
    /// directory and its ancestors are searched; `Ok(None)` means the project
    /// runs on defaults.
    pub fn find_manifest(&self) -> Result<Option<PathBuf>> {
        if let Some(ref path) = self.manifest_path {
            if !path.is_file() {
                bail!("manifest not found: {}", path.display());
            }
            return Ok(Some(path.clone()));
        }

        Ok(self
            .cwd
            .ancestors()
            .map(|dir| dir.join(MANIFEST_NAME))
            .find(|candidate| candidate.is_file()))
    }

    /// Project root: the manifest's directory, or the working directory.
    pub fn project_root(&self) -> Result<PathBuf> {
        Ok(self
            .find_manifest()?
            .and_then(|m| m.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| self.cwd.clone()))
    }

    /// Load the merged toolchain configuration for this project.
    pub fn toolchain_config(&self) -> Result<ToolchainConfig> {
        let root = self.project_root()?;
        let global = global_toolchain_config_path();
        Ok(load_toolchain_config(global.as_deref(), &root))
    }
}
