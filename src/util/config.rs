//! Toolchain configuration files.
//!
//! The compiler locator reads two optional files:
//! - Global: `~/.stubgen/toolchain.toml` - user-wide defaults
//! - Project: `.stubgen/toolchain.toml` - project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default name of the stub compiler executable.
pub const DEFAULT_TOOL: &str = "rmic";

/// Toolchain configuration for locating the stub compiler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,
}

/// Locator inputs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Java installation root (overrides JAVA_HOME)
    pub java_home: Option<PathBuf>,

    /// Directories searched before the ambient PATH
    #[serde(default)]
    pub search_path: Vec<PathBuf>,

    /// Compiler executable name (default: rmic)
    pub tool: Option<String>,
}

impl ToolchainConfig {
    /// Load toolchain configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read toolchain config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load toolchain configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to load toolchain config from {}: {:#}",
                    path.display(),
                    e
                );
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Compiler executable name.
    pub fn tool(&self) -> &str {
        self.toolchain.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Search paths stack: the overriding file's directories come first.
    pub fn merge(&mut self, other: ToolchainConfig) {
        if other.toolchain.java_home.is_some() {
            self.toolchain.java_home = other.toolchain.java_home;
        }
        if other.toolchain.tool.is_some() {
            self.toolchain.tool = other.toolchain.tool;
        }
        if !other.toolchain.search_path.is_empty() {
            let mut search_path = other.toolchain.search_path;
            search_path.append(&mut self.toolchain.search_path);
            self.toolchain.search_path = search_path;
        }
    }

    /// Resolve relative search path entries and java_home against `base`.
    fn anchored(mut self, base: &Path) -> Self {
        if let Some(home) = self.toolchain.java_home.take() {
            self.toolchain.java_home = Some(crate::util::fs::absolutize(base, &home));
        }
        self.toolchain.search_path = self
            .toolchain
            .search_path
            .iter()
            .map(|p| crate::util::fs::absolutize(base, p))
            .collect();
        self
    }
}

/// Load merged toolchain configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.stubgen/toolchain.toml)
/// 2. Global config (~/.stubgen/toolchain.toml)
/// 3. Defaults
///
/// Relative paths inside the project file resolve against the project root.
pub fn load_toolchain_config(global_path: Option<&Path>, project_root: &Path) -> ToolchainConfig {
    let mut config = ToolchainConfig::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            let base = global_path.parent().unwrap_or(Path::new("."));
            config.merge(ToolchainConfig::load_or_default(global_path).anchored(base));
        }
    }

    let project_path = project_toolchain_config_path(project_root);
    if project_path.exists() {
        config.merge(ToolchainConfig::load_or_default(&project_path).anchored(project_root));
    }

    config
}

/// Get the global stubgen config directory (~/.stubgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".stubgen"))
}

/// Get the global toolchain config path (~/.stubgen/toolchain.toml).
pub fn global_toolchain_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project toolchain config path (.stubgen/toolchain.toml).
pub fn project_toolchain_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".stubgen").join("toolchain.toml")
}
