//! Java runtime inspection.
//!
//! The locator only needs two facts about the active runtime: where it is
//! installed (to find the auxiliary `bin` directory) and which version it
//! reports (to tell a JRE-instead-of-JDK setup from a modular runtime that
//! simply does not ship the compiler any more).

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::util::process::{find_executable, ProcessBuilder};

/// Install root and version of the active Java runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaRuntime {
    home: Option<PathBuf>,
    version: Option<String>,
}

impl JavaRuntime {
    pub fn new(home: Option<PathBuf>, version: Option<String>) -> Self {
        JavaRuntime { home, version }
    }

    /// Detect the active runtime.
    ///
    /// Root: `java_home` override, then `JAVA_HOME`, then the `java` found on
    /// `PATH`. Version: the `release` file, then `java -version`.
    pub fn detect(java_home: Option<&Path>) -> Self {
        let home = java_home
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("JAVA_HOME").map(PathBuf::from))
            .or_else(home_from_path);

        let version = home
            .as_deref()
            .and_then(read_release_version)
            .or_else(|| version_from_executable(home.as_deref()));

        tracing::debug!(
            "java runtime: home={:?} version={:?}",
            home.as_deref().map(Path::display).map(|d| d.to_string()),
            version
        );

        JavaRuntime { home, version }
    }

    /// Installation root, if known.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Reported version string, if known.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// True for runtimes with a module system (9 and later).
    ///
    /// Pre-module runtimes report `1.x`; an unknown version counts as legacy.
    pub fn is_modular(&self) -> bool {
        self.version
            .as_deref()
            .map(|v| !v.starts_with("1."))
            .unwrap_or(false)
    }

    /// Directory holding the runtime's bundled tools.
    ///
    /// A JRE nested inside a JDK (`<jdk>/jre`) keeps its tools one level up.
    pub fn aux_tool_dir(&self) -> Option<PathBuf> {
        let home = self.home.as_deref()?;
        if home.file_name().and_then(|n| n.to_str()) == Some("jre") {
            home.parent().map(|jdk| jdk.join("bin"))
        } else {
            Some(home.join("bin"))
        }
    }
}

fn home_from_path() -> Option<PathBuf> {
    let java = find_executable("java")?;
    let java = std::fs::canonicalize(java).ok()?;
    // <home>/bin/java
    java.parent()?.parent().map(Path::to_path_buf)
}

/// Read `JAVA_VERSION` from `<home>/release`.
fn read_release_version(home: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(home.join("release")).ok()?;
    contents.lines().find_map(|line| {
        line.strip_prefix("JAVA_VERSION=")
            .map(|v| v.trim().trim_matches('"').to_string())
    })
}

fn version_from_executable(home: Option<&Path>) -> Option<String> {
    let program = home
        .map(|h| h.join("bin").join(if cfg!(windows) { "java.exe" } else { "java" }))
        .filter(|p| p.is_file())
        .or_else(|| find_executable("java"))?;

    let output = ProcessBuilder::new(program).arg("-version").exec().ok()?;
    // `java -version` writes to stderr
    let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stdout));
    parse_version_output(&text)
}

/// Extract the quoted version from `java -version` output.
pub fn parse_version_output(text: &str) -> Option<String> {
    let re = Regex::new(r#"version "([^"]+)""#).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
