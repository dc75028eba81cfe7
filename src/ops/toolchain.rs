//! Implementation of `stubgen toolchain`.
//!
//! Runs the compiler locator once and reports what it saw: the runtime,
//! the search path and either the compiler it found or why it failed.

use std::fmt::Write;
use std::path::PathBuf;

use crate::compiler::{CompilerHandle, LocateError, Locator};

/// What the locator found.
#[derive(Debug)]
pub struct ToolchainReport {
    pub tool: String,
    pub java_home: Option<PathBuf>,
    pub java_version: Option<String>,
    pub modular: bool,
    pub search_path: Vec<PathBuf>,
    pub result: Result<CompilerHandle, LocateError>,
}

impl ToolchainReport {
    pub fn found(&self) -> bool {
        self.result.is_ok()
    }
}

/// Locate the compiler and collect a report.
pub fn inspect(locator: &mut Locator) -> ToolchainReport {
    let result = locator.locate();
    let runtime = locator.runtime();
    ToolchainReport {
        tool: locator.tool().to_string(),
        java_home: runtime.home().map(PathBuf::from),
        java_version: runtime.version().map(String::from),
        modular: runtime.is_modular(),
        search_path: locator.search_path().to_vec(),
        result,
    }
}

/// Format a report for display.
pub fn format_report(report: &ToolchainReport, verbose: bool) -> String {
    let mut output = String::new();

    let home = report
        .java_home
        .as_ref()
        .map(|h| h.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    let version = report.java_version.as_deref().unwrap_or("(unknown)");

    let _ = writeln!(output, "Java home:    {}", home);
    let _ = writeln!(
        output,
        "Java version: {}{}",
        version,
        if report.modular { " (modular)" } else { "" }
    );

    match &report.result {
        Ok(handle) => {
            let _ = writeln!(output, "Compiler:     {}", handle.program.display());
        }
        Err(_) => {
            let _ = writeln!(output, "Compiler:     `{}` not found", report.tool);
        }
    }

    if verbose {
        let _ = writeln!(output, "Search path:");
        for dir in &report.search_path {
            let _ = writeln!(output, "  {}", dir.display());
        }
    }

    output
}
