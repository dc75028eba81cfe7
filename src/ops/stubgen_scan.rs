//! Implementation of `stubgen scan` and `stubgen flags`.
//!
//! Both stop short of running the compiler: `scan` reports which types are
//! out of date, `flags` the argument sequence each group would get.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::compiler::ArgumentBuilder;
use crate::core::{GroupLabel, Project, ResolvedConfiguration, StubTarget};
use crate::resolver::resolve;
use crate::scanner::SourceScanner;

/// Scan result for one group.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    #[serde(rename = "group")]
    pub label: GroupLabel,
    pub classes_dir: String,
    pub output_dir: String,
    pub targets: BTreeSet<StubTarget>,
}

/// Compiler arguments for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupFlags {
    #[serde(rename = "group")]
    pub label: GroupLabel,
    pub args: Vec<String>,
}

/// Resolve and scan every group without compiling.
pub fn scan(project: &Project) -> Result<Vec<ScanReport>> {
    let scanner = SourceScanner::new();
    Ok(resolve(project)?
        .into_iter()
        .map(|config| ScanReport {
            targets: scanner.scan(&config),
            classes_dir: config.classes_dir.display().to_string(),
            output_dir: config.output_dir.display().to_string(),
            label: config.label,
        })
        .collect())
}

/// Render the compiler arguments of every group, or of the group `name`.
pub fn flags(project: &Project, name: Option<&str>, debug: bool) -> Result<Vec<GroupFlags>> {
    let groups = select(resolve(project)?, name)?;
    let scanner = SourceScanner::new();

    Ok(groups
        .iter()
        .map(|config| GroupFlags {
            label: config.label.clone(),
            args: ArgumentBuilder::new(config)
                .debug(debug)
                .build(&scanner.scan(config)),
        })
        .collect())
}

fn select(groups: Vec<ResolvedConfiguration>, name: Option<&str>) -> Result<Vec<ResolvedConfiguration>> {
    let Some(name) = name else {
        return Ok(groups);
    };

    let available: Vec<String> = groups.iter().map(|g| g.label.to_string()).collect();
    let selected: Vec<_> = groups.into_iter().filter(|g| g.label.matches(name)).collect();
    if selected.is_empty() {
        bail!(
            "unknown source group `{}`\n\
             available groups: {}",
            name,
            available.join(", ")
        );
    }
    Ok(selected)
}
