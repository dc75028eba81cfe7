//! Implementation of `stubgen build`.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::compiler::{ArgumentBuilder, CompilerBackend};
use crate::core::{GroupLabel, Project, StubTarget};
use crate::resolver::resolve;
use crate::scanner::SourceScanner;
use crate::util::fs::ensure_dir;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Debug logging is enabled; the compiler runs with `-verbose`
    pub debug: bool,
}

/// Outcome for one source group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub label: GroupLabel,
    /// Types handed to the compiler (empty if nothing was out of date)
    pub targets: BTreeSet<StubTarget>,
}

impl GroupReport {
    /// Stub artifacts the compiler generated, relative to the output dir.
    pub fn stub_artifacts(&self) -> Vec<String> {
        self.targets.iter().map(StubTarget::stub_artifact).collect()
    }
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildResult {
    pub groups: Vec<GroupReport>,
}

impl BuildResult {
    /// Every generated stub artifact, across groups.
    pub fn stub_artifacts(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(GroupReport::stub_artifacts)
            .collect()
    }

    /// Number of compiler invocations made.
    pub fn invocations(&self) -> usize {
        self.groups.iter().filter(|g| !g.targets.is_empty()).count()
    }
}

/// Generate stubs for every source group of a project.
///
/// Configuration is validated up front, so a bad group aborts the build
/// before anything is scanned. Groups then run one after the other; each
/// gets its own compiler invocation against the shared backend.
pub fn build<B: CompilerBackend>(
    project: &Project,
    backend: &mut B,
    opts: &BuildOptions,
) -> Result<BuildResult> {
    let groups = resolve(project)?;

    ensure_dir(project.output_dir())?;

    let scanner = SourceScanner::new();
    let mut result = BuildResult::default();

    for config in &groups {
        let targets = scanner.scan(config);

        if targets.is_empty() {
            tracing::info!("No out of date rmi classes to process.");
        } else {
            tracing::info!("Compiling {} remote classes", targets.len());

            let args = ArgumentBuilder::new(config).debug(opts.debug).build(&targets);
            tracing::debug!("rmic arguments: {}", args.join(" "));

            let handle = backend.locate()?;
            backend
                .invoke(&handle, &args)
                .with_context(|| format!("failed to generate stubs for source group `{}`", config.label))?;
        }

        result.groups.push(GroupReport {
            label: config.label.clone(),
            targets,
        });
    }

    Ok(result)
}
