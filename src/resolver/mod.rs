//! Configuration resolution.
//!
//! Flattens the `[stubgen]` defaults and the `[[source]]` groups of a project
//! into one [`ResolvedConfiguration`] per group to process:
//!
//! - no groups declared: one default group built from the global settings;
//! - groups declared: global compiler options must be unset, every group
//!   option falls back to the built-in default;
//! - includes/excludes fall back group -> global -> built-in, and the stub
//!   pattern is always excluded;
//! - `poa` without `iiop` is rejected.

mod errors;

pub use errors::ConfigError;

use std::collections::BTreeSet;

use crate::core::artifact::{INCLUDE_ALL, STUB_CLASS_PATTERN};
use crate::core::options::{CompilerOptions, OptionLayer};
use crate::core::{GroupLabel, Project, ResolvedConfiguration};

/// Resolve every source group of a project.
///
/// All validation happens here, before anything touches the filesystem.
pub fn resolve(project: &Project) -> Result<Vec<ResolvedConfiguration>, ConfigError> {
    let global = &project.manifest().stubgen;
    let groups = &project.manifest().sources;

    let layers: Vec<(GroupLabel, &OptionLayer, &BTreeSet<String>, &BTreeSet<String>)> =
        if groups.is_empty() {
            vec![(
                GroupLabel::Default,
                &global.options,
                &global.includes,
                &global.excludes,
            )]
        } else {
            let conflicts = global.options.explicit_fields();
            if !conflicts.is_empty() {
                return Err(ConfigError::ConflictingGlobalOptions {
                    fields: conflicts.into_iter().map(String::from).collect(),
                });
            }
            groups
                .iter()
                .enumerate()
                .map(|(i, g)| (GroupLabel::for_group(g, i), &g.options, &g.includes, &g.excludes))
                .collect()
        };

    let defaults = global.options.resolve_over(&CompilerOptions::default());
    let classpath = project.compiler_classpath();

    let mut resolved = Vec::with_capacity(layers.len());
    for (label, options, includes, excludes) in layers {
        let options = options.resolve_over(&defaults);
        validate(&label, &options)?;

        resolved.push(ResolvedConfiguration {
            includes: resolve_includes(includes, &global.includes),
            excludes: resolve_excludes(excludes, &global.excludes),
            label,
            classes_dir: project.classes_dir().to_path_buf(),
            output_dir: project.output_dir().to_path_buf(),
            classpath: classpath.clone(),
            stale_millis: global.stale_millis,
            options,
        });
    }

    Ok(resolved)
}

fn validate(label: &GroupLabel, options: &CompilerOptions) -> Result<(), ConfigError> {
    if options.poa && !options.iiop {
        return Err(ConfigError::PoaWithoutIiop {
            group: label.to_string(),
        });
    }

    for (flag, parent) in options.ignored_dependent_flags() {
        tracing::warn!(
            "source group `{}`: `{}` has no effect unless `{}` is enabled",
            label,
            flag,
            parent
        );
    }

    Ok(())
}

fn resolve_includes(group: &BTreeSet<String>, global: &BTreeSet<String>) -> BTreeSet<String> {
    if !group.is_empty() {
        group.clone()
    } else if !global.is_empty() {
        global.clone()
    } else {
        BTreeSet::from([INCLUDE_ALL.to_string()])
    }
}

fn resolve_excludes(group: &BTreeSet<String>, global: &BTreeSet<String>) -> BTreeSet<String> {
    let mut excludes = if !group.is_empty() {
        group.clone()
    } else {
        global.clone()
    };
    excludes.insert(STUB_CLASS_PATTERN.to_string());
    excludes
}
