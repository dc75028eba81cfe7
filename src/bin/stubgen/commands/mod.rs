//! Command implementations

pub mod build;
pub mod flags;
pub mod scan;
pub mod toolchain;

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::LayoutArgs;
use stubgen::core::{Flavor, LayoutOverrides, Project};
use stubgen::GlobalContext;

/// Flags shared by every command.
pub struct Globals {
    pub verbose: bool,
    pub manifest_path: Option<PathBuf>,
    pub tests: bool,
}

impl Globals {
    pub fn context(&self) -> Result<GlobalContext> {
        let mut ctx = GlobalContext::new()?.with_manifest_path(self.manifest_path.clone());
        ctx.set_verbose(self.verbose);
        Ok(ctx)
    }

    pub fn flavor(&self) -> Flavor {
        if self.tests {
            Flavor::Test
        } else {
            Flavor::Main
        }
    }

    /// Load the project with command-line layout overrides applied.
    pub fn project(&self, ctx: &GlobalContext, layout: LayoutArgs) -> Result<Project> {
        let overrides = LayoutOverrides {
            classes_dir: layout.classes_dir,
            output_dir: layout.output_dir,
            classpath: layout.classpath,
        };
        Project::load(ctx, self.flavor(), overrides)
    }
}
