//! `stubgen build` command

use anyhow::Result;
use tracing::Level;

use super::Globals;
use crate::cli::BuildArgs;
use stubgen::compiler::OutputSink;
use stubgen::ops::stubgen_build::{build, BuildOptions};
use stubgen::util::fs::relative_path;
use stubgen::RmicBackend;

pub fn execute(args: BuildArgs, globals: &Globals) -> Result<()> {
    let ctx = globals.context()?;
    let project = globals.project(&ctx, args.layout)?;

    // stdout carries the generated artifact list
    let mut backend =
        RmicBackend::from_config(&ctx.toolchain_config()?).with_sink(OutputSink::Log);
    let opts = BuildOptions {
        debug: tracing::enabled!(Level::DEBUG),
    };

    let result = build(&project, &mut backend, &opts)?;

    for group in &result.groups {
        for artifact in group.stub_artifacts() {
            println!("{}", artifact);
        }
    }

    let count = result.stub_artifacts().len();
    if count > 0 {
        eprintln!(
            "Generated {} stub{} in {}",
            count,
            if count == 1 { "" } else { "s" },
            relative_path(ctx.cwd(), project.output_dir()).display()
        );
    }

    Ok(())
}
