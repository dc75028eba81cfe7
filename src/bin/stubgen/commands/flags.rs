//! `stubgen flags` command

use anyhow::Result;
use tracing::Level;

use super::Globals;
use crate::cli::FlagsArgs;
use stubgen::ops::stubgen_scan::flags;

pub fn execute(args: FlagsArgs, globals: &Globals) -> Result<()> {
    let ctx = globals.context()?;
    let project = globals.project(&ctx, args.layout)?;

    let debug = tracing::enabled!(Level::DEBUG);
    for group in flags(&project, args.group.as_deref(), debug)? {
        println!("[{}]", group.label);
        println!("{}", group.args.join(" "));
    }

    Ok(())
}
