//! `stubgen toolchain` command

use anyhow::Result;

use super::Globals;
use stubgen::compiler::Locator;
use stubgen::ops::toolchain::{format_report, inspect};

pub fn execute(globals: &Globals) -> Result<()> {
    let ctx = globals.context()?;
    let config = ctx.toolchain_config()?;

    let mut locator = Locator::from_config(&config);
    let report = inspect(&mut locator);

    print!("{}", format_report(&report, ctx.is_verbose()));

    report.result.map(|_| ()).map_err(Into::into)
}
