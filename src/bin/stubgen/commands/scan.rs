//! `stubgen scan` command

use anyhow::Result;

use super::Globals;
use crate::cli::ScanArgs;
use stubgen::ops::stubgen_scan::scan;

pub fn execute(args: ScanArgs, globals: &Globals) -> Result<()> {
    let ctx = globals.context()?;
    let project = globals.project(&ctx, args.layout)?;

    let reports = scan(&project)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}:", report.label);
        if report.targets.is_empty() {
            println!("  (up to date)");
        }
        for target in &report.targets {
            println!("  {}", target);
        }
    }

    Ok(())
}
