//! Stubgen CLI - incremental RMI stub generation

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Globals;
use stubgen::compiler::{InvokeError, LocateError};
use stubgen::util::diagnostic::emit;
use stubgen::ConfigError;

fn main() {
    if let Err(e) = run() {
        report(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("stubgen=debug")
    } else {
        EnvFilter::new("stubgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let globals = Globals {
        verbose: cli.verbose,
        manifest_path: cli.manifest_path,
        tests: cli.tests,
    };

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &globals),
        Commands::Scan(args) => commands::scan::execute(args, &globals),
        Commands::Flags(args) => commands::flags::execute(args, &globals),
        Commands::Toolchain => commands::toolchain::execute(&globals),
    }
}

/// Print an error, with remediation for the errors that have one.
fn report(e: &anyhow::Error) {
    let color = std::io::stderr().is_terminal();

    if let Some(config) = e.downcast_ref::<ConfigError>() {
        emit(&config.to_diagnostic(), color);
    } else if let Some(locate) = e.downcast_ref::<LocateError>() {
        emit(&locate.to_diagnostic(), color);
    } else if let Some(invoke) = e.downcast_ref::<InvokeError>() {
        emit(&invoke.to_diagnostic().with_context(e.to_string()), color);
    } else {
        eprintln!("error: {:#}", e);
    }
}
