//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Stubgen - incremental RMI stub generation
#[derive(Parser)]
#[command(name = "stubgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to Stubgen.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest_path: Option<PathBuf>,

    /// Process test classes instead of main classes
    #[arg(long, global = true)]
    pub tests: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate stubs for out of date remote classes
    Build(BuildArgs),

    /// List out of date remote classes without compiling
    Scan(ScanArgs),

    /// Show the rmic arguments for each source group
    Flags(FlagsArgs),

    /// Show which rmic would be used
    Toolchain,
}

/// Layout overrides shared by commands that scan.
#[derive(Args, Default)]
pub struct LayoutArgs {
    /// Directory of compiled classes to scan
    #[arg(long, value_name = "DIR")]
    pub classes_dir: Option<PathBuf>,

    /// Directory to write stubs to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Extra classpath entry (repeatable)
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    /// Only show this source group (name, position or `default`)
    #[arg(long, value_name = "NAME")]
    pub group: Option<String>,
}
