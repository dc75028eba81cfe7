//! High-level operations.
//!
//! This module contains the implementation of stubgen commands.

pub mod stubgen_build;
pub mod stubgen_scan;
pub mod toolchain;

pub use stubgen_build::{build, BuildOptions, BuildResult, GroupReport};
pub use stubgen_scan::{flags, scan, GroupFlags, ScanReport};
pub use toolchain::{format_report, inspect, ToolchainReport};
