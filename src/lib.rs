//! Stubgen - incremental RMI stub generation
//!
//! This crate provides the library side of the `stubgen` tool: project
//! configuration, stale class scanning, remote type classification and
//! invocation of an external `rmic` compiler.

pub mod classfile;
pub mod compiler;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod scanner;
pub mod util;

/// Test utilities and mocks for stubgen unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording compiler backend and class file
/// fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{Manifest, Project, ResolvedConfiguration, StubTarget};
pub use compiler::{CompilerBackend, RmicBackend};
pub use resolver::ConfigError;
pub use util::context::GlobalContext;
