//! Stub compiler backends.
//!
//! A backend finds the compiler once and then runs it once per source
//! group. The only production backend is [`RmicBackend`], which runs `rmic`
//! as a subprocess.

pub mod args;
pub mod errors;
pub mod invoke;
pub mod locator;
pub mod rmic;
pub mod runtime;

pub use args::ArgumentBuilder;
pub use errors::{InvokeCause, InvokeError, LocateError};
pub use invoke::{CompilerProcess, ContextGuard, ExecutionContext, OutputSink};
pub use locator::Locator;
pub use rmic::RmicBackend;
pub use runtime::JavaRuntime;

use std::path::PathBuf;

/// A located compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerHandle {
    /// Executable to run
    pub program: PathBuf,
    /// Environment the compiler runs in
    pub context: ExecutionContext,
}

impl CompilerHandle {
    pub fn new(program: impl Into<PathBuf>, context: ExecutionContext) -> Self {
        CompilerHandle {
            program: program.into(),
            context,
        }
    }
}

/// Strategy for locating and running the stub compiler.
pub trait CompilerBackend {
    /// Find the compiler. Implementations cache the result.
    fn locate(&mut self) -> Result<CompilerHandle, LocateError>;

    /// Run the compiler once with a rendered argument sequence.
    fn invoke(&mut self, handle: &CompilerHandle, args: &[String]) -> Result<(), InvokeError>;
}
