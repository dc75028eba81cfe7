//! Subprocess `rmic` backend.

use super::errors::{InvokeError, LocateError};
use super::invoke::{CompilerProcess, OutputSink, TOOL_ID};
use super::locator::Locator;
use super::{CompilerBackend, CompilerHandle};
use crate::util::ToolchainConfig;

/// Runs an external `rmic` executable.
#[derive(Debug)]
pub struct RmicBackend {
    locator: Locator,
    sink: OutputSink,
}

impl RmicBackend {
    pub fn new(locator: Locator) -> Self {
        RmicBackend {
            locator,
            sink: OutputSink::default(),
        }
    }

    /// Backend for the given toolchain settings.
    pub fn from_config(config: &ToolchainConfig) -> Self {
        RmicBackend::new(Locator::from_config(config))
    }

    /// Send compiler output to `sink` instead of stdout.
    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

impl CompilerBackend for RmicBackend {
    fn locate(&mut self) -> Result<CompilerHandle, LocateError> {
        self.locator.locate()
    }

    fn invoke(&mut self, handle: &CompilerHandle, args: &[String]) -> Result<(), InvokeError> {
        let sink = self.sink;
        let guard = self.locator.enter(handle);
        CompilerProcess::new(handle, sink, TOOL_ID).compile(guard.context(), args)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::compiler::{ExecutionContext, InvokeCause, JavaRuntime};
    use tempfile::TempDir;

    fn backend(dir: PathBuf) -> RmicBackend {
        RmicBackend::new(Locator::new("rmic", vec![dir], JavaRuntime::default()))
            .with_sink(OutputSink::Log)
    }

    #[test]
    fn test_invoke_runs_located_compiler() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("calls.log");
        crate::test_support::write_script(
            &tmp.path().join("bin"),
            "rmic",
            &format!("echo \"$@\" >> '{}'\n", log.display()),
        );

        let mut backend = backend(tmp.path().join("bin"));
        let handle = backend.locate().unwrap();
        backend.invoke(&handle, &["-d".into(), "out".into(), "a.X".into()]).unwrap();
        backend.invoke(&handle, &["-d".into(), "out".into(), "b.Y".into()]).unwrap();

        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls, "-d out a.X\n-d out b.Y\n");
        assert_eq!(backend.locator().active_context(), &ExecutionContext::default());
    }

    #[test]
    fn test_context_is_restored_after_failure() {
        let tmp = TempDir::new().unwrap();
        crate::test_support::write_script(&tmp.path().join("bin"), "rmic", "exit 3\n");

        let mut backend = backend(tmp.path().join("bin"));
        let handle = backend.locate().unwrap();
        let err = backend.invoke(&handle, &[]).unwrap_err();

        assert!(matches!(err.cause, InvokeCause::Exit { code: Some(3), .. }));
        assert_eq!(backend.locator().active_context(), &ExecutionContext::default());
    }
}
