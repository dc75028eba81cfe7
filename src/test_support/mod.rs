//! Test utilities and mocks for stubgen unit tests.
//!
//! This module provides a recording compiler backend and fixtures for
//! class trees, so the pipeline can be tested without a JDK.
//!
//! # Example
//!
//! ```rust,ignore
//! use stubgen::test_support::{classes_dir, create_test_project, ClassTreeFixture, MockBackend};
//!
//! #[test]
//! fn test_example() {
//!     let project = create_test_project("");
//!     ClassTreeFixture::remote_trio(&classes_dir(&project));
//!     let mut backend = MockBackend::new();
//!
//!     // Run the build against `project` with `backend`, then inspect
//!     // backend.invocations()...
//! }
//! ```

pub mod fixtures;

use std::path::PathBuf;

use crate::compiler::{
    CompilerBackend, CompilerHandle, ExecutionContext, InvokeCause, InvokeError, JavaRuntime,
    LocateError,
};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Mock compiler backend.
///
/// Records every invocation and counts how often the compiler was actually
/// searched for. Like the real locator, the first successful handle is
/// cached.
#[derive(Debug, Default)]
pub struct MockBackend {
    handle: Option<CompilerHandle>,
    searches: usize,
    invocations: Vec<Vec<String>>,
    missing: Option<JavaRuntime>,
    fail_on: Option<String>,
}

impl MockBackend {
    /// Create a backend whose compiler is always found.
    pub fn new() -> Self {
        MockBackend::default()
    }

    /// Create a backend whose compiler cannot be found on `runtime`.
    pub fn missing(runtime: JavaRuntime) -> Self {
        MockBackend {
            missing: Some(runtime),
            ..Default::default()
        }
    }

    /// Fail any invocation whose arguments contain `arg`.
    pub fn fail_when(mut self, arg: impl Into<String>) -> Self {
        self.fail_on = Some(arg.into());
        self
    }

    /// Every argument sequence the backend was invoked with.
    pub fn invocations(&self) -> &[Vec<String>] {
        &self.invocations
    }

    /// Number of uncached searches.
    pub fn searches(&self) -> usize {
        self.searches
    }
}

impl CompilerBackend for MockBackend {
    fn locate(&mut self) -> Result<CompilerHandle, LocateError> {
        if let Some(handle) = &self.handle {
            return Ok(handle.clone());
        }
        self.searches += 1;

        if let Some(runtime) = &self.missing {
            return Err(match runtime.version() {
                Some(version) if runtime.is_modular() => LocateError::ModularRuntime {
                    tool: "rmic".into(),
                    version: version.into(),
                },
                _ => LocateError::LegacyRuntime {
                    tool: "rmic".into(),
                    java_home: runtime.home().map(|h| h.display().to_string()),
                },
            });
        }

        let handle = CompilerHandle::new("/mock/bin/rmic", ExecutionContext::default());
        self.handle = Some(handle.clone());
        Ok(handle)
    }

    fn invoke(&mut self, _handle: &CompilerHandle, args: &[String]) -> Result<(), InvokeError> {
        self.invocations.push(args.to_vec());

        if let Some(arg) = &self.fail_on {
            if args.contains(arg) {
                return Err(InvokeCause::Exit {
                    program: "rmic".into(),
                    code: Some(1),
                    stderr: format!("error: Class {} not found.", arg),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Create a temporary project directory with a Stubgen.toml.
///
/// Returns the TempDir handle - dropping it will clean up the directory.
pub fn create_test_project(manifest: &str) -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    std::fs::write(tmp.path().join("Stubgen.toml"), manifest).expect("failed to write manifest");
    std::fs::create_dir_all(tmp.path().join("target/classes"))
        .expect("failed to create classes dir");
    tmp
}

/// Classes directory of a project created by [`create_test_project`].
pub fn classes_dir(project: &tempfile::TempDir) -> PathBuf {
    project.path().join("target/classes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_backend_caches_handle() {
        let mut backend = MockBackend::new();
        let first = backend.locate().unwrap();
        let second = backend.locate().unwrap();

        assert_eq!(first, second);
        assert_eq!(backend.searches(), 1);
    }

    #[test]
    fn test_mock_backend_records_and_fails() {
        let mut backend = MockBackend::new().fail_when("bad.Remote");
        let handle = backend.locate().unwrap();

        backend.invoke(&handle, &["good.Remote".into()]).unwrap();
        assert!(backend.invoke(&handle, &["bad.Remote".into()]).is_err());
        assert_eq!(backend.invocations().len(), 2);
    }

    #[test]
    fn test_mock_backend_missing_compiler() {
        let mut backend = MockBackend::missing(JavaRuntime::new(None, Some("11".into())));
        assert!(matches!(
            backend.locate().unwrap_err(),
            LocateError::ModularRuntime { .. }
        ));
        assert_eq!(backend.searches(), 1);
    }
}
