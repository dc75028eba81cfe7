//! Finding the stub compiler.
//!
//! Search order:
//! 1. the search path (toolchain `search_path` entries, then `PATH`);
//! 2. the runtime's own tool directory (`<java_home>/bin`), which is then
//!    prepended to the search path and searched again.
//!
//! The first successful result is cached for the lifetime of the locator,
//! so every source group of a run shares one handle.

use std::path::{Path, PathBuf};

use super::errors::LocateError;
use super::invoke::{ContextGuard, ExecutionContext};
use super::runtime::JavaRuntime;
use super::CompilerHandle;
use crate::util::process::find_executable_in;
use crate::util::ToolchainConfig;

/// Owns the compiler search state.
#[derive(Debug)]
pub struct Locator {
    tool: String,
    search_path: Vec<PathBuf>,
    runtime: JavaRuntime,
    handle: Option<CompilerHandle>,
    active_context: ExecutionContext,
    searches: usize,
}

impl Locator {
    pub fn new(tool: impl Into<String>, search_path: Vec<PathBuf>, runtime: JavaRuntime) -> Self {
        Locator {
            tool: tool.into(),
            search_path,
            runtime,
            handle: None,
            active_context: ExecutionContext::default(),
            searches: 0,
        }
    }

    /// Build a locator from toolchain settings and the ambient environment.
    pub fn from_config(config: &ToolchainConfig) -> Self {
        let mut search_path = config.toolchain.search_path.clone();
        if let Some(path) = std::env::var_os("PATH") {
            search_path.extend(std::env::split_paths(&path));
        }
        let runtime = JavaRuntime::detect(config.toolchain.java_home.as_deref());
        Locator::new(config.tool(), search_path, runtime)
    }

    /// Compiler executable name.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Current search path, including any prepended tool directory.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    pub fn runtime(&self) -> &JavaRuntime {
        &self.runtime
    }

    /// Number of searches performed (cache hits do not count).
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// The context of an in-flight compiler run; the ambient (default)
    /// context otherwise.
    pub fn active_context(&self) -> &ExecutionContext {
        &self.active_context
    }

    /// Find the compiler, or return the cached handle.
    pub fn locate(&mut self) -> Result<CompilerHandle, LocateError> {
        if let Some(handle) = &self.handle {
            return Ok(handle.clone());
        }

        self.searches += 1;

        if let Some(program) = find_executable_in(&self.tool, &self.search_path) {
            tracing::debug!("found {} at {}", self.tool, program.display());
            return Ok(self.cache(program));
        }

        if let Some(dir) = self.runtime.aux_tool_dir() {
            if tool_exists_in(&dir, &self.tool) {
                if !self.search_path.contains(&dir) {
                    tracing::debug!("adding {} to the compiler search path", dir.display());
                    self.search_path.insert(0, dir.clone());
                }
                if let Some(program) = find_executable_in(&self.tool, &self.search_path) {
                    tracing::debug!("found {} at {}", self.tool, program.display());
                    return Ok(self.cache(program));
                }
                tracing::warn!("{} in {} is not executable", self.tool, dir.display());
            }
        }

        Err(self.not_found())
    }

    /// Make a handle's context active until the guard drops.
    pub fn enter(&mut self, handle: &CompilerHandle) -> ContextGuard<'_> {
        ContextGuard::enter(&mut self.active_context, handle.context.clone())
    }

    fn cache(&mut self, program: PathBuf) -> CompilerHandle {
        let handle = CompilerHandle::new(
            program,
            ExecutionContext {
                search_path: self.search_path.clone(),
                java_home: self.runtime.home().map(Path::to_path_buf),
            },
        );
        self.handle = Some(handle.clone());
        handle
    }

    fn not_found(&self) -> LocateError {
        match self.runtime.version() {
            Some(version) if self.runtime.is_modular() => LocateError::ModularRuntime {
                tool: self.tool.clone(),
                version: version.to_string(),
            },
            _ => LocateError::LegacyRuntime {
                tool: self.tool.clone(),
                java_home: self.runtime.home().map(|h| h.display().to_string()),
            },
        }
    }
}

fn tool_exists_in(dir: &Path, tool: &str) -> bool {
    if dir.join(tool).is_file() {
        return true;
    }
    cfg!(windows) && dir.join(format!("{}.exe", tool)).is_file()
}
