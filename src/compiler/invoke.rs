//! Running a located compiler.
//!
//! A run happens inside an execution context (the search path and Java
//! home the compiler sees). The context is entered through a
//! [`ContextGuard`] and restored when the guard drops, whether the run
//! succeeded or not.

use std::path::PathBuf;

use super::errors::{InvokeCause, InvokeError};
use super::CompilerHandle;
use crate::util::process::ProcessBuilder;

/// Tool identifier passed to every compiler run.
pub const TOOL_ID: &str = "rmic";

/// Environment a compiler run sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Directories exported as `PATH`
    pub search_path: Vec<PathBuf>,
    /// Exported as `JAVA_HOME` when set
    pub java_home: Option<PathBuf>,
}

/// Scoped swap of the active execution context.
///
/// The default (empty) context stands for the ambient environment.
pub struct ContextGuard<'a> {
    slot: &'a mut ExecutionContext,
    previous: ExecutionContext,
}

impl<'a> ContextGuard<'a> {
    /// Make `context` active until the guard is dropped.
    pub fn enter(slot: &'a mut ExecutionContext, context: ExecutionContext) -> Self {
        let previous = std::mem::replace(slot, context);
        ContextGuard { slot, previous }
    }

    /// The context in effect while the guard lives.
    pub fn context(&self) -> &ExecutionContext {
        self.slot
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        *self.slot = std::mem::take(&mut self.previous);
    }
}

/// Where compiler output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSink {
    /// Print to the process stdout
    #[default]
    Stdout,
    /// Forward to the log
    Log,
}

impl OutputSink {
    fn forward(&self, tool_id: &str, output: &[u8]) {
        let text = String::from_utf8_lossy(output);
        match self {
            OutputSink::Stdout => {
                if !text.is_empty() {
                    print!("{}", text);
                }
            }
            OutputSink::Log => {
                for line in text.lines().filter(|l| !l.trim().is_empty()) {
                    tracing::info!("[{}] {}", tool_id, line);
                }
            }
        }
    }
}

/// One compiler instance: an output sink and a tool identifier bound to a
/// located executable.
#[derive(Debug)]
pub struct CompilerProcess<'h> {
    handle: &'h CompilerHandle,
    sink: OutputSink,
    tool_id: String,
}

impl<'h> CompilerProcess<'h> {
    pub fn new(handle: &'h CompilerHandle, sink: OutputSink, tool_id: impl Into<String>) -> Self {
        CompilerProcess {
            handle,
            sink,
            tool_id: tool_id.into(),
        }
    }

    /// Run the compiler to completion.
    pub fn compile(&self, context: &ExecutionContext, args: &[String]) -> Result<(), InvokeError> {
        let program = self.handle.program.display().to_string();

        let mut cmd = ProcessBuilder::new(&self.handle.program).args(args);
        if !context.search_path.is_empty() {
            let path = std::env::join_paths(&context.search_path)
                .map_err(|source| InvokeCause::SearchPath { source })?;
            cmd = cmd.env("PATH", path);
        }
        if let Some(home) = &context.java_home {
            cmd = cmd.env("JAVA_HOME", home);
        }

        tracing::debug!("running {}", cmd.display_command());

        let output = cmd.exec().map_err(|source| InvokeCause::Spawn {
            program: program.clone(),
            source,
        })?;

        self.sink.forward(&self.tool_id, &output.stdout);
        self.sink.forward(&self.tool_id, &output.stderr);

        if !output.status.success() {
            return Err(InvokeCause::Exit {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(())
    }
}
