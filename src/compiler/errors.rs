//! Locator and invocation errors.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// The compiler could not be found in any search location.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum LocateError {
    /// Pre-module runtime: most likely a JRE is active instead of a JDK.
    #[error("could not find `{tool}`: make sure a JDK is active, not just a JRE")]
    #[diagnostic(
        code(stubgen::locate::legacy_runtime),
        help("check that JAVA_HOME points at the JDK install root")
    )]
    LegacyRuntime {
        tool: String,
        java_home: Option<String>,
    },

    /// Modular runtime (9+): the compiler is no longer shipped with it.
    #[error("could not find `{tool}`: Java {version} no longer bundles it, add an external rmic to the search path")]
    #[diagnostic(
        code(stubgen::locate::modular_runtime),
        help("add the directory of an external rmic to `search_path` in .stubgen/toolchain.toml")
    )]
    ModularRuntime { tool: String, version: String },
}

impl LocateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LocateError::LegacyRuntime { java_home, .. } => {
                let home = match java_home {
                    Some(home) => format!("JAVA_HOME resolves to {}", home),
                    None => "no Java installation root could be determined".to_string(),
                };
                Diagnostic::error(self.to_string())
                    .with_context(home)
                    .with_suggestion(suggestions::USE_FULL_JDK)
            }
            LocateError::ModularRuntime { version, .. } => Diagnostic::error(self.to_string())
                .with_context(format!("runtime version {} has a module system", version))
                .with_suggestion(suggestions::ADD_EXTERNAL_RMIC),
        }
    }
}

/// Why a compiler run failed.
#[derive(Debug, Error)]
pub enum InvokeCause {
    #[error("compiler search path cannot be exported as PATH")]
    SearchPath {
        #[source]
        source: std::env::JoinPathsError,
    },

    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {}{}", exit_status(.code), stderr_suffix(.stderr))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{}", stderr)
    }
}

/// Any failure while running a located compiler.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("error while executing the compiler")]
#[diagnostic(
    code(stubgen::invoke::failed),
    help("run `stubgen --verbose build` to see the full rmic arguments")
)]
pub struct InvokeError {
    #[source]
    pub cause: InvokeCause,
}

impl InvokeError {
    pub fn new(cause: InvokeCause) -> Self {
        InvokeError { cause }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_context(self.cause.to_string())
            .with_suggestion(suggestions::BUILD_FAILED)
    }
}

impl From<InvokeCause> for InvokeError {
    fn from(cause: InvokeCause) -> Self {
        InvokeError::new(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_messages_differ_by_runtime() {
        let legacy = LocateError::LegacyRuntime {
            tool: "rmic".into(),
            java_home: Some("/opt/jre".into()),
        };
        let modular = LocateError::ModularRuntime {
            tool: "rmic".into(),
            version: "17.0.2".into(),
        };

        assert!(legacy.to_string().contains("not just a JRE"));
        assert!(legacy.to_diagnostic().format(false).contains("JAVA_HOME"));
        assert!(modular.to_string().contains("Java 17.0.2"));
        assert!(modular
            .to_diagnostic()
            .format(false)
            .contains("search_path"));
    }

    #[test]
    fn test_invoke_error_keeps_cause() {
        let err = InvokeError::from(InvokeCause::Exit {
            program: "rmic".into(),
            code: Some(2),
            stderr: "error: Class a.B not found.\n".into(),
        });

        assert_eq!(err.to_string(), "error while executing the compiler");
        let chain = format!("{:#}", anyhow::Error::from(err));
        assert!(chain.contains("`rmic` exited with status 2"));
        assert!(chain.contains("Class a.B not found."));
    }

    #[test]
    fn test_invoke_diagnostic_suggests_verbose_build() {
        let err = InvokeError::from(InvokeCause::Exit {
            program: "rmic".into(),
            code: Some(1),
            stderr: String::new(),
        });

        let output = err.to_diagnostic().format(false);
        assert!(output.starts_with("error: error while executing the compiler"));
        assert!(output.contains("`rmic` exited with status 1"));
        assert!(output.contains("1. Run `stubgen --verbose build`"));
    }
}
