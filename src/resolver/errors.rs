//! Configuration error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal configuration problem, detected before any scanning.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error(
        "options set in [stubgen] cannot be combined with [[source]] groups: {}",
        .fields.join(", ")
    )]
    #[diagnostic(
        code(stubgen::config::global_conflict),
        help("move these options into the [[source]] groups that need them")
    )]
    ConflictingGlobalOptions { fields: Vec<String> },

    #[error("IIOP must be enabled in order to use the POA option (source group `{group}`)")]
    #[diagnostic(code(stubgen::config::poa_without_iiop), help("set `iiop = true`"))]
    PoaWithoutIiop { group: String },
}

impl ConfigError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::ConflictingGlobalOptions { fields } => {
                let mut diag = Diagnostic::error(self.to_string());
                for field in fields {
                    diag = diag.with_context(format!("`{}` is set in [stubgen]", field));
                }
                diag.with_suggestion(suggestions::MOVE_OPTIONS_TO_SOURCES)
            }
            ConfigError::PoaWithoutIiop { group } => Diagnostic::error(self.to_string())
                .with_context(format!("source group `{}` resolves to poa = true, iiop = false", group))
                .with_suggestion(suggestions::ENABLE_IIOP),
        }
    }
}
