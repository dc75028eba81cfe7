//! User-friendly diagnostic messages.
//!
//! Every fatal error surfaced to the user names the root cause, the
//! conflicting inputs, and what to change.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when global options collide with `[[source]]` groups.
    pub const MOVE_OPTIONS_TO_SOURCES: &str =
        "Move the listed options from [stubgen] into each [[source]] group that needs them";

    /// Suggestion when POA is requested without IIOP.
    pub const ENABLE_IIOP: &str = "Set `iiop = true` alongside `poa = true`";

    /// Suggestion when a legacy runtime has no compiler.
    pub const USE_FULL_JDK: &str =
        "Point JAVA_HOME (or `java_home` in .stubgen/toolchain.toml) at a full JDK, not a JRE";

    /// Suggestion when a modular runtime hides the compiler.
    pub const ADD_EXTERNAL_RMIC: &str =
        "Install an external rmic (e.g. org.glassfish.corba:rmic) and add its directory to `search_path` in .stubgen/toolchain.toml";

    /// Suggestion when the build fails inside the compiler.
    pub const BUILD_FAILED: &str = "Run `stubgen --verbose build` to see the full rmic arguments";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
