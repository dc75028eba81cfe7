//! Compiler options: tri-state at the configuration layer, concrete once resolved.

use serde::{Deserialize, Serialize};

/// Resolve a tri-state flag against its fallback.
pub fn resolve_flag(group_value: Option<bool>, global_value: bool) -> bool {
    group_value.unwrap_or(global_value)
}

/// Compiler options as written in configuration.
///
/// `None` means "not set here"; the value falls through to the next layer.
/// The same shape is used for the `[stubgen]` table and each `[[source]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionLayer {
    /// Stub protocol version (`1.1`, `1.2`, `compat`)
    pub version: Option<String>,

    /// Create stubs for IIOP
    pub iiop: Option<bool>,

    /// Enable POA generation (requires iiop)
    pub poa: Option<bool>,

    /// Do not create stubs optimized for same process (iiop only)
    pub no_local_stubs: Option<bool>,

    /// Create IDL
    pub idl: Option<bool>,

    /// Do not generate methods for valuetypes (idl only)
    pub no_value_methods: Option<bool>,

    /// Keep intermediate generated sources
    pub keep: Option<bool>,

    /// Verbose compiler output
    pub verbose: Option<bool>,

    /// Suppress compiler warnings
    pub nowarn: Option<bool>,
}

impl OptionLayer {
    /// Every option key accepted in a configuration table.
    pub const FIELDS: &'static [&'static str] = &[
        "version",
        "iiop",
        "poa",
        "no_local_stubs",
        "idl",
        "no_value_methods",
        "keep",
        "verbose",
        "nowarn",
    ];

    /// Names of every option explicitly set in this layer, sorted.
    pub fn explicit_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.version.is_some() {
            fields.push("version");
        }
        let flags = [
            ("iiop", self.iiop),
            ("poa", self.poa),
            ("no_local_stubs", self.no_local_stubs),
            ("idl", self.idl),
            ("no_value_methods", self.no_value_methods),
            ("keep", self.keep),
            ("verbose", self.verbose),
            ("nowarn", self.nowarn),
        ];
        fields.extend(
            flags
                .iter()
                .filter(|(_, value)| value.is_some())
                .map(|(name, _)| *name),
        );
        fields.sort_unstable();
        fields
    }

    /// True if nothing is set in this layer.
    pub fn is_unset(&self) -> bool {
        self.explicit_fields().is_empty()
    }

    /// Flatten this layer over concrete fallbacks.
    pub fn resolve_over(&self, fallback: &CompilerOptions) -> CompilerOptions {
        CompilerOptions {
            version: self.version.clone().or_else(|| fallback.version.clone()),
            iiop: resolve_flag(self.iiop, fallback.iiop),
            poa: resolve_flag(self.poa, fallback.poa),
            no_local_stubs: resolve_flag(self.no_local_stubs, fallback.no_local_stubs),
            idl: resolve_flag(self.idl, fallback.idl),
            no_value_methods: resolve_flag(self.no_value_methods, fallback.no_value_methods),
            keep: resolve_flag(self.keep, fallback.keep),
            verbose: resolve_flag(self.verbose, fallback.verbose),
            nowarn: resolve_flag(self.nowarn, fallback.nowarn),
        }
    }
}

/// Fully determined compiler options for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompilerOptions {
    pub version: Option<String>,
    pub iiop: bool,
    pub poa: bool,
    pub no_local_stubs: bool,
    pub idl: bool,
    pub no_value_methods: bool,
    pub keep: bool,
    pub verbose: bool,
    pub nowarn: bool,
}

impl CompilerOptions {
    /// Flags that are set but have no effect because their parent flag is off.
    ///
    /// These are tolerated; the argument builder drops them.
    pub fn ignored_dependent_flags(&self) -> Vec<(&'static str, &'static str)> {
        let mut ignored = Vec::new();
        if self.no_local_stubs && !self.iiop {
            ignored.push(("no_local_stubs", "iiop"));
        }
        if self.no_value_methods && !self.idl {
            ignored.push(("no_value_methods", "idl"));
        }
        ignored
    }
}
