//! Rendering resolved options into rmic arguments.

use std::collections::BTreeSet;

use crate::core::{ResolvedConfiguration, StubTarget};

/// Platform classpath separator.
#[cfg(windows)]
pub const PATH_SEPARATOR: &str = ";";
/// Platform classpath separator.
#[cfg(not(windows))]
pub const PATH_SEPARATOR: &str = ":";

/// Renders a resolved group and its targets into an argument sequence.
///
/// The order is fixed:
///
/// ```text
/// -classpath <cp> -d <out> -v<version> -iiop -poa -nolocalstubs
/// -idl -noValueMethods -keep (-verbose | -nowarn) <targets...>
/// ```
///
/// Dependent flags only appear under their parent (`-poa` and
/// `-nolocalstubs` under `-iiop`, `-noValueMethods` under `-idl`).
#[derive(Debug, Clone, Copy)]
pub struct ArgumentBuilder<'a> {
    config: &'a ResolvedConfiguration,
    debug: bool,
}

impl<'a> ArgumentBuilder<'a> {
    pub fn new(config: &'a ResolvedConfiguration) -> Self {
        ArgumentBuilder {
            config,
            debug: false,
        }
    }

    /// Whether debug logging is on; forces `-verbose`.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render the argument sequence.
    pub fn build(&self, targets: &BTreeSet<StubTarget>) -> Vec<String> {
        let config = self.config;
        let options = &config.options;
        let mut args = Vec::new();

        if !config.classpath.is_empty() {
            args.push("-classpath".to_string());
            args.push(config.classpath.join(PATH_SEPARATOR));
        }

        args.push("-d".to_string());
        args.push(config.output_dir.display().to_string());

        if let Some(version) = &options.version {
            args.push(format!("-v{}", version));
        }

        if options.iiop {
            args.push("-iiop".to_string());
            if options.poa {
                args.push("-poa".to_string());
            }
            if options.no_local_stubs {
                args.push("-nolocalstubs".to_string());
            }
        }

        if options.idl {
            args.push("-idl".to_string());
            if options.no_value_methods {
                args.push("-noValueMethods".to_string());
            }
        }

        if options.keep {
            args.push("-keep".to_string());
        }

        if self.debug || options.verbose {
            args.push("-verbose".to_string());
        } else if options.nowarn {
            args.push("-nowarn".to_string());
        }

        args.extend(targets.iter().map(|t| t.class_name().to_string()));
        args
    }
}
