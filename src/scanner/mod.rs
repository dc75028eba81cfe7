//! Finding the classes that need stubs.
//!
//! For one resolved group the scanner:
//! 1. selects class files whose stub is missing or out of date
//!    ([`StaleSourceScanner`]);
//! 2. loads each selected type from the classes root plus the group
//!    classpath and keeps the remote ones;
//! 3. adds literal includes that name a class outside the classes root.
//!
//! Scanning is best effort: any failure is logged and yields no targets for
//! that group.

pub mod pattern;
pub mod stale;

pub use pattern::{is_glob, PatternSet};
pub use stale::{StaleSourceScanner, SuffixMapping};

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::classfile::{is_stub_candidate, ClassFileError, ClassLoader, ClassPath};
use crate::core::artifact::file_to_class_name;
use crate::core::{CandidateArtifact, ResolvedConfiguration, StubTarget};

/// Failure while scanning one group.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to walk classes directory")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load class `{class_name}`")]
    Class {
        class_name: String,
        #[source]
        source: ClassFileError,
    },
}

/// Scans a group's classes root for stub targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceScanner;

impl SourceScanner {
    pub fn new() -> Self {
        SourceScanner
    }

    /// Stale remote types of a group. Never fails; errors empty the result.
    pub fn scan(&self, config: &ResolvedConfiguration) -> BTreeSet<StubTarget> {
        match self.try_scan(config) {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!(
                    "Problem while scanning for classes in source group `{}`: {}",
                    config.label,
                    error_chain(&e)
                );
                BTreeSet::new()
            }
        }
    }

    /// Like [`SourceScanner::scan`], but surfaces the failure.
    pub fn try_scan(&self, config: &ResolvedConfiguration) -> Result<BTreeSet<StubTarget>, ScanError> {
        let classes_dir = &config.classes_dir;
        if !classes_dir.is_dir() {
            tracing::debug!(
                "classes directory {} does not exist, nothing to scan",
                classes_dir.display()
            );
            return Ok(BTreeSet::new());
        }

        let patterns = PatternSet::new(&config.includes, &config.excludes)?;
        let stale = StaleSourceScanner::new(config.stale_millis, patterns, SuffixMapping::stub())
            .scan(classes_dir, &config.output_dir)?;

        let mut loader = ClassLoader::new(ClassPath::new(
            std::iter::once(classes_dir.clone())
                .chain(config.classpath.iter().map(PathBuf::from)),
        ));

        let mut targets = BTreeSet::new();
        for relative_path in stale {
            let candidate = CandidateArtifact::from_relative_path(relative_path);
            let accepted = loader
                .load(&candidate.class_name)
                .and_then(|info| is_stub_candidate(&mut loader, &info, config.options.iiop))
                .map_err(|source| ScanError::Class {
                    class_name: candidate.class_name.clone(),
                    source,
                })?;

            tracing::debug!(
                "{} {}",
                if accepted { "accepting" } else { "skipping" },
                candidate.class_name
            );
            if accepted {
                targets.insert(StubTarget::from(candidate));
            }
        }

        for include in &config.includes {
            if is_glob(include) || classes_dir.join(include).exists() {
                continue;
            }
            let class_name = file_to_class_name(include);
            tracing::debug!("{} is not under the classes directory, adding as-is", class_name);
            targets.insert(StubTarget::new(class_name));
        }

        Ok(targets)
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::core::{CompilerOptions, GroupLabel};
    use crate::test_support::{write_class, write_jar, ClassFileBuilder, ClassTreeFixture};
    use tempfile::TempDir;

    fn config(root: &Path, includes: &[&str], iiop: bool) -> ResolvedConfiguration {
        let mut includes: BTreeSet<String> = includes.iter().map(|s| s.to_string()).collect();
        if includes.is_empty() {
            includes.insert("**/*".to_string());
        }
        ResolvedConfiguration {
            label: GroupLabel::Default,
            classes_dir: root.join("classes"),
            output_dir: root.join("stubs"),
            classpath: vec![root.join("classes").display().to_string()],
            includes,
            excludes: BTreeSet::from(["**/*_Stub.class".to_string()]),
            stale_millis: 0,
            options: CompilerOptions {
                iiop,
                ..Default::default()
            },
        }
    }

    fn names(targets: &BTreeSet<StubTarget>) -> Vec<&str> {
        targets.iter().map(|t| t.class_name()).collect()
    }

    #[test]
    fn test_classification_depends_on_iiop() {
        let tmp = TempDir::new().unwrap();
        ClassTreeFixture::remote_trio(&tmp.path().join("classes"));

        let plain = SourceScanner::new().scan(&config(tmp.path(), &[], false));
        assert_eq!(names(&plain), vec!["app.RemoteImpl"]);

        let iiop = SourceScanner::new().scan(&config(tmp.path(), &[], true));
        assert_eq!(names(&iiop), vec!["app.RemoteImpl", "app.Service"]);
    }

    #[test]
    fn test_up_to_date_stub_is_not_rescanned() {
        let tmp = TempDir::new().unwrap();
        let classes = tmp.path().join("classes");
        ClassTreeFixture::remote_trio(&classes);
        let impl_class = classes.join("app/RemoteImpl.class");
        crate::test_support::set_age(&impl_class, std::time::Duration::from_secs(60));
        std::fs::create_dir_all(tmp.path().join("stubs/app")).unwrap();
        std::fs::write(tmp.path().join("stubs/app/RemoteImpl_Stub.class"), b"stub").unwrap();

        let targets = SourceScanner::new().scan(&config(tmp.path(), &[], false));
        assert!(targets.is_empty());
    }

    #[test]
    fn test_missing_classes_dir_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        let targets = SourceScanner::new().scan(&config(tmp.path(), &[], false));
        assert!(targets.is_empty());
    }

    #[test]
    fn test_literal_include_outside_classes_dir_is_added() {
        let tmp = TempDir::new().unwrap();
        ClassTreeFixture::remote_trio(&tmp.path().join("classes"));

        let targets = SourceScanner::new().scan(&config(
            tmp.path(),
            &["app/*", "lib/ExternalRemote.class"],
            false,
        ));
        assert_eq!(names(&targets), vec!["app.RemoteImpl", "lib.ExternalRemote"]);
    }

    #[test]
    fn test_literal_include_present_in_classes_dir_is_classified() {
        let tmp = TempDir::new().unwrap();
        ClassTreeFixture::remote_trio(&tmp.path().join("classes"));

        let targets = SourceScanner::new().scan(&config(tmp.path(), &["app/Plain.class"], false));
        assert!(targets.is_empty());
    }

    #[test]
    fn test_supertype_from_classpath_jar() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("api.jar");
        write_jar(
            &jar,
            &[(
                "api/Remote",
                ClassFileBuilder::interface("api/Remote")
                    .implements("java/rmi/Remote")
                    .build(),
            )],
        );
        write_class(
            &tmp.path().join("classes"),
            "impl/Server",
            &ClassFileBuilder::class("impl/Server")
                .implements("api/Remote")
                .build(),
        );

        let mut config = config(tmp.path(), &[], false);
        config.classpath.insert(0, jar.display().to_string());

        let targets = SourceScanner::new().scan(&config);
        assert_eq!(names(&targets), vec!["impl.Server"]);
    }

    #[test]
    fn test_remote_through_platform_supertype() {
        let tmp = TempDir::new().unwrap();
        let classes = tmp.path().join("classes");
        write_class(
            &classes,
            "app/MyRegistry",
            &ClassFileBuilder::interface("app/MyRegistry")
                .implements("java/rmi/registry/Registry")
                .build(),
        );
        write_class(
            &classes,
            "app/MyServer",
            &ClassFileBuilder::class("app/MyServer")
                .extends("java/rmi/server/UnicastRemoteObject")
                .build(),
        );

        let plain = SourceScanner::new().scan(&config(tmp.path(), &[], false));
        assert_eq!(names(&plain), vec!["app.MyServer"]);

        let iiop = SourceScanner::new().scan(&config(tmp.path(), &[], true));
        assert_eq!(names(&iiop), vec!["app.MyRegistry", "app.MyServer"]);
    }

    #[test]
    fn test_load_failure_empties_the_group() {
        let tmp = TempDir::new().unwrap();
        let classes = tmp.path().join("classes");
        ClassTreeFixture::remote_trio(&classes);
        write_class(
            &classes,
            "app/Orphan",
            &ClassFileBuilder::class("app/Orphan").extends("gone/Base").build(),
        );

        let config = config(tmp.path(), &[], false);
        assert!(SourceScanner::new().scan(&config).is_empty());
        assert!(matches!(
            SourceScanner::new().try_scan(&config).unwrap_err(),
            ScanError::Class { class_name, .. } if class_name == "app.Orphan"
        ));
    }

    #[test]
    fn test_corrupt_class_file_empties_the_group() {
        let tmp = TempDir::new().unwrap();
        let classes = tmp.path().join("classes");
        ClassTreeFixture::remote_trio(&classes);
        std::fs::write(classes.join("app/Broken.class"), b"garbage").unwrap();

        assert!(SourceScanner::new()
            .scan(&config(tmp.path(), &[], false))
            .is_empty());
    }
}
