//! Project - resolved paths and classpath for one run.
//!
//! A Project combines the manifest with command-line overrides and decides
//! which classes directory, output directory and classpath a run uses.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::Manifest;
use crate::util::fs::absolutize;
use crate::util::GlobalContext;

/// Which compiled tree a run processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// Main classes
    #[default]
    Main,
    /// Test classes
    Test,
}

/// Command-line overrides for the project layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutOverrides {
    pub classes_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub classpath: Vec<PathBuf>,
}

/// A project ready to be resolved.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    manifest: Manifest,
    flavor: Flavor,
    classes_dir: PathBuf,
    output_dir: PathBuf,
    classpath: Vec<PathBuf>,
}

impl Project {
    /// Build a project from a manifest rooted at `root`.
    pub fn new(root: &Path, manifest: Manifest, flavor: Flavor, overrides: LayoutOverrides) -> Self {
        let global = &manifest.stubgen;

        let main_classes = absolutize(
            root,
            global
                .classes_dir
                .as_deref()
                .unwrap_or(Path::new("target/classes")),
        );

        let (classes_dir, output_dir) = match flavor {
            Flavor::Main => (
                main_classes.clone(),
                global
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("target/rmi-classes")),
            ),
            Flavor::Test => (
                absolutize(
                    root,
                    global
                        .test_classes_dir
                        .as_deref()
                        .unwrap_or(Path::new("target/test-classes")),
                ),
                global
                    .test_output_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("target/rmi-test-classes")),
            ),
        };

        let classes_dir = overrides
            .classes_dir
            .map(|p| absolutize(root, &p))
            .unwrap_or(classes_dir);
        let output_dir = absolutize(root, &overrides.output_dir.unwrap_or(output_dir));

        let mut classpath: Vec<PathBuf> = Vec::new();
        if flavor == Flavor::Test {
            classpath.extend(global.test_classpath.iter().map(|p| absolutize(root, p)));
            classpath.push(main_classes);
        }
        classpath.extend(global.classpath.iter().map(|p| absolutize(root, p)));
        classpath.extend(overrides.classpath.iter().map(|p| absolutize(root, p)));

        Project {
            root: root.to_path_buf(),
            manifest,
            flavor,
            classes_dir,
            output_dir,
            classpath,
        }
    }

    /// Discover and load the project for the given context.
    pub fn load(ctx: &GlobalContext, flavor: Flavor, overrides: LayoutOverrides) -> Result<Self> {
        let root = ctx.project_root()?;
        let manifest = match ctx.find_manifest()? {
            Some(path) => Manifest::load(&path)?,
            None => {
                tracing::debug!("no manifest found, using defaults in {}", root.display());
                Manifest::default()
            }
        };
        Ok(Self::new(&root, manifest, flavor, overrides))
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Which tree this project processes.
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Directory scanned for remote classes.
    pub fn classes_dir(&self) -> &Path {
        &self.classes_dir
    }

    /// Directory stubs are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Project classpath, before the classes directory is added.
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    /// Classpath handed to the compiler.
    ///
    /// Absolute path strings in declaration order, de-duplicated, with the
    /// classes directory appended when it is not already listed.
    pub fn compiler_classpath(&self) -> Vec<String> {
        let mut entries: Vec<String> = Vec::new();
        for path in &self.classpath {
            let entry = path.display().to_string();
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }

        let classes = self.classes_dir.display().to_string();
        if !entries.contains(&classes) {
            entries.push(classes);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(text: &str) -> Manifest {
        Manifest::parse(text).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let project = Project::new(
            Path::new("/work"),
            Manifest::default(),
            Flavor::Main,
            LayoutOverrides::default(),
        );

        assert_eq!(project.classes_dir(), Path::new("/work/target/classes"));
        assert_eq!(project.output_dir(), Path::new("/work/target/rmi-classes"));
        assert_eq!(project.compiler_classpath(), vec!["/work/target/classes"]);
    }

    #[test]
    fn test_compiler_classpath_dedupes_and_appends_classes() {
        let project = Project::new(
            Path::new("/work"),
            manifest(
                r#"
[stubgen]
classpath = ["lib/a.jar", "/abs/b.jar", "lib/a.jar"]
"#,
            ),
            Flavor::Main,
            LayoutOverrides::default(),
        );

        assert_eq!(
            project.compiler_classpath(),
            vec!["/work/lib/a.jar", "/abs/b.jar", "/work/target/classes"]
        );
    }

    #[test]
    fn test_classes_dir_already_on_classpath_is_not_repeated() {
        let project = Project::new(
            Path::new("/work"),
            manifest(
                r#"
[stubgen]
classpath = ["target/classes", "lib/a.jar"]
"#,
            ),
            Flavor::Main,
            LayoutOverrides::default(),
        );

        assert_eq!(
            project.compiler_classpath(),
            vec!["/work/target/classes", "/work/lib/a.jar"]
        );
    }

    #[test]
    fn test_test_flavor_layout() {
        let project = Project::new(
            Path::new("/work"),
            manifest(
                r#"
[stubgen]
classpath = ["lib/a.jar"]
test_classpath = ["lib/junit.jar"]
"#,
            ),
            Flavor::Test,
            LayoutOverrides::default(),
        );

        assert_eq!(project.classes_dir(), Path::new("/work/target/test-classes"));
        assert_eq!(
            project.output_dir(),
            Path::new("/work/target/rmi-test-classes")
        );
        assert_eq!(
            project.compiler_classpath(),
            vec![
                "/work/lib/junit.jar",
                "/work/target/classes",
                "/work/lib/a.jar",
                "/work/target/test-classes",
            ]
        );
    }

    #[test]
    fn test_overrides_win() {
        let project = Project::new(
            Path::new("/work"),
            Manifest::default(),
            Flavor::Main,
            LayoutOverrides {
                classes_dir: Some(PathBuf::from("out/classes")),
                output_dir: Some(PathBuf::from("/tmp/stubs")),
                classpath: vec![PathBuf::from("extra.jar")],
            },
        );

        assert_eq!(project.classes_dir(), Path::new("/work/out/classes"));
        assert_eq!(project.output_dir(), Path::new("/tmp/stubs"));
        assert_eq!(
            project.compiler_classpath(),
            vec!["/work/extra.jar", "/work/out/classes"]
        );
    }
}
