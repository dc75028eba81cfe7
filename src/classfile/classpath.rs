//! Class lookup across directories and archives.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::ClassFileError;

/// One classpath element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassPathEntry {
    /// A directory of `.class` files
    Dir(PathBuf),
    /// A `.jar` or `.zip` archive
    Archive(PathBuf),
}

impl ClassPathEntry {
    /// Classify a path; entries that do not exist are dropped.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.is_dir() {
            return Some(ClassPathEntry::Dir(path.to_path_buf()));
        }
        if path.is_file() {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            if matches!(ext.as_deref(), Some("jar") | Some("zip")) {
                return Some(ClassPathEntry::Archive(path.to_path_buf()));
            }
            tracing::debug!("ignoring classpath entry {}", path.display());
        }
        None
    }
}

/// An ordered classpath. First match wins.
#[derive(Default)]
pub struct ClassPath {
    entries: Vec<ClassPathEntry>,
    archives: HashMap<PathBuf, ZipArchive<File>>,
}

impl ClassPath {
    /// Build a classpath from paths, skipping missing entries and duplicates.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries: Vec<ClassPathEntry> = Vec::new();
        for path in paths {
            if let Some(entry) = ClassPathEntry::from_path(path.as_ref()) {
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
        }
        ClassPath {
            entries,
            archives: HashMap::new(),
        }
    }

    /// The usable entries, in lookup order.
    pub fn entries(&self) -> &[ClassPathEntry] {
        &self.entries
    }

    /// Read the class file bytes for an internal name (`a/b/Remote`).
    pub fn find(&mut self, internal_name: &str) -> Result<Option<Vec<u8>>, ClassFileError> {
        let file_name = format!("{}.class", internal_name);

        for i in 0..self.entries.len() {
            let found = match self.entries[i].clone() {
                ClassPathEntry::Dir(dir) => read_from_dir(&dir, &file_name)?,
                ClassPathEntry::Archive(path) => self.read_from_archive(&path, &file_name)?,
            };
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    fn read_from_archive(
        &mut self,
        path: &Path,
        file_name: &str,
    ) -> Result<Option<Vec<u8>>, ClassFileError> {
        if !self.archives.contains_key(path) {
            let file = File::open(path).map_err(|source| ClassFileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let archive = ZipArchive::new(file).map_err(|source| ClassFileError::Archive {
                path: path.to_path_buf(),
                source,
            })?;
            self.archives.insert(path.to_path_buf(), archive);
        }

        let Some(archive) = self.archives.get_mut(path) else {
            return Ok(None);
        };

        let mut entry = match archive.by_name(file_name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(source) => {
                return Err(ClassFileError::Archive {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| ClassFileError::Io {
                path: path.join(file_name),
                source,
            })?;
        Ok(Some(bytes))
    }
}

fn read_from_dir(dir: &Path, file_name: &str) -> Result<Option<Vec<u8>>, ClassFileError> {
    let path = dir.join(file_name);
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read(&path)
        .map(Some)
        .map_err(|source| ClassFileError::Io { path, source })
}

impl std::fmt::Debug for ClassPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassPath")
            .field("entries", &self.entries)
            .finish()
    }
}
