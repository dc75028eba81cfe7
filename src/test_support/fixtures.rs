//! Test fixtures for common test scenarios.
//!
//! Class files are generated in-memory with [`ClassFileBuilder`]; only the
//! header the classifier reads is produced (no fields, methods or
//! attributes).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;
const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

enum WideConstant {
    Long(i64),
    Double(f64),
}

/// Builder for minimal class files.
pub struct ClassFileBuilder {
    name: String,
    access_flags: u16,
    super_class: Option<String>,
    interfaces: Vec<String>,
    wide: Vec<WideConstant>,
}

impl ClassFileBuilder {
    /// A public concrete class extending `java/lang/Object`.
    pub fn class(name: &str) -> Self {
        ClassFileBuilder {
            name: name.to_string(),
            access_flags: ACC_PUBLIC | ACC_SUPER,
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            wide: Vec::new(),
        }
    }

    /// A public interface.
    pub fn interface(name: &str) -> Self {
        ClassFileBuilder {
            access_flags: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            ..Self::class(name)
        }
    }

    /// Set the super class (internal name).
    pub fn extends(mut self, name: &str) -> Self {
        self.super_class = Some(name.to_string());
        self
    }

    /// Add a direct interface (internal name).
    pub fn implements(mut self, name: &str) -> Self {
        self.interfaces.push(name.to_string());
        self
    }

    /// Add a `Long` constant to the pool.
    pub fn with_long_constant(mut self, value: i64) -> Self {
        self.wide.push(WideConstant::Long(value));
        self
    }

    /// Add a `Double` constant to the pool.
    pub fn with_double_constant(mut self, value: f64) -> Self {
        self.wide.push(WideConstant::Double(value));
        self
    }

    /// Encode the class file.
    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();

        for constant in &self.wide {
            match constant {
                WideConstant::Long(v) => pool.wide(5, v.to_be_bytes()),
                WideConstant::Double(v) => pool.wide(6, v.to_bits().to_be_bytes()),
            }
        }

        let this_class = pool.class(&self.name);
        let super_class = self.super_class.as_deref().map(|s| pool.class(s)).unwrap_or(0);
        let interfaces: Vec<u16> = self.interfaces.iter().map(|i| pool.class(i)).collect();

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&52u16.to_be_bytes());
        out.extend_from_slice(&pool.next.to_be_bytes());
        out.extend_from_slice(&pool.bytes);
        out.extend_from_slice(&self.access_flags.to_be_bytes());
        out.extend_from_slice(&this_class.to_be_bytes());
        out.extend_from_slice(&super_class.to_be_bytes());
        out.extend_from_slice(&(interfaces.len() as u16).to_be_bytes());
        for index in interfaces {
            out.extend_from_slice(&index.to_be_bytes());
        }
        // fields, methods, attributes
        out.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        out
    }
}

struct PoolWriter {
    bytes: Vec<u8>,
    next: u16,
}

impl Default for PoolWriter {
    fn default() -> Self {
        PoolWriter {
            bytes: Vec::new(),
            next: 1,
        }
    }
}

impl PoolWriter {
    fn utf8(&mut self, value: &str) -> u16 {
        self.bytes.push(1);
        self.bytes
            .extend_from_slice(&(value.len() as u16).to_be_bytes());
        self.bytes.extend_from_slice(value.as_bytes());
        self.take(1)
    }

    fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        self.bytes.push(7);
        self.bytes.extend_from_slice(&name_index.to_be_bytes());
        self.take(1)
    }

    fn wide(&mut self, tag: u8, value: [u8; 8]) {
        self.bytes.push(tag);
        self.bytes.extend_from_slice(&value);
        self.take(2);
    }

    fn take(&mut self, slots: u16) -> u16 {
        let index = self.next;
        self.next += slots;
        index
    }
}

/// Write a class file under `root` for an internal name.
pub fn write_class(root: &Path, internal_name: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(format!("{}.class", internal_name));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create class dir");
    }
    std::fs::write(&path, bytes).expect("failed to write class file");
    path
}

/// Write a jar holding the given `(internal name, bytes)` classes.
pub fn write_jar(path: &Path, classes: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("failed to create jar");
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::FileOptions::<()>::default()
        .compression_method(zip::CompressionMethod::Stored);

    for (name, bytes) in classes {
        zip.start_file(format!("{}.class", name), options)
            .expect("failed to start jar entry");
        zip.write_all(bytes).expect("failed to write jar entry");
    }
    zip.finish().expect("failed to finish jar");
}

/// Write an executable shell script `dir/name`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(dir).expect("failed to create script dir");
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("failed to write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to make script executable");
    path
}

/// Set a file's modification time relative to now.
pub fn set_age(path: &Path, age: Duration) {
    let file = File::options()
        .write(true)
        .open(path)
        .expect("failed to open file");
    file.set_modified(SystemTime::now() - age)
        .expect("failed to set mtime");
}

/// A classes tree with three types:
///
/// - `app/RemoteImpl`: concrete class implementing `app/Service`
/// - `app/Service`: interface extending `java/rmi/Remote`
/// - `app/Plain`: class with no remote supertype
pub struct ClassTreeFixture;

impl ClassTreeFixture {
    pub const REMOTE_CLASS: &'static str = "app.RemoteImpl";
    pub const REMOTE_INTERFACE: &'static str = "app.Service";
    pub const PLAIN_CLASS: &'static str = "app.Plain";

    /// Write the three types under `root`.
    pub fn remote_trio(root: &Path) {
        write_class(
            root,
            "app/RemoteImpl",
            &ClassFileBuilder::class("app/RemoteImpl")
                .extends("java/rmi/server/UnicastRemoteObject")
                .implements("app/Service")
                .build(),
        );
        write_class(
            root,
            "app/Service",
            &ClassFileBuilder::interface("app/Service")
                .implements("java/rmi/Remote")
                .build(),
        );
        write_class(
            root,
            "app/Plain",
            &ClassFileBuilder::class("app/Plain")
                .implements("java/io/Serializable")
                .build(),
        );
    }
}
