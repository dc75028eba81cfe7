//! JVM class file introspection.
//!
//! Only the header is decoded: the constant pool, access flags, this/super
//! class and the direct interfaces. That is all the remote capability check
//! needs.

pub mod classify;
pub mod classpath;
pub mod loader;

pub use classify::{is_stub_candidate, REMOTE_MARKER};
pub use classpath::{ClassPath, ClassPathEntry};
pub use loader::ClassLoader;

use std::path::PathBuf;

use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;

/// `ACC_INTERFACE` access flag.
pub const ACC_INTERFACE: u16 = 0x0200;

/// Error while reading or resolving class files.
#[derive(Debug, Error)]
pub enum ClassFileError {
    #[error("not a class file (bad magic {0:#010x})")]
    BadMagic(u32),

    #[error("class file truncated at offset {0}")]
    Truncated(usize),

    #[error("unknown constant pool tag {tag} at index {index}")]
    UnknownTag { tag: u8, index: u16 },

    #[error("constant pool index {0} does not refer to a class entry")]
    BadClassRef(u16),

    #[error("class `{0}` not found on the classpath")]
    NotFound(String),

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive `{path}`")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Decoded class header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Internal name (`a/b/Remote`)
    pub name: String,
    /// Class access flags
    pub access_flags: u16,
    /// Internal name of the super class (`None` only for `java/lang/Object`)
    pub super_class: Option<String>,
    /// Internal names of the directly implemented interfaces
    pub interfaces: Vec<String>,
}

impl ClassInfo {
    /// Parse a class file.
    pub fn parse(bytes: &[u8]) -> Result<Self, ClassFileError> {
        let mut reader = Reader::new(bytes);

        let magic = reader.u32()?;
        if magic != MAGIC {
            return Err(ClassFileError::BadMagic(magic));
        }
        let _minor = reader.u16()?;
        let _major = reader.u16()?;

        let pool = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.u16()?;
        let name = pool.class_name(reader.u16()?)?;
        let super_index = reader.u16()?;
        let super_class = if super_index == 0 {
            None
        } else {
            Some(pool.class_name(super_index)?)
        };

        let count = reader.u16()?;
        let mut interfaces = Vec::with_capacity(count as usize);
        for _ in 0..count {
            interfaces.push(pool.class_name(reader.u16()?)?);
        }

        Ok(ClassInfo {
            name,
            access_flags,
            super_class,
            interfaces,
        })
    }

    /// True if this is an interface (including annotation types).
    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }

    /// Direct supertypes: the super class followed by the interfaces.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.super_class
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ClassFileError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ClassFileError::Truncated(self.pos))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClassFileError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ClassFileError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ClassFileError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

enum Constant {
    Utf8(String),
    Class(u16),
    Other,
    // Second slot of a Long or Double
    Unusable,
}

struct ConstantPool {
    // Index 0 is unused by the format
    entries: Vec<Constant>,
}

impl ConstantPool {
    fn parse(reader: &mut Reader<'_>) -> Result<Self, ClassFileError> {
        let count = reader.u16()?;
        let mut entries = Vec::with_capacity(count as usize);
        entries.push(Constant::Unusable);

        let mut index: u16 = 1;
        while index < count {
            let tag = reader.u8()?;
            let (constant, slots) = match tag {
                1 => {
                    let len = reader.u16()? as usize;
                    let raw = reader.take(len)?;
                    (Constant::Utf8(String::from_utf8_lossy(raw).into_owned()), 1)
                }
                7 => (Constant::Class(reader.u16()?), 1),
                // Integer, Float
                3 | 4 => {
                    reader.take(4)?;
                    (Constant::Other, 1)
                }
                // Long, Double
                5 | 6 => {
                    reader.take(8)?;
                    (Constant::Other, 2)
                }
                // String, MethodType, Module, Package
                8 | 16 | 19 | 20 => {
                    reader.take(2)?;
                    (Constant::Other, 1)
                }
                // Field/Method/InterfaceMethod refs, NameAndType, Dynamic, InvokeDynamic
                9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.take(4)?;
                    (Constant::Other, 1)
                }
                // MethodHandle
                15 => {
                    reader.take(3)?;
                    (Constant::Other, 1)
                }
                _ => return Err(ClassFileError::UnknownTag { tag, index }),
            };

            entries.push(constant);
            if slots == 2 {
                entries.push(Constant::Unusable);
            }
            index = index.saturating_add(slots);
        }

        Ok(ConstantPool { entries })
    }

    fn class_name(&self, index: u16) -> Result<String, ClassFileError> {
        match self.entries.get(index as usize) {
            Some(Constant::Class(name_index)) => match self.entries.get(*name_index as usize) {
                Some(Constant::Utf8(name)) => Ok(name.clone()),
                _ => Err(ClassFileError::BadClassRef(index)),
            },
            _ => Err(ClassFileError::BadClassRef(index)),
        }
    }
}
