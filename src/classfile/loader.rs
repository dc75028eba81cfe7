//! Caching class loader over a [`ClassPath`].

use std::collections::{HashMap, HashSet, VecDeque};

use super::classify::REMOTE_MARKER;
use super::{ClassFileError, ClassInfo, ClassPath};

/// Namespaces of the Java platform. Their classes are usually not on the
/// project classpath; a missing one is treated as a leaf.
const PLATFORM_PREFIXES: &[&str] = &["java/", "javax/", "jdk/", "sun/", "com/sun/"];

/// Platform types assignable to the remote marker. Consulted when one of
/// them is missing from the classpath.
const PLATFORM_REMOTE_TYPES: &[&str] = &[
    "java/rmi/registry/Registry",
    "java/rmi/server/RemoteObject",
    "java/rmi/server/RemoteServer",
    "java/rmi/server/UnicastRemoteObject",
    "java/rmi/server/RemoteStub",
    "java/rmi/activation/Activatable",
    "java/rmi/activation/ActivationInstantiator",
    "java/rmi/activation/ActivationMonitor",
    "java/rmi/activation/ActivationSystem",
    "java/rmi/activation/Activator",
    "javax/management/remote/rmi/RMIServer",
    "javax/management/remote/rmi/RMIConnection",
    "javax/management/remote/rmi/RMIServerImpl",
    "javax/management/remote/rmi/RMIJRMPServerImpl",
    "javax/management/remote/rmi/RMIIIOPServerImpl",
];

/// Loads and caches class headers by name.
#[derive(Debug)]
pub struct ClassLoader {
    classpath: ClassPath,
    cache: HashMap<String, ClassInfo>,
}

impl ClassLoader {
    pub fn new(classpath: ClassPath) -> Self {
        ClassLoader {
            classpath,
            cache: HashMap::new(),
        }
    }

    /// Load a class by binary (`a.b.C`) or internal (`a/b/C`) name.
    pub fn load(&mut self, name: &str) -> Result<ClassInfo, ClassFileError> {
        let internal = name.replace('.', "/");
        self.find(&internal)?
            .ok_or(ClassFileError::NotFound(internal))
    }

    /// True if `info` is, extends or implements `target` (internal name).
    ///
    /// Walks the whole supertype graph. Missing platform types are
    /// leaves, except known remote platform types when `target` is the
    /// remote marker. Any other missing supertype is an error.
    pub fn is_assignable_to(
        &mut self,
        info: &ClassInfo,
        target: &str,
    ) -> Result<bool, ClassFileError> {
        if info.name == target {
            return Ok(true);
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = info.supertypes().map(String::from).collect();

        while let Some(name) = queue.pop_front() {
            if name == target {
                return Ok(true);
            }
            if !visited.insert(name.clone()) {
                continue;
            }

            match self.find(&name)? {
                Some(super_info) => queue.extend(super_info.supertypes().map(String::from)),
                None if is_platform_type(&name) => {
                    if target == REMOTE_MARKER && PLATFORM_REMOTE_TYPES.contains(&name.as_str()) {
                        return Ok(true);
                    }
                    tracing::trace!("{} not on classpath, treating as a leaf", name);
                }
                None => return Err(ClassFileError::NotFound(name)),
            }
        }

        Ok(false)
    }

    fn find(&mut self, internal: &str) -> Result<Option<ClassInfo>, ClassFileError> {
        if let Some(info) = self.cache.get(internal) {
            return Ok(Some(info.clone()));
        }

        let Some(bytes) = self.classpath.find(internal)? else {
            return Ok(None);
        };
        let info = ClassInfo::parse(&bytes)?;
        self.cache.insert(internal.to_string(), info.clone());
        Ok(Some(info))
    }
}

fn is_platform_type(internal: &str) -> bool {
    PLATFORM_PREFIXES.iter().any(|p| internal.starts_with(p))
}
