//! Remote capability check.

use super::{ClassFileError, ClassInfo, ClassLoader};

/// Marker interface of remote types.
pub const REMOTE_MARKER: &str = "java/rmi/Remote";

/// Whether a remote-capable type qualifies in the given mode.
///
/// Concrete classes always qualify. Interfaces only qualify under IIOP; in
/// plain RMI mode their methods end up in the stub of the implementing
/// class instead.
pub fn qualifies(is_remote: bool, is_interface: bool, iiop: bool) -> bool {
    is_remote && (!is_interface || iiop)
}

/// True if the loaded type should get a stub.
pub fn is_stub_candidate(
    loader: &mut ClassLoader,
    info: &ClassInfo,
    iiop: bool,
) -> Result<bool, ClassFileError> {
    let is_remote = loader.is_assignable_to(info, REMOTE_MARKER)?;
    Ok(qualifies(is_remote, info.is_interface(), iiop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classfile::ClassPath;
    use crate::test_support::ClassTreeFixture;
    use tempfile::TempDir;

    #[test]
    fn test_qualifies() {
        assert!(qualifies(true, false, false));
        assert!(qualifies(true, false, true));
        assert!(!qualifies(true, true, false));
        assert!(qualifies(true, true, true));
        assert!(!qualifies(false, false, true));
        assert!(!qualifies(false, true, true));
    }

    fn accepted(root: &std::path::Path, iiop: bool) -> Vec<&'static str> {
        let mut loader = ClassLoader::new(ClassPath::new([root]));
        [
            ClassTreeFixture::REMOTE_CLASS,
            ClassTreeFixture::REMOTE_INTERFACE,
            ClassTreeFixture::PLAIN_CLASS,
        ]
        .into_iter()
        .filter(|name| {
            let info = loader.load(name).unwrap();
            is_stub_candidate(&mut loader, &info, iiop).unwrap()
        })
        .collect()
    }

    #[test]
    fn test_plain_mode_accepts_only_remote_classes() {
        let tmp = TempDir::new().unwrap();
        ClassTreeFixture::remote_trio(tmp.path());

        assert_eq!(accepted(tmp.path(), false), vec![ClassTreeFixture::REMOTE_CLASS]);
    }

    #[test]
    fn test_iiop_mode_accepts_remote_interfaces() {
        let tmp = TempDir::new().unwrap();
        ClassTreeFixture::remote_trio(tmp.path());

        assert_eq!(
            accepted(tmp.path(), true),
            vec![
                ClassTreeFixture::REMOTE_CLASS,
                ClassTreeFixture::REMOTE_INTERFACE
            ]
        );
    }
}
