//! Attribute query for a path without opening it.

use bitflags::bitflags;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::platform;

bitflags! {
    /// Facts about a path. An empty set means "exists, no flags".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileAttributes: u8 {
        const READONLY = 1 << 0;
        const DIRECTORY = 1 << 1;
    }
}

/// Query `path` (following symlinks).
///
/// Returns `None` when the path cannot be queried at all, which is distinct
/// from `Some(FileAttributes::empty())`.
pub fn file_get_attributes(path: impl AsRef<Path>) -> Option<FileAttributes> {
    let path = path.as_ref();
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Attribute query failed");
            return None;
        }
    };
    let mut attrs = FileAttributes::empty();
    if meta.is_dir() {
        attrs |= FileAttributes::DIRECTORY;
    }
    if platform::is_readonly(&meta) {
        attrs |= FileAttributes::READONLY;
    }
    Some(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_path_is_the_error_sentinel() {
        let dir = tempdir().unwrap();
        assert_eq!(file_get_attributes(dir.path().join("nope")), None);
    }

    #[test]
    fn plain_file_has_no_flags() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("plain.txt");
        fs::write(&p, b"x").unwrap();
        assert_eq!(file_get_attributes(&p), Some(FileAttributes::empty()));
        let d = file_get_attributes(dir.path()).unwrap();
        assert!(d.contains(FileAttributes::DIRECTORY));
    }
}
