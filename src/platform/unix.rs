//! Unix implementations of platform helpers.

use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, its permissions are left alone.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}

/// Read-only means the owner write bit is clear.
pub fn is_readonly(meta: &Metadata) -> bool {
    meta.permissions().mode() & 0o200 == 0
}

/// Unlinking on Unix depends on the directory, not the file mode; nothing to do.
pub fn clear_readonly(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn preserve_existing_log_file_mode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, b"hello").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let _f = open_log_file_secure_append(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640, "existing permissions should be preserved");
    }

    #[test]
    fn new_log_file_gets_0600() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("new_log.txt");
        let _f = open_log_file_secure_append(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "newly created log file should be 0600");
    }

    #[test]
    fn owner_write_bit_decides_readonly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ro.dat");
        fs::write(&path, b"x").unwrap();
        assert!(!is_readonly(&fs::metadata(&path).unwrap()));
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();
        assert!(is_readonly(&fs::metadata(&path).unwrap()));
    }
}
