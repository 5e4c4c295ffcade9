//! Windows implementations of platform helpers (best-effort, no ACL awareness).
//!
//! Windows lacks POSIX mode semantics; the READONLY attribute is the only
//! permission bit consulted here.

use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::path::Path;

/// Open log file for appending (no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn is_readonly(meta: &Metadata) -> bool {
    meta.permissions().readonly()
}

/// Read-only files cannot be deleted on Windows; drop the attribute first.
#[allow(clippy::permissions_set_readonly_false)]
pub fn clear_readonly(path: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    if perms.readonly() {
        perms.set_readonly(false);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}
