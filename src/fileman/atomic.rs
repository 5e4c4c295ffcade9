//! Rename helpers used by `move_file`.
//! - On Windows, removes an existing destination first (rename does not overwrite there).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            if let Err(e) = fs::remove_file(dst) {
                if e.kind() != io::ErrorKind::NotFound {
                    return Err(e);
                }
            }
        }
    }

    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A successful rename stays successful even if the fsync fails.
        let _ = fsync_dir(parent);
    }

    Ok(())
}

/// Hidden sibling name for staging a copy inside `dst_dir`.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".sgp_fileman.{pid}.{nanos}.tmp"))
}

pub(super) fn is_cross_device(e: &io::Error) -> bool {
    // No stable ErrorKind for this; compare raw codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17, // ERROR_NOT_SAME_DEVICE
        _ => false,
    }
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rename_replaces_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        let dst = dir.path().join("b");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();
        try_atomic_move(&src, &dst).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn temp_paths_stay_in_the_directory() {
        let dir = tempdir().unwrap();
        let tmp = unique_temp_path(dir.path());
        assert_eq!(tmp.parent(), Some(dir.path()));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::NotFound)));
    }
}
