//! Whole-file operations on the real filesystem.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use super::FileMan;
use super::atomic::{is_cross_device, try_atomic_move};
use super::attributes::{FileAttributes, file_get_attributes};
use super::copy::safe_copy_and_rename;
use super::enumerate::find_all_files_in_dir;
use crate::errors::{FileManError, Result, from_io, io_err};
use crate::path_util::join_paths;
use crate::platform;

fn is_directory(path: &Path) -> bool {
    file_get_attributes(path).is_some_and(|a| a.contains(FileAttributes::DIRECTORY))
}

impl FileMan {
    /// Create a single directory. Succeeds if it already exists as a directory.
    pub fn create_dir(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match fs::create_dir(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Created directory");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if is_directory(path) {
                    Ok(())
                } else {
                    Err(FileManError::NotADirectory(path.to_path_buf()))
                }
            }
            Err(e) => Err(from_io("create directory", path, e)),
        }
    }

    /// Move `from` to `to`, replacing `to` if it exists.
    ///
    /// A plain rename when both sides share a filesystem. Otherwise the data
    /// is copied next to `to`, renamed into place, and only then is `from`
    /// removed; a failed copy leaves `from` untouched.
    pub fn move_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
        let (from, to) = (from.as_ref(), to.as_ref());
        match try_atomic_move(from, to) {
            Ok(()) => {
                debug!(src = %from.display(), dest = %to.display(), "Renamed file");
                Ok(())
            }
            Err(e) if is_cross_device(&e) => {
                info!(src = %from.display(), dest = %to.display(), "Cross-device move; copying");
                safe_copy_and_rename(from, to)?;
                fs::remove_file(from).map_err(io_err("remove moved source", from))
            }
            Err(e) => Err(from_io("rename file", from, e)),
        }
    }

    /// Delete a file. A file that is already gone counts as deleted.
    pub fn delete_file(path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                // Read-only files cannot be unlinked on Windows.
                if platform::clear_readonly(path).is_err() {
                    return Err(from_io("delete file", path, e));
                }
            }
            Err(e) => return Err(from_io("delete file", path, e)),
        }
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(from_io("delete file", path, e)),
        }
    }

    /// Delete every regular file directly inside `dir`. Subdirectories stay.
    pub fn erase_directory(dir: impl AsRef<Path>) -> Result<()> {
        for path in find_all_files_in_dir(dir, false)? {
            if let Err(e) = Self::delete_file(&path) {
                if is_directory(Path::new(&path)) {
                    continue;
                }
                warn!(path = %path, error = %e, "Failed to erase file");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Whether `folder/name` exists.
    ///
    /// Absence (including a missing or non-directory `folder`) is `Ok(false)`;
    /// other failures such as permission denied are errors.
    pub fn check_file_existance(folder: &str, name: &str) -> Result<bool> {
        let path = join_paths(folder, name);
        match fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(from_io("check existence", Path::new(&path), e)),
        }
    }

    /// Bytes available to this process on the volume holding the current directory.
    pub fn free_space() -> Result<u64> {
        let cwd = std::env::current_dir().map_err(io_err("query current directory", Path::new(".")))?;
        fs2::available_space(&cwd).map_err(io_err("query free space", &cwd))
    }
}
