//! Typed error definitions for sgp_fileman.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! `from_io` classifies a raw `io::Error` into the taxonomy and enriches the
//! message with platform-aware hints (errno on Unix, Win32 codes on Windows).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, FileManError>;

#[derive(Debug, Error)]
pub enum FileManError {
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied on {path}: {context}")]
    PermissionDenied { path: PathBuf, context: String },

    #[error("{context}")]
    Io {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file handle: {0}")]
    InvalidHandle(String),

    #[error("Library file is read-only: {0}")]
    WriteToReadOnly(String),

    #[error("Reading from file failed: requested {requested} bytes, {available} available")]
    ShortRead { requested: u64, available: u64 },

    #[error("Reading from file failed: {0}")]
    Read(String),

    #[error("Writing to file failed: {0}")]
    Write(String),

    #[error("Seek in file failed: offset {offset} from {from} is out of range")]
    Seek { offset: i64, from: &'static str },

    #[error("Path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl FileManError {
    /// Stable numeric code for scripting and structured logs.
    pub fn code(&self) -> i32 {
        match self {
            FileManError::NotFound(_) => 2,
            FileManError::PermissionDenied { .. } => 13,
            FileManError::Io { .. } => 5,
            FileManError::InvalidHandle(_) => 9,
            FileManError::WriteToReadOnly(_) => 30,
            FileManError::ShortRead { .. } | FileManError::Read(_) => 61,
            FileManError::Write(_) => 62,
            FileManError::Seek { .. } => 29,
            FileManError::NotADirectory(_) => 20,
        }
    }

    /// Short machine label, used as the `kind` field in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            FileManError::NotFound(_) => "not_found",
            FileManError::PermissionDenied { .. } => "permission_denied",
            FileManError::Io { .. } => "io_error",
            FileManError::InvalidHandle(_) => "invalid_handle",
            FileManError::WriteToReadOnly(_) => "write_to_read_only",
            FileManError::ShortRead { .. } | FileManError::Read(_) => "read_error",
            FileManError::Write(_) => "write_error",
            FileManError::Seek { .. } => "seek_error",
            FileManError::NotADirectory(_) => "not_a_directory",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FileManError::NotFound(_))
    }
}

/// Classify an `io::Error` raised by `op` on `path`.
pub fn from_io(op: &str, path: &Path, e: io::Error) -> FileManError {
    match e.kind() {
        io::ErrorKind::NotFound => FileManError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileManError::PermissionDenied {
            path: path.to_path_buf(),
            context: describe_io(op, path, &e),
        },
        _ => FileManError::Io {
            path: path.to_path_buf(),
            context: describe_io(op, path, &e),
            source: e,
        },
    }
}

/// Adapter for `.map_err(...)`: converts io::Error -> FileManError with op/path context.
pub fn io_err<'a>(op: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> FileManError + 'a {
    move |e: io::Error| from_io(op, path, e)
}

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn describe_io(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" - permission denied; check ownership and permissions.");
                }
                libc::EXDEV => {
                    msg.push_str(" - cross-filesystem; atomic rename not possible.");
                }
                libc::ENOENT => {
                    msg.push_str(" - path not found; verify it exists.");
                }
                libc::EEXIST => {
                    msg.push_str(" - already exists.");
                }
                libc::ENOSPC => {
                    msg.push_str(" - insufficient space on device.");
                }
                libc::EROFS => {
                    msg.push_str(" - read-only filesystem; cannot write here.");
                }
                libc::ENOTDIR => {
                    msg.push_str(" - a path component is not a directory.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" - filename or path too long.");
                }
                libc::EMFILE => {
                    msg.push_str(" - process file descriptor limit reached.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" - access denied; check permissions."), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" - not same device; cross-filesystem move."), // ERROR_NOT_SAME_DEVICE
                32 => msg.push_str(" - sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
                2 | 3 => msg.push_str(" - path not found; verify it exists."),
                112 => msg.push_str(" - insufficient disk space."), // ERROR_DISK_FULL
                19 => msg.push_str(" - write protected / read-only media."), // ERROR_WRITE_PROTECT
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    }

    msg
}
