//! Core library for `sgp_fileman`.
//!
//! A virtual file layer for game data: one `SgpFile` handle type over real
//! OS files and read-only entries of mounted library archives, the `FileMan`
//! facade that opens them by (case-insensitive) name, flat directory
//! enumeration, pure path helpers and a process-wide leveled logger.

pub mod config;
pub mod errors;
pub mod file;
pub mod fileman;
pub mod logger;
pub mod output;
pub mod path_util;
pub mod platform;

pub use config::{Config, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::{FileManError, Result};
pub use file::{
    ArchiveEntry, ArchiveFile, ArchiveStore, BackendKind, MemoryLibrary, OpenFlags, SeekMode,
    SgpFile,
};
pub use fileman::{
    FileAttributes, FileMan, file_get_attributes, find_all_files_in_dir, find_files_in_dir,
    find_object_case_insensitive,
};
pub use logger::{LogLevel, LogSink, TracingSink};
pub use path_util::{
    get_file_name, get_file_name_without_ext, get_parent_path, join_paths, replace_extension,
    slashify_path,
};
