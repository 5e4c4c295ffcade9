//! The `FileMan` facade: opening files by name and whole-file operations.
//!
//! Opening goes through three layers in order: the exact path on disk, a
//! case-insensitive scan of the folder on disk, and finally any library
//! mounted at that folder. Library entries are read-only; asking for a
//! write-capable mode on one fails instead of silently downgrading.

mod atomic;
mod attributes;
mod case_insensitive;
mod copy;
mod enumerate;
mod ops;

pub use attributes::{FileAttributes, file_get_attributes};
pub use case_insensitive::find_object_case_insensitive;
pub use enumerate::{find_all_files_in_dir, find_files_in_dir};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::errors::{FileManError, Result};
use crate::file::{ArchiveFile, ArchiveStore, OpenFlags, RealFile, SgpFile};
use crate::path_util::join_paths;

struct MountedLibrary {
    folder: String,
    store: Arc<dyn ArchiveStore>,
}

/// File manager holding the set of mounted libraries.
#[derive(Default)]
pub struct FileMan {
    libraries: Vec<MountedLibrary>,
}

impl fmt::Debug for FileMan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileMan")
            .field(
                "libraries",
                &self.libraries.iter().map(|l| &l.folder).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn folder_key(folder: &str) -> String {
    folder
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_lowercase()
}

impl FileMan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `store` answer lookups in `folder`. Earlier mounts take precedence.
    pub fn mount_library(&mut self, folder: impl Into<String>, store: Arc<dyn ArchiveStore>) {
        let folder = folder.into();
        debug!(folder = %folder, "Mounted library");
        self.libraries.push(MountedLibrary { folder, store });
    }

    fn open_real(path: &Path, flags: OpenFlags) -> Result<SgpFile> {
        RealFile::open(path, flags).map(SgpFile::from_real)
    }

    /// Open for writing, creating the file if needed.
    pub fn open_for_writing(path: impl AsRef<Path>, truncate: bool) -> Result<SgpFile> {
        let mut flags = OpenFlags::WRITE | OpenFlags::CREATE;
        flags.set(OpenFlags::TRUNCATE, truncate);
        Self::open_real(path.as_ref(), flags)
    }

    /// Open for appending, creating the file if needed. Writes go to the end.
    pub fn open_for_append(path: impl AsRef<Path>) -> Result<SgpFile> {
        Self::open_real(path.as_ref(), OpenFlags::APPEND | OpenFlags::CREATE)
    }

    pub fn open_for_read_write(path: impl AsRef<Path>) -> Result<SgpFile> {
        Self::open_real(
            path.as_ref(),
            OpenFlags::READ | OpenFlags::WRITE | OpenFlags::CREATE,
        )
    }

    /// Open an existing file for reading. Never creates.
    pub fn open_for_reading(path: impl AsRef<Path>) -> Result<SgpFile> {
        Self::open_real(path.as_ref(), OpenFlags::READ)
    }

    pub fn open_for_reading_case_insensitive(&self, folder: &str, name: &str) -> Result<SgpFile> {
        self.open_file_case_insensitive(folder, name, OpenFlags::READ)
    }

    /// Open `folder/name` with `flags`, resolving `name` ignoring case.
    pub fn open_file_case_insensitive(
        &self,
        folder: &str,
        name: &str,
        flags: OpenFlags,
    ) -> Result<SgpFile> {
        let path = PathBuf::from(join_paths(folder, name));
        match Self::open_real(&path, flags) {
            Err(FileManError::NotFound(_)) => {}
            other => return other,
        }

        if let Some(actual) = find_object_case_insensitive(folder, name, true, false)? {
            debug!(folder, requested = name, actual = %actual, "Resolved name ignoring case");
            return Self::open_real(Path::new(&join_paths(folder, &actual)), flags);
        }

        let key = folder_key(folder);
        for lib in self.libraries.iter().filter(|l| folder_key(&l.folder) == key) {
            if let Some(entry) = lib.store.open_entry(name) {
                if flags.requires_write() {
                    return Err(FileManError::WriteToReadOnly(entry.name().to_string()));
                }
                debug!(folder, entry = entry.name(), "Opened library entry");
                return Ok(SgpFile::from_archive(ArchiveFile::new(entry)));
            }
        }

        Err(FileManError::NotFound(path))
    }
}
