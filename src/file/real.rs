//! Real-file backend: a thin wrapper over `std::fs::File` that remembers its path
//! so failures can be reported with context.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{OpenFlags, SeekMode};
use crate::errors::{FileManError, Result, describe_io, io_err};

#[derive(Debug)]
pub struct RealFile {
    file: File,
    path: PathBuf,
}

impl RealFile {
    /// Open `path` honoring `flags`.
    pub fn open(path: &Path, flags: OpenFlags) -> Result<Self> {
        let file = flags
            .to_std()
            .open(path)
            .map_err(io_err("open file", path))?;
        debug!(path = %path.display(), ?flags, "Opened real file");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    /// Fill `buf` completely or fail without reporting partial success.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let requested = buf.len() as u64;
        let available = self.size()?.saturating_sub(self.position()?);
        if available < requested {
            return Err(FileManError::ShortRead {
                requested,
                available,
            });
        }
        self.file.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => FileManError::ShortRead {
                requested,
                available,
            },
            _ => FileManError::Read(describe_io("read file", &self.path, &e)),
        })
    }

    pub fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    pub fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.file
            .write_all(buf)
            .map_err(|e| FileManError::Write(describe_io("write file", &self.path, &e)))
    }

    pub fn seek(&mut self, distance: i64, mode: SeekMode) -> Result<u64> {
        let target = match mode {
            SeekMode::FromStart => {
                if distance < 0 {
                    return Err(seek_error(distance, mode));
                }
                SeekFrom::Start(distance as u64)
            }
            SeekMode::FromCurrent => {
                let base = self.position()?;
                check_offset(base, distance, mode)?;
                SeekFrom::Current(distance)
            }
            SeekMode::FromEnd => {
                let base = self.size()?;
                check_offset(base, distance, mode)?;
                SeekFrom::End(distance)
            }
        };
        self.file
            .seek(target)
            .map_err(io_err("seek file", &self.path))
    }

    pub fn position(&self) -> Result<u64> {
        (&self.file)
            .stream_position()
            .map_err(|e| FileManError::InvalidHandle(describe_io("query position", &self.path, &e)))
    }

    pub fn size(&self) -> Result<u64> {
        self.file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| FileManError::InvalidHandle(describe_io("query size", &self.path, &e)))
    }
}

fn check_offset(base: u64, distance: i64, mode: SeekMode) -> Result<()> {
    match base.checked_add_signed(distance) {
        Some(_) => Ok(()),
        None => Err(seek_error(distance, mode)),
    }
}

pub(super) fn seek_error(distance: i64, mode: SeekMode) -> FileManError {
    FileManError::Seek {
        offset: distance,
        from: mode.as_str(),
    }
}
