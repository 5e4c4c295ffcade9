//! The `SgpFile` handle.
//!
//! One handle type over two backends: a real OS file or a read-only range of a
//! library archive. Every operation dispatches on the backend, which is fixed
//! when the handle is created. Closing is dropping (or calling `close`).
//!
//! Failure modes:
//! - `read` fails with `ShortRead` when fewer bytes remain than requested; it
//!   never reports success on a partial fill.
//! - `write` fails with `WriteToReadOnly` on library handles and `Write` on OS
//!   failures.
//! - `seek` fails with `Seek` when the target would be negative (and, for
//!   library handles, past the end of the entry).

mod archive;
mod array;
mod real;

pub use archive::{ArchiveEntry, ArchiveFile, ArchiveStore, MemoryLibrary};
pub use array::{ArrayCount, ArrayElement};
pub use real::RealFile;

use bitflags::bitflags;
use std::fs::File;
use std::io;
use tracing::debug;

use crate::errors::{FileManError, Result};

bitflags! {
    /// Open options understood by both backends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenFlags: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const APPEND = 1 << 2;
        const CREATE = 1 << 3;
        const TRUNCATE = 1 << 4;
    }
}

impl OpenFlags {
    /// Whether these flags need a writable backend.
    pub fn requires_write(self) -> bool {
        self.intersects(Self::WRITE | Self::APPEND | Self::CREATE | Self::TRUNCATE)
    }

    pub(crate) fn to_std(self) -> std::fs::OpenOptions {
        let mut opts = std::fs::OpenOptions::new();
        opts.read(self.contains(Self::READ))
            .write(self.contains(Self::WRITE))
            .append(self.contains(Self::APPEND))
            .create(self.contains(Self::CREATE))
            .truncate(self.contains(Self::TRUNCATE));
        opts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekMode {
    FromStart,
    FromCurrent,
    FromEnd,
}

impl SeekMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SeekMode::FromStart => "start",
            SeekMode::FromCurrent => "current",
            SeekMode::FromEnd => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Real,
    Archive,
}

#[derive(Debug)]
enum Backend {
    Real(RealFile),
    Archive(ArchiveFile),
}

#[derive(Debug)]
pub struct SgpFile {
    backend: Backend,
}

impl SgpFile {
    pub fn from_real(file: RealFile) -> Self {
        Self {
            backend: Backend::Real(file),
        }
    }

    pub fn from_archive(file: ArchiveFile) -> Self {
        Self {
            backend: Backend::Archive(file),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self.backend {
            Backend::Real(_) => BackendKind::Real,
            Backend::Archive(_) => BackendKind::Archive,
        }
    }

    /// The OS file behind a real handle; `None` for library handles.
    pub fn as_real_file(&self) -> Option<&File> {
        match &self.backend {
            Backend::Real(f) => Some(f.file()),
            Backend::Archive(_) => None,
        }
    }

    /// Read exactly `buf.len()` bytes.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        match &mut self.backend {
            Backend::Real(f) => f.read_exact(buf),
            Backend::Archive(f) => f.read_exact(buf),
        }
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        match &mut self.backend {
            Backend::Real(f) => f.write_all(buf),
            Backend::Archive(f) => Err(FileManError::WriteToReadOnly(f.name().to_string())),
        }
    }

    /// Move the cursor; returns the new absolute position.
    pub fn seek(&mut self, distance: i64, mode: SeekMode) -> Result<u64> {
        match &mut self.backend {
            Backend::Real(f) => f.seek(distance, mode),
            Backend::Archive(f) => f.seek(distance, mode),
        }
    }

    pub fn position(&self) -> Result<u64> {
        match &self.backend {
            Backend::Real(f) => f.position(),
            Backend::Archive(f) => Ok(f.position()),
        }
    }

    pub fn size(&self) -> Result<u64> {
        match &self.backend {
            Backend::Real(f) => f.size(),
            Backend::Archive(f) => Ok(f.size()),
        }
    }

    /// Write a length-prefixed array: the count as `C`, then the elements.
    /// The element block is skipped entirely when `data` is empty.
    pub fn write_array<C: ArrayCount, T: ArrayElement>(&mut self, data: &[T]) -> Result<()> {
        let count = C::from_len(data.len()).ok_or_else(|| {
            FileManError::Write(format!(
                "array of {} elements does not fit a {}-byte count",
                data.len(),
                C::SIZE
            ))
        })?;
        let mut prefix = Vec::with_capacity(C::SIZE);
        count.encode(&mut prefix);
        self.write(&prefix)?;
        if data.is_empty() {
            return Ok(());
        }
        let mut payload = Vec::with_capacity(T::SIZE * data.len());
        for item in data {
            item.encode(&mut payload);
        }
        self.write(&payload)
    }

    /// Read an array written by `write_array`. A zero count reads nothing more.
    pub fn read_array<C: ArrayCount, T: ArrayElement>(&mut self) -> Result<Vec<T>> {
        let mut prefix = vec![0u8; C::SIZE];
        self.read(&mut prefix)?;
        let count = C::decode(&prefix).to_len();
        if count == Some(0) {
            return Ok(Vec::new());
        }
        // The count comes from the file; size the buffer only once the
        // payload is known to be there.
        let available = self.size()?.saturating_sub(self.position()?);
        let requested = count
            .and_then(|n| n.checked_mul(T::SIZE))
            .map_or(u64::MAX, |n| n as u64);
        if requested > available {
            return Err(FileManError::ShortRead {
                requested,
                available,
            });
        }
        let mut payload = vec![0u8; requested as usize];
        self.read(&mut payload)?;
        Ok(payload.chunks_exact(T::SIZE).map(T::decode).collect())
    }

    /// Read from the current position to the end as text.
    pub fn read_text(&mut self) -> Result<String> {
        let remaining = self.size()?.saturating_sub(self.position()?);
        let mut data = vec![0u8; remaining as usize];
        self.read(&mut data)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Release the underlying descriptor or library reference.
    pub fn close(self) {
        match &self.backend {
            Backend::Real(f) => debug!(path = %f.path().display(), "Closing real file"),
            Backend::Archive(f) => debug!(entry = f.name(), "Closing library file"),
        }
    }
}

impl io::Read for SgpFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.backend {
            Backend::Real(f) => f.read_some(buf),
            Backend::Archive(f) => f.read_some(buf),
        }
    }
}

impl io::Seek for SgpFile {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let (distance, mode) = match pos {
            io::SeekFrom::Start(n) => (
                i64::try_from(n).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
                SeekMode::FromStart,
            ),
            io::SeekFrom::Current(n) => (n, SeekMode::FromCurrent),
            io::SeekFrom::End(n) => (n, SeekMode::FromEnd),
        };
        SgpFile::seek(self, distance, mode)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }
}
