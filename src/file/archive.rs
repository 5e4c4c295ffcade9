//! Library (archive) backend.
//!
//! A library is an indexed, read-only blob store. The store hands out
//! `ArchiveEntry` byte ranges; an `ArchiveFile` is a cursor over one range and
//! never reads past its end.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::ops::Range;
use std::sync::Arc;

use super::SeekMode;
use super::real::seek_error;
use crate::errors::{FileManError, Result};

/// Contract of a library container: look an entry up by name.
///
/// Names use `/` separators and are relative to the library root.
pub trait ArchiveStore: Send + Sync {
    fn open_entry(&self, name: &str) -> Option<ArchiveEntry>;
}

/// A byte range inside a library blob. The range is checked on construction.
#[derive(Clone)]
pub struct ArchiveEntry {
    name: String,
    data: Arc<[u8]>,
    range: Range<usize>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: Arc<[u8]>, offset: usize, len: usize) -> Result<Self> {
        let name = name.into();
        let range = offset
            .checked_add(len)
            .filter(|end| *end <= data.len())
            .map(|end| offset..end)
            .ok_or_else(|| {
                FileManError::InvalidHandle(format!(
                    "library entry '{name}' spans {offset}+{len} bytes of a {}-byte blob",
                    data.len()
                ))
            })?;
        Ok(Self { name, data, range })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl fmt::Debug for ArchiveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("name", &self.name)
            .field("range", &self.range)
            .finish()
    }
}

/// Read-only cursor over one library entry.
#[derive(Debug)]
pub struct ArchiveFile {
    entry: ArchiveEntry,
    pos: u64,
}

impl ArchiveFile {
    pub fn new(entry: ArchiveEntry) -> Self {
        Self { entry, pos: 0 }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    fn bytes(&self) -> &[u8] {
        &self.entry.data[self.entry.range()]
    }

    fn remaining(&self) -> &[u8] {
        let bytes = self.bytes();
        let start = (self.pos as usize).min(bytes.len());
        &bytes[start..]
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let remaining = self.remaining();
        if remaining.len() < buf.len() {
            return Err(FileManError::ShortRead {
                requested: buf.len() as u64,
                available: remaining.len() as u64,
            });
        }
        buf.copy_from_slice(&remaining[..buf.len()]);
        self.pos += buf.len() as u64;
        Ok(())
    }

    pub fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n as u64;
        Ok(n)
    }

    /// Seek within the entry; targets outside `0..=size` are rejected.
    pub fn seek(&mut self, distance: i64, mode: SeekMode) -> Result<u64> {
        let base = match mode {
            SeekMode::FromStart => 0,
            SeekMode::FromCurrent => self.pos,
            SeekMode::FromEnd => self.size(),
        };
        let target = base
            .checked_add_signed(distance)
            .filter(|t| *t <= self.size())
            .ok_or_else(|| seek_error(distance, mode))?;
        self.pos = target;
        Ok(target)
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn size(&self) -> u64 {
        self.entry.range.len() as u64
    }
}

fn normalize_name(name: &str) -> String {
    name.replace('\\', "/")
        .trim_start_matches('/')
        .to_lowercase()
}

/// In-memory library: all entries packed into one shared blob.
///
/// Lookups ignore case and accept either separator, matching how game data
/// names entries.
#[derive(Default)]
pub struct MemoryLibrary {
    blob: Arc<[u8]>,
    index: HashMap<String, (String, usize, usize)>,
}

impl MemoryLibrary {
    pub fn from_entries<I, N, B>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, B)>,
        N: Into<String>,
        B: AsRef<[u8]>,
    {
        let mut blob = Vec::new();
        let mut index = HashMap::new();
        for (name, bytes) in entries {
            let name: String = name.into();
            let bytes = bytes.as_ref();
            let key = normalize_name(&name);
            if index.contains_key(&key) {
                continue;
            }
            index.insert(key, (name, blob.len(), bytes.len()));
            blob.extend_from_slice(bytes);
        }
        Self {
            blob: blob.into(),
            index,
        }
    }
}

impl ArchiveStore for MemoryLibrary {
    fn open_entry(&self, name: &str) -> Option<ArchiveEntry> {
        let (stored, offset, len) = self.index.get(&normalize_name(name))?;
        ArchiveEntry::new(stored.clone(), Arc::clone(&self.blob), *offset, *len).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> MemoryLibrary {
        MemoryLibrary::from_entries([
            ("Data/First.txt", b"first".as_slice()),
            ("data\\second.bin", b"0123456789".as_slice()),
        ])
    }

    #[test]
    fn entries_are_ranges_into_one_blob() {
        let lib = library();
        let a = lib.open_entry("data/first.txt").unwrap();
        let b = lib.open_entry("DATA/SECOND.BIN").unwrap();
        assert!(Arc::ptr_eq(&a.data, &b.data));
        assert_eq!(a.range(), 0..5);
        assert_eq!(b.range(), 5..15);
        assert_eq!(b.name(), "data\\second.bin");
        assert!(lib.open_entry("missing").is_none());
    }

    #[test]
    fn out_of_bounds_ranges_are_rejected() {
        let blob: Arc<[u8]> = Arc::from(&b"0123456789"[..]);
        assert!(ArchiveEntry::new("tail", Arc::clone(&blob), 8, 2).is_ok());
        let err = ArchiveEntry::new("past_end", Arc::clone(&blob), 8, 3).unwrap_err();
        assert!(matches!(err, FileManError::InvalidHandle(_)));
        assert!(ArchiveEntry::new("overflow", blob, usize::MAX, 2).is_err());
    }

    #[test]
    fn reads_stay_inside_the_entry() {
        let mut f = ArchiveFile::new(library().open_entry("Data/First.txt").unwrap());
        let mut buf = [0u8; 6];
        let err = f.read_exact(&mut buf).unwrap_err();
        assert!(matches!(err, FileManError::ShortRead { requested: 6, available: 5 }));
        assert_eq!(f.position(), 0, "failed read must not move the cursor");

        let mut buf = [0u8; 5];
        f.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"first");
        assert_eq!(f.read_some(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_is_capped_at_entry_bounds() {
        let mut f = ArchiveFile::new(library().open_entry("data/second.bin").unwrap());
        assert_eq!(f.seek(-3, SeekMode::FromEnd).unwrap(), 7);
        assert_eq!(f.seek(2, SeekMode::FromCurrent).unwrap(), 9);
        assert!(f.seek(11, SeekMode::FromStart).is_err());
        assert!(f.seek(-1, SeekMode::FromStart).is_err());
        assert_eq!(f.position(), 9);
        let mut buf = [0u8; 1];
        f.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"9");
    }
}
