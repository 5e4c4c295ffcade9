//! Copy-then-rename fallback for moves across filesystems.
//!
//! The copy lands in a temp file inside the destination directory and is
//! fsynced before being renamed over `dest`, so `dest` is either the old file
//! or the complete new one. The source is never touched here.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use super::atomic::{try_atomic_move, unique_temp_path};
use crate::errors::{Result, from_io};

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` into a newly created `dst` (never clobbers), then fsync it.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

pub(super) fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = unique_temp_path(dest_dir);

    let bytes = match copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(from_io("copy file", src, e));
        }
    };

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(from_io("rename temporary file", dest, e));
    }
    debug!(src = %src.display(), dest = %dest.display(), bytes, "Copied file into place");
    Ok(())
}
