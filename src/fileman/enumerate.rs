//! Flat directory listings. Never recurses into subdirectories.

use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::errors::{FileManError, Result, from_io};

fn walk_error(dir: &Path, e: walkdir::Error) -> FileManError {
    let path = e.path().unwrap_or(dir).to_path_buf();
    match e.into_io_error() {
        Some(io) => from_io("read directory", &path, io),
        None => FileManError::Io {
            path: path.clone(),
            context: format!("read directory '{}': filesystem loop", path.display()),
            source: std::io::Error::other("filesystem loop"),
        },
    }
}

/// Immediate children of `dir`, symlinks followed.
///
/// Failing to open `dir` itself is an error. Entries that cannot be
/// inspected (dangling links, races with deletion) are skipped.
pub(crate) fn read_children(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    let mut children = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        match entry {
            Ok(entry) => children.push(entry),
            Err(e) if e.depth() == 0 => return Err(walk_error(dir, e)),
            Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry"),
        }
    }
    Ok(children)
}

/// Paths of all regular files directly inside `dir`.
///
/// Without `sort` the order is whatever the platform returns.
pub fn find_all_files_in_dir(dir: impl AsRef<Path>, sort: bool) -> Result<Vec<String>> {
    let mut paths: Vec<String> = read_children(dir.as_ref())?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_string_lossy().into_owned())
        .collect();
    if sort {
        paths.sort();
    }
    Ok(paths)
}

fn extension_matches(path: &Path, ext: &str, case_insensitive: bool) -> bool {
    match path.extension() {
        None => ext.is_empty(),
        Some(found) => {
            let found = found.to_string_lossy();
            if case_insensitive {
                found.to_lowercase() == ext.to_lowercase()
            } else {
                found == ext
            }
        }
    }
}

/// Files in `dir` whose extension equals `ext` (without the dot).
///
/// An empty `ext` selects files with no extension. `names_only` strips the
/// directory prefix from each result.
pub fn find_files_in_dir(
    dir: impl AsRef<Path>,
    ext: &str,
    case_insensitive: bool,
    names_only: bool,
    sort: bool,
) -> Result<Vec<String>> {
    let all = find_all_files_in_dir(dir, sort)?;
    Ok(all
        .into_iter()
        .filter(|p| extension_matches(Path::new(p), ext, case_insensitive))
        .map(|p| {
            if names_only {
                Path::new(&p)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or(p)
            } else {
                p
            }
        })
        .collect())
}
