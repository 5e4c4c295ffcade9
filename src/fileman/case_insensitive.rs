//! Case-insensitive name resolution against the real filesystem.
//!
//! Game data refers to files with whatever casing the original Windows
//! release used; on case-sensitive filesystems the on-disk name has to be
//! found by scanning. When several entries collide ignoring case, the first
//! one returned by the directory scan wins.

use std::path::Path;
use tracing::trace;

use super::enumerate::read_children;
use crate::errors::{FileManError, Result};
use crate::path_util::join_paths;

fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Scan `dir` for a single component matching `name` ignoring case.
fn find_component(dir: &Path, name: &str, files: bool, dirs: bool) -> Result<Option<String>> {
    let children = match read_children(dir) {
        Ok(children) => children,
        Err(FileManError::NotFound(_) | FileManError::NotADirectory(_)) => return Ok(None),
        Err(e) => return Err(e),
    };
    let found = children.into_iter().find_map(|entry| {
        let ft = entry.file_type();
        let wanted = (files && ft.is_file()) || (dirs && ft.is_dir());
        let candidate = entry.file_name().to_string_lossy();
        (wanted && same_name(&candidate, name)).then(|| candidate.into_owned())
    });
    trace!(dir = %dir.display(), name, ?found, "Case-insensitive scan");
    Ok(found)
}

/// Resolve `name` (which may contain `/`-separated directories) under `dir`.
///
/// Directory components are matched against subdirectories only; the last
/// component is matched against files and/or directories as requested.
/// Returns the on-disk relative name, or `None` if any component is missing.
/// Only errors unrelated to absence (e.g. permission denied) are returned.
pub fn find_object_case_insensitive(
    dir: impl AsRef<Path>,
    name: &str,
    files: bool,
    dirs: bool,
) -> Result<Option<String>> {
    let dir = dir.as_ref();
    match name.split_once('/') {
        Some((head, rest)) if !head.is_empty() && !rest.is_empty() => {
            let Some(actual_dir) = find_component(dir, head, false, true)? else {
                return Ok(None);
            };
            let sub = dir.join(&actual_dir);
            Ok(find_object_case_insensitive(&sub, rest, files, dirs)?
                .map(|inner| join_paths(&actual_dir, &inner)))
        }
        _ => find_component(dir, name, files, dirs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::MAIN_SEPARATOR;
    use tempfile::tempdir;

    #[test]
    fn finds_leaf_ignoring_case() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Intro.STI"), b"").unwrap();
        let found = find_object_case_insensitive(dir.path(), "intro.sti", true, false).unwrap();
        assert_eq!(found.as_deref(), Some("Intro.STI"));
    }

    #[test]
    fn respects_object_kind() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("Maps")).unwrap();
        assert_eq!(
            find_object_case_insensitive(dir.path(), "maps", true, false).unwrap(),
            None
        );
        assert_eq!(
            find_object_case_insensitive(dir.path(), "MAPS", false, true)
                .unwrap()
                .as_deref(),
            Some("Maps")
        );
    }

    #[test]
    fn resolves_nested_components() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Data").join("TileSets")).unwrap();
        fs::write(dir.path().join("Data").join("TileSets").join("Grass.dat"), b"").unwrap();
        let found = find_object_case_insensitive(dir.path(), "data/tilesets/GRASS.DAT", true, false)
            .unwrap()
            .unwrap();
        let expected = ["Data", "TileSets", "Grass.dat"].join(&MAIN_SEPARATOR.to_string());
        assert_eq!(found, expected);
    }

    #[test]
    fn missing_directory_is_absent_not_error() {
        let dir = tempdir().unwrap();
        let found =
            find_object_case_insensitive(dir.path().join("nowhere"), "x.txt", true, false).unwrap();
        assert_eq!(found, None);
        let found = find_object_case_insensitive(dir.path(), "nowhere/x.txt", true, false).unwrap();
        assert_eq!(found, None);
    }
}
