//! Pure path-string helpers.
//!
//! Nothing here touches the filesystem except `get_parent_path(.., absolute = true)`,
//! which consults the current working directory. Separator normalisation is
//! never implicit: call `slashify_path` when `\` should become `/`.

use std::path::{MAIN_SEPARATOR, Path};

use crate::errors::{FileManError, Result};

#[inline]
fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Join two path components with exactly one separator between them.
///
/// A trailing separator on `first` and a leading separator on `second` are
/// collapsed, so `join_paths("a/", "/b") == "a/b"`. An empty `first` yields
/// `second` unchanged.
pub fn join_paths(first: &str, second: &str) -> String {
    if first.is_empty() {
        return second.to_string();
    }
    let head = first.trim_end_matches(is_separator);
    let tail = second.trim_start_matches(is_separator);

    let mut result = String::with_capacity(head.len() + tail.len() + 1);
    result.push_str(head);
    result.push(MAIN_SEPARATOR);
    result.push_str(tail);
    result
}

/// Final component of `path`, or an empty string if there is none (`/`, `..`).
pub fn get_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replace the extension of the final component.
///
/// `new_extension` may be given with or without the leading dot; an empty
/// string strips the extension and `"."` leaves a bare trailing dot. The final
/// component is whatever follows the last separator, so everything before it
/// is kept byte for byte (`"a/."` keeps `"a/"`).
pub fn replace_extension(path: &str, new_extension: &str) -> String {
    let split = path.rfind(is_separator).map_or(0, |i| i + 1);
    let (prefix, name) = path.split_at(split);
    let mut filename = name.to_string();

    if filename != "." && filename != ".." {
        if let Some(dot) = filename.rfind('.') {
            filename.truncate(dot);
        }
    }
    if !new_extension.is_empty() && !new_extension.starts_with('.') {
        filename.push('.');
    }
    filename.push_str(new_extension);

    let mut out = String::with_capacity(prefix.len() + filename.len());
    out.push_str(prefix);
    out.push_str(&filename);
    out
}

/// File name of `path` with its extension removed.
pub fn get_file_name_without_ext(path: &str) -> String {
    replace_extension(&get_file_name(path), "")
}

/// Parent of `path` (empty string if it has none).
///
/// With `absolute` set, a relative path is resolved against the current
/// working directory.
pub fn get_parent_path(path: &str, absolute: bool) -> Result<String> {
    let p = Path::new(path);
    let parent = match p.parent() {
        Some(parent) => parent.to_string_lossy().into_owned(),
        None => return Ok(String::new()),
    };
    if absolute && !p.is_absolute() {
        let cwd = std::env::current_dir().map_err(|e| FileManError::Io {
            path: p.to_path_buf(),
            context: format!("resolve current directory: {e}"),
            source: e,
        })?;
        let cwd = dunce::simplified(&cwd).to_string_lossy().into_owned();
        return Ok(join_paths(&cwd, &parent));
    }
    Ok(parent)
}

/// Replace every `\` with `/`, in place.
pub fn slashify_path(path: &mut String) {
    if path.contains('\\') {
        *path = path.replace('\\', "/");
    }
}
