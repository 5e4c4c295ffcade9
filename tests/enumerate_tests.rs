use sgp_fileman::{find_all_files_in_dir, find_files_in_dir};
use std::fs;
use tempfile::tempdir;

#[test]
fn extension_filter_ignoring_case_sorted_names() {
    let td = tempdir().unwrap();
    for name in ["B.TXT", "a.txt", "c.dat"] {
        fs::write(td.path().join(name), b"").unwrap();
    }
    let names = find_files_in_dir(td.path(), "txt", true, true, true).unwrap();
    assert_eq!(names, vec!["B.TXT", "a.txt"]);
}

#[test]
fn full_paths_unless_names_only() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("one.sti"), b"").unwrap();
    let paths = find_files_in_dir(td.path(), "sti", false, false, false).unwrap();
    assert_eq!(paths, vec![td.path().join("one.sti").to_string_lossy().into_owned()]);
}

#[test]
fn all_files_excludes_directories() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("b"), b"").unwrap();
    fs::write(td.path().join("a"), b"").unwrap();
    fs::create_dir(td.path().join("c")).unwrap();
    let paths = find_all_files_in_dir(td.path(), true).unwrap();
    let expected: Vec<String> = ["a", "b"]
        .iter()
        .map(|n| td.path().join(n).to_string_lossy().into_owned())
        .collect();
    assert_eq!(paths, expected);
}
