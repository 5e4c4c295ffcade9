use sgp_fileman::{FileAttributes, file_get_attributes};
use std::fs;
use tempfile::tempdir;

#[test]
fn error_sentinel_is_distinct_from_no_flags() {
    let td = tempdir().unwrap();
    let present = td.path().join("present.dat");
    fs::write(&present, b"x").unwrap();

    let missing = file_get_attributes(td.path().join("missing.dat"));
    let empty = file_get_attributes(&present);
    assert_eq!(missing, None);
    assert_eq!(empty, Some(FileAttributes::empty()));
    assert_ne!(missing, empty);
}

#[test]
fn readonly_and_directory_flags() {
    let td = tempdir().unwrap();
    let ro = td.path().join("ro.dat");
    fs::write(&ro, b"x").unwrap();
    let mut perms = fs::metadata(&ro).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&ro, perms).unwrap();

    assert_eq!(file_get_attributes(&ro), Some(FileAttributes::READONLY));
    let dir_attrs = file_get_attributes(td.path()).unwrap();
    assert!(dir_attrs.contains(FileAttributes::DIRECTORY));
    assert!(!dir_attrs.contains(FileAttributes::READONLY));
}
