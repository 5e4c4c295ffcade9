use assert_fs::TempDir;
use assert_fs::prelude::*;
use sgp_fileman::{BackendKind, FileMan, FileManError, MemoryLibrary, OpenFlags};
use std::sync::Arc;

fn folder(td: &TempDir) -> String {
    td.path().to_string_lossy().into_owned()
}

#[test]
fn finds_entry_under_different_casing() {
    let td = TempDir::new().unwrap();
    td.child("file.txt").write_str("lower-case on disk").unwrap();

    let fm = FileMan::new();
    let mut f = fm
        .open_for_reading_case_insensitive(&folder(&td), "FILE.TXT")
        .unwrap();
    assert_eq!(f.kind(), BackendKind::Real);
    assert_eq!(f.read_text().unwrap(), "lower-case on disk");
}

#[test]
fn no_match_under_any_casing_is_not_found() {
    let td = TempDir::new().unwrap();
    td.child("other.txt").touch().unwrap();

    let err = FileMan::new()
        .open_for_reading_case_insensitive(&folder(&td), "FILE.TXT")
        .unwrap_err();
    assert!(err.is_not_found(), "got {err:?}");
}

#[test]
fn nested_names_resolve_each_component() {
    let td = TempDir::new().unwrap();
    td.child("Data").child("Maps").child("A9.dat").write_binary(&[9, 9]).unwrap();

    let mut f = FileMan::new()
        .open_file_case_insensitive(&folder(&td), "data/MAPS/a9.DAT", OpenFlags::READ)
        .unwrap();
    let mut buf = [0u8; 2];
    f.read(&mut buf).unwrap();
    assert_eq!(buf, [9, 9]);
}

#[test]
fn library_entries_are_read_only() {
    let td = TempDir::new().unwrap();
    let mut fm = FileMan::new();
    fm.mount_library(
        folder(&td),
        Arc::new(MemoryLibrary::from_entries([(
            "Tilesets\\0\\Grass.sti",
            b"STCI".as_slice(),
        )])),
    );

    let mut f = fm
        .open_for_reading_case_insensitive(&folder(&td), "tilesets/0/grass.sti")
        .unwrap();
    assert_eq!(f.kind(), BackendKind::Archive);
    assert!(f.as_real_file().is_none());
    assert_eq!(f.size().unwrap(), 4);
    assert_eq!(f.read_text().unwrap(), "STCI");
    assert!(matches!(
        f.write(b"x").unwrap_err(),
        FileManError::WriteToReadOnly(_)
    ));

    let err = fm
        .open_file_case_insensitive(
            &folder(&td),
            "tilesets/0/grass.sti",
            OpenFlags::READ | OpenFlags::WRITE,
        )
        .unwrap_err();
    assert!(matches!(err, FileManError::WriteToReadOnly(_)), "got {err:?}");
}

#[test]
fn libraries_only_answer_for_their_folder() {
    let td = TempDir::new().unwrap();
    let mut fm = FileMan::new();
    fm.mount_library(
        "elsewhere",
        Arc::new(MemoryLibrary::from_entries([("a.txt", b"a".as_slice())])),
    );
    let err = fm
        .open_for_reading_case_insensitive(&folder(&td), "a.txt")
        .unwrap_err();
    assert!(err.is_not_found());
}
