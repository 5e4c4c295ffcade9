use sgp_fileman::{
    get_file_name, get_file_name_without_ext, get_parent_path, join_paths, replace_extension,
    slashify_path,
};
use std::path::MAIN_SEPARATOR;

fn sep(s: &str) -> String {
    s.replace('/', &MAIN_SEPARATOR.to_string())
}

#[test]
fn join_paths_uses_a_single_separator() {
    assert_eq!(join_paths("a/", "b"), sep("a/b"));
    assert_eq!(join_paths("a", "b"), sep("a/b"));
    assert_eq!(join_paths("a/", "/b"), sep("a/b"));
    assert_eq!(join_paths("", "b"), "b");
}

#[test]
fn file_name_helpers() {
    assert_eq!(get_file_name("Data/Maps/A9.dat"), "A9.dat");
    assert_eq!(get_file_name_without_ext("Data/Maps/A9.dat"), "A9");
    assert_eq!(get_file_name_without_ext("Data/README"), "README");
    assert_eq!(replace_extension("foo.bar", "baz"), "foo.baz");
    assert_eq!(replace_extension("foo", ".txt"), "foo.txt");
    assert_eq!(replace_extension("dir.d/file", "txt"), "dir.d/file.txt");
}

#[test]
fn parent_path_can_be_made_absolute() {
    assert_eq!(get_parent_path("a/b/c.txt", false).unwrap(), "a/b");
    let abs = get_parent_path("a/b/c.txt", true).unwrap();
    assert!(std::path::Path::new(&abs).is_absolute(), "got {abs}");
    assert!(abs.ends_with("a/b"), "got {abs}");
}

#[test]
fn slashify_is_explicit() {
    let mut p = String::from(r"Data\Tilesets\0\grass.sti");
    slashify_path(&mut p);
    assert_eq!(p, "Data/Tilesets/0/grass.sti");
}

#[test]
fn replace_extension_keeps_the_directory_prefix() {
    assert_eq!(replace_extension("a/.", "bin"), "a/..bin");
    assert_eq!(replace_extension("Data/.", ""), "Data/.");
    assert_eq!(replace_extension("maps/maps.dat", "bak"), "maps/maps.bak");
}
