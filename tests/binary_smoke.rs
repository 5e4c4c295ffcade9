use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::process::Command;

fn bin(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sgp_fileman"));
    cmd.env("SGP_FILEMAN_CONFIG", config_dir.path().join("config.xml"));
    cmd
}

#[test]
fn print_config_succeeds_without_a_config_file() {
    let td = TempDir::new().unwrap();
    let out = bin(&td).arg("print-config").output().expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("not present"), "stdout: {stdout}");
}

#[test]
fn ls_filters_and_sorts() {
    let td = TempDir::new().unwrap();
    for name in ["B.TXT", "a.txt", "c.dat"] {
        td.child("data").child(name).touch().unwrap();
    }
    let out = bin(&td)
        .args(["ls", "--ext", "txt", "--ignore-case", "--names-only", "--sort"])
        .arg(td.child("data").path())
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "B.TXT\na.txt\n");
}

#[test]
fn cat_resolves_case_and_missing_file_fails() {
    let td = TempDir::new().unwrap();
    td.child("Ja2.ini").write_str("[Ja2 Settings]\n").unwrap();

    let out = bin(&td)
        .arg("cat")
        .arg(td.path())
        .arg("JA2.INI")
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "[Ja2 Settings]\n");

    let out = bin(&td)
        .arg("cat")
        .arg(td.path())
        .arg("nothing.ini")
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
}

#[test]
fn malformed_config_is_refused() {
    let td = TempDir::new().unwrap();
    td.child("config.xml").write_str("<config><bogus/></config>").unwrap();
    let out = bin(&td).arg("free-space").output().expect("spawn binary");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to load config"));
}
