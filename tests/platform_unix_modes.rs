#![cfg(unix)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

use move_hide::create_template_config;

fn mode(p: &std::path::Path) -> u32 {
    fs::metadata(p).unwrap().permissions().mode() & 0o777
}

#[test]
fn template_config_is_private() {
    let td = tempdir().unwrap();
    let root = fs::canonicalize(td.path()).unwrap();
    let path = root.join("cfgdir").join("config.xml");
    create_template_config(&path).unwrap();
    assert_eq!(mode(&path), 0o600);
    assert_eq!(mode(path.parent().unwrap()), 0o700);
}

#[test]
fn binary_creates_log_file_0600() {
    let td = tempdir().unwrap();
    let root = fs::canonicalize(td.path()).unwrap();
    let dir = root.join("d");
    fs::create_dir_all(&dir).unwrap();
    let log = root.join("logs").join("run.log");

    let out = Command::new(assert_cmd::cargo::cargo_bin!("move_hide"))
        .env("MOVE_HIDE_CONFIG", root.join("absent.xml"))
        .arg("--log-file")
        .arg(&log)
        .arg("list")
        .arg(&dir)
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");
    assert_eq!(mode(&log), 0o600);
}

#[test]
fn moved_file_keeps_its_mode() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    let f = src.join("script.sh");
    fs::write(&f, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&f, fs::Permissions::from_mode(0o750)).unwrap();

    let moved = move_hide::move_files(
        &move_hide::validate(&src).unwrap(),
        &move_hide::validate(&dst).unwrap(),
    )
    .unwrap();
    assert_eq!(moved, vec!["script.sh"]);
    assert_eq!(mode(&dst.join("script.sh")), 0o750);
}
