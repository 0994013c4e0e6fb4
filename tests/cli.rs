use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn scriptkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scriptkit"))
        .args(args)
        .output()
        .unwrap()
}

fn add_extension(path: &Path) -> (i32, serde_json::Value) {
    let out = scriptkit(&["add-extension", path.to_str().unwrap()]);
    let body = serde_json::from_slice(&out.stdout).unwrap();
    (out.status.code().unwrap(), body)
}

#[test]
fn add_extension_skip_exits_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.txt");
    fs::write(&path, "hello").unwrap();

    let (code, body) = add_extension(&path);

    assert_eq!(code, 0);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["action"], "skipped");
    assert!(path.exists());
}

#[test]
fn add_extension_rename_exits_zero() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deploy");
    fs::write(&path, "#!/bin/sh\necho hi\n").unwrap();

    let (code, body) = add_extension(&path);

    assert_eq!(code, 0);
    assert_eq!(body["data"]["action"], "renamed");
    assert!(dir.path().join("deploy.x-shellscript").exists());
}

#[test]
fn add_extension_unsupported_exits_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob");
    fs::write(&path, b"\x89PNG\r\n\x1a\nrest").unwrap();

    let (code, body) = add_extension(&path);

    assert_eq!(code, 1);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "file.unsupported_type");
    assert!(path.exists());
}

#[test]
fn add_extension_existing_target_exits_one() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes");
    fs::write(&path, "hello").unwrap();
    fs::write(dir.path().join("notes.plain"), "existing").unwrap();

    let (code, body) = add_extension(&path);

    assert_eq!(code, 1);
    assert_eq!(body["error"]["code"], "file.already_exists");
    assert_eq!(
        fs::read_to_string(dir.path().join("notes.plain")).unwrap(),
        "existing"
    );
}

#[test]
fn render_prints_dump_then_output() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("motd.j2");
    let vars = dir.path().join("vars.yml");
    fs::write(&template, "Welcome to {{ host }}").unwrap();
    fs::write(&vars, "host: alpha\n").unwrap();

    let out = scriptkit(&[
        "render",
        template.to_str().unwrap(),
        vars.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "host: alpha\nWelcome to alpha\n"
    );
}

#[cfg(not(windows))]
#[test]
fn slash_flag_is_rejected_off_windows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data");
    fs::write(&path, "abc").unwrap();

    let out = scriptkit(&["hash", "/f", path.to_str().unwrap()]);
    assert_ne!(out.status.code(), Some(0));

    let out = scriptkit(&["hash", "-f", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    let body: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        body["data"]["digest"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
