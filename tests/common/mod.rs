#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn taglinker_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taglinker").unwrap();
    cmd.env_remove("TAGLINKER_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn init_site(temp: &TempDir) {
    taglinker_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--base-url")
        .arg("https://blog.example")
        .assert()
        .success();
}

pub fn write_post(root: &Path, file: &str, front: &str, body: &str) {
    let path = root.join("posts").join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("+++\n{}+++\n{}", front, body)).unwrap();
}

pub fn read_post(root: &Path, file: &str) -> String {
    fs::read_to_string(root.join("posts").join(file)).unwrap()
}
