extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_ppm() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.ppm");

    Command::cargo_bin("julia")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "40x30", "-i", "60"])
        .args(&["-c", "-0.8,0.156", "--offset", "-0.1,0.2", "-z", "0.9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 40x30"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"P6"));
    // Header plus 40 * 30 RGB pixels.
    assert!(bytes.len() > 40 * 30 * 3);
}

#[test]
fn renders_a_png_with_smooth_coloring() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("julia.png");

    Command::cargo_bin("julia")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "20x20", "-i", "50", "--smooth"])
        .assert()
        .success();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn zero_size_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.ppm");

    Command::cargo_bin("julia")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));

    assert!(!out.exists());
}

#[test]
fn output_is_required() {
    Command::cargo_bin("julia").unwrap().assert().failure();
}
