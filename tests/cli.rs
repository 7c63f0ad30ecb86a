extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn renders_a_single_image() {
    let dir = tempdir().unwrap();
    let name = dir.path().join("mandel");
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "4", "--depth", "30", "--convert", "none", "-o"])
        .arg(&name)
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("mandel.ppm")).unwrap();
    assert!(text.starts_with("P3\n8 8\n255\n"));
    assert!(!dir.path().join("mandel.png").exists());
}

#[test]
fn converts_to_png_by_default() {
    let dir = tempdir().unwrap();
    let name = dir.path().join("newton");
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "6", "--update", "newton", "--palette", "newton"])
        .args(&["--bailout", "1e37", "-o"])
        .arg(&name)
        .assert()
        .success();
    assert!(dir.path().join("newton.ppm").exists());
    assert!(dir.path().join("newton.png").exists());
}

#[test]
fn draws_orbit_traps_with_offsets() {
    let dir = tempdir().unwrap();
    let name = dir.path().join("trap");
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "5", "--trap", "unit-circle", "--palette", "trap-glow"])
        .args(&["--offset", "-0.5,0.25", "--warp", "fold", "--warp-amount", "3"])
        .args(&["--convert", "none", "-o"])
        .arg(&name)
        .assert()
        .success();
    assert!(dir.path().join("trap.ppm").exists());
}

#[test]
fn draws_one_file_per_frame() {
    let dir = tempdir().unwrap();
    let frames = dir.path().join("frames");
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "3", "--frames", "3", "--scale", "3", "--scale-to", "1"])
        .args(&["--convert", "none", "-o"])
        .arg(&frames)
        .assert()
        .success();
    for f in 0..3 {
        assert!(frames.join(format!("frame{}.ppm", f)).exists());
    }
    assert!(!frames.join("frame3.ppm").exists());
}

#[test]
fn rejects_empty_images() {
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Half-width must be between 1 and 4096"));
}

#[test]
fn reports_failed_conversions() {
    let dir = tempdir().unwrap();
    let name = dir.path().join("out");
    Command::cargo_bin("escapade")
        .unwrap()
        .args(&["--width", "2", "--convert", "false", "-o"])
        .arg(&name)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
    assert!(dir.path().join("out.ppm").exists());
}
