use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const STAMP: &str = "2015:03:18 12:58:21";
const TARGET: &str = "2015-03-18_12-58-21_Wednesday.jpg";

// Same layout as the core crate's `test_support::jpeg_with_datetime`:
// SOI + APP1 Exif with a single IFD0 DateTime entry + EOI.
fn write_jpeg(path: &Path, stamp: &str) {
    let mut value = stamp.as_bytes().to_vec();
    value.push(0);

    // TIFF header, entry count, one IFD entry, next-IFD offset
    let value_offset: u32 = 8 + 2 + 12 + 4;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0132u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&value_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&value);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((8 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    fs::write(path, jpeg).expect("write jpeg fixture");
}

struct Sandbox {
    photos: TempDir,
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            photos: tempdir().expect("tempdir"),
            home: tempdir().expect("tempdir"),
        }
    }

    fn root(&self) -> &Path {
        self.photos.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_jpg-datename-cli"));
        cmd.env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }
}

#[test]
fn renames_by_exif_datetime() {
    let sandbox = Sandbox::new();
    write_jpeg(&sandbox.root().join("IMG_0001.JPG"), STAMP);

    sandbox
        .cmd()
        .arg("rename")
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert!(sandbox.root().join(TARGET).exists());
    assert!(!sandbox.root().join("IMG_0001.JPG").exists());
}

#[test]
fn clean_runs_print_nothing() {
    let sandbox = Sandbox::new();
    write_jpeg(&sandbox.root().join("a.jpg"), STAMP);
    fs::write(sandbox.root().join("blank.jpg"), [0xFF, 0xD8, 0xFF, 0xD9]).expect("write");

    sandbox
        .cmd()
        .args(["rename", "-q"])
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    sandbox
        .cmd()
        .args(["rename", "-q"])
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert!(sandbox.root().join(TARGET).exists());
    assert!(sandbox.root().join("blank.jpg").exists());
}

#[test]
fn verbose_run_ends_with_summary() {
    let sandbox = Sandbox::new();
    write_jpeg(&sandbox.root().join("a.jpg"), STAMP);

    sandbox
        .cmd()
        .args(["rename", "-v"])
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::contains(" --> "))
        .stderr(predicate::str::contains("renamed 1, skipped 0, failed 0"));
}

#[test]
fn complains_about_missing_metadata_unless_quiet() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.root().join("blank.jpg"), [0xFF, 0xD8, 0xFF, 0xD9]).expect("write");

    sandbox
        .cmd()
        .arg("rename")
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Can't retrieve DateTime from").and(
            predicate::str::contains("blank.jpg"),
        ));

    sandbox
        .cmd()
        .args(["rename", "-q"])
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(sandbox.root().join("blank.jpg").exists());
}

#[test]
fn dry_run_with_verbose_prints_pair_only() {
    let sandbox = Sandbox::new();
    write_jpeg(&sandbox.root().join("keep.jpg"), STAMP);

    sandbox
        .cmd()
        .args(["rename", "-n", "-v"])
        .arg(sandbox.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("keep.jpg --> ").and(predicate::str::contains(TARGET)))
        .stderr(predicate::str::contains("dry-run"));

    assert!(sandbox.root().join("keep.jpg").exists());
    assert!(!sandbox.root().join(TARGET).exists());
}

#[test]
fn recursive_flag_descends_and_suffixes_collisions() {
    let sandbox = Sandbox::new();
    let nested = sandbox.root().join("trip");
    fs::create_dir_all(&nested).expect("mkdir");
    write_jpeg(&nested.join("a.jpg"), STAMP);
    write_jpeg(&nested.join("b.jpg"), STAMP);

    sandbox
        .cmd()
        .args(["rename", "-r"])
        .arg(sandbox.root())
        .assert()
        .success();

    assert!(nested.join(TARGET).exists());
    assert!(nested.join("2015-03-18_12-58-21_Wednesday_2.jpg").exists());
}

#[test]
fn json_output_is_a_report() {
    let sandbox = Sandbox::new();
    write_jpeg(&sandbox.root().join("x.jpg"), STAMP);

    let output = sandbox
        .cmd()
        .args(["rename", "--output", "json", "--dry-run"])
        .arg(sandbox.root())
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is json");
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["summary"]["suppressed"], 1);
    assert_eq!(report["outcomes"][0]["outcome"], "suppressed");
}

#[test]
fn missing_directory_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("rename")
        .arg(sandbox.root().join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory does not exist"));
}
