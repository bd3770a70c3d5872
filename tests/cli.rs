#![allow(deprecated)] // cargo_bin deprecation - still works fine

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("textcat").expect("binary should exist")
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n").unwrap();
    fs::write(dir.path().join("notes.md"), "# notes\n").unwrap();
    fs::write(dir.path().join("blob.dat"), [b'a', 0, b'b']).unwrap();
    fs::create_dir(dir.path().join("vendor")).unwrap();
    fs::write(dir.path().join("vendor/dep.go"), "package dep\n").unwrap();
    dir
}

#[test]
fn cli_writes_filtered_report() {
    let src = fixture();
    let out = TempDir::new().unwrap();
    let report = out.path().join("report.txt");

    cmd()
        .arg("-d")
        .arg(src.path())
        .arg("-o")
        .arg(&report)
        .args(["--ie", ".go,.MD", "--ed", "vendor"])
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("File Content Extraction Report\n"));
    assert!(text.contains("package main"));
    assert!(text.contains("# notes"));
    assert!(!text.contains("dep.go"));
    assert!(text.contains("Files processed: 2\n"));
}

#[test]
fn cli_missing_directory_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg("--dir")
        .arg(out.path().join("nope"))
        .arg("--output")
        .arg(out.path().join("report.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn cli_summary_json() {
    let src = fixture();
    let out = TempDir::new().unwrap();
    cmd()
        .arg("-d")
        .arg(src.path())
        .arg("-o")
        .arg(out.path().join("report.txt"))
        .args(["--exclude-ext", ".md", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files_processed\": 2"));
}

#[test]
fn cli_verbose_logs_skips() {
    let src = fixture();
    let out = TempDir::new().unwrap();
    cmd()
        .env_remove("RUST_LOG")
        .arg("-d")
        .arg(src.path())
        .arg("-o")
        .arg(out.path().join("report.txt"))
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping binary file"))
        .stderr(predicate::str::contains("Processed:"));
}

#[test]
fn cli_config_file_with_flag_override() {
    let src = fixture();
    let out = TempDir::new().unwrap();
    let report = out.path().join("report.txt");
    let config = out.path().join("textcat.json");
    fs::write(
        &config,
        format!(
            r#"{{ "root": {:?}, "output": {:?}, "include_extensions": [".go"] }}"#,
            src.path().display().to_string(),
            report.display().to_string()
        ),
    )
    .unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["--exclude-dir", "VENDOR"])
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("Files processed: 1\n"));
    assert!(!text.contains("notes.md"));
}

#[test]
fn cli_rejects_unknown_binary_detection() {
    cmd()
        .args(["--binary-detection", "fuzzy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid binary detection method"));
}
