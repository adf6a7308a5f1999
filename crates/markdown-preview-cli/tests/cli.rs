use std::fs;
use std::path::PathBuf;

use markdown_preview::ExitCode;
use predicates::prelude::*;
use tempfile::tempdir;

fn cargo_bin() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("mdp").unwrap()
}

fn printed_path(stdout: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(stdout).trim())
}

#[test]
fn missing_file_flag_prints_usage() {
    cargo_bin()
        .assert()
        .failure()
        .code(ExitCode::Usage as i32)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_input_fails() {
    let dir = tempdir().unwrap();

    cargo_bin()
        .arg("-file")
        .arg(dir.path().join("absent.md"))
        .arg("-s")
        .assert()
        .failure()
        .code(ExitCode::Input as i32)
        .stderr(predicate::str::contains("absent.md"));
}

#[test]
fn skip_preview_prints_path_and_keeps_file() {
    let dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello\n\n<script>alert(1)</script>\n").unwrap();

    let output = cargo_bin()
        .env("TMPDIR", out_dir.path())
        .arg("-s")
        .arg("-file")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let html_path = printed_path(&output.stdout);
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"), "{html}");
    assert!(html.contains("<title>Markdown Preview Tool</title>"));
    assert!(html.contains("<h1>Hello</h1>"));
    assert!(!html.contains("<script"));

    fs::remove_file(html_path).unwrap();
}

#[test]
fn long_flags_are_accepted() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "text").unwrap();

    let output = cargo_bin()
        .arg("--skip-preview")
        .arg(format!("--file={}", input.display()))
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let html_path = printed_path(&output.stdout);
    assert!(html_path.exists());
    fs::remove_file(html_path).unwrap();
}

#[cfg(target_os = "linux")]
#[test]
fn output_is_removed_when_viewer_is_missing() {
    let dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let empty_bin = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Hello").unwrap();

    cargo_bin()
        .env("TMPDIR", out_dir.path())
        .env("PATH", empty_bin.path())
        .arg("-file")
        .arg(&input)
        .assert()
        .failure()
        .code(ExitCode::Viewer as i32)
        .stderr(predicate::str::contains("xdg-open"));

    assert_eq!(fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
