//! CLI-level tests driving the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bundler() -> Command {
    Command::cargo_bin("srassets_bundler").unwrap()
}

#[test]
fn missing_model_path_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    bundler()
        .args([
            "--model-path",
            dir.path().join("no-such-tree").to_str().unwrap(),
            "--models",
            "mn6_cn",
            "--output",
            dir.path().join("assets.bin").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn invalid_threshold_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    bundler()
        .args([
            "--model-path",
            dir.path().to_str().unwrap(),
            "--models",
            "mn6_cn",
            "--output",
            dir.path().join("assets.bin").to_str().unwrap(),
            "--threshold",
            "2.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn successful_build_reports_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let model_dir = dir.path().join("multinet_model").join("mn6_cn");
    fs::create_dir_all(&model_dir).unwrap();
    fs::write(model_dir.join("model.bin"), b"weights").unwrap();

    let out = dir.path().join("dist").join("assets.bin");
    bundler()
        .args([
            "--model-path",
            dir.path().to_str().unwrap(),
            "--models",
            "mn6_cn",
            "--output",
            out.to_str().unwrap(),
            "--cn-wake-word",
            "\u{4f60}\u{597d}",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("assets bundle:"));

    assert!(out.exists());
}

#[test]
fn help_mentions_exit_code_contract() {
    bundler()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit code 0"));
}
