use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn sample_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/game.yaml")
}

#[test]
fn validate_only_checks_the_sample_run() {
    Command::cargo_bin("yard")
        .expect("binary built")
        .arg("--config")
        .arg(sample_config())
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded configuration 'sample'"))
        .stdout(predicate::str::contains("20 stations"))
        .stdout(predicate::str::contains("Validation-only mode"));
}

#[test]
fn overrides_apply_before_validation() {
    Command::cargo_bin("yard")
        .expect("binary built")
        .arg("--config")
        .arg(sample_config())
        .args(["--run-id", "bad id", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run_id"));
}

#[test]
fn missing_config_fails() {
    Command::cargo_bin("yard")
        .expect("binary built")
        .args(["--config", "does/not/exist.yaml", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}
