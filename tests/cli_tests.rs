//! CLI integration tests using the REAL preflight binary

mod common;

use predicates::prelude::*;

#[test]
fn test_help_output() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("preload"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_output() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("preflight"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("Defaults:\n  Config file: ./preflight.yaml\n"));
}

#[test]
fn test_missing_subcommand_fails() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path).assert().failure();
}

#[test]
fn test_completions_bash() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preflight"));
}

#[test]
fn test_completions_unknown_shell() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell 'tcsh'"));
}

#[test]
fn test_explicit_config_must_exist() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .args(["--config", "missing.yaml", "preload"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_config_from_env_must_exist() {
    let project = common::TestProject::new();
    common::preflight_cmd(&project.path)
        .env("PREFLIGHT_CONFIG", project.path.join("absent.yaml"))
        .arg("health")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_malformed_config_file() {
    let project = common::TestProject::new();
    project.write_file("preflight.yaml", "preload: [unclosed\n");
    common::preflight_cmd(&project.path)
        .args(["preload", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let project = common::TestProject::new();
    project.write_file("app/A.php", "<?php");
    common::preflight_cmd(&project.path)
        .args(["-v", "preload", "--project-root", ".", "--root", "app", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Preload file (dry run): "))
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("generating preload manifest"));
}
