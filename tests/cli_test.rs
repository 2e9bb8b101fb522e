//! Integration tests for the teardownm binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn teardownm(root: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("teardownm"));
    cmd.current_dir(root.path());
    cmd.env_remove("TEARDOWNM_ROOT");
    cmd.env_remove("TEARDOWNM_PROMPT_ALTERNATE_PATH");
    cmd.env_remove("TEARDOWNM_PROMPT_TEARDOWN_PATH");
    cmd
}

fn setup_root(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".teardownm");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yml"), config).unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sledge"))
        .stdout(predicate::str::contains("check"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_unknown_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp).arg("install").assert().failure();
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("teardownm"));
    Ok(())
}

#[test]
fn cli_missing_root_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .args(["check", "--non-interactive", "--root"])
        .arg(temp.path().join("missing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a directory"));
    Ok(())
}

#[test]
fn cli_malformed_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_root("sledge: [unclosed\n");
    teardownm(&temp)
        .args(["check", "--non-interactive"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_unknown_config_field_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_root("sledgee:\n  instances: [a]\n");
    teardownm(&temp)
        .args(["run", "--non-interactive"])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn cli_invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_root("sledge:\n  instances: [sledge1, sledge1]\n");
    teardownm(&temp)
        .args(["run", "--non-interactive"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("listed twice"));
    Ok(())
}

#[test]
fn cli_explicit_config_must_exist() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .args(["check", "--non-interactive", "--config", "nope.yml"])
        .assert()
        .code(2);
    Ok(())
}

// Off Windows the registry checks always fail, so the gate is closed.
#[cfg(not(windows))]
#[test]
fn cli_run_without_prerequisites_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .args(["run", "--non-interactive"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("teardownM"))
        .stderr(predicate::str::contains("OpenSSL could not be found."))
        .stderr(predicate::str::contains(
            "Please ensure you have all the pre-requisites before continuing",
        ));

    assert!(!temp.path().join("sledge").exists());
    assert!(!temp.path().join("teardownM-client").exists());
    Ok(())
}

#[cfg(not(windows))]
#[test]
fn cli_default_command_is_run() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Steam could not be found"));

    assert!(!temp.path().join("sledge").exists());
    Ok(())
}

#[cfg(not(windows))]
#[test]
fn cli_check_reports_every_prerequisite() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    teardownm(&temp)
        .args(["check", "--non-interactive"])
        .env("TEARDOWNM_PROMPT_ALTERNATE_PATH", "No")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Steam could not be found"))
        .stderr(predicate::str::contains("Teardown could not be found."));
    Ok(())
}

#[cfg(not(windows))]
#[test]
fn cli_root_flag_is_honoured() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = TempDir::new()?;
    let root = setup_root("sledge:\n  instances: [sledge1, sledge1]\n");
    teardownm(&cwd)
        .args(["check", "--non-interactive", "--root"])
        .arg(root.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("listed twice"));
    Ok(())
}
