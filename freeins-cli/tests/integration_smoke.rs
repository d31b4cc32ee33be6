//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn freeins() -> Command {
    let mut cmd = Command::cargo_bin("freeins").unwrap();
    cmd.env_remove("DATABASE_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_serve_help() {
    freeins()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--jwt-secret"))
        .stdout(predicate::str::contains("--locales"));
}

#[test]
fn test_user_create_help() {
    freeins()
        .arg("user")
        .arg("create")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Login email"));
}

#[test]
fn test_user_list_requires_database() {
    freeins()
        .arg("user")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_unknown_command_fails() {
    freeins().arg("frobnicate").assert().failure();
}
