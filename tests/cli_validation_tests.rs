//! Binary-level CLI validation: argument mistakes must abort before any
//! repository is touched.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn repo_fleet() -> (TempDir, Command) {
    // run from an empty directory so no fleet.toml is picked up
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("repo-fleet").unwrap();
    cmd.current_dir(dir.path());
    (dir, cmd)
}

#[test]
fn commit_without_message_aborts_before_touching_repositories() {
    let (_dir, mut cmd) = repo_fleet();
    cmd.args(["ops", "--commit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--message"));
}

#[test]
fn remote_add_without_url_aborts() {
    let (_dir, mut cmd) = repo_fleet();
    cmd.args(["ops", "--remote-op", "add", "--remote-name", "mirror"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--remote-url"));
}

#[test]
fn bare_invocation_prints_usage() {
    let (_dir, mut cmd) = repo_fleet();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("repo-fleet sync"));
}

#[test]
fn ops_with_no_steps_is_a_no_op() {
    let (_dir, mut cmd) = repo_fleet();
    cmd.arg("ops")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to do"));
}

#[test]
fn sync_without_configuration_fails_with_guidance() {
    let (_dir, mut cmd) = repo_fleet();
    cmd.arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fleet.toml"));
}
