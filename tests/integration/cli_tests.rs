//! Integration tests for the CLI binary.
//!
//! This test is registered as a [[test]] in the keytrust-cli crate so that
//! CARGO_BIN_EXE_ktr is available. Every test runs against its own
//! temporary KEYTRUST_HOME.

use std::process::{Command, Output, Stdio};

/// Get a Command pointing to the `ktr` binary, rooted at `home`.
fn ktr(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ktr"));
    cmd.env("KEYTRUST_HOME", home).stdin(Stdio::null());
    cmd
}

fn run(home: &std::path::Path, args: &[&str]) -> Output {
    ktr(home)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute ktr {args:?}: {e}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn cli_responds_to_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--help"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(
        out.contains("ktr") || out.contains("Usage"),
        "help output should contain usage information, got: {out}"
    );
}

#[test]
fn cli_responds_to_version() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--version"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("0.1"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--nonexistent-flag"]);
    assert!(!output.status.success());
}

#[test]
fn cli_builds_recipients_in_batch_mode() {
    let home = tempfile::tempdir().unwrap();

    let keygen = run(home.path(), &["keygen", "--user-id", "Alice <alice@example.org>"]);
    assert!(keygen.status.success(), "stderr: {}", stderr(&keygen));
    let keygen = run(home.path(), &["keygen", "--user-id", "Dave <dave@example.org>"]);
    assert!(keygen.status.success(), "stderr: {}", stderr(&keygen));

    let set = run(home.path(), &["trust", "set", "alice", "fully"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));
    let set = run(home.path(), &["trust", "set", "dave", "never"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    let output = run(
        home.path(),
        &["recipients", "--batch", "alice", "dave", "bob"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("1 recipient(s)"), "got: {out}");
    assert!(out.contains("Alice <alice@example.org>"));
    assert!(!out.contains("Dave"));
    assert!(stderr(&output).contains("skipped 'bob'"));
}

#[test]
fn cli_reports_no_valid_addressees() {
    let home = tempfile::tempdir().unwrap();
    let keygen = run(home.path(), &["keygen", "--user-id", "Carol <carol@example.org>"]);
    assert!(keygen.status.success(), "stderr: {}", stderr(&keygen));

    // First use registers carol as undefined, which batch mode rejects.
    let output = run(home.path(), &["recipients", "--batch", "carol"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no valid addressees"));

    let show = run(home.path(), &["trust", "show", "carol"]);
    assert!(show.status.success(), "stderr: {}", stderr(&show));
    assert!(stdout(&show).contains("Trust: undefined"));
}

#[test]
fn cli_recipients_without_names_is_not_implemented() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["recipients", "--batch"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not yet implemented"));
}

#[test]
fn cli_export_import_round_trip() {
    let home = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();

    let keygen = run(home.path(), &["keygen", "--user-id", "Erin <erin@example.org>"]);
    assert!(keygen.status.success(), "stderr: {}", stderr(&keygen));
    let export = run(home.path(), &["export", "erin"]);
    assert!(export.status.success(), "stderr: {}", stderr(&export));

    let file = other.path().join("erin.json");
    std::fs::write(&file, &export.stdout).unwrap();
    let import = run(other.path(), &["import", file.to_str().unwrap()]);
    assert!(import.status.success(), "stderr: {}", stderr(&import));

    let list = run(other.path(), &["list"]);
    assert!(stdout(&list).contains("Erin <erin@example.org> [unknown]"));
}

#[test]
fn cli_closed_terminal_during_dialog_exits_with_status_2() {
    let home = tempfile::tempdir().unwrap();
    let keygen = run(home.path(), &["keygen", "--user-id", "Gina <gina@example.org>"]);
    assert!(keygen.status.success(), "stderr: {}", stderr(&keygen));
    let set = run(home.path(), &["trust", "set", "gina", "undefined"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    // stdin is closed, so the ownertrust prompt hits end of input at once.
    let output = run(home.path(), &["recipients", "gina"]);
    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("No ownertrust specified"));
    assert!(stderr(&output).contains("terminal input closed"));
}

#[test]
fn cli_keygen_rejects_oversized_expiry() {
    let home = tempfile::tempdir().unwrap();
    let output = run(
        home.path(),
        &["keygen", "--user-id", "Hal <hal@example.org>", "--expires", "999999999999d"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("duration too large"));
}
