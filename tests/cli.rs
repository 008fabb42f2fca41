/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

use assert_cmd::Command;
use predicates::prelude::*;

/// A taab command with config isolated to a fresh temp dir.
fn taab(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("taab").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

#[test]
fn dry_run_prints_the_url() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "g;hello world"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://google.com/search?q=hello%20world",
        ));
}

#[test]
fn reddit_grammar_end_to_end() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "r;aww;top;week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://reddit.com/r/aww/top?t=week"));
}

#[test]
fn first_run_seeds_a_default_config() {
    let home = tempfile::tempdir().unwrap();
    taab(&home).args(["--dry-run", "r"]).assert().success();

    let config_path = home.path().join("taab").join("config.json");
    assert!(config_path.exists());
    let contents = std::fs::read_to_string(config_path).unwrap();
    assert!(contents.contains("\"defaultCommand\": \"g\""));
}

#[test]
fn set_persists_across_invocations() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "set;bgColor;#282828"])
        .assert()
        .success();

    let contents =
        std::fs::read_to_string(home.path().join("taab").join("config.json")).unwrap();
    assert!(contents.contains("\"bgColor\": \"#282828\""));
}

#[test]
fn invalid_setting_reports_an_error() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "set;bgColor;#ZZZ"])
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid hex value"));
}

#[test]
fn shortcut_add_and_resolve_round_trip() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "link;myshort;example.com;/search?q="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Link myshort saved"));

    taab(&home)
        .args(["--dry-run", "myshort;foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.com/search?q=foo"));
}

#[test]
fn builtin_collision_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .args(["--dry-run", "link;g;example.com"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cannot override builtin command"));
}

#[test]
fn no_input_prints_help() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    // Flags alone leave nothing to interpret either.
    taab(&home)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn bindings_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    taab(&home)
        .arg("bindings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Google search"));
}
