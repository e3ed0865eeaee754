//! Integration tests for the tale CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write a small two-room story into a temp directory.
fn test_story() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.json");
    fs::write(
        &path,
        r#"{
    "title": "The Cellar",
    "rooms": [
        {
            "id": "hall",
            "name": "Hall",
            "description": "A draughty hall.",
            "exits": { "north": "cellar" },
            "objects": [
                { "id": "box", "name": "Box", "objects": [{ "id": "key", "name": "Key" }] }
            ]
        },
        {
            "id": "cellar",
            "name": "Cellar",
            "exits": { "south": "hall" },
            "objects": [{ "id": "barrel", "name": "Barrel" }]
        }
    ],
    "messages": [{ "names": ["xyzzy"], "text": "Nothing happens." }]
}
"#,
    )
    .unwrap();
    (dir, path)
}

fn tale() -> Command {
    Command::cargo_bin("tale").unwrap()
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_runs_commands_from_stdin() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--no-color"])
        .write_stdin("take key\ninventory\nxyzzy\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Cellar")
                .and(predicate::str::contains("You take Key."))
                .and(predicate::str::contains("You are carrying Key."))
                .and(predicate::str::contains("Nothing happens.")),
        );
}

#[test]
fn play_prints_fallback_for_unknown_input() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--no-color"])
        .write_stdin("dance wildly\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What do you mean?"));
}

#[test]
fn play_stops_on_quit() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--no-color"])
        .write_stdin("quit\ntake key\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Goodbye!")
                .and(predicate::str::contains("You take Key.").not()),
        );
}

#[test]
fn play_location_scope_hides_other_rooms() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--no-color", "--scope", "location"])
        .write_stdin("take barrel\nnorth\ntake barrel\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("What do you mean?")
                .and(predicate::str::contains("You take Barrel.")),
        );
}

#[test]
fn play_accepts_room_as_scope_alias() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--no-color", "--scope", "room"])
        .write_stdin("take barrel\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What do you mean?"));
}

#[test]
fn play_rejects_unknown_scope() {
    let (_dir, path) = test_story();
    tale()
        .args(["play", arg(&path), "--scope", "world"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scope 'world'"));
}

#[test]
fn play_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    tale()
        .args(["play", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_reports_counts() {
    let (_dir, path) = test_story();
    tale()
        .args(["check", arg(&path)])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Cellar")
                .and(predicate::str::contains("2 rooms"))
                .and(predicate::str::contains("3 objects")),
        );
}

#[test]
fn check_fails_on_unknown_exit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{ "rooms": [{ "id": "a", "name": "A", "exits": { "east": "nowhere" } }] }"#,
    )
    .unwrap();

    tale()
        .args(["check", arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn check_fails_on_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    tale().args(["check", arg(&path)]).assert().failure();
}

// ---------------------------------------------------------------------------
// objects
// ---------------------------------------------------------------------------

#[test]
fn objects_lists_owners_in_order() {
    let (_dir, path) = test_story();
    let output = tale().args(["objects", arg(&path)]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let box_at = stdout.find("Box").unwrap();
    let key_at = stdout.find("Key").unwrap();
    let barrel_at = stdout.find("Barrel").unwrap();
    assert!(box_at < key_at && key_at < barrel_at);
    assert!(stdout.contains("cellar"));
    assert!(stdout.contains("3 objects"));
}

#[test]
fn objects_empty_story() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, r#"{ "rooms": [{ "id": "a", "name": "A" }] }"#).unwrap();

    tale()
        .args(["objects", arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("No objects found."));
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

#[test]
fn verbose_logs_to_stderr() {
    let (_dir, path) = test_story();
    tale()
        .args(["-v", "check", arg(&path)])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("story built"));
}
