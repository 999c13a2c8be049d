//! End-to-end tests for the `suds` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// A `suds` command running inside the given directory.
fn suds(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("suds").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn version_prints_version() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("suds "));
}

#[test]
fn commands_fail_without_init() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path())
        .args(["oil", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suds init"));
}

#[test]
fn init_creates_and_seeds_database() {
    let dir = tempfile::tempdir().unwrap();

    suds(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized suds data"));

    assert!(dir.path().join(".suds/suds.db").exists());

    // The stock catalog is seeded.
    suds(dir.path())
        .args(["oil", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Olive Oil"));
}

#[test]
fn init_is_idempotent_and_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["oil", "add", "Tallow", "--id", "tallow", "--sap-naoh", "0.140", "--sap-koh", "0.197"])
        .assert()
        .success();

    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["oil", "show", "tallow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tallow"));
}

#[test]
fn full_formulation_flow() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["recipe", "new", "Castile", "--id", "castile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recipe: castile"));

    suds(dir.path())
        .args(["recipe", "add-oil", "castile", "olive", "100"])
        .assert()
        .success();

    // Defaults: 500 g fat, 5% superfat, 33% water, NaOH.
    // 500 * 0.134 * 0.95 = 63.65 g NaOH; 500 * 0.33 = 165 g water.
    suds(dir.path())
        .args(["calc", "castile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("63.65"))
        .stdout(predicate::str::contains("165.00"));
}

#[test]
fn calc_json_output_reports_validity() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();
    suds(dir.path())
        .args(["recipe", "new", "Castile", "--id", "castile"])
        .assert()
        .success();
    suds(dir.path())
        .args(["recipe", "add-oil", "castile", "olive", "100"])
        .assert()
        .success();

    suds(dir.path())
        .args(["--json", "calc", "castile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isValid\": true"))
        .stdout(predicate::str::contains("\"naoh\": 63.65"));
}

#[test]
fn calc_surfaces_warnings_but_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();
    suds(dir.path())
        .args(["recipe", "new", "Short", "--id", "short"])
        .assert()
        .success();
    suds(dir.path())
        .args(["recipe", "add-oil", "short", "olive", "90"])
        .assert()
        .success();

    suds(dir.path())
        .args(["calc", "short"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sum of oils is 90.0% (should be 100%)."));
}

#[test]
fn calc_unknown_recipe_fails() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["calc", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn add_oil_rejects_unknown_catalog_oil() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();
    suds(dir.path())
        .args(["recipe", "new", "Test", "--id", "test"])
        .assert()
        .success();

    suds(dir.path())
        .args(["recipe", "add-oil", "test", "unobtainium", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in the catalog"));
}

#[test]
fn export_and_import_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();
    suds(dir.path())
        .args(["recipe", "new", "Castile", "--id", "castile"])
        .assert()
        .success();

    let backup = dir.path().join("backup.json");
    suds(dir.path())
        .args(["export", "backup", "-o"])
        .arg(&backup)
        .assert()
        .success();
    assert!(backup.exists());

    // Wipe the recipe, then restore it from the backup.
    suds(dir.path())
        .args(["recipe", "remove", "castile"])
        .assert()
        .success();
    suds(dir.path())
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported backup"));

    suds(dir.path())
        .args(["recipe", "show", "castile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Castile"));
}

#[test]
fn invalid_oil_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["oil", "add", "Bad Oil", "--sap-naoh=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be negative"));
}

#[test]
fn sync_key_is_generated_once_and_reprinted() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    let first = suds(dir.path()).args(["sync", "key"]).assert().success();
    let first_key = String::from_utf8(first.get_output().stdout.clone()).unwrap();
    assert!(first_key.trim().contains('-'));

    let second = suds(dir.path()).args(["sync", "key"]).assert().success();
    let second_key = String::from_utf8(second.get_output().stdout.clone()).unwrap();
    assert_eq!(first_key.trim(), second_key.trim());
}

#[test]
fn sync_push_without_key_hints_at_key_command() {
    let dir = tempfile::tempdir().unwrap();
    suds(dir.path()).arg("init").assert().success();

    suds(dir.path())
        .args(["sync", "push", "--remote", "http://127.0.0.1:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suds sync key"));
}
