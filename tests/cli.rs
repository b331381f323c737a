#![cfg(unix)]

mod common;

use anyhow::Result;
use common::TestTree;
use predicates::prelude::*;

#[test]
fn test_record_check_update_remove_cycle() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("notes/a.txt", "a")?;
    tree.write("notes/b.txt", "b")?;
    let root = tree.root();

    tree.cmd()?
        .arg("record")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded").and(predicate::str::contains("(2 files)")));

    tree.cmd()?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1) ").and(predicate::str::contains(root.to_string_lossy().as_ref())));

    tree.write("notes/c.txt", "c")?;
    tree.rename("notes/a.txt", "archive/a.txt")?;

    tree.cmd()?
        .args(["check", "1", "--no-update"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--- Added ---")
                .and(predicate::str::contains("../notes/c.txt"))
                .and(predicate::str::contains("--- Moved ---"))
                .and(predicate::str::contains("../notes/a.txt => ../archive"))
                .and(predicate::str::contains("Updated baseline").not()),
        );

    tree.cmd()?
        .args(["check", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline:"));

    tree.cmd()?
        .args(["check", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes since"));

    tree.cmd()?
        .args(["remove", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    tree.cmd()?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No directory is recorded"));
    Ok(())
}

#[test]
fn test_check_short_form() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("old.txt", "o")?;
    tree.cmd()?.arg("record").arg(tree.root()).assert().success();

    tree.rename("old.txt", "new.txt")?;

    tree.cmd()?
        .args(["check", "1", "--short", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R ../old.txt => new.txt"));
    Ok(())
}

#[test]
fn test_check_asks_before_updating() -> Result<()> {
    let tree = TestTree::new()?;
    tree.cmd()?.arg("record").arg(tree.root()).assert().success();
    tree.write("fresh.txt", "f")?;

    tree.cmd()?
        .arg("check")
        .arg(tree.root())
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Update baseline? [y/N]: ")
                .and(predicate::str::contains("Updated baseline:")),
        );

    tree.cmd()?
        .args(["check", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes since"));
    Ok(())
}

#[test]
fn test_closed_stdin_keeps_baseline() -> Result<()> {
    let tree = TestTree::new()?;
    tree.cmd()?.arg("record").arg(tree.root()).assert().success();
    tree.write("fresh.txt", "f")?;

    tree.cmd()?
        .args(["check", "1"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated baseline").not());

    tree.cmd()?
        .args(["check", "1", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("../fresh.txt"));
    Ok(())
}

#[test]
fn test_record_missing_directory_fails() -> Result<()> {
    let tree = TestTree::new()?;

    tree.cmd()?
        .arg("record")
        .arg(tree.path("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    tree.cmd()?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No directory is recorded"));
    Ok(())
}

#[test]
fn test_unknown_baseline_number_fails() -> Result<()> {
    let tree = TestTree::new()?;
    tree.cmd()?.arg("record").arg(tree.root()).assert().success();

    tree.cmd()?
        .args(["check", "7", "-n"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No baseline number 7"));
    Ok(())
}

#[test]
fn test_config_set_get_and_list() -> Result<()> {
    let tree = TestTree::new()?;

    tree.cmd()?
        .args(["config", "output.relative_paths", "false"])
        .assert()
        .success();

    tree.cmd()?
        .args(["config", "output.relative_paths"])
        .assert()
        .success()
        .stdout("false\n");

    tree.cmd()?
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[tracking]").and(predicate::str::contains("follow_symlinks = false")));

    tree.cmd()?
        .args(["config", "core.compression_level", "0"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_absolute_paths_when_configured() -> Result<()> {
    let tree = TestTree::new()?;
    tree.cmd()?
        .args(["config", "output.relative_paths", "false"])
        .assert()
        .success();
    tree.cmd()?.arg("record").arg(tree.root()).assert().success();
    tree.write("abs.txt", "a")?;

    let expected = tree.path("abs.txt");
    tree.cmd()?
        .args(["check", "1", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().as_ref()));
    Ok(())
}

#[test]
fn test_menu_records_and_quits() -> Result<()> {
    let tree = TestTree::new()?;
    tree.write("m.txt", "m")?;
    let input = format!("1\n{}\n4\n", tree.root().display());

    tree.cmd()?
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracker").and(predicate::str::contains("Recorded")));

    tree.cmd()?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1) "));
    Ok(())
}

#[test]
fn test_completion_script() -> Result<()> {
    let tree = TestTree::new()?;

    tree.cmd()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("track"));
    Ok(())
}

#[test]
fn test_tilde_in_store_env_resolves_against_home() -> Result<()> {
    let tree = TestTree::new()?;

    tree.cmd()?
        .env("DIRTRACK_STORE_PATH", "~/tilde-store")
        .arg("record")
        .arg(tree.root())
        .assert()
        .success();

    let store = tree.temp_dir.path().join("tilde-store");
    assert!(store.join("registry.bin").exists());
    assert!(!std::path::Path::new("~/tilde-store").exists());
    Ok(())
}
