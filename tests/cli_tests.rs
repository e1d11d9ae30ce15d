use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

struct TestDb {
    dir: TempDir,
}

impl TestDb {
    fn new() -> Self {
        TestDb { dir: TempDir::new().unwrap() }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("task-cli").unwrap();
        cmd.env("TASKS_DB", self.path()).env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.cmd().args(args).assert()
    }
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_no_command_prints_usage_and_fails() {
    let db = TestDb::new();
    db.run(&[])
        .code(1)
        .stdout(predicate::str::contains("Usage: task-cli [command]"))
        .stdout(predicate::str::contains("mark-in-progress"));
}

#[test]
fn test_unknown_command_fails_with_usage() {
    let db = TestDb::new();
    db.run(&["frobnicate"])
        .code(1)
        .stdout(predicate::str::contains("Unknown command 'frobnicate'"))
        .stdout(predicate::str::contains("Available commands:"));
}

#[test]
fn test_help_succeeds() {
    let db = TestDb::new();
    db.run(&["--help"]).success().stdout(predicate::str::contains("mark-done"));
}

#[test]
fn test_add_reports_id_and_writes_file() {
    let db = TestDb::new();
    db.run(&["add", "Buy groceries"])
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));
    db.run(&["add", "Cook dinner"])
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 2)"));

    let json = read_json(&db.path());
    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["description"], "Buy groceries");
    assert_eq!(json[0]["status"], "todo");
    assert!(json[0]["createdAt"].is_string());
    assert!(json[0]["updatedAt"].is_string());
    assert_eq!(json[1]["id"], 2);
}

#[test]
fn test_add_validation_errors() {
    let db = TestDb::new();
    db.run(&["add"]).code(1);
    db.run(&["add", "  "])
        .code(1)
        .stderr(predicate::str::contains("Description cannot be empty."));
    assert!(!db.path().exists());
}

#[test]
fn test_descriptions_may_start_with_a_hyphen() {
    let db = TestDb::new();
    db.run(&["add", "-call mom"])
        .success()
        .stdout(predicate::str::contains("Task added successfully (ID: 1)"));
    assert_eq!(read_json(&db.path())[0]["description"], "-call mom");

    db.run(&["update", "1", "-call dad"])
        .success()
        .stdout(predicate::str::contains("Task 1 updated successfully."));
    assert_eq!(read_json(&db.path())[0]["description"], "-call dad");
}

#[test]
fn test_update_and_errors() {
    let db = TestDb::new();
    db.run(&["add", "old"]).success();
    db.run(&["update", "1", "new"])
        .success()
        .stdout(predicate::str::contains("Task 1 updated successfully."));
    assert_eq!(read_json(&db.path())[0]["description"], "new");

    db.run(&["update", "1"]).code(1);
    db.run(&["update", "abc", "x"])
        .code(1)
        .stderr(predicate::str::contains("Invalid task ID"));
    db.run(&["update", "1", ""])
        .code(1)
        .stderr(predicate::str::contains("Description cannot be empty."));
    db.run(&["update", "5", "x"])
        .code(1)
        .stderr(predicate::str::contains("Task with ID 5 not found."));
}

#[test]
fn test_delete_and_errors() {
    let db = TestDb::new();
    db.run(&["add", "a"]).success();
    db.run(&["add", "b"]).success();
    db.run(&["delete", "1"])
        .success()
        .stdout(predicate::str::contains("Task 1 deleted successfully."));
    db.run(&["delete", "1"])
        .code(1)
        .stderr(predicate::str::contains("not found"));
    db.run(&["delete", "x"]).code(1);
    db.run(&["delete"]).code(1);

    let json = read_json(&db.path());
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], 2);
}

#[test]
fn test_mark_commands() {
    let db = TestDb::new();
    db.run(&["add", "task"]).success();
    db.run(&["mark-in-progress", "1"])
        .success()
        .stdout(predicate::str::contains("Task 1 marked as in-progress."));
    db.run(&["mark-in-progress", "1"])
        .success()
        .stdout(predicate::str::contains("Task 1 is already in-progress."));
    db.run(&["mark-todo", "1"])
        .success()
        .stdout(predicate::str::contains("Task 1 marked as todo."));
    db.run(&["mark-done", "7"])
        .code(1)
        .stderr(predicate::str::contains("Task with ID 7 not found."));
    db.run(&["mark-done", "zero"]).code(1);
}

#[test]
fn test_list_filters_and_formats() {
    let db = TestDb::new();
    db.run(&["list"]).success().stdout(predicate::str::contains("No tasks found."));

    db.run(&["add", "alpha"]).success();
    db.run(&["add", "beta"]).success();
    db.run(&["mark-done", "2"]).success();

    db.run(&["list"])
        .success()
        .stdout(predicate::str::contains("Task 1:\n  Description: alpha\n  Status: todo\n  Created: "))
        .stdout(predicate::str::contains("Task 2:"));
    db.run(&["list", "done"])
        .success()
        .stdout(predicate::str::contains("beta"))
        .stdout(predicate::str::contains("alpha").not());
    db.run(&["list", "in-progress"])
        .success()
        .stdout(predicate::str::contains("No tasks found."));
    db.run(&["list", "todo", "--table"])
        .success()
        .stdout(predicate::str::contains("Description"))
        .stdout(predicate::str::contains("alpha"));
    db.run(&["list", "finished"])
        .code(1)
        .stderr(predicate::str::contains("Invalid status 'finished'"));
}

#[test]
fn test_buy_milk_scenario() {
    let db = TestDb::new();
    db.run(&["add", "buy milk"]).success();
    db.run(&["mark-done", "1"]).success();
    let before = fs::read(db.path()).unwrap();
    db.run(&["mark-done", "1"])
        .success()
        .stdout(predicate::str::contains("Task 1 is already done."));
    assert_eq!(fs::read(db.path()).unwrap(), before);
    db.run(&["delete", "1"]).success();
    assert_eq!(read_json(&db.path()), serde_json::json!([]));
    db.run(&["list"]).success().stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_malformed_file_is_fatal() {
    let db = TestDb::new();
    fs::write(db.path(), "not json at all").unwrap();
    db.run(&["list"]).code(1).stderr(predicate::str::contains("Error:"));
    db.run(&["add", "x"]).code(1);
    assert_eq!(fs::read_to_string(db.path()).unwrap(), "not json at all");
}

#[test]
fn test_file_flag_overrides_env() {
    let db = TestDb::new();
    let other = db.dir.path().join("other.json");
    db.cmd()
        .args(["--file", other.to_str().unwrap(), "add", "elsewhere"])
        .assert()
        .success();
    assert!(other.exists());
    assert!(!db.path().exists());
}

#[test]
fn test_defaults_to_working_directory() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("task-cli")
        .unwrap()
        .env_remove("TASKS_DB")
        .current_dir(dir.path())
        .args(["add", "here"])
        .assert()
        .success();
    assert!(dir.path().join("tasks.json").exists());
}

#[test]
fn test_completions() {
    let db = TestDb::new();
    db.run(&["completions", "bash"])
        .success()
        .stdout(predicate::str::contains("task-cli"));
}
