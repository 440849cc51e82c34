use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn todo(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_todo"));
    cmd.env("TODO_STORE_PATH", store_path(dir))
        .env("TODO_CONFIG_PATH", dir.path().join("config.json"))
        .env_remove("TODO_LOG")
        .current_dir(dir.path());
    cmd
}

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("tasks.json")
}

fn read_store(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn add_with_stdin(dir: &TempDir, input: &str) -> std::process::Output {
    let mut child = todo(dir)
        .arg("add")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn add");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child.wait_with_output().expect("failed to read add output")
}

#[test]
fn add_command_joins_words() {
    let dir = TempDir::new().unwrap();
    let output = todo(&dir)
        .args(["add", "buy", "oat", "milk"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task 1: buy oat milk"));

    let stored = read_store(&store_path(&dir));
    assert_eq!(stored[0]["task"], "buy oat milk");
    assert_eq!(stored[0]["result"], false);
    assert!(stored[0]["created"].is_string());
    assert!(stored[0].get("completed").is_none());
}

#[test]
fn add_command_appends_in_order() {
    let dir = TempDir::new().unwrap();
    for text in ["first", "second"] {
        let output = todo(&dir).args(["add", text]).output().unwrap();
        assert!(output.status.success());
    }

    let stored = read_store(&store_path(&dir));
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert_eq!(stored[1]["task"], "second");
}

#[test]
fn add_command_reads_stdin_without_words() {
    let dir = TempDir::new().unwrap();
    let output = add_with_stdin(&dir, "pay bills\n");

    assert!(output.status.success());
    let stored = read_store(&store_path(&dir));
    assert_eq!(stored[0]["task"], "pay bills");
}

#[test]
fn add_command_rejects_empty_stdin() {
    let dir = TempDir::new().unwrap();
    let output = add_with_stdin(&dir, "\n");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: empty_input"));
    assert!(!store_path(&dir).exists());
}

#[test]
fn add_command_rejects_blank_words() {
    let dir = TempDir::new().unwrap();
    let output = todo(&dir)
        .args(["add", "   "])
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: empty_input"));
}

#[test]
fn add_command_json_output() {
    let dir = TempDir::new().unwrap();
    let output = todo(&dir)
        .args(["--json", "add", "demo"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["index"], 1);
    assert_eq!(value["task"], "demo");
    assert_eq!(value["result"], false);
}

#[test]
fn add_command_refuses_corrupt_store() {
    let dir = TempDir::new().unwrap();
    std::fs::write(store_path(&dir), "{ not a list").unwrap();

    let output = todo(&dir)
        .args(["add", "demo"])
        .output()
        .expect("failed to run add command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: decode_error"));
    assert_eq!(
        std::fs::read_to_string(store_path(&dir)).unwrap(),
        "{ not a list"
    );
}
