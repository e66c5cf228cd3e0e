//! Integration tests for the p8kit CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

const HEADER: &str = "pico-8 cartridge // http://www.pico-8.com\nversion 36\n__lua__\n";

fn run_p8kit(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_p8kit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn create_project(dir: &Path) {
    fs::write(dir.join("main.lua"), "function _init()\n  x = 1\nend\n").unwrap();
    fs::write(dir.join("player.lua"), "-- player\nlocal p = {x = 0}\n").unwrap();
    fs::write(dir.join("__gfx__.lua"), "__gfx__\n00000000\n").unwrap();
}

fn p(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_p8kit(&["--help"]);

    assert!(success);
    assert!(stdout.contains("p8kit"));
    assert!(stdout.contains("count"));
    assert!(stdout.contains("split"));
    assert!(stdout.contains("join"));
    assert!(stdout.contains("compare"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_p8kit(&["--version"]);

    assert!(success);
    assert!(stdout.contains("p8kit"));
}

#[test]
fn test_count_text_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());
    let dir = p(temp.path());

    let (stdout, _, success) = run_p8kit(&["count", dir]);

    assert!(success);
    let expected = format!(
        "Token count per file in '{dir}':\n  main.lua: 6\n  player.lua: 6\n\
Total tokens in the directory: 12\nMax tokens for project: 8192\n\
Tokens remaining: 8180, or 99.85% of the total\n"
    );
    assert_eq!(stdout, expected);
}

#[test]
fn test_root_path_counts() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_p8kit(&[p(temp.path())]);

    assert!(success);
    assert!(stdout.contains("Total tokens in the directory: 12"));
    assert!(!stdout.contains("__gfx__.lua"));
}

#[test]
fn test_count_json_output() {
    let temp = tempdir().unwrap();
    create_project(temp.path());

    let (stdout, _, success) = run_p8kit(&["count", p(temp.path()), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["footer"]["total"], 12);
    assert_eq!(parsed["footer"]["limit"], 8192);
    assert_eq!(parsed["rows"].as_array().unwrap().len(), 2);
}

#[test]
fn test_count_sort_and_limit() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.lua"), "x = 1\n").unwrap();
    fs::write(temp.path().join("b.lua"), "x = 1\ny = 2\n").unwrap();

    let (stdout, _, success) = run_p8kit(&[
        "count",
        p(temp.path()),
        "--sort",
        "tokens",
        "--limit",
        "100",
    ]);

    assert!(success);
    let b = stdout.find("b.lua").unwrap();
    let a = stdout.find("a.lua").unwrap();
    assert!(b < a);
    assert!(stdout.contains("Max tokens for project: 100"));
    assert!(stdout.contains("Tokens remaining: 91, or 91.00% of the total"));
}

#[test]
fn test_count_cartridge_file() {
    let temp = tempdir().unwrap();
    let cart = temp.path().join("game.p8");
    fs::write(&cart, format!("{HEADER}x = 1\n__gfx__\n0000\n")).unwrap();

    let (stdout, _, success) = run_p8kit(&["count", p(&cart)]);

    assert!(success);
    assert!(stdout.contains("game.p8: 3"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_p8kit(&["count", "/nonexistent/path"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_split_join_compare() {
    let temp = tempdir().unwrap();
    let cart = temp.path().join("game.p8");
    let content = format!(
        "{HEADER}--#main\nfunction _update()\nend\n-->8\n--#draw\nfunction _draw()\n  cls()\nend\n__gfx__\n0000\n"
    );
    fs::write(&cart, &content).unwrap();

    let (stdout, _, success) = run_p8kit(&["split", p(&cart)]);
    assert!(success);
    assert!(stdout.contains("Creating file:"));
    assert!(stdout.contains("main.lua"));

    let split_dir = temp.path().join("game");
    assert!(split_dir.join("mappings.txt").is_file());

    let rebuilt = temp.path().join("rebuilt.p8");
    let (_, _, success) = run_p8kit(&["join", p(&split_dir), p(&rebuilt)]);
    assert!(success);
    assert_eq!(fs::read_to_string(&rebuilt).unwrap(), content);

    let (stdout, _, success) = run_p8kit(&["compare", p(&cart), p(&rebuilt)]);
    assert!(success);
    assert_eq!(stdout, "No differences found.\n");

    // splitting again must not overwrite
    let (_, stderr, success) = run_p8kit(&["split", p(&cart)]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_compare_reports_first_difference() {
    let temp = tempdir().unwrap();
    let a = temp.path().join("a.p8");
    let b = temp.path().join("b.p8");
    fs::write(&a, "x = 1\ny = 2\n").unwrap();
    fs::write(&b, "x = 1\ny = 3\n").unwrap();

    let (stdout, _, success) = run_p8kit(&["compare", p(&a), p(&b)]);

    assert!(success);
    assert!(stdout.contains("Difference found at line 2"));
    assert!(stdout.contains("File 1: y = 2"));
    assert!(stdout.contains("File 2: y = 3"));
}

#[test]
fn test_join_without_mapping() {
    let temp = tempdir().unwrap();
    let out = temp.path().join("out.p8");

    let (_, stderr, success) = run_p8kit(&["join", p(temp.path()), p(&out)]);

    assert!(!success);
    assert!(stderr.contains("mapping file not found"));
}
