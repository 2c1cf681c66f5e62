//! End-to-end tests for the tmark binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn document(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write document");
    file
}

fn tmark() -> Command {
    Command::cargo_bin("tmark").expect("binary to build")
}

#[test]
fn test_parse_prints_a_tree_by_default() {
    let file = document("- a\n- **b**");
    tmark()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ 1 block\n"))
        .stdout(predicate::str::contains("☰ 2 items 0..11"))
        .stdout(predicate::str::contains("𝐁 b 6..11"));
}

#[test]
fn test_parse_json_and_yaml() {
    let file = document("[x @work] task");
    tmark()
        .args(["parse", "--format", "json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Meta\""))
        .stdout(predicate::str::contains("\"work\""));
    tmark()
        .args(["parse", "-f", "yaml"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("type: Meta"));
}

#[test]
fn test_parse_reads_config_files() {
    let file = document("plain");
    let mut config = NamedTempFile::new().expect("temp config");
    writeln!(config, "[output]\nformat = \"json\"").expect("write config");
    tmark()
        .arg("parse")
        .arg(file.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Paragraph\""));
}

#[test]
fn test_parse_split() {
    let file = document("first\n\n  second");
    tmark()
        .args(["parse", "--split"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--- block 1 ---\nsecond\n"))
        .stdout(predicate::str::contains("¶ second 0..6"));
}

#[test]
fn test_parse_missing_file_fails() {
    tmark()
        .args(["parse", "/nonexistent/file.tm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn test_filter_prints_canonical_form() {
    tmark()
        .args(["filter", "@work&!done"])
        .assert()
        .success()
        .stdout("@work & !x\n");
}

#[test]
fn test_invalid_filter_exits_with_failure() {
    tmark()
        .args(["filter", "pin &"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid filter"));
}

#[test]
fn test_filter_against_a_file() {
    let file = document("[x @work] report\n[@home] milk\nnote");
    tmark()
        .args(["filter", "!x", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("[@home] milk\nnote\n");
}

#[test]
fn test_locate() {
    let file = document("- a\n- **b**");
    tmark()
        .arg("locate")
        .arg(file.path())
        .arg("8")
        .assert()
        .success()
        .stdout("List 0..11\n  ListItem 4..11\n    Paragraph 6..11\n      Bold 6..11\n        Text 8..9\n");
    tmark()
        .arg("locate")
        .arg(file.path())
        .arg("-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bold 6..11"))
        .stdout(predicate::str::contains("Text").not());
}

#[test]
fn test_zero_indent_width_is_rejected() {
    let file = document("- a");
    let mut config = NamedTempFile::new().expect("temp config");
    writeln!(config, "[parser]\nindent_width = 0").expect("write config");
    tmark()
        .arg("parse")
        .arg(file.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("parser.indent_width must be at least 1"));
}

#[test]
fn test_chained_markers_on_one_line_parse() {
    let file = document(&format!("{}x", "- ".repeat(2000)));
    tmark()
        .args(["parse", "--format", "json"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"Paragraph\""));
}
