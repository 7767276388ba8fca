//! Integration tests for the labelkit CLI merge surface.
//!
//! Drives the installed binary end to end: CSV inputs in a scratch
//! directory, the merged JSON document out, and the failure modes that must
//! abort without writing anything.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ANNOTATIONS: &str = "\
id,sentiment,notes,highlight
7,positive,,
";

const ALL_TASKS: &str = "\
id,review,filename,url
7,Great film,r7.txt,http://x/7
8,Meh,r8.txt,http://x/8
";

fn setup_inputs(annotations: &str, tasks: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(dir.path().join("test-annotations.csv"), annotations)
        .expect("Failed to write annotations file");
    fs::write(dir.path().join("all_tasks.csv"), tasks).expect("Failed to write tasks file");
    dir
}

#[test]
fn merge_produces_the_import_document() {
    let dir = setup_inputs(ANNOTATIONS, ALL_TASKS);

    let mut cmd = Command::cargo_bin("labelkit").unwrap();
    cmd.current_dir(dir.path())
        .arg("merge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 2 tasks"));

    let raw = fs::read_to_string(dir.path().join("merged_annotations.json")).unwrap();
    let output: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let tasks = output.as_array().unwrap();
    assert_eq!(tasks.len(), 2);

    // Task 7 carries exactly one annotation block with the sentiment choice.
    assert_eq!(tasks[0]["data"]["id"], "7");
    assert_eq!(tasks[0]["data"]["review_text"], "Great film");
    let blocks = tasks[0]["annotations"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["completed_by"], 1);
    let result = &blocks[0]["result"].as_array().unwrap()[0];
    assert_eq!(result["from_name"], "sentiment");
    assert_eq!(result["to_name"], "review_text");
    assert_eq!(result["type"], "choices");
    assert_eq!(result["readonly"], false);
    assert_eq!(result["hidden"], false);
    assert_eq!(result["value"]["choices"], serde_json::json!(["positive"]));

    // Task 8 had no judgment and passes through without the key.
    assert_eq!(tasks[1]["data"]["id"], "8");
    assert!(tasks[1].get("annotations").is_none());
}

#[test]
fn merge_output_is_indented_with_four_spaces() {
    let dir = setup_inputs(ANNOTATIONS, ALL_TASKS);

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .arg("merge")
        .assert()
        .success();

    let raw = fs::read_to_string(dir.path().join("merged_annotations.json")).unwrap();
    assert!(raw.starts_with("[\n    {\n        \"data\""));
}

#[test]
fn merge_honors_path_overrides() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("round2.csv"), ANNOTATIONS).unwrap();
    fs::write(dir.path().join("universe.csv"), ALL_TASKS).unwrap();

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .args([
            "merge",
            "--annotations-file",
            "round2.csv",
            "--all-tasks-file",
            "universe.csv",
            "--output-file",
            "out.json",
        ])
        .assert()
        .success();

    assert!(dir.path().join("out.json").exists());
    assert!(!dir.path().join("merged_annotations.json").exists());
}

#[test]
fn missing_annotations_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("all_tasks.csv"), ALL_TASKS).unwrap();

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("test-annotations.csv"));

    assert!(!dir.path().join("merged_annotations.json").exists());
}

#[test]
fn missing_tasks_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("test-annotations.csv"), ANNOTATIONS).unwrap();

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("all_tasks.csv"));

    assert!(!dir.path().join("merged_annotations.json").exists());
}

#[test]
fn malformed_highlight_aborts_before_merge() {
    let dir = setup_inputs(
        "id,sentiment,notes,highlight\n7,positive,,not-json\n",
        ALL_TASKS,
    );

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("highlight"));

    assert!(!dir.path().join("merged_annotations.json").exists());
}

#[test]
fn missing_header_column_names_the_column() {
    let dir = setup_inputs(
        "id,sentiment,notes,highlight\n7,positive,,\n",
        "id,review,filename\n7,Great film,r7.txt\n",
    );

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("url"));
}

#[test]
fn logfile_flag_redirects_diagnostics() {
    let dir = setup_inputs(ANNOTATIONS, ALL_TASKS);

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .args(["merge", "--loglevel", "debug", "--logfile", "merge.log"])
        .env_remove("RUST_LOG")
        .assert()
        .success();

    let log = fs::read_to_string(dir.path().join("merge.log")).unwrap();
    assert!(log.contains("Reading annotations from test-annotations.csv"));
}

#[test]
fn rejects_unknown_loglevel() {
    Command::cargo_bin("labelkit")
        .unwrap()
        .args(["merge", "--loglevel", "chatty"])
        .assert()
        .failure();
}

#[test]
fn project_commands_fail_cleanly_without_an_api_key() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("labelkit")
        .unwrap()
        .current_dir(dir.path())
        .args(["project", "list-all"])
        .env_remove("LABEL_STUDIO_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LABEL_STUDIO_API_KEY"));
}

#[test]
fn completions_cover_the_merge_flags() {
    Command::cargo_bin("labelkit")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--annotations-file"));
}
