//! CLI tests for `grader grade`.
//!
//! Builds a task directory on disk, spawns the grader binary, and checks the
//! per-case lines and the summed total.

use std::fs;
use std::process::Command;

#[test]
fn grade_prints_cases_and_total() {
    let temp = tempfile::tempdir().expect("tempdir");
    let task_dir = temp.path().join("pizza");
    fs::create_dir_all(task_dir.join("input")).expect("mkdir");
    fs::write(
        task_dir.join("task.toml"),
        "[task]\nname = \"more-pizza\"\ntitle = \"More pizza\"\nproblem = \"more-pizza\"\n",
    )
    .expect("write task");
    fs::write(task_dir.join("input").join("a_example.in"), "17 4\n2 5 6 8\n").expect("write a");
    fs::write(task_dir.join("input").join("b_small.in"), "100 3\n10 20 30\n").expect("write b");

    let submission = temp.path().join("submission");
    fs::create_dir_all(&submission).expect("mkdir");
    fs::write(submission.join("output_a_example.txt"), "3\n0 2 3\n").expect("write a");
    fs::write(submission.join("output_b_small.txt"), "3\n0 1 2\n").expect("write b");

    let output = Command::new(env!("CARGO_BIN_EXE_grader"))
        .arg("grade")
        .arg(&task_dir)
        .arg(&submission)
        .output()
        .expect("grader grade");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("grade: case=a_example status=Accepted score=16"));
    assert!(stdout.contains("grade: case=b_small status=Accepted score=60"));
    assert!(stdout.contains("grade: task=more-pizza total=76"));
}

#[test]
fn list_fails_for_missing_task_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let status = Command::new(env!("CARGO_BIN_EXE_grader"))
        .arg("list")
        .arg(temp.path())
        .output()
        .expect("grader list");
    assert!(!status.status.success());
}
