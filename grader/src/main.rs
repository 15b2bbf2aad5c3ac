mod grade;
mod task;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::grade::{grade_submission, write_summary};
use crate::task::Task;

#[derive(Parser)]
#[command(name = "grader", version, about = "Grade submissions for a contest task")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the test cases of a task.
    List { task_dir: PathBuf },
    /// Check every `output_<case>.txt` in a submission directory.
    Grade {
        task_dir: PathBuf,
        submission_dir: PathBuf,
        /// Write a JSON summary to this path.
        #[arg(long)]
        results: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    checker::logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::List { task_dir } => list_cases(&task_dir),
        Command::Grade {
            task_dir,
            submission_dir,
            results,
        } => grade(&task_dir, &submission_dir, results.as_deref()),
    }
}

fn list_cases(task_dir: &Path) -> Result<()> {
    let task = Task::load(task_dir).context("load task")?;
    for case in &task.cases {
        println!("{}", case.name);
    }
    Ok(())
}

fn grade(task_dir: &Path, submission_dir: &Path, results: Option<&Path>) -> Result<()> {
    let task = Task::load(task_dir).context("load task")?;
    info!(task = %task.file.task.name, cases = task.cases.len(), "grading submission");

    let summary = grade_submission(&task, submission_dir);
    for grade in &summary.cases {
        println!(
            "grade: case={} status={:?} score={}",
            grade.case, grade.status, grade.score
        );
        if let Some(reason) = &grade.reason {
            eprintln!("{}: {}", grade.case, reason);
        }
    }
    println!("grade: task={} total={}", summary.task, summary.total);

    if let Some(path) = results {
        write_summary(path, &summary).context("write results")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_grade_with_results() {
        let cli = Cli::parse_from([
            "grader",
            "grade",
            "tasks/book",
            "subs/team-1",
            "--results",
            "out.json",
        ]);
        match cli.command {
            Command::Grade {
                task_dir, results, ..
            } => {
                assert_eq!(task_dir, PathBuf::from("tasks/book"));
                assert_eq!(results, Some(PathBuf::from("out.json")));
            }
            Command::List { .. } => panic!("expected grade"),
        }
    }

    #[test]
    fn parse_list() {
        let cli = Cli::parse_from(["grader", "list", "tasks/book"]);
        assert!(matches!(cli.command, Command::List { .. }));
    }
}
