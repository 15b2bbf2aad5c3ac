//! Task directory loading and validation.
//!
//! A task directory holds `task.toml` and an `input/` directory with one
//! dataset per test case. Submissions name their files
//! `output_<case>.txt`, where `<case>` is the dataset's file stem.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use checker::io::config::CheckerConfig;
use checker::verify::ProblemKind;
use serde::Deserialize;

/// Parsed `task.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskFile {
    pub task: TaskMeta,
    /// Dataset limit overrides (default: contest limits).
    #[serde(default)]
    pub limits: CheckerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TaskMeta {
    /// Short name (slug format: `[a-z0-9_-]+`).
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub problem: ProblemKind,
}

/// One dataset of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input: PathBuf,
}

impl TestCase {
    /// File name a submission must use for this case.
    pub fn submission_name(&self) -> String {
        format!("output_{}.txt", self.name)
    }
}

/// A loaded task: metadata plus its test cases sorted by name.
#[derive(Debug, Clone)]
pub struct Task {
    pub file: TaskFile,
    pub cases: Vec<TestCase>,
}

impl TaskFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read task {}", path.display()))?;
        Self::parse_str(&contents).with_context(|| format!("parse task {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self> {
        let task: TaskFile = toml::from_str(contents).context("deserialize task")?;
        task.validate()?;
        Ok(task)
    }

    fn validate(&self) -> Result<()> {
        validate_task_name(&self.task.name)?;
        if let Some(title) = &self.task.title
            && title.trim().is_empty()
        {
            bail!("task.title must be non-empty when present");
        }
        self.limits.validate().context("limits invalid")?;
        Ok(())
    }
}

impl Task {
    /// Load `task.toml` and discover `input/` datasets under `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let file = TaskFile::load(&dir.join("task.toml"))?;
        let cases = discover_cases(&dir.join("input"))?;
        if cases.is_empty() {
            bail!("task {} has no input files", file.task.name);
        }
        Ok(Self { file, cases })
    }
}

fn discover_cases(dir: &Path) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read input dir {}", dir.display()))? {
        let entry = entry.context("read input entry")?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        cases.push(TestCase {
            name: name.to_string(),
            input: path.clone(),
        });
    }
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    for pair in cases.windows(2) {
        if pair[0].name == pair[1].name {
            bail!("duplicate test case name {}", pair[0].name);
        }
    }
    Ok(cases)
}

fn validate_task_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("task.name must be non-empty");
    }
    if !name
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("task.name must use [a-z0-9_-] only");
    }
    Ok(())
}
