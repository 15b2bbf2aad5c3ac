//! Grade a submission directory against every test case of a task.
//!
//! The task score is the sum of the case scores. A missing, rejected, or
//! uncheckable case scores zero and never aborts the remaining cases.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use checker::core::violation::ViolationKind;
use checker::verify::{ProblemKind, Verdict, check_files};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Accepted,
    Rejected,
    Missing,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseGrade {
    pub case: String,
    pub status: CaseStatus,
    pub score: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ViolationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeSummary {
    pub task: String,
    pub problem: ProblemKind,
    pub total: u64,
    pub cases: Vec<CaseGrade>,
}

#[instrument(skip_all, fields(task = %task.file.task.name, cases = task.cases.len()))]
pub fn grade_submission(task: &Task, submission_dir: &Path) -> GradeSummary {
    let problem = task.file.task.problem;
    let mut cases = Vec::with_capacity(task.cases.len());
    for case in &task.cases {
        let output = submission_dir.join(case.submission_name());
        let grade = if !output.is_file() {
            warn!(case = %case.name, path = %output.display(), "submission missing");
            CaseGrade {
                case: case.name.clone(),
                status: CaseStatus::Missing,
                score: 0,
                kind: None,
                reason: Some(format!("missing {}", case.submission_name())),
            }
        } else {
            match check_files(problem, &case.input, &output, &task.file.limits) {
                Ok(Verdict::Accepted { score, .. }) => CaseGrade {
                    case: case.name.clone(),
                    status: CaseStatus::Accepted,
                    score,
                    kind: None,
                    reason: None,
                },
                Ok(Verdict::Rejected(violation)) => CaseGrade {
                    case: case.name.clone(),
                    status: CaseStatus::Rejected,
                    score: 0,
                    kind: Some(violation.kind()),
                    reason: Some(violation.to_string()),
                },
                Err(err) => {
                    warn!(case = %case.name, error = %format!("{err:#}"), "check failed");
                    CaseGrade {
                        case: case.name.clone(),
                        status: CaseStatus::Error,
                        score: 0,
                        kind: None,
                        reason: Some(format!("{err:#}")),
                    }
                }
            }
        };
        debug!(case = %grade.case, status = ?grade.status, score = grade.score, "case graded");
        cases.push(grade);
    }

    GradeSummary {
        task: task.file.task.name.clone(),
        problem,
        total: cases.iter().map(|grade| grade.score).sum(),
        cases,
    }
}

pub fn write_summary(path: &Path, summary: &GradeSummary) -> Result<()> {
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
