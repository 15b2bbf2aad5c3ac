//! Machine-readable verdict reports (`--report <path>`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::scheduling::EntryOutcome;
use crate::core::violation::ViolationKind;
use crate::verify::{ProblemKind, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Accepted,
    Rejected,
    /// The check could not run (unreadable file, invalid config).
    Error,
}

/// JSON summary of a single check.
#[derive(Debug, Serialize)]
pub struct VerdictReport {
    pub problem: ProblemKind,
    pub status: Status,
    pub score: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ViolationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Per-activation scoring detail of an accepted schedule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<EntryOutcome>>,
}

impl VerdictReport {
    pub fn from_outcome(problem: ProblemKind, outcome: &Result<Verdict>) -> Self {
        match outcome {
            Ok(Verdict::Accepted { score, breakdown }) => Self {
                problem,
                status: Status::Accepted,
                score: *score,
                kind: None,
                reason: None,
                breakdown: breakdown.clone(),
            },
            Ok(Verdict::Rejected(violation)) => Self {
                problem,
                status: Status::Rejected,
                score: 0,
                kind: Some(violation.kind()),
                reason: Some(violation.to_string()),
                breakdown: None,
            },
            Err(err) => Self {
                problem,
                status: Status::Error,
                score: 0,
                kind: None,
                reason: Some(format!("{err:#}")),
                breakdown: None,
            },
        }
    }
}

pub fn write_report(path: &Path, report: &VerdictReport) -> Result<()> {
    let contents = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
