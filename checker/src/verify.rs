//! File-level verification pipeline for the `checker` binary and the grader.
//!
//! Reads the dataset, validates it, and only then reads the candidate
//! solution. A violation is a judged outcome ([`Verdict::Rejected`]); an
//! unreadable file is an error because nothing could be judged.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::core::grouping::Grouping;
use crate::core::packing::Packing;
use crate::core::problem::Problem;
use crate::core::scheduling::{self, EntryOutcome, Scheduling, simulate};
use crate::core::violation::Violation;
use crate::io::config::CheckerConfig;
use crate::tokens::Tokens;

/// Problem variant a dataset/solution pair belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// Time-budgeted group activation schedule.
    #[default]
    #[value(alias = "book-scanning")]
    #[serde(alias = "book-scanning")]
    Scheduling,
    /// Capacity-bounded selection.
    #[value(alias = "more-pizza")]
    #[serde(alias = "more-pizza")]
    Packing,
    /// Fixed-size grouping with shared-tag scoring.
    #[value(alias = "even-more-pizza")]
    #[serde(alias = "even-more-pizza")]
    Grouping,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Scheduling => write!(f, "scheduling"),
            ProblemKind::Packing => write!(f, "packing"),
            ProblemKind::Grouping => write!(f, "grouping"),
        }
    }
}

/// Outcome of judging a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted {
        score: u64,
        /// Per-activation detail, for problems that have one.
        breakdown: Option<Vec<EntryOutcome>>,
    },
    Rejected(Violation),
}

impl Verdict {
    /// Score to report: zero unless accepted.
    pub fn score(&self) -> u64 {
        match self {
            Verdict::Accepted { score, .. } => *score,
            Verdict::Rejected(_) => 0,
        }
    }
}

/// Verify the solution file against the dataset file.
#[instrument(
    skip_all,
    fields(problem = %kind, input = %input_path.display(), output = %output_path.display())
)]
pub fn check_files(
    kind: ProblemKind,
    input_path: &Path,
    output_path: &Path,
    cfg: &CheckerConfig,
) -> Result<Verdict> {
    let verdict = match kind {
        ProblemKind::Scheduling => {
            match read_stages::<Scheduling>(input_path, output_path, &cfg.scheduling)? {
                Ok((dataset, solution)) => accept_schedule(&dataset, &solution),
                Err(violation) => Verdict::Rejected(violation),
            }
        }
        ProblemKind::Packing => judge::<Packing>(input_path, output_path, &cfg.packing)?,
        ProblemKind::Grouping => judge::<Grouping>(input_path, output_path, &cfg.grouping)?,
    };
    match &verdict {
        Verdict::Accepted { score, .. } => info!(score, "solution accepted"),
        Verdict::Rejected(violation) => {
            info!(kind = ?violation.kind(), stream = %violation.stream(), "solution rejected");
        }
    }
    Ok(verdict)
}

fn judge<P: Problem>(
    input_path: &Path,
    output_path: &Path,
    limits: &P::Limits,
) -> Result<Verdict> {
    let verdict = match read_stages::<P>(input_path, output_path, limits)? {
        Ok((dataset, solution)) => Verdict::Accepted {
            score: P::score(&dataset, &solution),
            breakdown: None,
        },
        Err(violation) => Verdict::Rejected(violation),
    };
    Ok(verdict)
}

fn accept_schedule(dataset: &scheduling::Dataset, solution: &scheduling::Solution) -> Verdict {
    let sim = simulate(dataset, solution);
    for (entry, outcome) in sim.entries.iter().enumerate() {
        debug!(
            entry,
            group = outcome.group,
            start = outcome.start,
            processable = outcome.processable,
            credited = outcome.credited,
            gained = outcome.gained,
            "entry simulated"
        );
    }
    Verdict::Accepted {
        score: sim.score,
        breakdown: Some(sim.entries),
    }
}

/// Read the dataset, then the solution. The outer error means a file could
/// not be read; the inner one is the first violation found.
fn read_stages<P: Problem>(
    input_path: &Path,
    output_path: &Path,
    limits: &P::Limits,
) -> Result<Result<(P::Dataset, P::Solution), Violation>> {
    let input = read_text(input_path)
        .with_context(|| format!("Input file not found: {}", input_path.display()))?;
    let mut tokens = Tokens::new(&input);
    let dataset = match P::read_dataset(&mut tokens, limits) {
        Ok(dataset) => dataset,
        Err(violation) => return Ok(Err(violation)),
    };
    debug!(tokens = tokens.consumed(), "dataset accepted");

    let output = read_text(output_path)
        .with_context(|| format!("Output file not found: {}", output_path.display()))?;
    let mut tokens = Tokens::new(&output);
    let solution = match P::read_solution(&dataset, &mut tokens) {
        Ok(solution) => solution,
        Err(violation) => return Ok(Err(violation)),
    };
    debug!(tokens = tokens.consumed(), "solution accepted");

    Ok(Ok((dataset, solution)))
}

/// Read a file as text. Invalid UTF-8 is kept as replacement characters so
/// it surfaces as a malformed token rather than an I/O failure.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::violation::{Field, Stream};

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn accepts_valid_scheduling_submission() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = write(temp.path(), "in.txt", "3 1 3\n10 5 8\n2 1 1\n0 1\n");
        let output = write(temp.path(), "out.txt", "1\n0 2\n0 1\n");
        let verdict = check_files(
            ProblemKind::Scheduling,
            &input,
            &output,
            &CheckerConfig::default(),
        )
        .expect("check");
        assert_eq!(verdict.score(), 15);
        let Verdict::Accepted {
            breakdown: Some(entries),
            ..
        } = &verdict
        else {
            panic!("expected scheduling breakdown, got {verdict:?}");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].processable, 2);
        assert_eq!(entries[0].gained, 15);
    }

    #[test]
    fn dataset_violation_wins_over_missing_output() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = write(temp.path(), "in.txt", "3 1\n");
        let verdict = check_files(
            ProblemKind::Scheduling,
            &input,
            &temp.path().join("missing.txt"),
            &CheckerConfig::default(),
        )
        .expect("check");
        assert!(matches!(
            verdict,
            Verdict::Rejected(Violation::Truncated {
                stream: Stream::Input,
                field: Field::Deadline,
                ..
            })
        ));
        assert_eq!(verdict.score(), 0);
    }

    #[test]
    fn missing_input_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let output = write(temp.path(), "out.txt", "0\n");
        let err = check_files(
            ProblemKind::Packing,
            &temp.path().join("missing.txt"),
            &output,
            &CheckerConfig::default(),
        )
        .expect_err("missing input");
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn missing_output_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = write(temp.path(), "in.txt", "10 2\n3 4\n");
        let err = check_files(
            ProblemKind::Packing,
            &input,
            &temp.path().join("missing.txt"),
            &CheckerConfig::default(),
        )
        .expect_err("missing output");
        assert!(err.to_string().contains("Output file not found"));
    }

    #[test]
    fn invalid_utf8_is_a_malformed_token() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = write(temp.path(), "in.txt", "10 2\n3 4\n");
        let output = temp.path().join("out.txt");
        fs::write(&output, [b'1', b'\n', 0xff, b'\n']).expect("write");
        let verdict = check_files(ProblemKind::Packing, &input, &output, &CheckerConfig::default())
            .expect("check");
        assert!(matches!(
            verdict,
            Verdict::Rejected(Violation::Truncated {
                stream: Stream::Output,
                ..
            })
        ));
    }

    #[test]
    fn grouping_dispatch_scores() {
        let temp = tempfile::tempdir().expect("tempdir");
        let input = write(temp.path(), "in.txt", "2 1 0 0\n1 a\n2 b c\n");
        let output = write(temp.path(), "out.txt", "1\n2 0 1\n");
        let verdict = check_files(
            ProblemKind::Grouping,
            &input,
            &output,
            &CheckerConfig::default(),
        )
        .expect("check");
        assert_eq!(
            verdict,
            Verdict::Accepted {
                score: 9,
                breakdown: None
            }
        );
    }

    #[test]
    fn problem_kind_accepts_contest_aliases() {
        assert_eq!(
            ProblemKind::from_str("book-scanning", false),
            Ok(ProblemKind::Scheduling)
        );
        assert_eq!(
            ProblemKind::from_str("even-more-pizza", false),
            Ok(ProblemKind::Grouping)
        );
        assert_eq!(ProblemKind::Packing.to_string(), "packing");
    }
}
