//! Contest checker binary.
//!
//! Prints exactly one integer on stdout: the submission's score, or `0` when
//! anything goes wrong. The reason goes to stderr. The exit status is always
//! success so a grading harness only ever has to read the number.

use std::path::PathBuf;

use anyhow::Result;
use checker::io::config::{CheckerConfig, load_config};
use checker::io::report::{VerdictReport, write_report};
use checker::logging;
use checker::verify::{ProblemKind, Verdict, check_files};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    name = "checker",
    version,
    about = "Validate a contest submission and recompute its score"
)]
struct Cli {
    /// Problem variant the files belong to.
    #[arg(long, value_enum, default_value_t = ProblemKind::Scheduling)]
    problem: ProblemKind,
    /// TOML file overriding dataset limits.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also write a JSON verdict to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Dataset file.
    input: PathBuf,
    /// Reference output. Accepted for harness compatibility and ignored.
    reference: PathBuf,
    /// Candidate solution file.
    output: PathBuf,
}

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("0");
            eprintln!("Incorrect usage, need input and output file.\n{}", err);
            return;
        }
    };
    debug!(?cli, "arguments parsed");

    let outcome = run(&cli);
    if let Some(path) = &cli.report
        && let Err(err) = write_report(path, &VerdictReport::from_outcome(cli.problem, &outcome))
    {
        warn!(path = %path.display(), error = %format!("{err:#}"), "failed to write report");
    }

    match outcome {
        Ok(Verdict::Accepted { score, .. }) => {
            println!("{score}");
            eprintln!("[Output correct]: score = {score}.");
        }
        Ok(Verdict::Rejected(violation)) => {
            println!("0");
            eprintln!("{violation}");
        }
        Err(err) => {
            println!("0");
            eprintln!("{err:#}");
        }
    }
}

fn run(cli: &Cli) -> Result<Verdict> {
    let cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => CheckerConfig::default(),
    };
    check_files(cli.problem, &cli.input, &cli.output, &cfg)
}
