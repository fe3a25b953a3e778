//! CLI entrypoint for the fscan conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fscan_harness::fixtures::{self, FixtureSet};
use fscan_harness::report::ConformanceReport;
use fscan_harness::runner::TestRunner;
use fscan_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use fscan_harness::verify::VerificationSummary;

/// Conformance tooling for fscan.
#[derive(Debug, Parser)]
#[command(name = "fscan-harness")]
#[command(about = "Fixture-driven conformance harness for fscan")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a fixture file through the scan engine and report results.
    Run {
        /// Fixture JSON file to execute.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown). If omitted, prints a summary to stdout.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Write the built-in smoke suite as a fixture JSON file.
    Seed {
        /// Output path for the fixture file.
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("harness error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Run {
            fixture,
            report,
            log,
            timestamp,
        } => {
            let set = FixtureSet::from_file(&fixture)?;
            let run_id = format!("fscan-{}", set.suite);

            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, &run_id)?),
                None => None,
            };
            if let Some(em) = emitter.as_mut() {
                em.emit(
                    &LogEntry::new(&run_id, LogLevel::Info, "suite_start")
                        .with_suite(&set.suite),
                )?;
            }

            let results = TestRunner::new(&run_id).run(&set);
            if let Some(em) = emitter.as_mut() {
                for r in &results {
                    let outcome = if r.passed { Outcome::Pass } else { Outcome::Fail };
                    em.emit(
                        &LogEntry::new(&run_id, LogLevel::Info, "case_done")
                            .with_suite(&set.suite)
                            .with_outcome(outcome)
                            .with_details(serde_json::json!({
                                "case": r.case_name,
                                "actual": r.actual,
                            })),
                    )?;
                }
            }

            let summary = VerificationSummary::from_results(results);
            let all_passed = summary.all_passed();
            let conformance = ConformanceReport {
                title: "fscan conformance".to_string(),
                suite: set.suite.clone(),
                timestamp: timestamp.unwrap_or_else(|| "now".to_string()),
                summary,
            };

            match report {
                Some(path) => std::fs::write(&path, conformance.to_markdown())?,
                None => {
                    println!(
                        "{}: {} total, {} passed, {} failed",
                        set.suite,
                        conformance.summary.total,
                        conformance.summary.passed,
                        conformance.summary.failed
                    );
                    for r in conformance.summary.results.iter().filter(|r| !r.passed) {
                        println!("FAIL {}", r.case_name);
                        if let Some(diff) = &r.diff {
                            println!("{diff}");
                        }
                    }
                }
            }

            if let Some(em) = emitter.as_mut() {
                em.emit(
                    &LogEntry::new(&run_id, LogLevel::Info, "suite_done")
                        .with_suite(&set.suite)
                        .with_outcome(if all_passed { Outcome::Pass } else { Outcome::Fail }),
                )?;
                em.flush()?;
            }

            Ok(all_passed)
        }
        Command::Seed { output } => {
            let suite = fixtures::builtin_suite();
            std::fs::write(&output, suite.to_json()?)?;
            println!("wrote {} cases to {}", suite.cases.len(), output.display());
            Ok(true)
        }
    }
}
