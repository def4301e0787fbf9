//! Step execution for the scaffold pipeline.
//!
//! Every external invocation is a `Step` carrying an explicit failure
//! policy. Outcomes are collected into a `RunReport` so partial failures
//! are visible at the end of the run instead of scrolling past.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::process::Command;

/// What a non-zero exit (or a failed spawn) means for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the run. Used for steps nothing downstream can recover from.
    Fatal,
    /// Report a warning and continue with the remaining steps.
    Warn,
}

/// One external invocation, executed synchronously with inherited stdio.
#[derive(Debug, Clone)]
pub struct Step {
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub policy: FailurePolicy,
    pub failure_hint: Option<String>,
}

impl Step {
    pub fn fatal(label: &str, program: &str, args: &[&str]) -> Self {
        Self::new(label, program, args, FailurePolicy::Fatal)
    }

    pub fn warn(label: &str, program: &str, args: &[&str]) -> Self {
        Self::new(label, program, args, FailurePolicy::Warn)
    }

    fn new(label: &str, program: &str, args: &[&str], policy: FailurePolicy) -> Self {
        Step {
            label: label.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
            policy,
            failure_hint: None,
        }
    }

    /// Run the step from `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Extra context printed when a `Warn` step fails.
    pub fn hint(mut self, hint: &str) -> Self {
        self.failure_hint = Some(hint.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// Non-zero exit, or `None` when the process could not be spawned.
    Failed(Option<i32>),
    Skipped(String),
}

#[derive(Debug)]
pub struct StepRecord {
    pub label: String,
    pub outcome: StepOutcome,
}

/// Ordered outcomes for every executed or skipped step.
#[derive(Debug, Default)]
pub struct RunReport {
    records: Vec<StepRecord>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: &str, outcome: StepOutcome) {
        self.records.push(StepRecord {
            label: label.to_string(),
            outcome,
        });
    }

    pub fn skip(&mut self, label: &str, reason: &str) {
        self.record(label, StepOutcome::Skipped(reason.to_string()));
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, StepOutcome::Failed(_)))
            .count()
    }

    pub fn print_summary(&self) {
        println!("\nRun summary:");
        for record in &self.records {
            match &record.outcome {
                StepOutcome::Success => println!("  {} {}", "✓".green(), record.label),
                StepOutcome::Failed(Some(code)) => {
                    println!("  {} {} (exit {})", "✗".red(), record.label, code)
                }
                StepOutcome::Failed(None) => {
                    println!("  {} {} (could not run)", "✗".red(), record.label)
                }
                StepOutcome::Skipped(reason) => {
                    println!("  {} {} ({})", "-".dimmed(), record.label, reason)
                }
            }
        }
        if self.failures() > 0 {
            println!(
                "\n{}",
                format!(
                    "{} step(s) failed; the project may be partially configured",
                    self.failures()
                )
                .yellow()
            );
        }
    }
}

/// Execute a step, record its outcome, and return it.
///
/// `Fatal` steps turn a failure into an error; `Warn` steps report a
/// warning and let the pipeline continue.
pub fn run(step: &Step, report: &mut RunReport) -> Result<StepOutcome> {
    let mut command = Command::new(&step.program);
    command.args(&step.args);
    if let Some(dir) = &step.cwd {
        command.current_dir(dir);
    }

    let status = match command.status() {
        Ok(status) => status,
        Err(err) => match step.policy {
            FailurePolicy::Fatal => {
                return Err(err).with_context(|| {
                    format!("Failed to run `{}`. Is it installed?", step.program)
                });
            }
            FailurePolicy::Warn => {
                eprintln!(
                    "{}",
                    format!(
                        "⚠ Could not run `{}` for '{}': {}",
                        step.program, step.label, err
                    )
                    .yellow()
                );
                report.record(&step.label, StepOutcome::Failed(None));
                return Ok(StepOutcome::Failed(None));
            }
        },
    };

    if status.success() {
        report.record(&step.label, StepOutcome::Success);
        return Ok(StepOutcome::Success);
    }

    match step.policy {
        FailurePolicy::Fatal => {
            anyhow::bail!("'{}' failed ({})", step.label, status);
        }
        FailurePolicy::Warn => {
            let hint = step
                .failure_hint
                .as_deref()
                .map(|h| format!("; {}", h))
                .unwrap_or_default();
            eprintln!(
                "{}",
                format!("⚠ '{}' returned a non-zero status{}", step.label, hint).yellow()
            );
            let outcome = StepOutcome::Failed(status.code());
            report.record(&step.label, outcome.clone());
            Ok(outcome)
        }
    }
}
