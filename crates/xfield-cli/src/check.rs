//! # Check Subcommand
//!
//! Evaluates every rule of a document against one target instance and
//! prints a line (or a JSON entry) per rule.
//!
//! Targets are read as JSON, or as YAML when the file ends in `.yaml` or
//! `.yml`, and converted through the JSON bridge of `xfield-core`: objects
//! become records, arrays become arrays.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use xfield_core::Value;
use xfield_rules::document::is_yaml;
use xfield_rules::{OutcomeStatus, OutcomeSummary, RuleOutcome};

use crate::{load_rules, EXIT_CONFIG_ERROR, EXIT_PASS, EXIT_VIOLATION};

/// Report format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `PASS`/`FAIL`/`ERROR` line per rule.
    #[default]
    Text,
    /// A single JSON report.
    Json,
}

/// Arguments for `xfield check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule document (YAML or JSON).
    #[arg(long)]
    pub rules: PathBuf,

    /// Instance to check (YAML or JSON).
    #[arg(long)]
    pub target: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// JSON report printed by `--format json`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub passed: bool,
    pub outcomes: Vec<OutcomeSummary>,
}

/// Execute `xfield check`.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let rules = load_rules(&args.rules)?;
    let target = load_target(&args.target)?;

    let outcomes = rules.evaluate(&target);
    for outcome in &outcomes {
        if let Some(err) = outcome.error() {
            tracing::warn!(index = outcome.index, "rule is mis-declared: {err}");
        }
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&outcomes)),
        OutputFormat::Json => println!("{}", render_json(&outcomes)?),
    }

    let code = exit_code(&outcomes);
    tracing::info!(rules = outcomes.len(), exit_code = code, "check finished");
    Ok(code)
}

/// Read a target instance and convert it to a [`Value`] graph.
pub fn load_target(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read target {}", path.display()))?;
    let json: serde_json::Value = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in target {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in target {}", path.display()))?
    };
    Ok(Value::from(json))
}

/// Errors dominate violations, violations dominate passes.
pub fn exit_code(outcomes: &[RuleOutcome]) -> u8 {
    if outcomes.iter().any(|o| o.error().is_some()) {
        EXIT_CONFIG_ERROR
    } else if outcomes.iter().any(RuleOutcome::is_violation) {
        EXIT_VIOLATION
    } else {
        EXIT_PASS
    }
}

/// Text report: one line per rule.
pub fn render_text(outcomes: &[RuleOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let summary = outcome.summary();
        let status = match summary.status {
            OutcomeStatus::Pass => "PASS",
            OutcomeStatus::Fail => "FAIL",
            OutcomeStatus::Error => "ERROR",
        };
        let label = summary
            .name
            .unwrap_or_else(|| format!("#{}", summary.index));
        out.push_str(&format!("{status:<5} {label} [{}]", summary.property_path));
        if let Some(err) = summary.error {
            out.push_str(&format!(": {err}"));
        }
        out.push('\n');
    }
    out
}

/// JSON report.
pub fn render_json(outcomes: &[RuleOutcome]) -> Result<String> {
    let report = CheckReport {
        passed: outcomes.iter().all(RuleOutcome::passed),
        outcomes: outcomes.iter().map(RuleOutcome::summary).collect(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize check report")
}
