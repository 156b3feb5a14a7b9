//! # Lint Subcommand
//!
//! Compiles a rule document without evaluating it. Catches malformed
//! paths, patterns that do not compile, and presence rules without
//! targets. Errors that depend on target data (type mismatches, paths that
//! do not fit the target's shape) only surface under `xfield check`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::{load_rules, EXIT_PASS};

/// Arguments for `xfield lint`.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Rule document (YAML or JSON).
    #[arg(long)]
    pub rules: PathBuf,
}

/// Execute `xfield lint`.
pub fn run_lint(args: &LintArgs) -> Result<u8> {
    let rules = load_rules(&args.rules)?;
    println!("OK: {} rule(s) in {}", rules.len(), args.rules.display());
    Ok(EXIT_PASS)
}
