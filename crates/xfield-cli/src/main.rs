//! # xfield CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xfield_cli::check::{run_check, CheckArgs};
use xfield_cli::lint::{run_lint, LintArgs};
use xfield_cli::EXIT_CONFIG_ERROR;

/// Cross-field validation rules for JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "xfield", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a rule document against a target instance.
    Check(CheckArgs),

    /// Compile a rule document and report mis-declared rules.
    Lint(LintArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Lint(args) => run_lint(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}
