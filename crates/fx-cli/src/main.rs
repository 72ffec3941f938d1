//! # fx CLI entry point
//!
//! Parses command-line arguments, installs logging, loads configuration,
//! and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fx_cli::evaluate::{run_evaluate, EvaluateArgs};
use fx_cli::load_config;
use fx_cli::scopes::{run_scopes, ScopesArgs};
use fx_cli::validate::{run_validate, ValidateArgs};

/// Factory-X policy extensions CLI.
///
/// Evaluates credential-based access policies, derives the DCP scopes a
/// consumer must request, and validates policy definitions.
#[derive(Parser, Debug)]
#[command(name = "fx", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a policy against a participant agent.
    Evaluate(EvaluateArgs),

    /// Compute the credential scopes required by a policy.
    Scopes(ScopesArgs),

    /// Validate a policy definition or DID group.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let result = match cli.command {
        Commands::Evaluate(args) => run_evaluate(&args, &config),
        Commands::Scopes(args) => run_scopes(&args, &config),
        Commands::Validate(args) => run_validate(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
