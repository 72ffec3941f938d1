//! # Evaluate CLI — decide a policy for a participant.
//!
//! ```bash
//! fx evaluate --policy policy.json --participant consumer.json
//! fx evaluate --policy policy.yaml --participant consumer.yaml --scope transfer.process --json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use fx_core::{FxConfig, ParticipantAgent, Policy};
use fx_policy::{configured, PolicyContext, PolicyScope, Problem};
use serde::Serialize;

use crate::{read_document, EXIT_REJECTED};

/// Evaluate subcommand arguments.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Policy document (ODRL `permission` list).
    #[arg(long)]
    pub policy: PathBuf,

    /// Participant agent document (identity and claims).
    #[arg(long)]
    pub participant: PathBuf,

    /// Scope to evaluate in.
    #[arg(long, default_value = "contract.negotiation")]
    pub scope: String,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Outcome of an evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationReport {
    /// Scope evaluated in.
    pub scope: PolicyScope,
    /// Whether access is granted.
    pub granted: bool,
    /// Problems reported by the constraint functions.
    pub problems: Vec<Problem>,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs, config: &FxConfig) -> Result<u8> {
    let report = evaluate_files(&args.policy, &args.participant, &args.scope, config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} ({})",
            if report.granted { "GRANTED" } else { "DENIED" },
            report.scope
        );
        for problem in &report.problems {
            println!("  - {}", problem.message);
        }
    }
    Ok(if report.granted { 0 } else { EXIT_REJECTED })
}

/// Load both documents and evaluate the policy in `scope`.
pub fn evaluate_files(
    policy: &Path,
    participant: &Path,
    scope: &str,
    config: &FxConfig,
) -> Result<EvaluationReport> {
    let scope = PolicyScope::parse(scope).ok_or_else(|| {
        anyhow!(
            "unknown scope '{scope}', expected one of: {}",
            PolicyScope::ALL
                .iter()
                .map(PolicyScope::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;
    let policy: Policy = read_document(policy)?;
    let agent: ParticipantAgent = read_document(participant)?;
    Ok(evaluate(&policy, agent, scope, config))
}

/// Evaluate `policy` for `agent` with the standard registration.
pub fn evaluate(
    policy: &Policy,
    agent: ParticipantAgent,
    scope: PolicyScope,
    config: &FxConfig,
) -> EvaluationReport {
    let (engine, bindings) = configured(config);
    let mut ctx = PolicyContext::new(scope, agent);
    let granted = engine.evaluate_policy(&bindings, policy, &mut ctx);
    tracing::info!(%scope, granted, "policy evaluated");
    EvaluationReport {
        scope,
        granted,
        problems: ctx.problems().to_vec(),
    }
}
