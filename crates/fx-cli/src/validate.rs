//! # Validate CLI — management API checks.
//!
//! ```bash
//! fx validate --definition policy-definition.json
//! fx validate --did did:web:partner.example --did did:web:other.example
//! ```
//!
//! A policy definition is checked by the incorrect-DID-selector validator
//! (when enabled) and by the constraint functions' own right operand
//! checks.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use fx_core::{FxConfig, PolicyDefinition};
use fx_policy::validation::validate_did_group;
use fx_policy::{configured, PolicyDefinitionValidator, Violation};

use crate::{read_document, EXIT_REJECTED};

/// Validate subcommand arguments.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Policy definition document (`@id` and `policy`).
    #[arg(long)]
    pub definition: Option<PathBuf>,

    /// DIDs of a DID group mapping. Repeatable.
    #[arg(long = "did")]
    pub dids: Vec<String>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &FxConfig) -> Result<u8> {
    if args.definition.is_none() && args.dids.is_empty() {
        bail!("nothing to validate: pass --definition and/or --did");
    }
    let mut violations = Vec::new();
    if let Some(path) = &args.definition {
        violations.extend(validate_definition_file(path, config)?);
    }
    if !args.dids.is_empty() {
        match validate_did_group(&args.dids, "dids") {
            Ok(group) => {
                for did in &group {
                    tracing::debug!(%did, "DID group member valid");
                }
            }
            Err(v) => violations.extend(v),
        }
    }

    if violations.is_empty() {
        println!("OK");
        return Ok(0);
    }
    for violation in &violations {
        println!("{violation}");
    }
    Ok(EXIT_REJECTED)
}

/// Load a policy definition and collect every violation.
pub fn validate_definition_file(path: &Path, config: &FxConfig) -> Result<Vec<Violation>> {
    let definition: PolicyDefinition = read_document(path)?;
    Ok(validate_definition(&definition, config))
}

/// Every violation of `definition`.
pub fn validate_definition(definition: &PolicyDefinition, config: &FxConfig) -> Vec<Violation> {
    let mut violations = PolicyDefinitionValidator::new(config)
        .validate(definition)
        .err()
        .unwrap_or_default();

    let (engine, _) = configured(config);
    if let Err(errors) = engine.validate(&definition.policy) {
        violations.extend(
            errors
                .into_iter()
                .map(|e| Violation::new(e.to_string(), "policy")),
        );
    }
    tracing::debug!(count = violations.len(), "policy definition validated");
    violations
}
