//! # Management API Validators
//!
//! Input checks run when policies and DID group mappings are created,
//! before anything reaches evaluation:
//!
//! - [`validate_did`]: a DID group member is a usable `did:web` DID.
//! - [`PolicyDefinitionValidator`]: blocks policy definitions whose
//!   `BusinessPartnerDID` constraints name something other than a
//!   `did:web` DID, the "incorrect DID selector" mistake of copying a
//!   BPN into a DID constraint.

use fx_core::namespace::BUSINESS_PARTNER_DID_LITERAL;
use fx_core::{Did, FxConfig, PolicyDefinition, RightOperand};
use serde::Serialize;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Location of the field, `/`-separated.
    pub path: String,
    /// What is wrong with it.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.message, self.path)
    }
}

/// Outcome of a validator.
pub type ValidationResult = Result<(), Vec<Violation>>;

/// Check a DID group member.
pub fn validate_did(did: &str, path: &str) -> Result<Did, Violation> {
    Did::web(did).map_err(|_| Violation::new(format!("{did} should be a valid did"), path))
}

/// Check a DID group mapping: every member valid and at least one member.
/// Returns the validated members in input order.
pub fn validate_did_group(dids: &[String], path: &str) -> Result<Vec<Did>, Vec<Violation>> {
    if dids.is_empty() {
        return Err(vec![Violation::new(
            "array must contain at least 1 element",
            path,
        )]);
    }
    let mut group = Vec::with_capacity(dids.len());
    let mut violations = Vec::new();
    for (i, did) in dids.iter().enumerate() {
        match validate_did(did, &format!("{path}/{i}")) {
            Ok(did) => group.push(did),
            Err(violation) => violations.push(violation),
        }
    }
    if violations.is_empty() {
        Ok(group)
    } else {
        Err(violations)
    }
}

/// Validator for policy definitions submitted to the management API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDefinitionValidator {
    enabled: bool,
    did_prefix: String,
}

impl PolicyDefinitionValidator {
    /// Configure from `config`; `validator.incorrect_did_selector` turns it on.
    pub fn new(config: &FxConfig) -> Self {
        Self {
            enabled: config.validator.incorrect_did_selector,
            did_prefix: config.did_prefix.clone(),
        }
    }

    /// Whether the validator checks anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Validate `definition`, collecting every violation.
    ///
    /// Checks: `@id` present and not blank, at least one permission, and
    /// right operands of `BusinessPartnerDID` constraints (left operand
    /// compared case-insensitively) start with the DID prefix. A policy
    /// without such a constraint passes.
    pub fn validate(&self, definition: &PolicyDefinition) -> ValidationResult {
        if !self.enabled {
            return Ok(());
        }
        let mut violations = Vec::new();

        if definition.id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            violations.push(Violation::new(
                "mandatory value '@id' is missing or it is blank",
                "@id",
            ));
        }

        let permissions = &definition.policy.permissions;
        if permissions.is_empty() {
            violations.push(Violation::new("No permission constraints added", "policy/permission"));
        }

        for (i, permission) in permissions.iter().enumerate() {
            for (j, constraint) in permission.constraints.iter().enumerate() {
                if !is_business_partner_did(&constraint.left_operand) {
                    continue;
                }
                let path = format!("policy/permission/{i}/constraint/{j}/rightOperand");
                let values: Vec<&str> = match &constraint.right_operand {
                    RightOperand::Scalar(v) => vec![v.as_str()],
                    RightOperand::List(vs) => vs.iter().map(String::as_str).collect(),
                };
                if values.iter().any(|v| !v.starts_with(&self.did_prefix)) {
                    violations.push(Violation::new(
                        format!("{path} should start with {}", self.did_prefix),
                        path,
                    ));
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "policy definition rejected");
            Err(violations)
        }
    }
}

// Matches the bare key and namespaced forms ending in it.
fn is_business_partner_did(left_operand: &str) -> bool {
    let local = left_operand
        .rsplit(|c: char| c == '/' || c == '#' || c == ':')
        .next()
        .unwrap_or(left_operand);
    local.eq_ignore_ascii_case(BUSINESS_PARTNER_DID_LITERAL)
}
