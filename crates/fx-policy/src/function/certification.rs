//! Certification type constraint: `<ns>CertificationType EQ "ISO9001"`
//! holds when the participant presents a `CertificationTypeCredential`
//! and the right operand names a known certification.

use fx_core::namespace::{CERTIFICATION_LITERAL, CREDENTIAL_LITERAL};
use fx_core::{CertificationType, FxConfig, Operator, RightOperand};

use crate::context::PolicyContext;
use crate::error::EvaluationError;

use super::{evaluate_credential_presence, has_namespaced_prefix};

/// Constraint function for `CertificationType` left operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationTypeCredentialFunction {
    policy_namespace: String,
    credential_namespace: String,
    credential_type: String,
}

impl CertificationTypeCredentialFunction {
    /// Configure from `config`.
    pub fn new(config: &FxConfig) -> Self {
        Self {
            policy_namespace: config.policy_namespace.clone(),
            credential_namespace: config.credential_namespace.clone(),
            credential_type: format!("{CERTIFICATION_LITERAL}{CREDENTIAL_LITERAL}"),
        }
    }

    /// Accepts left operands starting with `<ns>CertificationType`.
    pub fn can_handle(&self, left_operand: &str) -> bool {
        has_namespaced_prefix(left_operand, &self.policy_namespace, CERTIFICATION_LITERAL)
    }

    /// Check for a certification credential of a known type.
    pub fn evaluate(&self, operator: Operator, right: &RightOperand, ctx: &mut PolicyContext) -> bool {
        let credential_type = (self.credential_namespace.as_str(), self.credential_type.as_str());
        evaluate_credential_presence(operator, right, ctx, credential_type, |literal| {
            CertificationType::from_name(literal)
                .map(|_| ())
                .ok_or_else(|| EvaluationError::UnrecognizedLiteral {
                    value: literal.to_string(),
                })
        })
    }
}
