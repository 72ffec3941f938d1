//! Business partner DID constraint.
//!
//! Grants access when the participant's identity matches the DIDs in the
//! right operand under one of the [matcher operators](crate::matcher).

use fx_core::namespace::BUSINESS_PARTNER_DID_LITERAL;
use fx_core::{FxConfig, Operator, RightOperand, ValidationError};

use crate::context::PolicyContext;
use crate::error::EvaluationError;
use crate::extractor;
use crate::matcher::{match_identity, MATCHER_OPERATORS};

/// Constraint function for `BusinessPartnerDID` left operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessPartnerDidFunction {
    namespaced: String,
    did_prefix: String,
}

impl BusinessPartnerDidFunction {
    /// Configure from `config`.
    pub fn new(config: &FxConfig) -> Self {
        Self {
            namespaced: format!("{}{}", config.policy_namespace, BUSINESS_PARTNER_DID_LITERAL),
            did_prefix: config.did_prefix.clone(),
        }
    }

    /// Accepts the bare `BusinessPartnerDID` key and its namespaced form.
    pub fn can_handle(&self, left_operand: &str) -> bool {
        left_operand == BUSINESS_PARTNER_DID_LITERAL || left_operand == self.namespaced
    }

    /// Match the participant identity against `right`.
    pub fn evaluate(&self, operator: Operator, right: &RightOperand, ctx: &mut PolicyContext) -> bool {
        match self.try_evaluate(operator, right, ctx) {
            Ok(granted) => granted,
            Err(err) => {
                ctx.report(&err);
                false
            }
        }
    }

    fn try_evaluate(
        &self,
        operator: Operator,
        right: &RightOperand,
        ctx: &PolicyContext,
    ) -> Result<bool, EvaluationError> {
        if !MATCHER_OPERATORS.contains(&operator) {
            return Err(EvaluationError::UnsupportedOperator {
                operator,
                supported: MATCHER_OPERATORS.to_vec(),
            });
        }
        let agent = extractor::participant_agent(ctx)?;
        let identity = extractor::identity(agent)?;
        match_identity(identity, right, operator)
    }

    /// Reject right operands that are not DIDs with the configured prefix.
    ///
    /// A scalar is compared case-insensitively; list elements must carry
    /// the prefix exactly.
    pub fn validate(&self, _operator: Operator, right: &RightOperand) -> Result<(), ValidationError> {
        match right {
            RightOperand::Scalar(value) => {
                if value.to_lowercase().starts_with(&self.did_prefix) {
                    Ok(())
                } else {
                    Err(ValidationError::RightOperandPrefix {
                        prefix: self.did_prefix.trim_end_matches(':').to_string(),
                        value: value.clone(),
                    })
                }
            }
            RightOperand::List(values) => {
                if values.iter().all(|v| v.starts_with(&self.did_prefix)) {
                    Ok(())
                } else {
                    Err(ValidationError::RightOperandListPrefix {
                        prefix: self.did_prefix.trim_end_matches(':').to_string(),
                        values: values.clone(),
                    })
                }
            }
        }
    }
}
