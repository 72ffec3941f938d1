//! # Evaluation Errors
//!
//! Every expected failure of constraint evaluation has a variant here. None
//! of them crosses a constraint function boundary: functions report the
//! `Display` text to the [`PolicyContext`](crate::context::PolicyContext)
//! and deny. The texts are what operators see in negotiation and transfer
//! rejections, so they stay stable.

use fx_core::operator::format_operators;
use fx_core::Operator;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures while pulling identity or credentials out of a participant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The policy context carries no participant agent.
    #[error("Required PolicyContext data not found: ParticipantAgent")]
    ParticipantAgentMissing,

    /// The participant has no identity.
    #[error("Identity of the participant agent cannot be null")]
    IdentityMissing,

    /// The credential claim is absent.
    #[error("ParticipantAgent did not contain a '{claim}' claim.")]
    ClaimMissing {
        /// Claim key that was looked up.
        claim: String,
    },

    /// The credential claim is present but is not a credential list.
    #[error("ParticipantAgent contains a '{claim}' claim, but the type is incorrect. Expected List<VerifiableCredential>, received {received}.")]
    ClaimWrongType {
        /// Claim key that was looked up.
        claim: String,
        /// Name of the shape actually found.
        received: String,
    },

    /// The credential claim is an empty list.
    #[error("ParticipantAgent contains a '{claim}' claim but it did not contain any VerifiableCredentials.")]
    ClaimEmpty {
        /// Claim key that was looked up.
        claim: String,
    },
}

/// Every reason a constraint function can deny with a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The operator is not in the function's supported set.
    #[error("Invalid operator: this constraint only allows the following operators: {}, but received '{operator}'.", format_operators(.supported))]
    UnsupportedOperator {
        /// Operator found in the constraint.
        operator: Operator,
        /// Operators the function accepts.
        supported: Vec<Operator>,
    },

    /// The right operand has the wrong shape for the operator.
    #[error("Invalid right-value: operator '{operator}' requires a '{expected}' but got a '{received}'")]
    InvalidRightOperandShape {
        /// Operator found in the constraint.
        operator: Operator,
        /// Shape the operator needs.
        expected: &'static str,
        /// Shape actually supplied.
        received: &'static str,
    },

    /// The right operand names a certification outside the known set.
    #[error("Certification type '{value}' is not of a defined type.")]
    UnrecognizedLiteral {
        /// The unrecognized right operand.
        value: String,
    },

    /// The right operand is not the single literal the function accepts.
    #[error("Right-operand must be equal to '{expected}', but was '{value}'")]
    InvalidLiteral {
        /// The literal the function requires.
        expected: &'static str,
        /// The right operand supplied.
        value: String,
    },

    /// Identity or credentials could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// A constraint is bound in the scope but no registered function handles it.
    #[error("No constraint function registered for left operand '{left_operand}' in scope '{scope}'")]
    NoFunction {
        /// Left operand of the constraint.
        left_operand: String,
        /// Scope being evaluated.
        scope: String,
    },
}

/// Discriminator for reported problems, so callers match on kinds rather
/// than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationErrorKind {
    /// Operator outside the function's supported set.
    UnsupportedOperator,
    /// Participant agent absent from the context.
    MissingParticipantAgent,
    /// Participant has no identity.
    MissingIdentity,
    /// Right operand shape mismatch.
    InvalidRightOperandShape,
    /// Credential claim missing.
    ClaimMissing,
    /// Credential claim of the wrong type.
    ClaimWrongType,
    /// Credential claim empty.
    ClaimEmpty,
    /// Right operand outside a fixed enumeration.
    UnrecognizedLiteral,
    /// Right operand is not the required literal.
    InvalidLiteral,
    /// Bound constraint without a handling function.
    NoFunction,
}

impl EvaluationError {
    /// The kind of this error.
    pub fn kind(&self) -> EvaluationErrorKind {
        match self {
            EvaluationError::UnsupportedOperator { .. } => EvaluationErrorKind::UnsupportedOperator,
            EvaluationError::InvalidRightOperandShape { .. } => {
                EvaluationErrorKind::InvalidRightOperandShape
            }
            EvaluationError::UnrecognizedLiteral { .. } => EvaluationErrorKind::UnrecognizedLiteral,
            EvaluationError::InvalidLiteral { .. } => EvaluationErrorKind::InvalidLiteral,
            EvaluationError::NoFunction { .. } => EvaluationErrorKind::NoFunction,
            EvaluationError::Extraction(e) => match e {
                ExtractionError::ParticipantAgentMissing => {
                    EvaluationErrorKind::MissingParticipantAgent
                }
                ExtractionError::IdentityMissing => EvaluationErrorKind::MissingIdentity,
                ExtractionError::ClaimMissing { .. } => EvaluationErrorKind::ClaimMissing,
                ExtractionError::ClaimWrongType { .. } => EvaluationErrorKind::ClaimWrongType,
                ExtractionError::ClaimEmpty { .. } => EvaluationErrorKind::ClaimEmpty,
            },
        }
    }
}
