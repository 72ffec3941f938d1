//! Per-evaluation policy context.
//!
//! Created by the host for one policy evaluation and discarded afterwards.
//! Constraint functions read the participant agent from it and append
//! human-readable problems when they deny.

use fx_core::ParticipantAgent;
use serde::Serialize;

use crate::error::{EvaluationError, EvaluationErrorKind};
use crate::scope::PolicyScope;

/// A problem reported during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Kind of the failure, when it came from a typed error.
    pub kind: Option<EvaluationErrorKind>,
    /// Message shown to the counterparty.
    pub message: String,
}

/// Mutable state of a single policy evaluation.
#[derive(Debug, Clone)]
pub struct PolicyContext {
    scope: PolicyScope,
    participant_agent: Option<ParticipantAgent>,
    problems: Vec<Problem>,
}

impl PolicyContext {
    /// A context carrying the requesting participant.
    pub fn new(scope: PolicyScope, participant_agent: ParticipantAgent) -> Self {
        Self {
            scope,
            participant_agent: Some(participant_agent),
            problems: Vec::new(),
        }
    }

    /// A context in which the host supplied no participant.
    pub fn without_participant(scope: PolicyScope) -> Self {
        Self {
            scope,
            participant_agent: None,
            problems: Vec::new(),
        }
    }

    /// Scope being evaluated.
    pub fn scope(&self) -> PolicyScope {
        self.scope
    }

    /// The requesting participant, if present.
    pub fn participant_agent(&self) -> Option<&ParticipantAgent> {
        self.participant_agent.as_ref()
    }

    /// Append a free-form problem.
    pub fn report_problem(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(scope = %self.scope, %message, "policy problem reported");
        self.problems.push(Problem {
            kind: None,
            message,
        });
    }

    /// Append the problem described by `error`.
    pub fn report(&mut self, error: &EvaluationError) {
        let message = error.to_string();
        tracing::debug!(scope = %self.scope, kind = ?error.kind(), %message, "policy problem reported");
        self.problems.push(Problem {
            kind: Some(error.kind()),
            message,
        });
    }

    /// Problems reported so far, in order.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Whether any problem was reported.
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Whether a problem of `kind` was reported.
    pub fn has_problem_of(&self, kind: EvaluationErrorKind) -> bool {
        self.problems.iter().any(|p| p.kind == Some(kind))
    }
}
