#![deny(missing_docs)]

//! # fx-policy — Credential-Based Constraint Functions
//!
//! Authorization decisions for Factory-X connector policies. Given a
//! constraint `(left operand, operator, right operand)` and the requesting
//! [`ParticipantAgent`](fx_core::ParticipantAgent), decide whether access
//! is granted:
//!
//! - [`matcher`]: identity against DIDs under the ODRL operators.
//! - [`extractor`]: identity and credential list from the claims bag.
//! - [`function`]: the business partner DID, membership, and certification
//!   type constraint functions.
//! - [`registration`]: wiring into [`PolicyEngine`] and
//!   [`RuleBindingRegistry`] for the catalog, negotiation, and transfer
//!   scopes.
//! - [`validation`]: management API checks for policy definitions and DID
//!   groups.
//!
//! Evaluation never fails with an error. Every denial comes with a problem
//! on the [`PolicyContext`].

pub mod context;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod function;
pub mod matcher;
pub mod registration;
pub mod scope;
pub mod validation;

pub use context::{PolicyContext, Problem};
pub use engine::{PolicyEngine, RuleBindingRegistry};
pub use error::{EvaluationError, EvaluationErrorKind, ExtractionError};
pub use function::{ConstraintFunction, FunctionKind};
pub use matcher::match_identity;
pub use registration::{configured, register_bindings, register_functions};
pub use scope::PolicyScope;
pub use validation::{validate_did, PolicyDefinitionValidator, ValidationResult, Violation};
