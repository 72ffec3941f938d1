#![deny(missing_docs)]

//! # fx-core — Foundational Types for the Factory-X Policy Extensions
//!
//! Every other crate in the workspace depends on this one. It carries no
//! behavior beyond construction-time validation:
//!
//! - [`Operator`], [`RightOperand`], and [`Constraint`]: the ODRL triple a
//!   host policy engine hands to constraint functions.
//! - [`VerifiableCredential`] and [`ParticipantAgent`]: the already-verified
//!   identity and claims a requester presents.
//! - [`Did`] and [`CertificationType`]: closed, validated vocabularies.
//! - [`FxConfig`]: namespaces injected into evaluators and extractors.
//! - [`ValidationError`] and [`ConfigError`]: structured errors with
//!   `thiserror`.

pub mod certification;
pub mod config;
pub mod constraint;
pub mod credential;
pub mod error;
pub mod identity;
pub mod namespace;
pub mod operator;
pub mod participant;

pub use certification::CertificationType;
pub use config::{FxConfig, ValidatorConfig};
pub use constraint::{Constraint, Permission, Policy, PolicyDefinition, RightOperand};
pub use credential::{CredentialSubject, Issuer, VerifiableCredential};
pub use error::{ConfigError, ValidationError};
pub use identity::{is_valid_web_did, Did};
pub use operator::{format_operators, Operator};
pub use participant::{ClaimValue, ParticipantAgent};
