#![deny(missing_docs)]

//! # fx-dcp — Credential Scopes for Outgoing Requests
//!
//! Maps Factory-X policy constraints to the Decentralized Claims Protocol
//! scopes a consumer must request from its credential service, so the
//! presentation it sends along with a catalog, contract, or transfer
//! request carries the credentials the provider will check.
//!
//! Extraction fails open: without a request message, for unsupported
//! messages, or for foreign left operands the result is the empty set.

pub mod message;
pub mod scope;

pub use message::{MessageKind, RequestContext, RequestPolicyContext};
pub use scope::{CredentialScopeExtractor, ScopeExtractor, ScopeExtractorRegistry};
