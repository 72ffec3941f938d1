//! # Decentralized Identifiers
//!
//! Business partners are identified by DIDs. Policies and DID group
//! mappings reference them with the `did:web` method only.

use crate::error::ValidationError;
use crate::namespace::DID_WEB;

/// A validated `did:web` identifier.
///
/// Reference: <https://w3c-ccg.github.io/did-method-web/>
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Did(String);

impl Did {
    /// Create a `did:web` DID.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] for blank input, other
    /// methods, and trailing colons.
    pub fn web(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if is_valid_web_did(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidDid(s))
        }
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `did` is a usable `did:web` identifier for DID group mappings:
/// not blank, `did:web:` prefixed, and not ending in `:`.
pub fn is_valid_web_did(did: &str) -> bool {
    !did.trim().is_empty() && did.starts_with(DID_WEB) && !did.ends_with(':')
}
