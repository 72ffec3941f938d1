//! # Credential Extractor
//!
//! Pulls the identity and the verifiable credential list out of a
//! participant agent. Credentials live under the `vc` claim; the host may
//! hand them over already typed or as a raw JSON array, and both are
//! accepted.

use std::borrow::Cow;

use fx_core::namespace::VC_CLAIM;
use fx_core::{ClaimValue, ParticipantAgent, VerifiableCredential};
use serde::Deserialize;

use crate::context::PolicyContext;
use crate::error::ExtractionError;

/// The participant agent of `ctx`.
pub fn participant_agent(ctx: &PolicyContext) -> Result<&ParticipantAgent, ExtractionError> {
    ctx.participant_agent()
        .ok_or(ExtractionError::ParticipantAgentMissing)
}

/// The participant's identity.
pub fn identity(agent: &ParticipantAgent) -> Result<&str, ExtractionError> {
    agent.identity().ok_or(ExtractionError::IdentityMissing)
}

/// The non-empty credential list under the `vc` claim.
///
/// # Errors
///
/// - [`ExtractionError::ClaimMissing`] when there is no `vc` claim.
/// - [`ExtractionError::ClaimWrongType`] when the claim is not a list or
///   none of its elements is a credential.
/// - [`ExtractionError::ClaimEmpty`] when the list is empty.
pub fn credential_list(
    agent: &ParticipantAgent,
) -> Result<Cow<'_, [VerifiableCredential]>, ExtractionError> {
    let claim = agent
        .claims()
        .get(VC_CLAIM)
        .ok_or_else(|| ExtractionError::ClaimMissing {
            claim: VC_CLAIM.to_string(),
        })?;

    let credentials: Cow<'_, [VerifiableCredential]> = match claim {
        ClaimValue::Credentials(list) => Cow::Borrowed(list.as_slice()),
        ClaimValue::Json(serde_json::Value::Array(items)) => {
            let parsed = parse_credentials(items);
            if parsed.is_empty() && !items.is_empty() {
                return Err(ExtractionError::ClaimWrongType {
                    claim: VC_CLAIM.to_string(),
                    received: claim.type_name().to_string(),
                });
            }
            Cow::Owned(parsed)
        }
        other => {
            return Err(ExtractionError::ClaimWrongType {
                claim: VC_CLAIM.to_string(),
                received: other.type_name().to_string(),
            })
        }
    };

    if credentials.is_empty() {
        return Err(ExtractionError::ClaimEmpty {
            claim: VC_CLAIM.to_string(),
        });
    }
    Ok(credentials)
}

/// Parse each element on its own. Elements that are not credentials are
/// skipped so they cannot hide the ones that are.
fn parse_credentials(items: &[serde_json::Value]) -> Vec<VerifiableCredential> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match VerifiableCredential::deserialize(item) {
            Ok(vc) => Some(vc),
            Err(error) => {
                tracing::debug!(index, %error, "skipping malformed credential in 'vc' claim");
                None
            }
        })
        .collect()
}
