//! # Participant Agent
//!
//! The host's view of an authenticated requester: a verified identity and
//! a bag of claims. The claims bag is heterogeneous by nature (the host
//! puts credentials, strings, and arbitrary JSON under different keys), so
//! values are a closed enum and shape checks happen at extraction time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::credential::VerifiableCredential;

/// A single value in a participant's claims bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    /// A plain string claim.
    Text(String),
    /// A list of verified credentials.
    Credentials(Vec<VerifiableCredential>),
    /// Any other JSON value.
    Json(serde_json::Value),
}

impl ClaimValue {
    /// Human-readable name of the claim's runtime shape.
    pub fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::Text(_) => "String",
            ClaimValue::Credentials(_) => "List<VerifiableCredential>",
            ClaimValue::Json(serde_json::Value::Null) => "null",
            ClaimValue::Json(serde_json::Value::Bool(_)) => "Boolean",
            ClaimValue::Json(serde_json::Value::Number(_)) => "Number",
            ClaimValue::Json(serde_json::Value::String(_)) => "String",
            ClaimValue::Json(serde_json::Value::Array(_)) => "List",
            ClaimValue::Json(serde_json::Value::Object(_)) => "Object",
        }
    }
}

impl From<Vec<VerifiableCredential>> for ClaimValue {
    fn from(credentials: Vec<VerifiableCredential>) -> Self {
        Self::Credentials(credentials)
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for ClaimValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// An authenticated requester as seen by policy evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAgent {
    /// Verified identity, e.g. `did:web:example.com:partnerA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Claims attached to the requester.
    #[serde(default)]
    pub claims: BTreeMap<String, ClaimValue>,
}

impl ParticipantAgent {
    /// An agent with the given identity and no claims.
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: Some(identity.into()),
            ..Self::default()
        }
    }

    /// An agent with no identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a claim.
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    /// The verified identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// The claims bag.
    pub fn claims(&self) -> &BTreeMap<String, ClaimValue> {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Issuer;

    #[test]
    fn type_names_distinguish_shapes() {
        assert_eq!(ClaimValue::Text("x".into()).type_name(), "String");
        assert_eq!(ClaimValue::Credentials(vec![]).type_name(), "List<VerifiableCredential>");
        assert_eq!(ClaimValue::Json(serde_json::json!({})).type_name(), "Object");
        assert_eq!(ClaimValue::Json(serde_json::json!(3)).type_name(), "Number");
    }

    #[test]
    fn agent_accessors() {
        let vc = VerifiableCredential::new(["MembershipCredential"], Issuer::new("did:web:i"));
        let agent = ParticipantAgent::new("did:web:example.com:partnerA")
            .with_claim("vc", vec![vc]);
        assert_eq!(agent.identity(), Some("did:web:example.com:partnerA"));
        assert!(matches!(agent.claims().get("vc"), Some(ClaimValue::Credentials(l)) if l.len() == 1));
        assert!(ParticipantAgent::anonymous().identity().is_none());
    }

    #[test]
    fn claims_bag_parses_credentials_from_json() {
        let json = serde_json::json!({
            "identity": "did:web:holder",
            "claims": {
                "vc": [{
                    "type": ["VerifiableCredential", "MembershipCredential"],
                    "issuer": {"id": "did:web:issuer"},
                    "issuanceDate": "2025-01-01T00:00:00Z",
                    "credentialSubject": [{"id": "did:web:holder"}]
                }],
                "region": "eu"
            }
        });
        let agent: ParticipantAgent = serde_json::from_value(json).unwrap();
        assert!(matches!(agent.claims.get("vc"), Some(ClaimValue::Credentials(_))));
        assert!(matches!(agent.claims.get("region"), Some(ClaimValue::Text(_))));
    }
}
