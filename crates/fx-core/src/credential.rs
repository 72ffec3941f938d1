//! # Verifiable Credentials
//!
//! The read-only view of a verifiable credential that policy evaluation
//! needs: type tags, subject claims, issuer, and validity window. Signature
//! and revocation checks happen in the host before a credential ever lands
//! in a participant's claims, so none of that is modelled here.
//!
//! Deserialization accepts the shapes the W3C data model allows: `issuer`
//! as a bare identifier or an object, `type` and `credentialSubject` as a
//! single value or an array, and `issuanceDate`/`validFrom` as optional.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Credential issuer: an identifier plus free-form properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IssuerRepr")]
pub struct Issuer {
    /// Issuer identifier, typically a DID.
    pub id: String,
    /// Additional issuer properties.
    #[serde(flatten)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl Issuer {
    /// An issuer with no extra properties.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }
}

#[derive(Deserialize)]
struct IssuerObject {
    id: String,
    #[serde(flatten)]
    properties: BTreeMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IssuerRepr {
    Id(String),
    Object(IssuerObject),
}

impl From<IssuerRepr> for Issuer {
    fn from(repr: IssuerRepr) -> Self {
        match repr {
            IssuerRepr::Id(id) => Issuer::new(id),
            IssuerRepr::Object(IssuerObject { id, properties }) => Issuer { id, properties },
        }
    }
}

/// One credential subject and its claims.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialSubject {
    /// Subject identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Subject claims. Keys may be namespaced IRIs.
    #[serde(flatten)]
    pub claims: BTreeMap<String, serde_json::Value>,
}

impl CredentialSubject {
    /// A subject with the given identifier and no claims.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            claims: BTreeMap::new(),
        }
    }

    /// Add a claim.
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }
}

/// A verified credential held by a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    /// Credential identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Type tags, e.g. `VerifiableCredential` and `MembershipCredential`,
    /// possibly namespaced.
    #[serde(rename = "type", deserialize_with = "one_or_many")]
    pub types: Vec<String>,

    /// Who issued the credential.
    pub issuer: Issuer,

    /// When the credential was issued.
    #[serde(default, alias = "validFrom", skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<DateTime<Utc>>,

    /// Optional expiry.
    #[serde(default, alias = "validUntil", skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Credential subjects.
    #[serde(default, deserialize_with = "one_or_many")]
    pub credential_subject: Vec<CredentialSubject>,
}

impl VerifiableCredential {
    /// A credential with the given type tags issued now.
    pub fn new<I, S>(types: I, issuer: Issuer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            types: types.into_iter().map(Into::into).collect(),
            issuer,
            issuance_date: Some(Utc::now()),
            expiration_date: None,
            credential_subject: Vec::new(),
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the expiry.
    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration);
        self
    }

    /// Append a subject.
    pub fn with_subject(mut self, subject: CredentialSubject) -> Self {
        self.credential_subject.push(subject);
        self
    }

    /// Whether any type tag names `name`, either bare or qualified with
    /// `namespace` (`{namespace}MembershipCredential`).
    ///
    /// Tags qualified with any other namespace do not match.
    pub fn has_type(&self, namespace: &str, name: &str) -> bool {
        self.types.iter().any(|tag| {
            tag == name || tag.strip_prefix(namespace).is_some_and(|local| local == name)
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::namespace::FX_CREDENTIAL_NS;

    fn membership() -> VerifiableCredential {
        VerifiableCredential::new(
            [
                format!("{FX_CREDENTIAL_NS}VerifiableCredential"),
                format!("{FX_CREDENTIAL_NS}MembershipCredential"),
            ],
            Issuer::new("did:web:issuer"),
        )
        .with_subject(
            CredentialSubject::new("subject-id")
                .with_claim(format!("{FX_CREDENTIAL_NS}holderIdentifier"), "did:web:holder"),
        )
    }

    #[test]
    fn has_type_matches_plain_and_namespaced_tags() {
        let vc = membership();
        assert!(vc.has_type(FX_CREDENTIAL_NS, "MembershipCredential"));
        assert!(vc.has_type(FX_CREDENTIAL_NS, "VerifiableCredential"));
        assert!(!vc.has_type(FX_CREDENTIAL_NS, "PcfCredential"));

        let plain = VerifiableCredential::new(["MembershipCredential"], Issuer::new("x"));
        assert!(plain.has_type(FX_CREDENTIAL_NS, "MembershipCredential"));
    }

    #[test]
    fn has_type_requires_the_configured_namespace() {
        let vc = VerifiableCredential::new(
            ["https://other.example/credentials/MembershipCredential"],
            Issuer::new("x"),
        );
        assert!(!vc.has_type(FX_CREDENTIAL_NS, "MembershipCredential"));
        assert!(vc.has_type("https://other.example/credentials/", "MembershipCredential"));
    }

    #[test]
    fn has_type_does_not_match_suffix_inside_local_name() {
        let vc = VerifiableCredential::new(
            [format!("{FX_CREDENTIAL_NS}FormerMembershipCredential")],
            Issuer::new("x"),
        );
        assert!(!vc.has_type(FX_CREDENTIAL_NS, "MembershipCredential"));
    }

    #[test]
    fn serde_uses_w3c_field_names() {
        let vc = membership().with_id(uuid::Uuid::new_v4().to_string());
        let value = serde_json::to_value(&vc).unwrap();
        assert!(value.get("type").is_some());
        assert!(value.get("issuanceDate").is_some());
        assert!(value.get("credentialSubject").is_some());
        let back: VerifiableCredential = serde_json::from_value(value).unwrap();
        assert_eq!(back, vc);
    }

    #[test]
    fn issuer_as_plain_identifier() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "type": ["VerifiableCredential", "MembershipCredential"],
            "issuer": "did:web:issuer.example",
            "issuanceDate": "2025-01-01T00:00:00Z",
            "credentialSubject": [{"id": "did:web:holder"}]
        }))
        .unwrap();
        assert_eq!(vc.issuer, Issuer::new("did:web:issuer.example"));
    }

    #[test]
    fn issuer_object_keeps_properties() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "type": "MembershipCredential",
            "issuer": {"id": "did:web:issuer.example", "name": "Factory-X"},
        }))
        .unwrap();
        assert_eq!(vc.issuer.id, "did:web:issuer.example");
        assert_eq!(vc.issuer.properties.get("name"), Some(&json!("Factory-X")));
        assert_eq!(vc.types, vec!["MembershipCredential".to_string()]);
    }

    #[test]
    fn single_subject_object() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "type": ["VerifiableCredential"],
            "issuer": "did:web:issuer.example",
            "credentialSubject": {"id": "did:web:holder", "holderIdentifier": "BPNL01"}
        }))
        .unwrap();
        assert_eq!(vc.credential_subject.len(), 1);
        assert_eq!(vc.credential_subject[0].id.as_deref(), Some("did:web:holder"));
        assert_eq!(
            vc.credential_subject[0].claims.get("holderIdentifier"),
            Some(&json!("BPNL01"))
        );
    }

    #[test]
    fn validity_dates_are_optional_and_accept_v2_names() {
        let vc: VerifiableCredential = serde_json::from_value(json!({
            "type": ["VerifiableCredential"],
            "issuer": "did:web:issuer.example",
            "validFrom": "2025-01-01T00:00:00Z",
            "validUntil": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(vc.issuance_date.is_some());
        assert!(vc.expiration_date.is_some());
        assert!(vc.credential_subject.is_empty());

        let undated: VerifiableCredential = serde_json::from_value(json!({
            "type": ["VerifiableCredential"],
            "issuer": "did:web:issuer.example"
        }))
        .unwrap();
        assert!(undated.issuance_date.is_none());
    }
}
