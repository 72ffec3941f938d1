//! # Namespaces and Well-Known Literals
//!
//! Default IRIs and literal names shared by the policy functions and the
//! scope extractor. These are defaults only: runtime components receive
//! their namespaces through [`FxConfig`](crate::config::FxConfig).

/// Default namespace of Factory-X policy left operands.
pub const FX_POLICY_NS: &str = "https://w3id.org/factoryx/policy/v1.0/";

/// Default namespace of Factory-X credential types and subject claims.
pub const FX_CREDENTIAL_NS: &str = "https://w3id.org/factoryx/credentials/v1.0/";

/// Default namespace used when formatting DCP credential scopes.
pub const CREDENTIAL_TYPE_NAMESPACE: &str = "org.factoryx.vc.type";

/// ODRL vocabulary namespace.
pub const ODRL_SCHEMA: &str = "http://www.w3.org/ns/odrl/2/";

/// Required prefix of business partner DIDs.
pub const DID_WEB: &str = "did:web:";

/// Claim key under which the participant's verified credentials are stored.
pub const VC_CLAIM: &str = "vc";

/// Suffix appended to a credential type token to name the credential.
pub const CREDENTIAL_LITERAL: &str = "Credential";

/// Left operand literal of membership constraints.
pub const MEMBERSHIP_LITERAL: &str = "Membership";

/// Left operand literal of certification constraints.
pub const CERTIFICATION_LITERAL: &str = "CertificationType";

/// Left operand of business partner DID constraints.
pub const BUSINESS_PARTNER_DID_LITERAL: &str = "BusinessPartnerDID";

/// The only right operand a membership constraint accepts.
pub const ACTIVE: &str = "active";

/// Return `true` if `namespace` ends with a character that makes simple
/// concatenation with a local name produce a valid IRI.
pub fn is_terminated(namespace: &str) -> bool {
    namespace.ends_with('/') || namespace.ends_with('#')
}
