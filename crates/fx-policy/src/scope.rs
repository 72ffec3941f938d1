//! # Policy Scopes
//!
//! Named phases of the connector lifecycle in which a policy is evaluated.
//! The three function scopes run constraint functions; the `request.*`
//! scopes run while a consumer assembles its outgoing DSP request and
//! are where credential scopes are extracted.

use serde::{Deserialize, Serialize};

/// A policy evaluation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyScope {
    /// Provider-side catalog evaluation.
    #[serde(rename = "catalog")]
    Catalog,
    /// Provider-side contract negotiation evaluation.
    #[serde(rename = "contract.negotiation")]
    ContractNegotiation,
    /// Provider-side transfer process evaluation.
    #[serde(rename = "transfer.process")]
    TransferProcess,
    /// Consumer-side catalog request.
    #[serde(rename = "request.catalog")]
    RequestCatalog,
    /// Consumer-side contract request.
    #[serde(rename = "request.contract.negotiation")]
    RequestContractNegotiation,
    /// Consumer-side transfer request.
    #[serde(rename = "request.transfer.process")]
    RequestTransferProcess,
}

impl PolicyScope {
    /// All scopes, request scopes first.
    pub const ALL: [PolicyScope; 6] = [
        PolicyScope::RequestCatalog,
        PolicyScope::RequestContractNegotiation,
        PolicyScope::RequestTransferProcess,
        PolicyScope::Catalog,
        PolicyScope::ContractNegotiation,
        PolicyScope::TransferProcess,
    ];

    /// Scopes in which constraint functions are registered.
    pub const FUNCTION_SCOPES: [PolicyScope; 3] = [
        PolicyScope::Catalog,
        PolicyScope::ContractNegotiation,
        PolicyScope::TransferProcess,
    ];

    /// Canonical scope name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyScope::Catalog => "catalog",
            PolicyScope::ContractNegotiation => "contract.negotiation",
            PolicyScope::TransferProcess => "transfer.process",
            PolicyScope::RequestCatalog => "request.catalog",
            PolicyScope::RequestContractNegotiation => "request.contract.negotiation",
            PolicyScope::RequestTransferProcess => "request.transfer.process",
        }
    }

    /// Parse a canonical scope name.
    pub fn parse(value: &str) -> Option<PolicyScope> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Whether this is a consumer-side request scope.
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            PolicyScope::RequestCatalog
                | PolicyScope::RequestContractNegotiation
                | PolicyScope::RequestTransferProcess
        )
    }
}

impl std::fmt::Display for PolicyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
