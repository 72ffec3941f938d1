//! Outgoing DSP messages and the request context a scope extractor sees.

use fx_policy::PolicyScope;
use serde::{Deserialize, Serialize};

/// Kind of the remote message being prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// Catalog request.
    CatalogRequest,
    /// Contract request opening or continuing a negotiation.
    ContractRequest,
    /// Transfer request.
    TransferRequest,
    /// Dataset request for a single catalog entry.
    DatasetRequest,
    /// Contract agreement sent by a provider.
    ContractAgreement,
    /// Transfer start sent by a provider.
    TransferStart,
    /// Transfer termination.
    TransferTermination,
}

impl MessageKind {
    /// Messages for which credential scopes are requested.
    pub const SUPPORTED: [MessageKind; 3] = [
        MessageKind::CatalogRequest,
        MessageKind::ContractRequest,
        MessageKind::TransferRequest,
    ];

    /// Whether scopes are extracted for this message.
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// The request scope a supported message is evaluated in.
    pub fn request_scope(&self) -> Option<PolicyScope> {
        match self {
            MessageKind::CatalogRequest => Some(PolicyScope::RequestCatalog),
            MessageKind::ContractRequest => Some(PolicyScope::RequestContractNegotiation),
            MessageKind::TransferRequest => Some(PolicyScope::RequestTransferProcess),
            _ => None,
        }
    }
}

/// The outgoing request being prepared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The message, once the host has built it.
    pub message: Option<MessageKind>,
}

impl RequestContext {
    /// A request context for `message`.
    pub fn for_message(message: MessageKind) -> Self {
        Self {
            message: Some(message),
        }
    }
}

/// Policy context of a request scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestPolicyContext {
    /// The request context, if the host supplied one.
    pub request_context: Option<RequestContext>,
}

impl RequestPolicyContext {
    /// A context carrying `message`.
    pub fn for_message(message: MessageKind) -> Self {
        Self {
            request_context: Some(RequestContext::for_message(message)),
        }
    }

    /// A context without request context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The message kind, if both request context and message are present.
    pub fn message(&self) -> Option<MessageKind> {
        self.request_context.as_ref().and_then(|rc| rc.message)
    }
}
