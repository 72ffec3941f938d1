//! # Credential Scope Extraction
//!
//! Before a consumer sends a catalog, contract, or transfer request, it
//! asks its credential service for the verifiable presentations the
//! provider's policy will check. The scopes to request are derived from
//! the policy's left operands:
//!
//! ```text
//! <policy ns>CertificationType.pcf  ->  <type ns>:CertificationTypeCredential:read
//! <policy ns>membership             ->  <type ns>:MembershipCredential:read
//! ```
//!
//! The operator and right operand do not influence the scope.

use std::collections::BTreeSet;
use std::fmt;

use fx_core::namespace::CREDENTIAL_LITERAL;
use fx_core::{FxConfig, Operator, Policy, RightOperand};

use crate::message::RequestPolicyContext;

// ---------------------------------------------------------------------------
// ScopeExtractor Trait
// ---------------------------------------------------------------------------

/// Derives credential scopes from a single constraint.
pub trait ScopeExtractor: Send + Sync + fmt::Debug {
    /// Scopes required to satisfy `left operator right`.
    fn extract_scopes(
        &self,
        left_operand: &str,
        operator: Operator,
        right_operand: &RightOperand,
        ctx: &RequestPolicyContext,
    ) -> BTreeSet<String>;
}

// ---------------------------------------------------------------------------
// CredentialScopeExtractor
// ---------------------------------------------------------------------------

/// Maps Factory-X left operands to `<type ns>:<Token>Credential:read` scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialScopeExtractor {
    policy_namespace: String,
    credential_type_namespace: String,
}

impl CredentialScopeExtractor {
    /// An extractor recognizing `policy_namespace` and prefixing scopes
    /// with `credential_type_namespace`.
    pub fn new(
        policy_namespace: impl Into<String>,
        credential_type_namespace: impl Into<String>,
    ) -> Self {
        Self {
            policy_namespace: policy_namespace.into(),
            credential_type_namespace: credential_type_namespace.into(),
        }
    }

    /// Configure from `config`.
    pub fn from_config(config: &FxConfig) -> Self {
        Self::new(&config.policy_namespace, &config.credential_type_namespace)
    }

    /// The credential type token of `left_operand`: the namespace stripped,
    /// cut at the first `.`, first letter upper-cased. `None` for foreign
    /// namespaces and empty tokens.
    pub fn credential_type(&self, left_operand: &str) -> Option<String> {
        let local = left_operand.strip_prefix(&self.policy_namespace)?;
        let token = local.split('.').next().unwrap_or_default();
        let mut chars = token.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    }
}

impl ScopeExtractor for CredentialScopeExtractor {
    fn extract_scopes(
        &self,
        left_operand: &str,
        _operator: Operator,
        _right_operand: &RightOperand,
        ctx: &RequestPolicyContext,
    ) -> BTreeSet<String> {
        let Some(message) = ctx.message() else {
            tracing::warn!(
                "RequestContext not found in the PolicyContext: scope cannot be extracted from the policy. Defaulting to empty scopes"
            );
            return BTreeSet::new();
        };
        if !message.is_supported() {
            return BTreeSet::new();
        }
        match self.credential_type(left_operand) {
            Some(token) => BTreeSet::from([format!(
                "{}:{token}{CREDENTIAL_LITERAL}:read",
                self.credential_type_namespace
            )]),
            None => BTreeSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// ScopeExtractorRegistry
// ---------------------------------------------------------------------------

/// Registered extractors, run over whole policies.
#[derive(Debug, Default)]
pub struct ScopeExtractorRegistry {
    extractors: Vec<Box<dyn ScopeExtractor>>,
}

impl ScopeExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the credential scope extractor for `config`.
    pub fn with_credential_extractor(config: &FxConfig) -> Self {
        let mut registry = Self::new();
        registry.register(CredentialScopeExtractor::from_config(config));
        registry
    }

    /// Add an extractor.
    pub fn register(&mut self, extractor: impl ScopeExtractor + 'static) {
        self.extractors.push(Box::new(extractor));
    }

    /// Number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Whether no extractor is registered.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Union of the scopes every extractor derives from every constraint
    /// of `policy`.
    pub fn collect(&self, policy: &Policy, ctx: &RequestPolicyContext) -> BTreeSet<String> {
        let mut scopes = BTreeSet::new();
        for constraint in policy.constraints() {
            for extractor in &self.extractors {
                scopes.extend(extractor.extract_scopes(
                    &constraint.left_operand,
                    constraint.operator,
                    &constraint.right_operand,
                    ctx,
                ));
            }
        }
        tracing::debug!(count = scopes.len(), message = ?ctx.message(), "collected credential scopes");
        scopes
    }
}
