//! # Registration
//!
//! One-time wiring of the constraint functions and rule bindings into a
//! [`PolicyEngine`] and [`RuleBindingRegistry`] at startup.
//!
//! - Functions: membership, certification type and business partner DID,
//!   each in the `catalog`, `contract.negotiation` and `transfer.process`
//!   scopes.
//! - Dynamic binding: any left operand starting with
//!   `<policy ns>CertificationType` or `<policy ns>Membership` is bound in
//!   all six scopes, request scopes included.
//! - Static bindings: the ODRL `use` action and the business partner DID
//!   keys in the three function scopes.

use std::collections::BTreeSet;

use fx_core::namespace::{
    BUSINESS_PARTNER_DID_LITERAL, CERTIFICATION_LITERAL, MEMBERSHIP_LITERAL, ODRL_SCHEMA,
};
use fx_core::FxConfig;

use crate::engine::{PolicyEngine, RuleBindingRegistry};
use crate::function::{ConstraintFunction, FunctionKind};
use crate::scope::PolicyScope;

/// Literal names bound dynamically in every scope.
pub const DYNAMICALLY_BOUND_LITERALS: [&str; 2] = [CERTIFICATION_LITERAL, MEMBERSHIP_LITERAL];

/// Register every constraint function in every function scope.
pub fn register_functions(engine: &mut PolicyEngine, config: &FxConfig) {
    for scope in PolicyScope::FUNCTION_SCOPES {
        for kind in FunctionKind::ALL {
            engine.register_function(scope, ConstraintFunction::of_kind(kind, config));
        }
    }
    tracing::info!(
        scopes = PolicyScope::FUNCTION_SCOPES.len(),
        functions = FunctionKind::ALL.len(),
        "registered constraint functions"
    );
}

/// Declare the dynamic and static rule bindings.
pub fn register_bindings(registry: &mut RuleBindingRegistry, config: &FxConfig) {
    let prefixes: Vec<String> = DYNAMICALLY_BOUND_LITERALS
        .iter()
        .map(|literal| format!("{}{}", config.policy_namespace, literal))
        .collect();
    registry.dynamic_bind(move |key| {
        if prefixes.iter().any(|prefix| key.starts_with(prefix.as_str())) {
            PolicyScope::ALL.into_iter().collect()
        } else {
            BTreeSet::new()
        }
    });

    let use_action = format!("{ODRL_SCHEMA}use");
    let did_key = format!("{}{}", config.policy_namespace, BUSINESS_PARTNER_DID_LITERAL);
    for scope in PolicyScope::FUNCTION_SCOPES {
        registry.bind(use_action.clone(), scope);
        registry.bind(BUSINESS_PARTNER_DID_LITERAL, scope);
        registry.bind(did_key.clone(), scope);
    }
    tracing::info!(
        policy_namespace = %config.policy_namespace,
        "registered policy rule bindings"
    );
}

/// A ready-to-use engine and binding registry for `config`.
pub fn configured(config: &FxConfig) -> (PolicyEngine, RuleBindingRegistry) {
    let mut engine = PolicyEngine::new();
    let mut registry = RuleBindingRegistry::new();
    register_functions(&mut engine, config);
    register_bindings(&mut registry, config);
    (engine, registry)
}
