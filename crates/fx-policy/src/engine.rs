//! # Policy Engine and Rule Bindings
//!
//! A minimal stand-in for the connector's policy engine: enough to run the
//! registered constraint functions over whole policies.
//!
//! - [`RuleBindingRegistry`] decides which left operands are *in scope* for
//!   a phase, statically or through dynamic binders.
//! - [`PolicyEngine`] keeps the constraint functions per phase and
//!   evaluates permissions.
//!
//! Constraints whose left operand is not bound in the evaluated scope are
//! skipped, not denied. A bound constraint with no function in the scope
//! is denied with a `NoFunction` problem.
//!
//! Both types are built once at startup and only read afterwards, so they
//! can be shared across request threads behind an `Arc`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fx_core::{Constraint, Permission, Policy, ValidationError};

use crate::context::PolicyContext;
use crate::error::EvaluationError;
use crate::function::{select, ConstraintFunction};
use crate::scope::PolicyScope;

// ---------------------------------------------------------------------------
// RuleBindingRegistry
// ---------------------------------------------------------------------------

/// A binder computing scopes for a rule key at lookup time.
pub type DynamicBinder = Box<dyn Fn(&str) -> BTreeSet<PolicyScope> + Send + Sync>;

/// Which rule keys (actions and left operands) apply in which scopes.
#[derive(Default)]
pub struct RuleBindingRegistry {
    bindings: BTreeMap<String, BTreeSet<PolicyScope>>,
    dynamic: Vec<DynamicBinder>,
}

impl fmt::Debug for RuleBindingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleBindingRegistry")
            .field("bindings", &self.bindings)
            .field("dynamic_binders", &self.dynamic.len())
            .finish()
    }
}

impl RuleBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` in `scope`. Binding twice is a no-op.
    pub fn bind(&mut self, key: impl Into<String>, scope: PolicyScope) {
        self.bindings.entry(key.into()).or_default().insert(scope);
    }

    /// Add a binder consulted for every lookup.
    pub fn dynamic_bind<F>(&mut self, binder: F)
    where
        F: Fn(&str) -> BTreeSet<PolicyScope> + Send + Sync + 'static,
    {
        self.dynamic.push(Box::new(binder));
    }

    /// Every scope `key` is bound in, static and dynamic.
    pub fn bindings(&self, key: &str) -> BTreeSet<PolicyScope> {
        let mut scopes = self.bindings.get(key).cloned().unwrap_or_default();
        for binder in &self.dynamic {
            scopes.extend(binder(key));
        }
        scopes
    }

    /// Whether `key` is bound in `scope`.
    pub fn is_in_scope(&self, key: &str, scope: PolicyScope) -> bool {
        self.bindings.get(key).is_some_and(|s| s.contains(&scope))
            || self.dynamic.iter().any(|binder| binder(key).contains(&scope))
    }
}

// ---------------------------------------------------------------------------
// PolicyEngine
// ---------------------------------------------------------------------------

/// Constraint functions per scope, and the evaluation loop over them.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    functions: BTreeMap<PolicyScope, Vec<ConstraintFunction>>,
}

impl PolicyEngine {
    /// Create an engine with no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` in `scope`. Replaces a function of the same kind.
    pub fn register_function(&mut self, scope: PolicyScope, function: ConstraintFunction) {
        let functions = self.functions.entry(scope).or_default();
        match functions.iter_mut().find(|f| f.kind() == function.kind()) {
            Some(existing) => *existing = function,
            None => functions.push(function),
        }
    }

    /// Functions registered in `scope`, in registration order.
    pub fn functions_for(&self, scope: PolicyScope) -> &[ConstraintFunction] {
        self.functions.get(&scope).map(Vec::as_slice).unwrap_or_default()
    }

    /// Evaluate one constraint in the context's scope.
    ///
    /// Returns `true` for constraints that are not bound in the scope.
    pub fn evaluate_constraint(
        &self,
        bindings: &RuleBindingRegistry,
        constraint: &Constraint,
        ctx: &mut PolicyContext,
    ) -> bool {
        let scope = ctx.scope();
        if !bindings.is_in_scope(&constraint.left_operand, scope) {
            tracing::debug!(
                left_operand = %constraint.left_operand,
                %scope,
                "constraint not bound in scope, skipped"
            );
            return true;
        }
        match select(self.functions_for(scope), &constraint.left_operand) {
            Some(function) => function.evaluate(
                &constraint.left_operand,
                constraint.operator,
                &constraint.right_operand,
                ctx,
            ),
            None => {
                ctx.report(&EvaluationError::NoFunction {
                    left_operand: constraint.left_operand.clone(),
                    scope: scope.to_string(),
                });
                false
            }
        }
    }

    /// A permission holds when every constraint holds. All constraints are
    /// evaluated so every problem is reported.
    pub fn evaluate_permission(
        &self,
        bindings: &RuleBindingRegistry,
        permission: &Permission,
        ctx: &mut PolicyContext,
    ) -> bool {
        let mut granted = true;
        for constraint in &permission.constraints {
            granted &= self.evaluate_constraint(bindings, constraint, ctx);
        }
        granted
    }

    /// A policy holds when every permission holds.
    pub fn evaluate_policy(
        &self,
        bindings: &RuleBindingRegistry,
        policy: &Policy,
        ctx: &mut PolicyContext,
    ) -> bool {
        let mut granted = true;
        for permission in &policy.permissions {
            granted &= self.evaluate_permission(bindings, permission, ctx);
        }
        tracing::debug!(scope = %ctx.scope(), granted, problems = ctx.problems().len(), "policy evaluated");
        granted
    }

    /// Run authoring-time validation of every constraint that some
    /// registered function handles.
    pub fn validate(&self, policy: &Policy) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = policy
            .constraints()
            .filter_map(|constraint| {
                let function = self
                    .functions
                    .values()
                    .find_map(|functions| select(functions, &constraint.left_operand))?;
                function
                    .validate(constraint.operator, &constraint.right_operand)
                    .err()
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
