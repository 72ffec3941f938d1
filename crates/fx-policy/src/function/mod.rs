//! # Constraint Functions
//!
//! Each function decides one kind of left operand:
//!
//! - `BusinessPartnerDID`: the participant identity against DIDs via the
//!   [operator matcher](crate::matcher).
//! - `Membership`: presence of a `MembershipCredential`.
//! - `CertificationType`: presence of a `CertificationTypeCredential` for a
//!   known certification.
//!
//! Functions never fail: every error becomes a reported problem on the
//! [`PolicyContext`] and a `false` result.

mod business_partner;
mod certification;
mod membership;

pub use business_partner::BusinessPartnerDidFunction;
pub use certification::CertificationTypeCredentialFunction;
pub use membership::MembershipCredentialFunction;

use fx_core::namespace::{BUSINESS_PARTNER_DID_LITERAL, CERTIFICATION_LITERAL, MEMBERSHIP_LITERAL};
use fx_core::{FxConfig, Operator, RightOperand, ValidationError};
use serde::{Deserialize, Serialize};

use crate::context::PolicyContext;
use crate::error::EvaluationError;
use crate::extractor;

/// Operators accepted by the credential presence functions.
pub const EQUALITY_OPERATORS: [Operator; 2] = [Operator::Eq, Operator::Neq];

/// The kinds of constraint function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FunctionKind {
    /// Business partner DID matching.
    BusinessPartnerDid,
    /// Membership credential presence.
    Membership,
    /// Certification credential presence.
    CertificationType,
}

impl FunctionKind {
    /// Every kind, in registration order.
    pub const ALL: [FunctionKind; 3] = [
        FunctionKind::Membership,
        FunctionKind::CertificationType,
        FunctionKind::BusinessPartnerDid,
    ];

    /// Literal left operand name, without namespace.
    pub fn literal(&self) -> &'static str {
        match self {
            FunctionKind::BusinessPartnerDid => BUSINESS_PARTNER_DID_LITERAL,
            FunctionKind::Membership => MEMBERSHIP_LITERAL,
            FunctionKind::CertificationType => CERTIFICATION_LITERAL,
        }
    }
}

impl std::fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.literal())
    }
}

/// A configured constraint function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintFunction {
    /// Business partner DID matching.
    BusinessPartnerDid(BusinessPartnerDidFunction),
    /// Membership credential presence.
    Membership(MembershipCredentialFunction),
    /// Certification credential presence.
    CertificationType(CertificationTypeCredentialFunction),
}

impl ConstraintFunction {
    /// Build the function of `kind` with namespaces from `config`.
    pub fn of_kind(kind: FunctionKind, config: &FxConfig) -> Self {
        match kind {
            FunctionKind::BusinessPartnerDid => {
                ConstraintFunction::BusinessPartnerDid(BusinessPartnerDidFunction::new(config))
            }
            FunctionKind::Membership => {
                ConstraintFunction::Membership(MembershipCredentialFunction::new(config))
            }
            FunctionKind::CertificationType => ConstraintFunction::CertificationType(
                CertificationTypeCredentialFunction::new(config),
            ),
        }
    }

    /// All functions, configured from `config`.
    pub fn standard(config: &FxConfig) -> Vec<ConstraintFunction> {
        FunctionKind::ALL
            .into_iter()
            .map(|kind| Self::of_kind(kind, config))
            .collect()
    }

    /// Which kind this is.
    pub fn kind(&self) -> FunctionKind {
        match self {
            ConstraintFunction::BusinessPartnerDid(_) => FunctionKind::BusinessPartnerDid,
            ConstraintFunction::Membership(_) => FunctionKind::Membership,
            ConstraintFunction::CertificationType(_) => FunctionKind::CertificationType,
        }
    }

    /// Whether this function decides constraints on `left_operand`.
    pub fn can_handle(&self, left_operand: &str) -> bool {
        match self {
            ConstraintFunction::BusinessPartnerDid(f) => f.can_handle(left_operand),
            ConstraintFunction::Membership(f) => f.can_handle(left_operand),
            ConstraintFunction::CertificationType(f) => f.can_handle(left_operand),
        }
    }

    /// Decide a constraint. Denials carry a problem in `ctx`.
    pub fn evaluate(
        &self,
        left_operand: &str,
        operator: Operator,
        right: &RightOperand,
        ctx: &mut PolicyContext,
    ) -> bool {
        tracing::trace!(function = %self.kind(), left_operand, %operator, "evaluating constraint");
        match self {
            ConstraintFunction::BusinessPartnerDid(f) => f.evaluate(operator, right, ctx),
            ConstraintFunction::Membership(f) => f.evaluate(operator, right, ctx),
            ConstraintFunction::CertificationType(f) => f.evaluate(operator, right, ctx),
        }
    }

    /// Check a constraint at policy authoring time.
    pub fn validate(&self, operator: Operator, right: &RightOperand) -> Result<(), ValidationError> {
        match self {
            ConstraintFunction::BusinessPartnerDid(f) => f.validate(operator, right),
            ConstraintFunction::Membership(_) | ConstraintFunction::CertificationType(_) => Ok(()),
        }
    }
}

/// First function in `functions` handling `left_operand`.
pub fn select<'a>(
    functions: &'a [ConstraintFunction],
    left_operand: &str,
) -> Option<&'a ConstraintFunction> {
    functions.iter().find(|f| f.can_handle(left_operand))
}

/// Evaluation flow shared by the credential presence functions.
///
/// Checks run in order and the first failure is reported:
/// operator, right operand shape, participant agent, credential list,
/// `check_literal`. Then the credentials are searched for
/// `credential_type`, a `(namespace, name)` pair, and `NEQ` inverts the
/// outcome.
pub(crate) fn evaluate_credential_presence<F>(
    operator: Operator,
    right: &RightOperand,
    ctx: &mut PolicyContext,
    credential_type: (&str, &str),
    check_literal: F,
) -> bool
where
    F: Fn(&str) -> Result<(), EvaluationError>,
{
    match credential_presence(operator, right, ctx, credential_type, check_literal) {
        Ok(found) => found,
        Err(err) => {
            ctx.report(&err);
            false
        }
    }
}

fn credential_presence<F>(
    operator: Operator,
    right: &RightOperand,
    ctx: &PolicyContext,
    credential_type: (&str, &str),
    check_literal: F,
) -> Result<bool, EvaluationError>
where
    F: Fn(&str) -> Result<(), EvaluationError>,
{
    if !EQUALITY_OPERATORS.contains(&operator) {
        return Err(EvaluationError::UnsupportedOperator {
            operator,
            supported: EQUALITY_OPERATORS.to_vec(),
        });
    }
    let literal = right
        .as_scalar()
        .ok_or(EvaluationError::InvalidRightOperandShape {
            operator,
            expected: "String",
            received: right.shape_name(),
        })?;
    let agent = extractor::participant_agent(ctx)?;
    let credentials = extractor::credential_list(agent)?;
    check_literal(literal)?;

    let (namespace, name) = credential_type;
    let found = credentials.iter().any(|vc| vc.has_type(namespace, name));
    Ok(if operator == Operator::Neq { !found } else { found })
}

/// `true` when `left_operand` begins with `namespace` followed by `literal`.
pub(crate) fn has_namespaced_prefix(left_operand: &str, namespace: &str, literal: &str) -> bool {
    left_operand
        .strip_prefix(namespace)
        .is_some_and(|rest| rest.starts_with(literal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_core::namespace::FX_POLICY_NS;

    #[test]
    fn standard_set_has_every_kind() {
        let functions = ConstraintFunction::standard(&FxConfig::default());
        let kinds: Vec<_> = functions.iter().map(ConstraintFunction::kind).collect();
        assert_eq!(kinds, FunctionKind::ALL.to_vec());
    }

    #[test]
    fn select_by_left_operand() {
        let functions = ConstraintFunction::standard(&FxConfig::default());
        let pick = |left: &str| select(&functions, left).map(ConstraintFunction::kind);
        assert_eq!(
            pick(&format!("{FX_POLICY_NS}Membership")),
            Some(FunctionKind::Membership)
        );
        assert_eq!(
            pick(&format!("{FX_POLICY_NS}CertificationType")),
            Some(FunctionKind::CertificationType)
        );
        assert_eq!(pick("BusinessPartnerDID"), Some(FunctionKind::BusinessPartnerDid));
        assert_eq!(
            pick(&format!("{FX_POLICY_NS}BusinessPartnerDID")),
            Some(FunctionKind::BusinessPartnerDid)
        );
        assert_eq!(
            pick(&format!("{FX_POLICY_NS}CertificationType.pcf")),
            Some(FunctionKind::CertificationType)
        );
        assert_eq!(pick(&format!("{FX_POLICY_NS}Dismantler")), None);
        assert_eq!(pick("Membership"), None);
        assert_eq!(pick("https://other.example/Membership"), None);
    }

    #[test]
    fn namespaced_prefix_is_anchored() {
        assert!(has_namespaced_prefix("https://ns/Membership", "https://ns/", "Membership"));
        assert!(has_namespaced_prefix("https://ns/Membership.gold", "https://ns/", "Membership"));
        assert!(!has_namespaced_prefix("Membership", "https://ns/", "Membership"));
        assert!(!has_namespaced_prefix("https://x/https://ns/Membership", "https://ns/", "Membership"));
    }
}
