//! Membership constraint: `<ns>Membership EQ "active"` holds when the
//! participant presents a `MembershipCredential`.

use fx_core::namespace::{ACTIVE, CREDENTIAL_LITERAL, MEMBERSHIP_LITERAL};
use fx_core::{FxConfig, Operator, RightOperand};

use crate::context::PolicyContext;
use crate::error::EvaluationError;

use super::{evaluate_credential_presence, has_namespaced_prefix};

/// Constraint function for `Membership` left operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipCredentialFunction {
    policy_namespace: String,
    credential_namespace: String,
    credential_type: String,
}

impl MembershipCredentialFunction {
    /// Configure from `config`.
    pub fn new(config: &FxConfig) -> Self {
        Self {
            policy_namespace: config.policy_namespace.clone(),
            credential_namespace: config.credential_namespace.clone(),
            credential_type: format!("{MEMBERSHIP_LITERAL}{CREDENTIAL_LITERAL}"),
        }
    }

    /// Accepts left operands starting with `<ns>Membership`.
    pub fn can_handle(&self, left_operand: &str) -> bool {
        has_namespaced_prefix(left_operand, &self.policy_namespace, MEMBERSHIP_LITERAL)
    }

    /// Check for a membership credential. The right operand must be `active`.
    pub fn evaluate(&self, operator: Operator, right: &RightOperand, ctx: &mut PolicyContext) -> bool {
        let credential_type = (self.credential_namespace.as_str(), self.credential_type.as_str());
        evaluate_credential_presence(operator, right, ctx, credential_type, |literal| {
            if literal == ACTIVE {
                Ok(())
            } else {
                Err(EvaluationError::InvalidLiteral {
                    expected: ACTIVE,
                    value: literal.to_string(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationErrorKind;
    use crate::scope::PolicyScope;
    use fx_core::namespace::{FX_CREDENTIAL_NS, FX_POLICY_NS, VC_CLAIM};
    use fx_core::{Issuer, ParticipantAgent, VerifiableCredential};

    fn function() -> MembershipCredentialFunction {
        MembershipCredentialFunction::new(&FxConfig::default())
    }

    fn credential(kind: &str) -> VerifiableCredential {
        VerifiableCredential::new(["VerifiableCredential", kind], Issuer::new("did:web:issuer"))
            .with_id(format!("urn:uuid:{}", uuid::Uuid::new_v4()))
    }

    fn ctx_with(credentials: Vec<VerifiableCredential>) -> PolicyContext {
        PolicyContext::new(
            PolicyScope::TransferProcess,
            ParticipantAgent::new("did:web:consumer").with_claim(VC_CLAIM, credentials),
        )
    }

    #[test]
    fn can_handle_namespaced_only() {
        let f = function();
        assert!(f.can_handle(&format!("{FX_POLICY_NS}Membership")));
        assert!(!f.can_handle("Membership"));
        assert!(!f.can_handle(&format!("{FX_POLICY_NS}CertificationType")));
    }

    #[test]
    fn eq_active_with_membership_credential() {
        let mut ctx = ctx_with(vec![credential("MembershipCredential")]);
        assert!(function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));
        assert!(!ctx.has_problems());
    }

    #[test]
    fn eq_active_without_membership_credential() {
        let mut ctx = ctx_with(vec![credential("CertificationTypeCredential")]);
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));
        assert!(!ctx.has_problems());
    }

    #[test]
    fn credential_tag_must_use_configured_namespace() {
        let tagged = |tag: &str| {
            VerifiableCredential::new(["VerifiableCredential", tag], Issuer::new("did:web:issuer"))
        };
        let mut ctx = ctx_with(vec![tagged(&format!("{FX_CREDENTIAL_NS}MembershipCredential"))]);
        assert!(function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));

        let mut ctx = ctx_with(vec![tagged("https://other.example/vc/MembershipCredential")]);
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));

        let mut config = FxConfig::default();
        config.credential_namespace = "https://other.example/vc/".to_string();
        let mut ctx = ctx_with(vec![tagged("https://other.example/vc/MembershipCredential")]);
        assert!(MembershipCredentialFunction::new(&config).evaluate(
            Operator::Eq,
            &RightOperand::scalar("active"),
            &mut ctx
        ));
    }

    #[test]
    fn neq_inverts() {
        let mut ctx = ctx_with(vec![credential("CertificationTypeCredential")]);
        assert!(function().evaluate(Operator::Neq, &RightOperand::scalar("active"), &mut ctx));
        let mut ctx = ctx_with(vec![credential("MembershipCredential")]);
        assert!(!function().evaluate(Operator::Neq, &RightOperand::scalar("active"), &mut ctx));
    }

    #[test]
    fn non_active_literal_reported() {
        let mut ctx = ctx_with(vec![credential("MembershipCredential")]);
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("invalid"), &mut ctx));
        assert_eq!(
            ctx.problems()[0].message,
            "Right-operand must be equal to 'active', but was 'invalid'"
        );
    }

    #[test]
    fn list_operand_reported() {
        let mut ctx = ctx_with(vec![credential("MembershipCredential")]);
        assert!(!function().evaluate(Operator::Eq, &RightOperand::list(["active"]), &mut ctx));
        assert!(ctx.has_problem_of(EvaluationErrorKind::InvalidRightOperandShape));
    }

    #[test]
    fn unsupported_operator_reported() {
        let mut ctx = ctx_with(vec![credential("MembershipCredential")]);
        assert!(!function().evaluate(Operator::IsAnyOf, &RightOperand::scalar("active"), &mut ctx));
        assert_eq!(
            ctx.problems()[0].message,
            "Invalid operator: this constraint only allows the following operators: [EQ, NEQ], but received 'IS_ANY_OF'."
        );
    }

    #[test]
    fn extraction_failures_reported() {
        let mut ctx = PolicyContext::new(PolicyScope::Catalog, ParticipantAgent::new("did:web:c"));
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));
        assert!(ctx.has_problem_of(EvaluationErrorKind::ClaimMissing));

        let mut ctx = ctx_with(Vec::new());
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));
        assert!(ctx.has_problem_of(EvaluationErrorKind::ClaimEmpty));

        let mut ctx = PolicyContext::without_participant(PolicyScope::Catalog);
        assert!(!function().evaluate(Operator::Eq, &RightOperand::scalar("active"), &mut ctx));
        assert!(ctx.has_problem_of(EvaluationErrorKind::MissingParticipantAgent));
    }
}
