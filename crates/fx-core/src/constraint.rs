//! # Policy Constraints
//!
//! The `(leftOperand, operator, rightOperand)` triple, the permissions that
//! group constraints under an action, and the policy definition that the
//! management API accepts. The host builds these from a parsed policy
//! document; nothing in this workspace mutates them after construction.

use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// Right-hand side of a constraint: a single string or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RightOperand {
    /// A single string value.
    Scalar(String),
    /// An ordered list of string values.
    List(Vec<String>),
}

impl RightOperand {
    /// Build a scalar operand.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Build a list operand.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// The scalar value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RightOperand::Scalar(s) => Some(s),
            RightOperand::List(_) => None,
        }
    }

    /// The list values, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            RightOperand::Scalar(_) => None,
            RightOperand::List(values) => Some(values),
        }
    }

    /// Name of the operand's shape, used in problem messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            RightOperand::Scalar(_) => "String",
            RightOperand::List(_) => "List",
        }
    }
}

impl std::fmt::Display for RightOperand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RightOperand::Scalar(s) => f.write_str(s),
            RightOperand::List(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl From<&str> for RightOperand {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for RightOperand {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for RightOperand {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// An atomic ODRL constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    /// Left operand, usually a namespaced IRI.
    pub left_operand: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Right operand.
    pub right_operand: RightOperand,
}

impl Constraint {
    /// Create a constraint.
    pub fn new(
        left_operand: impl Into<String>,
        operator: Operator,
        right_operand: impl Into<RightOperand>,
    ) -> Self {
        Self {
            left_operand: left_operand.into(),
            operator,
            right_operand: right_operand.into(),
        }
    }
}

/// A permission: an action gated by a conjunction of constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// The action, e.g. `use` or an ODRL IRI.
    #[serde(default = "default_action")]
    pub action: String,
    /// Constraints that must all hold.
    #[serde(default, rename = "constraint")]
    pub constraints: Vec<Constraint>,
}

fn default_action() -> String {
    "use".to_string()
}

impl Permission {
    /// A `use` permission with the given constraints.
    pub fn use_with(constraints: Vec<Constraint>) -> Self {
        Self {
            action: default_action(),
            constraints,
        }
    }
}

/// An ODRL policy body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Permissions of the policy.
    #[serde(default, rename = "permission")]
    pub permissions: Vec<Permission>,
}

impl Policy {
    /// Iterate every constraint of every permission.
    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.permissions.iter().flat_map(|p| p.constraints.iter())
    }
}

/// A policy as submitted to the management API: an identifier plus body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDefinition {
    /// Definition identifier. Absent identifiers are a validation failure.
    #[serde(default, rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The policy body.
    #[serde(default)]
    pub policy: Policy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_operand_untagged_serde() {
        let s: RightOperand = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(s, RightOperand::scalar("active"));
        let l: RightOperand = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(l, RightOperand::list(["a", "b"]));
    }

    #[test]
    fn right_operand_accessors() {
        let s = RightOperand::scalar("x");
        assert_eq!(s.as_scalar(), Some("x"));
        assert!(s.as_list().is_none());
        assert_eq!(s.shape_name(), "String");

        let l = RightOperand::list(["x", "y"]);
        assert!(l.as_scalar().is_none());
        assert_eq!(l.as_list().map(<[String]>::len), Some(2));
        assert_eq!(l.shape_name(), "List");
        assert_eq!(l.to_string(), "[x, y]");
    }

    #[test]
    fn policy_definition_parses_camel_case_document() {
        let json = serde_json::json!({
            "@id": "def-1",
            "policy": {
                "permission": [{
                    "action": "use",
                    "constraint": [
                        {"leftOperand": "BusinessPartnerDID", "operator": "eq", "rightOperand": "did:web:a"},
                        {"leftOperand": "fx-policy:Membership", "operator": "eq", "rightOperand": "active"}
                    ]
                }]
            }
        });
        let def: PolicyDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(def.id.as_deref(), Some("def-1"));
        assert_eq!(def.policy.constraints().count(), 2);
        let first = def.policy.constraints().next().unwrap();
        assert_eq!(first.operator, Operator::Eq);
        assert_eq!(first.right_operand, RightOperand::scalar("did:web:a"));
    }

    #[test]
    fn permission_defaults_to_use_action() {
        let p: Permission = serde_json::from_str("{}").unwrap();
        assert_eq!(p.action, "use");
        assert!(p.constraints.is_empty());
    }
}
