//! # ODRL Operators
//!
//! The closed set of constraint operators a host policy model can carry.
//! Each constraint function declares the subset it supports; anything else
//! is reported, never evaluated.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An ODRL constraint operator.
///
/// Serializes with the ODRL local names (`eq`, `isAnyOf`, ...). Deserializing
/// goes through [`Operator::parse`], so expanded JSON-LD policies with
/// `odrl:eq` or full IRIs load too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    /// Equal to.
    #[serde(rename = "eq")]
    Eq,
    /// Not equal to.
    #[serde(rename = "neq")]
    Neq,
    /// Member of a set.
    #[serde(rename = "in")]
    In,
    /// Instance of a class or set.
    #[serde(rename = "isA")]
    IsA,
    /// Matches at least one element of a set.
    #[serde(rename = "isAnyOf")]
    IsAnyOf,
    /// Matches no element of a set.
    #[serde(rename = "isNoneOf")]
    IsNoneOf,
    /// Matches all elements of a set.
    #[serde(rename = "isAllOf")]
    IsAllOf,
    /// Contains the right operand as a part.
    #[serde(rename = "hasPart")]
    HasPart,
    /// Less than.
    #[serde(rename = "lt")]
    Lt,
    /// Greater than.
    #[serde(rename = "gt")]
    Gt,
    /// Less than or equal to.
    #[serde(rename = "lteq")]
    Leq,
    /// Greater than or equal to.
    #[serde(rename = "gteq")]
    Geq,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Neq,
        Operator::In,
        Operator::IsA,
        Operator::IsAnyOf,
        Operator::IsNoneOf,
        Operator::IsAllOf,
        Operator::HasPart,
        Operator::Lt,
        Operator::Gt,
        Operator::Leq,
        Operator::Geq,
    ];

    /// The ODRL local name.
    pub fn odrl_name(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::In => "in",
            Operator::IsA => "isA",
            Operator::IsAnyOf => "isAnyOf",
            Operator::IsNoneOf => "isNoneOf",
            Operator::IsAllOf => "isAllOf",
            Operator::HasPart => "hasPart",
            Operator::Lt => "lt",
            Operator::Gt => "gt",
            Operator::Leq => "lteq",
            Operator::Geq => "gteq",
        }
    }

    /// Parse an operator from its ODRL name, `odrl:`-prefixed name, or full
    /// IRI. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Operator> {
        let local = value
            .strip_prefix(crate::namespace::ODRL_SCHEMA)
            .or_else(|| value.strip_prefix("odrl:"))
            .unwrap_or(value);
        Self::ALL
            .into_iter()
            .find(|op| op.odrl_name().eq_ignore_ascii_case(local))
    }
}

impl TryFrom<String> for Operator {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Operator::parse(&value).ok_or(ValidationError::UnknownOperator(value))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::In => "IN",
            Operator::IsA => "IS_A",
            Operator::IsAnyOf => "IS_ANY_OF",
            Operator::IsNoneOf => "IS_NONE_OF",
            Operator::IsAllOf => "IS_ALL_OF",
            Operator::HasPart => "HAS_PART",
            Operator::Lt => "LT",
            Operator::Gt => "GT",
            Operator::Leq => "LEQ",
            Operator::Geq => "GEQ",
        };
        f.write_str(name)
    }
}

/// Render an operator set as `[EQ, NEQ]` for problem messages.
pub fn format_operators(operators: &[Operator]) -> String {
    let names: Vec<String> = operators.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_all_forms() {
        assert_eq!(Operator::parse("eq"), Some(Operator::Eq));
        assert_eq!(Operator::parse("EQ"), Some(Operator::Eq));
        assert_eq!(Operator::parse("odrl:isAnyOf"), Some(Operator::IsAnyOf));
        assert_eq!(
            Operator::parse("http://www.w3.org/ns/odrl/2/isNoneOf"),
            Some(Operator::IsNoneOf)
        );
        assert_eq!(Operator::parse("lteq"), Some(Operator::Leq));
        assert_eq!(Operator::parse("between"), None);
    }

    #[test]
    fn parse_roundtrips_every_odrl_name() {
        for op in Operator::ALL {
            assert_eq!(Operator::parse(op.odrl_name()), Some(op));
        }
    }

    #[test]
    fn serde_uses_odrl_names() {
        let json = serde_json::to_string(&Operator::HasPart).unwrap();
        assert_eq!(json, "\"hasPart\"");
        let op: Operator = serde_json::from_str("\"isAllOf\"").unwrap();
        assert_eq!(op, Operator::IsAllOf);
        let op: Operator = serde_json::from_str("\"odrl:isNoneOf\"").unwrap();
        assert_eq!(op, Operator::IsNoneOf);
        let err = serde_json::from_str::<Operator>("\"between\"").unwrap_err();
        assert!(err.to_string().contains("unknown operator \"between\""));
    }

    #[test]
    fn display_and_set_formatting() {
        assert_eq!(Operator::IsNoneOf.to_string(), "IS_NONE_OF");
        assert_eq!(
            format_operators(&[Operator::Eq, Operator::Neq]),
            "[EQ, NEQ]"
        );
    }
}
