//! # Operator Matcher
//!
//! Decides whether a participant identity satisfies `operator` applied to
//! a right operand. This is the core of the business-partner DID
//! constraint and is a pure function of its inputs.
//!
//! | Operator                    | Right operand   | True when                      |
//! |-----------------------------|-----------------|--------------------------------|
//! | `EQ`, `IS_ALL_OF`           | String          | identity equals it             |
//! | `EQ`, `IS_ALL_OF`           | List            | every element equals identity  |
//! | `NEQ`                       | String or List  | negation of `EQ`               |
//! | `IN`, `IS_A`, `IS_ANY_OF`   | List            | list contains identity         |
//! | `IS_NONE_OF`                | List            | negation of `IS_ANY_OF`        |
//! | `HAS_PART`                  | String          | identity contains it           |

use fx_core::{Operator, RightOperand};

use crate::error::EvaluationError;

/// Operators the matcher understands.
pub const MATCHER_OPERATORS: [Operator; 8] = [
    Operator::Eq,
    Operator::In,
    Operator::Neq,
    Operator::IsAnyOf,
    Operator::IsA,
    Operator::IsNoneOf,
    Operator::IsAllOf,
    Operator::HasPart,
];

/// Evaluate `identity <operator> right`.
///
/// # Errors
///
/// - [`EvaluationError::UnsupportedOperator`] for operators outside
///   [`MATCHER_OPERATORS`].
/// - [`EvaluationError::InvalidRightOperandShape`] when the operand shape
///   does not fit the operator.
pub fn match_identity(
    identity: &str,
    right: &RightOperand,
    operator: Operator,
) -> Result<bool, EvaluationError> {
    match operator {
        Operator::Eq | Operator::IsAllOf => Ok(check_equality(identity, right)),
        Operator::Neq => Ok(!check_equality(identity, right)),
        Operator::HasPart => check_contains(identity, right, operator),
        Operator::In | Operator::IsA | Operator::IsAnyOf => {
            check_list_contains(identity, right, operator)
        }
        Operator::IsNoneOf => check_list_contains(identity, right, operator).map(|found| !found),
        Operator::Lt | Operator::Gt | Operator::Leq | Operator::Geq => {
            Err(EvaluationError::UnsupportedOperator {
                operator,
                supported: MATCHER_OPERATORS.to_vec(),
            })
        }
    }
}

// An empty list is vacuously all-equal.
fn check_equality(identity: &str, right: &RightOperand) -> bool {
    match right {
        RightOperand::Scalar(value) => value == identity,
        RightOperand::List(values) => values.iter().all(|v| v == identity),
    }
}

fn check_contains(
    identity: &str,
    right: &RightOperand,
    operator: Operator,
) -> Result<bool, EvaluationError> {
    match right {
        RightOperand::Scalar(part) => Ok(identity.contains(part.as_str())),
        RightOperand::List(_) => Err(shape_error(operator, "String", right)),
    }
}

fn check_list_contains(
    identity: &str,
    right: &RightOperand,
    operator: Operator,
) -> Result<bool, EvaluationError> {
    match right {
        RightOperand::List(values) => Ok(values.iter().any(|v| v == identity)),
        RightOperand::Scalar(_) => Err(shape_error(operator, "List", right)),
    }
}

fn shape_error(operator: Operator, expected: &'static str, right: &RightOperand) -> EvaluationError {
    EvaluationError::InvalidRightOperandShape {
        operator,
        expected,
        received: right.shape_name(),
    }
}
