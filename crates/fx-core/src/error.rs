//! # Error Hierarchy
//!
//! Structured error types for the connector extensions, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Evaluation failures are not errors in this sense: constraint functions
//! report them as problems on the policy context and deny. The types here
//! cover construction-time validation and configuration loading.

use thiserror::Error;

/// Validation errors for domain primitives and constraint right operands.
///
/// Each variant carries the rejected input so operators can see what was
/// wrong without re-running with debug logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// DID is not a usable `did:web` identifier.
    #[error("invalid DID: \"{0}\" (expected did:web:<host>[:<path>])")]
    InvalidDid(String),

    /// Operator name is not an ODRL operator this model knows.
    #[error("unknown operator \"{0}\"")]
    UnknownOperator(String),

    /// A scalar right operand does not start with the required prefix.
    #[error("The right-operand must start with {prefix}, but was '{value}'")]
    RightOperandPrefix {
        /// Required prefix without its trailing colon, e.g. `did:web`.
        prefix: String,
        /// The rejected right operand.
        value: String,
    },

    /// At least one element of a list right operand lacks the required prefix.
    #[error("All the elements in the right-operand list must start with {prefix}, but was '{values:?}'")]
    RightOperandListPrefix {
        /// Required prefix without its trailing colon.
        prefix: String,
        /// The rejected list.
        values: Vec<String>,
    },

    /// Identifier is empty or whitespace only.
    #[error("{field} must not be blank")]
    Blank {
        /// Name of the offending field.
        field: String,
    },

    /// A namespace IRI is malformed.
    #[error("invalid namespace \"{value}\": {reason}")]
    InvalidNamespace {
        /// The namespace as configured.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Errors while loading [`FxConfig`](crate::config::FxConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An environment override has a value of the wrong type.
    #[error("invalid value for {key}: \"{value}\"")]
    InvalidEnv {
        /// Environment variable name.
        key: String,
        /// The value found.
        value: String,
    },

    /// A loaded value failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
