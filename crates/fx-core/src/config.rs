//! Runtime configuration for the policy extensions.
//!
//! Defaults match the Factory-X namespaces. Values can come from a YAML
//! file and be overridden through environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ValidationError};
use crate::namespace::{
    is_terminated, CREDENTIAL_TYPE_NAMESPACE, DID_WEB, FX_CREDENTIAL_NS, FX_POLICY_NS,
};

/// Namespaces and switches shared by evaluators, the scope extractor, and
/// the validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxConfig {
    /// Namespace prefix of Factory-X policy left operands.
    pub policy_namespace: String,
    /// Namespace of credential types and subject claims.
    pub credential_namespace: String,
    /// Namespace placed in front of DCP scopes.
    pub credential_type_namespace: String,
    /// Required prefix of business partner DIDs.
    pub did_prefix: String,
    /// Management API validator switches.
    pub validator: ValidatorConfig,
}

/// Management API validator switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Block policy definitions whose `BusinessPartnerDID` constraints do not
    /// use `did:web` right operands (`fx.edc.validator.incorrect-did-selector`).
    pub incorrect_did_selector: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            incorrect_did_selector: true,
        }
    }
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            policy_namespace: FX_POLICY_NS.to_string(),
            credential_namespace: FX_CREDENTIAL_NS.to_string(),
            credential_type_namespace: CREDENTIAL_TYPE_NAMESPACE.to_string(),
            did_prefix: DID_WEB.to_string(),
            validator: ValidatorConfig::default(),
        }
    }
}

impl FxConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: FxConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Apply overrides from the process environment.
    ///
    /// Variables:
    /// - `FX_POLICY_NS`
    /// - `FX_CREDENTIAL_NS`
    /// - `FX_CREDENTIAL_TYPE_NS`
    /// - `FX_DID_PREFIX`
    /// - `FX_VALIDATOR_INCORRECT_DID_SELECTOR` (`true` / `false`)
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, e.g. a map in tests.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FX_POLICY_NS") {
            self.policy_namespace = v;
        }
        if let Some(v) = lookup("FX_CREDENTIAL_NS") {
            self.credential_namespace = v;
        }
        if let Some(v) = lookup("FX_CREDENTIAL_TYPE_NS") {
            self.credential_type_namespace = v;
        }
        if let Some(v) = lookup("FX_DID_PREFIX") {
            self.did_prefix = v;
        }
        if let Some(v) = lookup("FX_VALIDATOR_INCORRECT_DID_SELECTOR") {
            self.validator.incorrect_did_selector =
                v.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    key: "FX_VALIDATOR_INCORRECT_DID_SELECTOR".to_string(),
                    value: v.clone(),
                })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check namespaces are usable IRIs and the DID prefix is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_namespace(&self.policy_namespace)?;
        validate_namespace(&self.credential_namespace)?;
        if self.credential_type_namespace.trim().is_empty() {
            return Err(ValidationError::Blank {
                field: "credential_type_namespace".to_string(),
            });
        }
        if self.did_prefix.trim().is_empty() {
            return Err(ValidationError::Blank {
                field: "did_prefix".to_string(),
            });
        }
        Ok(())
    }
}

fn validate_namespace(value: &str) -> Result<(), ValidationError> {
    if !is_terminated(value) {
        return Err(ValidationError::InvalidNamespace {
            value: value.to_string(),
            reason: "must end with '/' or '#'".to_string(),
        });
    }
    Url::parse(value).map_err(|e| ValidationError::InvalidNamespace {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
