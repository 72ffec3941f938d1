//! # fx-cli — CLI Tool for the Factory-X Policy Extensions
//!
//! Provides the `fx` command-line interface for exercising the policy
//! functions outside a running connector:
//!
//! ```bash
//! fx evaluate --policy policy.json --participant consumer.json --scope contract.negotiation
//! fx scopes --policy policy.json --message catalog-request
//! fx validate --definition policy-definition.json
//! fx validate --did did:web:partner.example --did did:web:other.example
//! ```
//!
//! Documents are read as JSON, or as YAML when the file extension is
//! `.yaml` / `.yml`. Exit codes: `0` granted / valid, `2` denied /
//! invalid, `1` on errors.

pub mod evaluate;
pub mod scopes;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use fx_core::FxConfig;
use serde::de::DeserializeOwned;

/// Exit code for a denied policy or rejected input.
pub const EXIT_REJECTED: u8 = 2;

/// Load configuration from `path` (defaults when absent), then apply
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<FxConfig> {
    let config = match path {
        Some(p) => FxConfig::from_path(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => FxConfig::default(),
    };
    config
        .apply_env()
        .context("invalid configuration override in environment")
}

/// Read a JSON or YAML document.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("failed to parse YAML {}", path.display()))
    } else {
        serde_json::from_str(&raw).with_context(|| format!("failed to parse JSON {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use fx_core::Policy;

    #[test]
    fn read_document_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("policy.json");
        std::fs::write(
            &json,
            r#"{"permission":[{"action":"use","constraint":[{"leftOperand":"BusinessPartnerDID","operator":"eq","rightOperand":"did:web:a"}]}]}"#,
        )
        .unwrap();
        let policy: Policy = read_document(&json).unwrap();
        assert_eq!(policy.constraints().count(), 1);

        let yaml = dir.path().join("policy.yml");
        let mut file = std::fs::File::create(&yaml).unwrap();
        writeln!(
            file,
            "permission:\n  - constraint:\n      - leftOperand: BusinessPartnerDID\n        operator: isAnyOf\n        rightOperand: [\"did:web:a\", \"did:web:b\"]"
        )
        .unwrap();
        let policy: Policy = read_document(&yaml).unwrap();
        assert_eq!(policy.permissions[0].action, "use");
    }

    #[test]
    fn read_document_reports_path() {
        let err = read_document::<Policy>(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/policy.json"));
    }

    #[test]
    fn load_config_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert!(config.validate().is_ok());
    }
}
