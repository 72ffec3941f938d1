//! Drives the subcommand functions against policy, participant, and
//! configuration files on disk.

use std::path::{Path, PathBuf};

use fx_cli::evaluate::{evaluate_files, run_evaluate, EvaluateArgs};
use fx_cli::scopes::scopes_for_file;
use fx_cli::validate::{run_validate, validate_definition_file, ValidateArgs};
use fx_cli::{load_config, EXIT_REJECTED};
use fx_core::FxConfig;
use fx_dcp::MessageKind;
use fx_policy::{EvaluationErrorKind, PolicyScope};

const POLICY: &str = r#"{
  "permission": [
    {
      "action": "use",
      "constraint": [
        { "leftOperand": "https://w3id.org/factoryx/policy/v1.0/Membership", "operator": "eq", "rightOperand": "active" },
        { "leftOperand": "https://w3id.org/factoryx/policy/v1.0/CertificationType.pcf", "operator": "eq", "rightOperand": "ISO9001" },
        { "leftOperand": "BusinessPartnerDID", "operator": "isAnyOf", "rightOperand": ["did:web:example.com:partnerA", "did:web:example.com:partnerB"] }
      ]
    }
  ]
}"#;

const PARTICIPANT: &str = r#"{
  "identity": "did:web:example.com:partnerA",
  "claims": {
    "vc": [
      {
        "type": ["VerifiableCredential", "MembershipCredential"],
        "issuer": { "id": "did:web:issuer.example" },
        "issuanceDate": "2026-01-01T00:00:00Z",
        "credentialSubject": [{ "id": "did:web:example.com:partnerA", "holderIdentifier": "partnerA" }]
      },
      {
        "type": ["VerifiableCredential", "CertificationTypeCredential"],
        "issuer": { "id": "did:web:issuer.example" },
        "issuanceDate": "2026-01-01T00:00:00Z",
        "credentialSubject": [{ "id": "did:web:example.com:partnerA" }]
      }
    ]
  }
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn evaluate_grants_complete_participant() {
    let dir = tempfile::tempdir().unwrap();
    let policy = write(dir.path(), "policy.json", POLICY);
    let participant = write(dir.path(), "participant.json", PARTICIPANT);

    let report =
        evaluate_files(&policy, &participant, "transfer.process", &FxConfig::default()).unwrap();
    assert_eq!(report.scope, PolicyScope::TransferProcess);
    assert!(report.granted, "{:?}", report.problems);
}

#[test]
fn evaluate_denies_participant_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let policy = write(dir.path(), "policy.json", POLICY);
    let participant = write(
        dir.path(),
        "participant.yaml",
        "identity: \"did:web:example.com:partnerA\"\n",
    );

    let report = evaluate_files(&policy, &participant, "catalog", &FxConfig::default()).unwrap();
    assert!(!report.granted);
    assert_eq!(report.problems.len(), 2);
    assert!(report
        .problems
        .iter()
        .all(|p| p.kind == Some(EvaluationErrorKind::ClaimMissing)));

    let args = EvaluateArgs {
        policy,
        participant,
        scope: "catalog".to_string(),
        json: true,
    };
    assert_eq!(run_evaluate(&args, &FxConfig::default()).unwrap(), EXIT_REJECTED);
}

#[test]
fn evaluate_rejects_malformed_participant() {
    let dir = tempfile::tempdir().unwrap();
    let policy = write(dir.path(), "policy.json", POLICY);
    let participant = write(dir.path(), "participant.json", "{ not json");
    let err = evaluate_files(&policy, &participant, "catalog", &FxConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse JSON"));
}

#[test]
fn scopes_for_catalog_request() {
    let dir = tempfile::tempdir().unwrap();
    let policy = write(dir.path(), "policy.json", POLICY);

    let scopes =
        scopes_for_file(&policy, Some(MessageKind::CatalogRequest), &FxConfig::default()).unwrap();
    let scopes: Vec<_> = scopes.into_iter().collect();
    assert_eq!(
        scopes,
        vec![
            "org.factoryx.vc.type:CertificationTypeCredential:read".to_string(),
            "org.factoryx.vc.type:MembershipCredential:read".to_string(),
        ]
    );

    assert!(scopes_for_file(&policy, None, &FxConfig::default())
        .unwrap()
        .is_empty());
    assert!(scopes_for_file(&policy, Some(MessageKind::TransferStart), &FxConfig::default())
        .unwrap()
        .is_empty());
}

#[test]
fn config_file_changes_scope_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let policy = write(dir.path(), "policy.json", POLICY);
    let config = write(
        dir.path(),
        "fx.yaml",
        "credential_type_namespace: org.example.type\n",
    );

    let config = load_config(Some(&config)).unwrap();
    let scopes = scopes_for_file(&policy, Some(MessageKind::ContractRequest), &config).unwrap();
    assert!(scopes.contains("org.example.type:MembershipCredential:read"));
}

#[test]
fn invalid_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "fx.yaml", "policy_namespace: not-terminated\n");
    assert!(load_config(Some(&config)).is_err());
}

#[test]
fn validate_definition_files() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(
        dir.path(),
        "good.json",
        r#"{"@id":"def-1","policy":{"permission":[{"constraint":[{"leftOperand":"BusinessPartnerDID","operator":"eq","rightOperand":"did:web:a"}]}]}}"#,
    );
    let bad = write(
        dir.path(),
        "bad.json",
        r#"{"policy":{"permission":[{"constraint":[{"leftOperand":"BusinessPartnerDID","operator":"eq","rightOperand":"BPNL000000000001"}]}]}}"#,
    );

    assert!(validate_definition_file(&good, &FxConfig::default())
        .unwrap()
        .is_empty());
    let violations = validate_definition_file(&bad, &FxConfig::default()).unwrap();
    assert!(violations.iter().any(|v| v.path == "@id"));
    assert!(violations
        .iter()
        .any(|v| v.message.ends_with("should start with did:web:")));

    let args = ValidateArgs {
        definition: Some(bad),
        dids: vec![],
    };
    assert_eq!(run_validate(&args, &FxConfig::default()).unwrap(), EXIT_REJECTED);
}

#[test]
fn validate_did_group_arguments() {
    let ok = ValidateArgs {
        definition: None,
        dids: vec!["did:web:a.example".to_string()],
    };
    assert_eq!(run_validate(&ok, &FxConfig::default()).unwrap(), 0);

    let bad = ValidateArgs {
        definition: None,
        dids: vec!["did:web:a.example:".to_string()],
    };
    assert_eq!(run_validate(&bad, &FxConfig::default()).unwrap(), EXIT_REJECTED);

    let empty = ValidateArgs {
        definition: None,
        dids: vec![],
    };
    assert!(run_validate(&empty, &FxConfig::default()).is_err());
}
