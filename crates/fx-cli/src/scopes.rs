//! # Scopes CLI — credential scopes a consumer must request.
//!
//! ```bash
//! fx scopes --policy policy.json --message contract-request
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use fx_core::{FxConfig, Policy};
use fx_dcp::{MessageKind, RequestPolicyContext, ScopeExtractorRegistry};

use crate::read_document;

/// Scopes subcommand arguments.
#[derive(Args, Debug)]
pub struct ScopesArgs {
    /// Policy document (ODRL `permission` list).
    #[arg(long)]
    pub policy: PathBuf,

    /// Message the scopes are requested for. Omit to simulate a request
    /// without message.
    #[arg(long, value_enum)]
    pub message: Option<MessageArg>,
}

/// Message kinds selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageArg {
    /// Catalog request.
    CatalogRequest,
    /// Contract request.
    ContractRequest,
    /// Transfer request.
    TransferRequest,
    /// Dataset request.
    DatasetRequest,
    /// Contract agreement.
    ContractAgreement,
    /// Transfer start.
    TransferStart,
}

impl From<MessageArg> for MessageKind {
    fn from(arg: MessageArg) -> Self {
        match arg {
            MessageArg::CatalogRequest => MessageKind::CatalogRequest,
            MessageArg::ContractRequest => MessageKind::ContractRequest,
            MessageArg::TransferRequest => MessageKind::TransferRequest,
            MessageArg::DatasetRequest => MessageKind::DatasetRequest,
            MessageArg::ContractAgreement => MessageKind::ContractAgreement,
            MessageArg::TransferStart => MessageKind::TransferStart,
        }
    }
}

/// Execute the scopes subcommand.
pub fn run_scopes(args: &ScopesArgs, config: &FxConfig) -> Result<u8> {
    let scopes = scopes_for_file(&args.policy, args.message.map(MessageKind::from), config)?;
    for scope in &scopes {
        println!("{scope}");
    }
    Ok(0)
}

/// Load a policy and compute its scopes.
pub fn scopes_for_file(
    policy: &Path,
    message: Option<MessageKind>,
    config: &FxConfig,
) -> Result<BTreeSet<String>> {
    let policy: Policy = read_document(policy)?;
    let ctx = match message {
        Some(kind) => RequestPolicyContext::for_message(kind),
        None => RequestPolicyContext::empty(),
    };
    Ok(ScopeExtractorRegistry::with_credential_extractor(config).collect(&policy, &ctx))
}
