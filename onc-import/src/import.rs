//! The import pipeline: parse, decrypt, validate, derive and resolve.
//!
//! [`parse_and_validate_onc_for_import`] runs every stage over one blob and
//! hands back the processed networks, global configuration and certificates.
//! Whole-call failures are [`ImportError`]s; anything that only degrades the
//! result leaves `success` false on the returned [`ImportOutcome`].

use onc_value::{Object, ParseError, Value};
use serde::Serialize;
use thiserror::Error;

use crate::certificates::{resolve_server_cert_refs_in_networks, server_and_ca_certs_by_guid};
use crate::decrypt::{decrypt, is_encrypted, DecryptError};
use crate::diagnostics::{Diagnostics, Issue};
use crate::hex_ssid::fill_in_hex_ssid_fields_in_networks;
use crate::mask::mask_credentials_in_object;
use crate::names::toplevel;
use crate::signature::Kind;
use crate::source::OncSource;
use crate::substitution::{expand_strings_in_networks, UserSubstitution};
use crate::validator::{Validator, ValidatorOptions, Verdict};

/// Name of the policy validation metric.
pub const POLICY_VALIDATION_METRIC: &str = "Enterprise.ONC.PolicyValidation";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed ONC document: {0}")]
    Malformed(#[from] ParseError),
    #[error("unable to decrypt ONC document: {0}")]
    Decrypt(#[from] DecryptError),
    #[error("ONC document is invalid ({} issue(s))", .issues.len())]
    Invalid { issues: Vec<Issue> },
}

impl ImportError {
    /// Issues collected before the import was abandoned.
    pub fn issues(&self) -> &[Issue] {
        match self {
            ImportError::Invalid { issues } => issues,
            _ => &[],
        }
    }
}

/// Optional stages layered on top of the import pipeline.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Expand `${LOGIN_ID}` and `${LOGIN_EMAIL}` in identity fields.
    pub substitution: Option<UserSubstitution>,
    /// Replace credentials in the outputs with this mask.
    pub mask: Option<String>,
    pub validator: ValidatorOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub source: OncSource,
    pub network_configs: Vec<Value>,
    pub global_network_config: Object,
    pub certificates: Vec<Value>,
    /// False when validation raised warnings or a network was dropped.
    pub success: bool,
    pub verdict: Verdict,
    /// GUIDs of networks removed for unresolved certificate references.
    pub dropped_networks: Vec<String>,
    pub issues: Vec<Issue>,
    /// Value recorded for [`POLICY_VALIDATION_METRIC`]; `None` unless the
    /// source is a policy.
    pub policy_validation: Option<bool>,
}

impl ImportOutcome {
    fn empty(source: OncSource) -> Self {
        Self {
            source,
            network_configs: Vec::new(),
            global_network_config: Object::new(),
            certificates: Vec::new(),
            success: true,
            verdict: Verdict::Valid,
            dropped_networks: Vec::new(),
            issues: Vec::new(),
            policy_validation: None,
        }
    }
}

/// Import `blob` with the standard import validation policy.
pub fn parse_and_validate_onc_for_import(
    blob: &str,
    source: OncSource,
    passphrase: &str,
) -> Result<ImportOutcome, ImportError> {
    import_with_options(blob, source, passphrase, &ImportOptions::default())
}

pub fn import_with_options(
    blob: &str,
    source: OncSource,
    passphrase: &str,
    options: &ImportOptions,
) -> Result<ImportOutcome, ImportError> {
    if blob.is_empty() {
        return Ok(ImportOutcome::empty(source));
    }

    let mut document = onc_value::parse(blob)?;
    if is_encrypted(&document) {
        tracing::debug!(source = %source, "decrypting encrypted configuration");
        document = decrypt(passphrase, &document)?;
    }

    let validator = Validator::new(ValidatorOptions {
        source,
        ..options.validator
    });
    let validation = validator.validate_and_repair(Kind::Toplevel, &document);
    let policy_validation = source.is_policy().then(|| {
        let valid = validation.verdict == Verdict::Valid;
        tracing::info!(
            metric = POLICY_VALIDATION_METRIC,
            valid,
            source = %source,
            "policy validation"
        );
        valid
    });

    let mut success = true;
    let verdict = validation.verdict;
    let mut repaired = match (verdict, validation.repaired) {
        (Verdict::Invalid, _) | (_, None) => {
            tracing::error!(source = %source, "ONC document is invalid");
            return Err(ImportError::Invalid {
                issues: validation.issues,
            });
        }
        (Verdict::ValidWithWarnings, Some(repaired)) => {
            tracing::warn!(source = %source, "ONC document has validation warnings");
            success = false;
            repaired
        }
        (Verdict::Valid, Some(repaired)) => repaired,
    };

    let mut diag = Diagnostics::new(source);
    diag.absorb(validation.issues);

    let mut certificates = take_list(&mut repaired, toplevel::CERTIFICATES);
    let mut networks = take_list(&mut repaired, toplevel::NETWORK_CONFIGURATIONS);
    let mut global = match repaired.remove(toplevel::GLOBAL_NETWORK_CONFIGURATION) {
        Some(Value::Object(global)) => global,
        _ => Object::new(),
    };

    if let Some(substitution) = &options.substitution {
        expand_strings_in_networks(substitution, &mut networks);
    }

    // An empty SSID is reported but does not fail the import.
    fill_in_hex_ssid_fields_in_networks(&mut networks, &mut diag);

    let pems = server_and_ca_certs_by_guid(&certificates, &mut diag);
    let resolution = resolve_server_cert_refs_in_networks(&pems, &mut networks, &mut diag);
    if !resolution.is_complete() {
        success = false;
    }

    if let Some(mask) = &options.mask {
        mask_list(Kind::NetworkConfiguration, &mut networks, mask);
        mask_list(Kind::Certificate, &mut certificates, mask);
        global = mask_credentials_in_object(Kind::GlobalNetworkConfiguration, &global, mask);
    }

    tracing::debug!(
        source = %source,
        networks = networks.len(),
        certificates = certificates.len(),
        dropped = resolution.dropped.len(),
        success,
        "import finished"
    );

    Ok(ImportOutcome {
        source,
        network_configs: networks,
        global_network_config: global,
        certificates,
        success,
        verdict,
        dropped_networks: resolution.dropped,
        issues: diag.into_issues(),
        policy_validation,
    })
}

fn take_list(document: &mut Object, key: &str) -> Vec<Value> {
    match document.remove(key) {
        Some(Value::Array(list)) => list,
        _ => Vec::new(),
    }
}

fn mask_list(kind: Kind, list: &mut [Value], mask: &str) {
    for entry in list.iter_mut() {
        if let Value::Object(object) = entry {
            *object = mask_credentials_in_object(kind, object, mask);
        }
    }
}
