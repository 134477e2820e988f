//! Schema-guided validation and repair of ONC objects.
//!
//! The validator walks a document against the [`Kind`] tables and produces a
//! repaired copy: fields that cannot be used are dropped, objects that cannot
//! be repaired are removed from their parent, and every decision is recorded
//! as an [`Issue`]. The overall [`Verdict`] summarizes the outcome.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use onc_value::{Object, ObjectExt, Value};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{child_path, index_path, Diagnostics, Issue};
use crate::names::{
    self, certificate, client_cert, eap, ipconfig, network, proxy, toplevel, vpn, wifi,
};
use crate::signature::{FieldSignature, Kind, ValueKind};
use crate::source::OncSource;

/// Knobs controlling how lenient the validator is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidatorOptions {
    pub ignore_unknown_fields: bool,
    pub ignore_invalid_recommended_entries: bool,
    pub fail_on_missing_required_fields: bool,
    /// Type mismatches fail the enclosing object when the source is a policy.
    pub strict_under_policy_source: bool,
    #[serde(skip)]
    pub source: OncSource,
}

impl ValidatorOptions {
    /// The policy used when importing a document.
    pub fn for_import(source: OncSource) -> Self {
        Self {
            ignore_unknown_fields: true,
            ignore_invalid_recommended_entries: true,
            fail_on_missing_required_fields: true,
            strict_under_policy_source: true,
            source,
        }
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::for_import(OncSource::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    ValidWithWarnings,
    Invalid,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "valid"),
            Verdict::ValidWithWarnings => write!(f, "valid with warnings"),
            Verdict::Invalid => write!(f, "invalid"),
        }
    }
}

/// Result of one validation run.
#[derive(Debug, Clone)]
pub struct Validation {
    pub verdict: Verdict,
    /// Repaired document; `None` when the root could not be repaired.
    pub repaired: Option<Object>,
    pub issues: Vec<Issue>,
}

enum FieldOutcome {
    Keep(Value),
    Drop,
    Fail,
}

pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate `object` as an instance of `kind` and return a repaired copy.
    pub fn validate_and_repair(&self, kind: Kind, object: &Object) -> Validation {
        let mut diag = Diagnostics::new(self.options.source);
        let repaired = self.validate_object(kind, object, "", &mut diag);

        let verdict = if repaired.is_none() {
            Verdict::Invalid
        } else if diag.is_empty() {
            Verdict::Valid
        } else {
            Verdict::ValidWithWarnings
        };

        Validation {
            verdict,
            repaired,
            issues: diag.into_issues(),
        }
    }

    fn strict(&self) -> bool {
        self.options.strict_under_policy_source && self.options.source.is_policy()
    }

    fn validate_object(
        &self,
        kind: Kind,
        object: &Object,
        path: &str,
        diag: &mut Diagnostics,
    ) -> Option<Object> {
        let mut repaired = Object::new();
        let mut failed = false;

        for (name, value) in object {
            let field_path = child_path(path, name);
            let Some(signature) = kind.field(name) else {
                if self.options.ignore_unknown_fields {
                    tracing::debug!(path = %field_path, kind = %kind, "dropping unknown field");
                } else {
                    diag.error(
                        "unknown_field",
                        field_path,
                        format!("field '{name}' is not part of {kind}"),
                    );
                    failed = true;
                }
                continue;
            };

            let outcome = if name == names::RECOMMENDED {
                self.validate_recommended(kind, value, &field_path, diag)
            } else {
                self.validate_field(kind, signature, value, &field_path, diag)
            };
            match outcome {
                FieldOutcome::Keep(value) => {
                    repaired.insert(name.clone(), value);
                }
                FieldOutcome::Drop => {}
                FieldOutcome::Fail => failed = true,
            }
        }

        if !self.check_required_fields(kind, &repaired, path, diag) {
            failed = true;
        }

        (!failed).then_some(repaired)
    }

    fn validate_field(
        &self,
        kind: Kind,
        signature: &FieldSignature,
        value: &Value,
        path: &str,
        diag: &mut Diagnostics,
    ) -> FieldOutcome {
        match signature.value {
            ValueKind::Object(nested) => match value {
                Value::Object(child) => match self.validate_object(nested, child, path, diag) {
                    Some(repaired) => FieldOutcome::Keep(Value::Object(repaired)),
                    None => {
                        diag.error(
                            "invalid_object",
                            path,
                            format!("dropping {nested} object that could not be repaired"),
                        );
                        FieldOutcome::Drop
                    }
                },
                _ => self.mismatch(signature, value, path, diag),
            },
            ValueKind::ObjectList(nested) => match value {
                Value::Array(entries) => {
                    let entries = self.validate_list(nested, entries, path, diag);
                    FieldOutcome::Keep(Value::Array(entries))
                }
                _ => self.mismatch(signature, value, path, diag),
            },
            expected => {
                if !matches_scalar(expected, value) {
                    return self.mismatch(signature, value, path, diag);
                }
                if let (Some(allowed), Some(text)) =
                    (allowed_values(kind, signature.name), value.as_str())
                {
                    if !allowed.contains(&text) {
                        return self.invalid_value(signature.name, text, allowed, path, diag);
                    }
                }
                FieldOutcome::Keep(value.clone())
            }
        }
    }

    fn validate_list(
        &self,
        kind: Kind,
        entries: &[Value],
        path: &str,
        diag: &mut Diagnostics,
    ) -> Vec<Value> {
        let unique_guids = matches!(kind, Kind::NetworkConfiguration | Kind::Certificate);
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let entry_path = index_path(path, index);
            let Value::Object(object) = entry else {
                diag.warning(
                    "type_mismatch",
                    entry_path,
                    format!("expected {kind} object, found {}", json_kind(entry)),
                );
                continue;
            };
            let Some(repaired) = self.validate_object(kind, object, &entry_path, diag) else {
                diag.error(
                    "invalid_entry",
                    entry_path,
                    format!("removing {kind} entry that could not be repaired"),
                );
                continue;
            };
            if unique_guids {
                if let Some(guid) = repaired.get_str(network::GUID) {
                    if !seen.insert(guid.to_string()) {
                        diag.error(
                            "duplicate_guid",
                            entry_path,
                            format!("GUID '{guid}' is already used by an earlier entry"),
                        );
                        continue;
                    }
                }
            }
            kept.push(Value::Object(repaired));
        }

        kept
    }

    fn validate_recommended(
        &self,
        kind: Kind,
        value: &Value,
        path: &str,
        diag: &mut Diagnostics,
    ) -> FieldOutcome {
        if !self.options.source.is_policy() {
            diag.warning(
                "unexpected_recommended",
                path,
                format!(
                    "'Recommended' is only allowed in policy documents, found in {}",
                    self.options.source
                ),
            );
            return FieldOutcome::Drop;
        }
        let Value::Array(entries) = value else {
            return self.mismatch(&RECOMMENDED_SIGNATURE, value, path, diag);
        };

        let mut kept = Vec::with_capacity(entries.len());
        let mut failed = false;
        for entry in entries {
            let valid = entry
                .as_str()
                .and_then(|name| kind.field(name))
                .is_some_and(|field| field.name != names::RECOMMENDED && !field.value.is_object());
            if valid {
                kept.push(entry.clone());
            } else if self.options.ignore_invalid_recommended_entries {
                tracing::debug!(path = %path, entry = %entry, "dropping invalid recommended entry");
            } else {
                diag.error(
                    "invalid_recommended_entry",
                    path,
                    format!("{entry} does not name a recommendable field of {kind}"),
                );
                failed = true;
            }
        }

        if failed {
            FieldOutcome::Fail
        } else {
            FieldOutcome::Keep(Value::Array(kept))
        }
    }

    fn mismatch(
        &self,
        signature: &FieldSignature,
        value: &Value,
        path: &str,
        diag: &mut Diagnostics,
    ) -> FieldOutcome {
        let message = format!(
            "field '{}' must be a {}, found {}",
            signature.name,
            signature.value,
            json_kind(value)
        );
        if self.strict() {
            diag.error("type_mismatch", path, message);
            FieldOutcome::Fail
        } else {
            diag.warning("type_mismatch", path, message);
            FieldOutcome::Drop
        }
    }

    fn invalid_value(
        &self,
        name: &str,
        value: &str,
        allowed: &[&str],
        path: &str,
        diag: &mut Diagnostics,
    ) -> FieldOutcome {
        let message = format!(
            "field '{name}' has unsupported value '{value}' (expected one of {})",
            allowed.join(", ")
        );
        if self.strict() {
            diag.error("invalid_value", path, message);
            FieldOutcome::Fail
        } else {
            diag.warning("invalid_value", path, message);
            FieldOutcome::Drop
        }
    }

    /// Returns `false` when a missing field fails the object.
    fn check_required_fields(
        &self,
        kind: Kind,
        object: &Object,
        path: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        let missing = missing_required_fields(kind, object);
        if missing.is_empty() {
            return true;
        }

        for field in &missing {
            let message = format!("{kind} is missing required field '{field}'");
            if self.options.fail_on_missing_required_fields {
                diag.error("missing_required_field", child_path(path, field), message);
            } else {
                diag.warning("missing_required_field", child_path(path, field), message);
            }
        }
        !self.options.fail_on_missing_required_fields
    }
}

const RECOMMENDED_SIGNATURE: FieldSignature = FieldSignature {
    name: names::RECOMMENDED,
    value: ValueKind::StringList,
    credential: false,
};

fn matches_scalar(expected: ValueKind, value: &Value) -> bool {
    match expected {
        ValueKind::Bool => value.is_boolean(),
        ValueKind::Integer => value.is_i64() || value.is_u64(),
        ValueKind::Double => value.is_number(),
        ValueKind::String => value.is_string(),
        ValueKind::StringList => value
            .as_array()
            .is_some_and(|list| list.iter().all(Value::is_string)),
        ValueKind::IntegerList => value
            .as_array()
            .is_some_and(|list| list.iter().all(|v| v.is_i64() || v.is_u64())),
        ValueKind::Object(_) | ValueKind::ObjectList(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Closed value sets for enumerated string fields.
fn allowed_values(kind: Kind, field: &str) -> Option<&'static [&'static str]> {
    const NETWORK_TYPES: &[&str] = &["Ethernet", "WiFi", "WiMAX", "Cellular", "VPN"];
    const CERTIFICATE_TYPES: &[&str] = &[
        certificate::SERVER,
        certificate::AUTHORITY,
        certificate::CLIENT,
    ];
    const TOPLEVEL_TYPES: &[&str] = &[
        toplevel::UNENCRYPTED_CONFIGURATION,
        toplevel::ENCRYPTED_CONFIGURATION,
    ];
    const WIFI_SECURITY: &[&str] = &["None", "WEP-PSK", "WEP-8021X", "WPA-PSK", "WPA-EAP"];
    const VPN_TYPES: &[&str] = &[
        vpn::TYPE_IPSEC,
        vpn::TYPE_L2TP_IPSEC,
        vpn::TYPE_OPENVPN,
        vpn::TYPE_THIRD_PARTY,
    ];
    const EAP_OUTER: &[&str] = &[
        "LEAP", "EAP-AKA", "EAP-FAST", "EAP-TLS", "EAP-TTLS", "EAP-SIM", "PEAP",
    ];
    const PROXY_TYPES: &[&str] = &[proxy::DIRECT, proxy::MANUAL, proxy::PAC, proxy::WPAD];
    const IP_TYPES: &[&str] = &["IPv4", "IPv6"];
    const CLIENT_CERT_TYPES: &[&str] = &["Ref", "Pattern", "None"];

    if field == client_cert::CLIENT_CERT_TYPE {
        return Some(CLIENT_CERT_TYPES);
    }
    match (kind, field) {
        (Kind::Toplevel, toplevel::TYPE) => Some(TOPLEVEL_TYPES),
        (Kind::NetworkConfiguration, network::TYPE) => Some(NETWORK_TYPES),
        (Kind::Certificate, certificate::TYPE) => Some(CERTIFICATE_TYPES),
        (Kind::WiFi, wifi::SECURITY) => Some(WIFI_SECURITY),
        (Kind::VPN, vpn::TYPE) => Some(VPN_TYPES),
        (Kind::EAP, eap::OUTER) => Some(EAP_OUTER),
        (Kind::ProxySettings, proxy::TYPE) => Some(PROXY_TYPES),
        (Kind::IPConfig, ipconfig::TYPE) => Some(IP_TYPES),
        _ => None,
    }
}

fn missing_required_fields(kind: Kind, object: &Object) -> Vec<&'static str> {
    let mut required: Vec<&'static str> = Vec::new();
    match kind {
        Kind::NetworkConfiguration => {
            required.extend([network::GUID, network::TYPE]);
            if object.get_bool(network::REMOVE) != Some(true) {
                if let Some(sub_object) = object.get_str(network::TYPE).and_then(type_object_field)
                {
                    required.push(sub_object);
                }
            }
        }
        Kind::Certificate => {
            required.extend([certificate::GUID, certificate::TYPE]);
            if object.get_bool(certificate::REMOVE) != Some(true) {
                match object.get_str(certificate::TYPE) {
                    Some(certificate::SERVER | certificate::AUTHORITY) => {
                        required.push(certificate::X509)
                    }
                    Some(certificate::CLIENT) => required.push(certificate::PKCS12),
                    _ => {}
                }
            }
        }
        Kind::WiFi => {
            required.push(wifi::SECURITY);
            if !object.contains_key(wifi::HEX_SSID) {
                required.push(wifi::SSID);
            }
        }
        Kind::VPN => required.push(vpn::TYPE),
        Kind::EAP => required.push(eap::OUTER),
        Kind::ProxySettings => {
            required.push(proxy::TYPE);
            match object.get_str(proxy::TYPE) {
                Some(proxy::MANUAL) => required.push(proxy::MANUAL),
                Some(proxy::PAC) => required.push(proxy::PAC),
                _ => {}
            }
        }
        Kind::ProxyLocation => required.extend([proxy::HOST, proxy::PORT]),
        _ => {}
    }
    required.retain(|field| !object.contains_key(*field));
    required
}

/// Name of the sub-object a network of type `network_type` must carry.
fn type_object_field(network_type: &str) -> Option<&'static str> {
    match network_type {
        "Ethernet" => Some(network::ETHERNET),
        "WiFi" => Some(network::WIFI),
        "WiMAX" => Some(network::WIMAX),
        "Cellular" => Some(network::CELLULAR),
        "VPN" => Some(network::VPN),
        _ => None,
    }
}
