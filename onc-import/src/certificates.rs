//! Certificate extraction and server certificate reference resolution.
//!
//! Networks refer to certificates by GUID (`ServerCARef`, `ServerCertRef`,
//! `IssuerCARef`, ...). Before a network can be handed to a consumer those
//! references are replaced by the PEM text of the certificate they name.
//! Resolution is all-or-nothing per network: a network with any reference
//! that cannot be resolved is removed from the list.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use onc_value::{Object, ObjectExt, Value};
use thiserror::Error;
use x509_cert::der::pem::{encode_string, LineEnding, PemLabel};
use x509_cert::der::Decode;
use x509_cert::Certificate;

use crate::diagnostics::Diagnostics;
use crate::names::{certificate, client_cert, eap, network, openvpn};
use crate::signature::Kind;
use crate::walk::walk_mut;

/// PEM text of server and authority certificates, keyed by GUID.
pub type CertPemsByGuid = BTreeMap<String, String>;

/// Block labels accepted when tokenizing certificate PEM.
const PEM_LABELS: &[&str] = &["CERTIFICATE", "X509 CERTIFICATE"];

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("certificate data is neither PEM nor base64")]
    Encoding,
    #[error("certificate data is empty")]
    Empty,
    #[error("unable to encode PEM: {0}")]
    PemEncode(String),
    #[error("invalid X.509 certificate: {0}")]
    Der(#[from] x509_cert::der::Error),
}

/// Decode the first certificate PEM block, or bare base64 as a fallback,
/// into DER bytes.
pub fn decode_pem(text: &str) -> Result<Vec<u8>, CertificateError> {
    if text.trim().is_empty() {
        return Err(CertificateError::Empty);
    }
    let blocks = pem::parse_many(text)
        .map_err(|_| CertificateError::Encoding)?;
    let der = if blocks.is_empty() {
        let compact: String = text.split_ascii_whitespace().collect();
        BASE64
            .decode(compact)
            .map_err(|_| CertificateError::Encoding)?
    } else {
        blocks
            .into_iter()
            .find(|block| PEM_LABELS.contains(&block.tag()))
            .map(pem::Pem::into_contents)
            .ok_or(CertificateError::Encoding)?
    };
    if der.is_empty() {
        return Err(CertificateError::Empty);
    }
    Ok(der)
}

/// Canonical PEM text for DER bytes: `CERTIFICATE` label, 64-column lines.
pub fn pem_encode(der: &[u8]) -> Result<String, CertificateError> {
    encode_string(Certificate::PEM_LABEL, LineEnding::LF, der)
        .map_err(|err| CertificateError::PemEncode(err.to_string()))
}

/// Decode and parse a PEM or base64 certificate.
pub fn decode_pem_certificate(text: &str) -> Result<Certificate, CertificateError> {
    let der = decode_pem(text)?;
    Ok(Certificate::from_der(&der)?)
}

/// Convert certificate text into canonical PEM.
///
/// The DER is re-wrapped without being parsed, so certificates the X.509
/// parser rejects still reach the consumer. Use [`decode_pem_certificate`]
/// when the structure matters.
pub fn canonical_pem(text: &str) -> Result<String, CertificateError> {
    let der = decode_pem(text)?;
    pem_encode(&der)
}

/// Build the GUID to PEM map from a `Certificates` list.
///
/// Only `Server` and `Authority` certificates are included. Entries that do
/// not decode are reported and skipped.
pub fn server_and_ca_certs_by_guid(
    certificates: &[Value],
    diag: &mut Diagnostics,
) -> CertPemsByGuid {
    let mut pems = CertPemsByGuid::new();
    for (index, entry) in certificates.iter().enumerate() {
        let Some(cert) = entry.as_object() else {
            continue;
        };
        if !matches!(
            cert.get_str(certificate::TYPE),
            Some(certificate::SERVER | certificate::AUTHORITY)
        ) {
            continue;
        }
        let guid = cert.get_str(certificate::GUID).unwrap_or_default();
        let path = format!("Certificates[{index}]");
        let Some(x509) = cert.get_str(certificate::X509) else {
            diag.error(
                "invalid_certificate",
                path,
                format!("certificate '{guid}' has no X509 data"),
            );
            continue;
        };
        match canonical_pem(x509) {
            Ok(pem) => {
                pems.insert(guid.to_string(), pem);
            }
            Err(err) => diag.error(
                "invalid_certificate",
                path,
                format!("unable to decode certificate '{guid}': {err}"),
            ),
        }
    }
    pems
}

/// Outcome of resolving a list of networks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    /// Number of networks kept.
    pub resolved: usize,
    /// GUIDs of networks removed because a reference did not resolve.
    pub dropped: Vec<String>,
}

impl ResolveOutcome {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

struct Resolver<'a> {
    pems: &'a CertPemsByGuid,
    network: &'a str,
}

impl Resolver<'_> {
    fn lookup(&self, guid: &str, field: &str, diag: &mut Diagnostics) -> Option<String> {
        let pem = self.pems.get(guid).cloned();
        if pem.is_none() {
            diag.error(
                "unresolved_reference",
                format!("{}.{field}", self.network),
                format!(
                    "network '{}' references unknown certificate '{guid}' in {field}",
                    self.network
                ),
            );
        }
        pem
    }

    /// Replace a single GUID in `ref_field` with its PEM in `pem_field`.
    fn single(
        &self,
        object: &mut Object,
        ref_field: &str,
        pem_field: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        let Some(guid) = object.get(ref_field) else {
            return true;
        };
        let Some(guid) = guid.as_str() else {
            return self.bad_reference(ref_field, diag);
        };
        let Some(pem) = self.lookup(guid, ref_field, diag) else {
            return false;
        };
        object.remove(ref_field);
        object.insert(pem_field.to_string(), Value::String(pem));
        true
    }

    /// Replace a single GUID in `ref_field` with a one-entry PEM list.
    fn single_to_list(
        &self,
        object: &mut Object,
        ref_field: &str,
        pems_field: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        let Some(guid) = object.get(ref_field) else {
            return true;
        };
        let Some(guid) = guid.as_str() else {
            return self.bad_reference(ref_field, diag);
        };
        let Some(pem) = self.lookup(guid, ref_field, diag) else {
            return false;
        };
        object.remove(ref_field);
        object.insert(
            pems_field.to_string(),
            Value::Array(vec![Value::String(pem)]),
        );
        true
    }

    /// Replace a GUID list in `refs_field` with a PEM list in `pems_field`.
    fn list(
        &self,
        object: &mut Object,
        refs_field: &str,
        pems_field: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        let Some(refs) = object.get(refs_field) else {
            return true;
        };
        let Some(refs) = refs.as_array() else {
            return self.bad_reference(refs_field, diag);
        };
        let mut pems = Vec::with_capacity(refs.len());
        for guid in refs {
            let Some(guid) = guid.as_str() else {
                return self.bad_reference(refs_field, diag);
            };
            let Some(pem) = self.lookup(guid, refs_field, diag) else {
                return false;
            };
            pems.push(Value::String(pem));
        }
        object.remove(refs_field);
        object.insert(pems_field.to_string(), Value::Array(pems));
        true
    }

    /// The plural field wins; a singular field next to it is discarded.
    fn list_or_single(
        &self,
        object: &mut Object,
        refs_field: &str,
        ref_field: &str,
        pems_field: &str,
        diag: &mut Diagnostics,
    ) -> bool {
        if object.contains_key(refs_field) {
            if object.remove(ref_field).is_some() {
                diag.warning(
                    "conflicting_references",
                    format!("{}.{ref_field}", self.network),
                    format!("found both {refs_field} and {ref_field}, ignoring {ref_field}"),
                );
            }
            return self.list(object, refs_field, pems_field, diag);
        }
        self.single_to_list(object, ref_field, pems_field, diag)
    }

    fn bad_reference(&self, field: &str, diag: &mut Diagnostics) -> bool {
        diag.error(
            "unresolved_reference",
            format!("{}.{field}", self.network),
            format!("network '{}' has a malformed {field}", self.network),
        );
        false
    }

    fn resolve_node(&self, kind: Kind, object: &mut Object, diag: &mut Diagnostics) -> bool {
        match kind {
            Kind::CertificatePattern => self.list(
                object,
                client_cert::ISSUER_CA_REF,
                client_cert::ISSUER_CA_PEMS,
                diag,
            ),
            Kind::EAP | Kind::IPsec => self.list_or_single(
                object,
                eap::SERVER_CA_REFS,
                eap::SERVER_CA_REF,
                eap::SERVER_CA_PEMS,
                diag,
            ),
            Kind::OpenVPN => {
                let server = self.single(
                    object,
                    openvpn::SERVER_CERT_REF,
                    openvpn::SERVER_CERT_PEM,
                    diag,
                );
                let authorities = self.list_or_single(
                    object,
                    openvpn::SERVER_CA_REFS,
                    openvpn::SERVER_CA_REF,
                    openvpn::SERVER_CA_PEMS,
                    diag,
                );
                server && authorities
            }
            _ => true,
        }
    }
}

/// Resolve every server and CA reference inside one network configuration.
pub fn resolve_server_cert_refs_in_network(
    pems: &CertPemsByGuid,
    network: &mut Object,
    diag: &mut Diagnostics,
) -> bool {
    let guid = network
        .get_str(network::GUID)
        .unwrap_or_default()
        .to_string();
    let resolver = Resolver {
        pems,
        network: &guid,
    };
    walk_mut(Kind::NetworkConfiguration, network, &mut |kind, node| {
        resolver.resolve_node(kind, node, diag)
    })
}

/// Resolve references in a network list, removing networks that fail.
pub fn resolve_server_cert_refs_in_networks(
    pems: &CertPemsByGuid,
    networks: &mut Vec<Value>,
    diag: &mut Diagnostics,
) -> ResolveOutcome {
    let mut outcome = ResolveOutcome::default();
    networks.retain_mut(|entry| {
        let Value::Object(network) = entry else {
            return false;
        };
        if resolve_server_cert_refs_in_network(pems, network, diag) {
            outcome.resolved += 1;
            return true;
        }
        let guid = network
            .get_str(network::GUID)
            .unwrap_or_default()
            .to_string();
        tracing::error!(guid = %guid, "removing network with unresolved certificate references");
        outcome.dropped.push(guid);
        false
    });
    outcome
}
