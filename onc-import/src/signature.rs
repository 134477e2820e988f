//! Static schema registry for ONC object kinds.
//!
//! Every object in an ONC document has a [`Kind`]. A kind owns a read-only
//! table of [`FieldSignature`]s naming its known fields, the shape each field
//! must have, and whether the field holds a credential. Nested objects are
//! described by [`ValueKind::Object`] / [`ValueKind::ObjectList`], which is
//! how every tree walk in this crate finds the kind of a child object.
//!
//! The tables are plain `static` data, so the registry needs no
//! initialization and no locking.

use std::fmt::{self, Display, Formatter};

use crate::names::{
    self, cellular, certificate, client_cert, eap, ethernet, global, ipconfig, ipsec, network,
    openvpn, proxy, toplevel, verify_x509, vpn, wifi, wimax,
};

/// Object kinds known to the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Toplevel,
    NetworkConfiguration,
    Certificate,
    GlobalNetworkConfiguration,
    Ethernet,
    WiFi,
    WiMAX,
    Cellular,
    CellularApn,
    VPN,
    IPsec,
    XAUTH,
    L2TP,
    OpenVPN,
    VerifyX509,
    EAP,
    CertificatePattern,
    IssuerSubjectPattern,
    IPConfig,
    ProxySettings,
    ProxyManual,
    ProxyLocation,
}

/// Expected shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Integer,
    /// Any JSON number; integers are accepted.
    Double,
    String,
    StringList,
    IntegerList,
    Object(Kind),
    ObjectList(Kind),
}

impl ValueKind {
    /// Nested kind for object-valued fields.
    pub fn nested_kind(self) -> Option<Kind> {
        match self {
            ValueKind::Object(kind) | ValueKind::ObjectList(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_object(self) -> bool {
        matches!(self, ValueKind::Object(_) | ValueKind::ObjectList(_))
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => write!(f, "boolean"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Double => write!(f, "number"),
            ValueKind::String => write!(f, "string"),
            ValueKind::StringList => write!(f, "list of strings"),
            ValueKind::IntegerList => write!(f, "list of integers"),
            ValueKind::Object(kind) => write!(f, "{kind} object"),
            ValueKind::ObjectList(kind) => write!(f, "list of {kind} objects"),
        }
    }
}

/// Schema entry for one field of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSignature {
    pub name: &'static str,
    pub value: ValueKind,
    /// The field holds a secret that must never be shown to users.
    pub credential: bool,
}

const fn field(name: &'static str, value: ValueKind) -> FieldSignature {
    FieldSignature {
        name,
        value,
        credential: false,
    }
}

const fn secret(name: &'static str, value: ValueKind) -> FieldSignature {
    FieldSignature {
        name,
        value,
        credential: true,
    }
}

use ValueKind::{Bool, Integer, Object, ObjectList, String as Str, StringList};

const RECOMMENDED: FieldSignature = field(names::RECOMMENDED, StringList);

static TOPLEVEL_FIELDS: &[FieldSignature] = &[
    field(toplevel::TYPE, Str),
    field(
        toplevel::NETWORK_CONFIGURATIONS,
        ObjectList(Kind::NetworkConfiguration),
    ),
    field(toplevel::CERTIFICATES, ObjectList(Kind::Certificate)),
    field(
        toplevel::GLOBAL_NETWORK_CONFIGURATION,
        Object(Kind::GlobalNetworkConfiguration),
    ),
];

static NETWORK_CONFIGURATION_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(network::GUID, Str),
    field(network::NAME, Str),
    field(network::TYPE, Str),
    field(network::REMOVE, Bool),
    field(network::PRIORITY, Integer),
    field(network::IP_ADDRESS_CONFIG_TYPE, Str),
    field(network::NAME_SERVERS_CONFIG_TYPE, Str),
    field(network::STATIC_IP_CONFIG, Object(Kind::IPConfig)),
    field(network::PROXY_SETTINGS, Object(Kind::ProxySettings)),
    field(network::ETHERNET, Object(Kind::Ethernet)),
    field(network::WIFI, Object(Kind::WiFi)),
    field(network::WIMAX, Object(Kind::WiMAX)),
    field(network::CELLULAR, Object(Kind::Cellular)),
    field(network::VPN, Object(Kind::VPN)),
];

static CERTIFICATE_FIELDS: &[FieldSignature] = &[
    field(certificate::GUID, Str),
    field(certificate::TYPE, Str),
    field(certificate::REMOVE, Bool),
    field(certificate::X509, Str),
    secret(certificate::PKCS12, Str),
    field(certificate::TRUST_BITS, StringList),
];

static GLOBAL_NETWORK_CONFIGURATION_FIELDS: &[FieldSignature] = &[
    field(global::ALLOW_ONLY_POLICY_NETWORKS_TO_AUTOCONNECT, Bool),
    field(global::ALLOW_ONLY_POLICY_NETWORKS_TO_CONNECT, Bool),
    field(global::BLACKLISTED_HEX_SSIDS, StringList),
    field(global::DISABLE_NETWORK_TYPES, StringList),
];

static ETHERNET_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(ethernet::AUTHENTICATION, Str),
    field(ethernet::EAP, Object(Kind::EAP)),
];

static WIFI_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(wifi::ALLOW_GATEWAY_ARP_POLLING, Bool),
    field(wifi::AUTO_CONNECT, Bool),
    field(wifi::EAP, Object(Kind::EAP)),
    field(wifi::HEX_SSID, Str),
    field(wifi::HIDDEN_SSID, Bool),
    secret(wifi::PASSPHRASE, Str),
    field(wifi::ROAM_THRESHOLD, Integer),
    field(wifi::SECURITY, Str),
    field(wifi::SSID, Str),
];

static WIMAX_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(wimax::AUTO_CONNECT, Bool),
    field(wimax::EAP, Object(Kind::EAP)),
];

static CELLULAR_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(cellular::APN, Object(Kind::CellularApn)),
    field(cellular::AUTO_CONNECT, Bool),
];

static CELLULAR_APN_FIELDS: &[FieldSignature] = &[
    field(cellular::ACCESS_POINT_NAME, Str),
    field(cellular::USERNAME, Str),
    secret(cellular::PASSWORD, Str),
];

static VPN_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(vpn::AUTO_CONNECT, Bool),
    field(vpn::HOST, Str),
    field(vpn::IPSEC, Object(Kind::IPsec)),
    field(vpn::L2TP, Object(Kind::L2TP)),
    field(vpn::OPENVPN, Object(Kind::OpenVPN)),
    field(vpn::TYPE, Str),
];

static IPSEC_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(ipsec::AUTHENTICATION_TYPE, Str),
    field(
        client_cert::CLIENT_CERT_PATTERN,
        Object(Kind::CertificatePattern),
    ),
    field(client_cert::CLIENT_CERT_REF, Str),
    field(client_cert::CLIENT_CERT_TYPE, Str),
    field(ipsec::EAP, Object(Kind::EAP)),
    field(ipsec::GROUP, Str),
    field(ipsec::IKE_VERSION, Integer),
    secret(ipsec::PSK, Str),
    field(vpn::SAVE_CREDENTIALS, Bool),
    field(ipsec::SERVER_CA_PEMS, StringList),
    field(ipsec::SERVER_CA_REF, Str),
    field(ipsec::SERVER_CA_REFS, StringList),
    field(ipsec::XAUTH, Object(Kind::XAUTH)),
];

static XAUTH_FIELDS: &[FieldSignature] = &[
    secret(vpn::PASSWORD, Str),
    field(vpn::SAVE_CREDENTIALS, Bool),
    field(vpn::USERNAME, Str),
];

static L2TP_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    secret(vpn::PASSWORD, Str),
    field(vpn::SAVE_CREDENTIALS, Bool),
    field(vpn::USERNAME, Str),
];

static OPENVPN_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(openvpn::AUTH, Str),
    field(openvpn::AUTH_NO_CACHE, Bool),
    field(openvpn::AUTH_RETRY, Str),
    field(openvpn::CIPHER, Str),
    field(
        client_cert::CLIENT_CERT_PATTERN,
        Object(Kind::CertificatePattern),
    ),
    field(client_cert::CLIENT_CERT_REF, Str),
    field(client_cert::CLIENT_CERT_TYPE, Str),
    field(openvpn::COMP_LZO, Str),
    field(openvpn::COMP_NO_ADAPT, Bool),
    field(openvpn::IGNORE_DEFAULT_ROUTE, Bool),
    field(openvpn::KEY_DIRECTION, Str),
    field(openvpn::NS_CERT_TYPE, Str),
    secret(openvpn::OTP, Str),
    secret(vpn::PASSWORD, Str),
    field(openvpn::PORT, Integer),
    field(openvpn::PROTO, Str),
    field(openvpn::PUSH_PEER_INFO, Bool),
    field(openvpn::REMOTE_CERT_EKU, Str),
    field(openvpn::REMOTE_CERT_KU, StringList),
    field(openvpn::REMOTE_CERT_TLS, Str),
    field(openvpn::RENEG_SEC, Integer),
    field(vpn::SAVE_CREDENTIALS, Bool),
    field(openvpn::SERVER_CA_PEMS, StringList),
    field(openvpn::SERVER_CA_REF, Str),
    field(openvpn::SERVER_CA_REFS, StringList),
    field(openvpn::SERVER_CERT_PEM, Str),
    field(openvpn::SERVER_CERT_REF, Str),
    field(openvpn::SERVER_POLL_TIMEOUT, Integer),
    field(openvpn::SHAPER, Integer),
    field(openvpn::STATIC_CHALLENGE, Str),
    secret(openvpn::TLS_AUTH_CONTENTS, Str),
    field(openvpn::TLS_REMOTE, Str),
    field(openvpn::USER_AUTHENTICATION_TYPE, Str),
    field(vpn::USERNAME, Str),
    field(openvpn::VERB, Str),
    field(openvpn::VERIFY_HASH, Str),
    field(openvpn::VERIFY_X509, Object(Kind::VerifyX509)),
];

static VERIFY_X509_FIELDS: &[FieldSignature] = &[
    field(verify_x509::NAME, Str),
    field(verify_x509::TYPE, Str),
];

static EAP_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(eap::ANONYMOUS_IDENTITY, Str),
    field(
        client_cert::CLIENT_CERT_PATTERN,
        Object(Kind::CertificatePattern),
    ),
    field(client_cert::CLIENT_CERT_REF, Str),
    field(client_cert::CLIENT_CERT_TYPE, Str),
    field(eap::IDENTITY, Str),
    field(eap::INNER, Str),
    field(eap::OUTER, Str),
    secret(eap::PASSWORD, Str),
    field(eap::SAVE_CREDENTIALS, Bool),
    field(eap::SERVER_CA_PEMS, StringList),
    field(eap::SERVER_CA_REF, Str),
    field(eap::SERVER_CA_REFS, StringList),
    field(eap::USE_PROACTIVE_KEY_CACHING, Bool),
    field(eap::USE_SYSTEM_CAS, Bool),
];

static CERTIFICATE_PATTERN_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(client_cert::ENROLLMENT_URI, StringList),
    field(client_cert::ISSUER, Object(Kind::IssuerSubjectPattern)),
    field(client_cert::ISSUER_CA_REF, StringList),
    field(client_cert::ISSUER_CA_PEMS, StringList),
    field(client_cert::SUBJECT, Object(Kind::IssuerSubjectPattern)),
];

static ISSUER_SUBJECT_PATTERN_FIELDS: &[FieldSignature] = &[
    field(client_cert::COMMON_NAME, Str),
    field(client_cert::LOCALITY, Str),
    field(client_cert::ORGANIZATION, Str),
    field(client_cert::ORGANIZATIONAL_UNIT, Str),
];

static IPCONFIG_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(ipconfig::GATEWAY, Str),
    field(ipconfig::IP_ADDRESS, Str),
    field(ipconfig::NAME_SERVERS, StringList),
    field(ipconfig::ROUTING_PREFIX, Integer),
    field(ipconfig::SEARCH_DOMAINS, StringList),
    field(ipconfig::TYPE, Str),
    field(ipconfig::WEB_PROXY_AUTO_DISCOVERY_URL, Str),
];

static PROXY_SETTINGS_FIELDS: &[FieldSignature] = &[
    RECOMMENDED,
    field(proxy::TYPE, Str),
    field(proxy::MANUAL, Object(Kind::ProxyManual)),
    field(proxy::EXCLUDE_DOMAINS, StringList),
    field(proxy::PAC, Str),
];

static PROXY_MANUAL_FIELDS: &[FieldSignature] = &[
    field(proxy::FTP, Object(Kind::ProxyLocation)),
    field(proxy::HTTP, Object(Kind::ProxyLocation)),
    field(proxy::HTTPS, Object(Kind::ProxyLocation)),
    field(proxy::SOCKS, Object(Kind::ProxyLocation)),
];

static PROXY_LOCATION_FIELDS: &[FieldSignature] =
    &[field(proxy::HOST, Str), field(proxy::PORT, Integer)];

impl Kind {
    /// Display name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Toplevel => "ToplevelConfiguration",
            Kind::NetworkConfiguration => "NetworkConfiguration",
            Kind::Certificate => "Certificate",
            Kind::GlobalNetworkConfiguration => "GlobalNetworkConfiguration",
            Kind::Ethernet => "Ethernet",
            Kind::WiFi => "WiFi",
            Kind::WiMAX => "WiMAX",
            Kind::Cellular => "Cellular",
            Kind::CellularApn => "CellularAPN",
            Kind::VPN => "VPN",
            Kind::IPsec => "IPsec",
            Kind::XAUTH => "XAUTH",
            Kind::L2TP => "L2TP",
            Kind::OpenVPN => "OpenVPN",
            Kind::VerifyX509 => "VerifyX509",
            Kind::EAP => "EAP",
            Kind::CertificatePattern => "CertificatePattern",
            Kind::IssuerSubjectPattern => "IssuerSubjectPattern",
            Kind::IPConfig => "IPConfig",
            Kind::ProxySettings => "ProxySettings",
            Kind::ProxyManual => "ProxyManual",
            Kind::ProxyLocation => "ProxyLocation",
        }
    }

    /// All field signatures declared by this kind.
    pub fn fields(self) -> &'static [FieldSignature] {
        match self {
            Kind::Toplevel => TOPLEVEL_FIELDS,
            Kind::NetworkConfiguration => NETWORK_CONFIGURATION_FIELDS,
            Kind::Certificate => CERTIFICATE_FIELDS,
            Kind::GlobalNetworkConfiguration => GLOBAL_NETWORK_CONFIGURATION_FIELDS,
            Kind::Ethernet => ETHERNET_FIELDS,
            Kind::WiFi => WIFI_FIELDS,
            Kind::WiMAX => WIMAX_FIELDS,
            Kind::Cellular => CELLULAR_FIELDS,
            Kind::CellularApn => CELLULAR_APN_FIELDS,
            Kind::VPN => VPN_FIELDS,
            Kind::IPsec => IPSEC_FIELDS,
            Kind::XAUTH => XAUTH_FIELDS,
            Kind::L2TP => L2TP_FIELDS,
            Kind::OpenVPN => OPENVPN_FIELDS,
            Kind::VerifyX509 => VERIFY_X509_FIELDS,
            Kind::EAP => EAP_FIELDS,
            Kind::CertificatePattern => CERTIFICATE_PATTERN_FIELDS,
            Kind::IssuerSubjectPattern => ISSUER_SUBJECT_PATTERN_FIELDS,
            Kind::IPConfig => IPCONFIG_FIELDS,
            Kind::ProxySettings => PROXY_SETTINGS_FIELDS,
            Kind::ProxyManual => PROXY_MANUAL_FIELDS,
            Kind::ProxyLocation => PROXY_LOCATION_FIELDS,
        }
    }

    /// Look up the signature of `name`, if this kind declares it.
    pub fn field(self, name: &str) -> Option<&'static FieldSignature> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Whether objects of this kind may carry a `Recommended` list.
    pub fn supports_recommended(self) -> bool {
        self.field(names::RECOMMENDED).is_some()
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `field` of `kind` is flagged as a credential.
pub fn is_credential(kind: Kind, field: &str) -> bool {
    kind.field(field).is_some_and(|f| f.credential)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{is_credential, Kind, ValueKind};

    const ALL: &[Kind] = &[
        Kind::Toplevel,
        Kind::NetworkConfiguration,
        Kind::Certificate,
        Kind::GlobalNetworkConfiguration,
        Kind::Ethernet,
        Kind::WiFi,
        Kind::WiMAX,
        Kind::Cellular,
        Kind::CellularApn,
        Kind::VPN,
        Kind::IPsec,
        Kind::XAUTH,
        Kind::L2TP,
        Kind::OpenVPN,
        Kind::VerifyX509,
        Kind::EAP,
        Kind::CertificatePattern,
        Kind::IssuerSubjectPattern,
        Kind::IPConfig,
        Kind::ProxySettings,
        Kind::ProxyManual,
        Kind::ProxyLocation,
    ];

    #[test]
    fn field_names_are_unique_per_kind() {
        for kind in ALL {
            let mut seen = HashSet::new();
            for field in kind.fields() {
                assert!(seen.insert(field.name), "{kind} declares {} twice", field.name);
            }
        }
    }

    #[test]
    fn nested_kinds_resolve() {
        assert_eq!(
            Kind::WiFi.field("EAP").map(|f| f.value),
            Some(ValueKind::Object(Kind::EAP))
        );
        assert_eq!(
            Kind::Toplevel
                .field("NetworkConfigurations")
                .and_then(|f| f.value.nested_kind()),
            Some(Kind::NetworkConfiguration)
        );
        assert!(Kind::WiFi.field("Unknown").is_none());
    }

    #[test]
    fn credentials_are_flagged() {
        assert!(is_credential(Kind::WiFi, "Passphrase"));
        assert!(is_credential(Kind::EAP, "Password"));
        assert!(is_credential(Kind::OpenVPN, "OTP"));
        assert!(is_credential(Kind::Certificate, "PKCS12"));
        assert!(!is_credential(Kind::WiFi, "SSID"));
        assert!(!is_credential(Kind::WiFi, "NotAField"));
    }

    #[test]
    fn recommended_support_follows_tables() {
        assert!(Kind::WiFi.supports_recommended());
        assert!(Kind::NetworkConfiguration.supports_recommended());
        assert!(!Kind::Certificate.supports_recommended());
        assert!(!Kind::Toplevel.supports_recommended());
    }
}
