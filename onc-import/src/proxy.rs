//! Translation between ONC `ProxySettings` and a generic proxy configuration.
//!
//! The generic side mirrors a browser proxy preference dictionary: a `mode`
//! plus, depending on the mode, a PAC URL or a proxy rules string such as
//! `http=proxy:8080;socks=socks4://gw:1080` and a `;`-separated bypass list.

use std::fmt::{self, Display, Formatter};

use onc_value::{Object, ObjectExt, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::names::proxy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("unsupported proxy conversion: {0}")]
    ConversionUnsupported(String),
    #[error("invalid PAC URL '{url}': {reason}")]
    InvalidPacUrl { url: String, reason: String },
    #[error("manual proxy settings are missing the 'Manual' object")]
    MissingManual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyMode {
    Direct,
    AutoDetect,
    PacScript,
    FixedServers,
    System,
}

/// Generic proxy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub mode: ProxyMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pac_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pac_mandatory: Option<bool>,
    /// Proxy rules string, see [`ProxyRules::parse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bypass_list: Option<String>,
}

impl ProxyConfig {
    fn with_mode(mode: ProxyMode) -> Self {
        Self {
            mode,
            pac_url: None,
            pac_mandatory: None,
            server: None,
            bypass_list: None,
        }
    }

    pub fn direct() -> Self {
        Self::with_mode(ProxyMode::Direct)
    }

    pub fn auto_detect() -> Self {
        Self::with_mode(ProxyMode::AutoDetect)
    }

    pub fn pac_script(url: impl Into<String>, mandatory: bool) -> Self {
        Self {
            pac_url: Some(url.into()),
            pac_mandatory: Some(mandatory),
            ..Self::with_mode(ProxyMode::PacScript)
        }
    }

    /// Fixed servers; an empty rules string degrades to a direct connection.
    pub fn fixed_servers(server: impl Into<String>, bypass_list: impl Into<String>) -> Self {
        let server = server.into();
        if server.is_empty() {
            return Self::direct();
        }
        Self {
            server: Some(server),
            bypass_list: Some(bypass_list.into()),
            ..Self::with_mode(ProxyMode::FixedServers)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyScheme {
    Direct,
    Http,
    Https,
    Socks4,
    Socks5,
    Quic,
}

impl ProxyScheme {
    pub fn name(self) -> &'static str {
        match self {
            ProxyScheme::Direct => "direct",
            ProxyScheme::Http => "http",
            ProxyScheme::Https => "https",
            ProxyScheme::Socks4 => "socks4",
            ProxyScheme::Socks5 => "socks5",
            ProxyScheme::Quic => "quic",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ProxyScheme::Direct => 0,
            ProxyScheme::Http => 80,
            ProxyScheme::Https | ProxyScheme::Quic => 443,
            ProxyScheme::Socks4 | ProxyScheme::Socks5 => 1080,
        }
    }

    /// Scheme named by a URI prefix. A bare `socks` means SOCKS5.
    fn from_uri_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "direct" => Some(ProxyScheme::Direct),
            "http" => Some(ProxyScheme::Http),
            "https" => Some(ProxyScheme::Https),
            "socks4" => Some(ProxyScheme::Socks4),
            "socks" | "socks5" => Some(ProxyScheme::Socks5),
            "quic" => Some(ProxyScheme::Quic),
            _ => None,
        }
    }
}

impl Display for ProxyScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One proxy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyServer {
    pub scheme: ProxyScheme,
    /// Host name or address, IPv6 literals without brackets.
    pub host: String,
    pub port: u16,
}

impl ProxyServer {
    pub fn new(scheme: ProxyScheme, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
        }
    }

    /// Parse `[scheme://]host[:port]`, using `default_scheme` when no scheme
    /// is given and the scheme's default port when no port is given.
    pub fn from_uri(uri: &str, default_scheme: ProxyScheme) -> Option<Self> {
        let uri = uri.trim();
        let (scheme, rest) = match uri.split_once("://") {
            Some((prefix, rest)) => (ProxyScheme::from_uri_prefix(prefix)?, rest),
            None => (default_scheme, uri),
        };
        if scheme == ProxyScheme::Direct {
            return rest
                .is_empty()
                .then(|| Self::new(ProxyScheme::Direct, "", 0));
        }

        let (host, port) = split_host_port(rest)?;
        if host.is_empty() {
            return None;
        }
        let port = match port {
            Some(port) => port.parse().ok()?,
            None => scheme.default_port(),
        };
        Some(Self::new(scheme, host, port))
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn host_port(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// URI form; HTTP proxies are written without a scheme prefix.
    pub fn to_uri(&self) -> String {
        match self.scheme {
            ProxyScheme::Direct => "direct://".to_string(),
            ProxyScheme::Http => self.host_port(),
            scheme => format!("{scheme}://{}", self.host_port()),
        }
    }
}

fn split_host_port(text: &str) -> Option<(&str, Option<&str>)> {
    if let Some(bracketed) = text.strip_prefix('[') {
        let (host, after) = bracketed.split_once(']')?;
        return match after {
            "" => Some((host, None)),
            _ => Some((host, Some(after.strip_prefix(':')?))),
        };
    }
    match text.split_once(':') {
        Some((_, port)) if port.contains(':') => None,
        Some((host, port)) => Some((host, Some(port))),
        None => Some((text, None)),
    }
}

/// Per-scheme proxy lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeProxies {
    pub ftp: Vec<ProxyServer>,
    pub http: Vec<ProxyServer>,
    pub https: Vec<ProxyServer>,
    /// Entries given as `socks=`; these default to SOCKS4.
    pub socks: Vec<ProxyServer>,
}

/// Parsed proxy rules string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyRules {
    Empty,
    /// One proxy list used for every URL scheme.
    Single(Vec<ProxyServer>),
    PerScheme(SchemeProxies),
}

impl ProxyRules {
    /// Parse either `host:port[,fallback...]` or
    /// `scheme=host:port[,...];scheme=...` with schemes `ftp`, `http`,
    /// `https` and `socks`. Invalid servers are skipped.
    pub fn parse(rules: &str) -> Self {
        let mut per_scheme = SchemeProxies::default();
        let mut seen_scheme = false;

        for entry in rules.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((url_scheme, list)) = entry.split_once('=') else {
                if seen_scheme {
                    continue;
                }
                return ProxyRules::Single(parse_server_list(entry, ProxyScheme::Http));
            };
            seen_scheme = true;
            let (target, default_scheme) = match url_scheme.trim().to_ascii_lowercase().as_str() {
                "ftp" => (&mut per_scheme.ftp, ProxyScheme::Http),
                "http" => (&mut per_scheme.http, ProxyScheme::Http),
                "https" => (&mut per_scheme.https, ProxyScheme::Http),
                "socks" => (&mut per_scheme.socks, ProxyScheme::Socks4),
                other => {
                    tracing::debug!(scheme = other, "ignoring proxy rule for unknown URL scheme");
                    continue;
                }
            };
            target.extend(parse_server_list(list, default_scheme));
        }

        if seen_scheme {
            ProxyRules::PerScheme(per_scheme)
        } else {
            ProxyRules::Empty
        }
    }

    /// Servers to use for `url_scheme` (`ftp`, `http`, `https` or `socks`).
    ///
    /// Per-scheme rules only answer from the list for that scheme. A scheme
    /// without its own entry gets an empty slice and never falls back to the
    /// `socks=` list, unlike a browser resolving a request. Converting back to
    /// ONC relies on this so manual settings keep their exact slots.
    pub fn proxies_for(&self, url_scheme: &str) -> &[ProxyServer] {
        match self {
            ProxyRules::Empty => &[],
            ProxyRules::Single(list) => list,
            ProxyRules::PerScheme(lists) => match url_scheme {
                "ftp" => &lists.ftp,
                "http" => &lists.http,
                "https" => &lists.https,
                "socks" => &lists.socks,
                _ => &[],
            },
        }
    }
}

fn parse_server_list(list: &str, default_scheme: ProxyScheme) -> Vec<ProxyServer> {
    list.split(',')
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .filter_map(|uri| {
            let server = ProxyServer::from_uri(uri, default_scheme);
            if server.is_none() {
                tracing::warn!(uri, "skipping invalid proxy server");
            }
            server
        })
        .collect()
}

/// Join bypass rules into the generic `;`-separated form.
pub fn encode_bypass_rules<S: AsRef<str>>(rules: &[S]) -> String {
    rules
        .iter()
        .map(|rule| rule.as_ref().trim())
        .filter(|rule| !rule.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

/// Split a bypass list on `,` or `;`.
pub fn parse_bypass_rules(list: &str) -> Vec<String> {
    list.split([',', ';'])
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// ONC scheme keys in the order they are written to a rules string, with
/// the URL scheme each one maps to and the scheme assumed for bare hosts.
const MANUAL_SCHEMES: &[(&str, &str, ProxyScheme)] = &[
    (proxy::FTP, "ftp", ProxyScheme::Http),
    (proxy::HTTP, "http", ProxyScheme::Http),
    (proxy::SOCKS, "socks", ProxyScheme::Socks4),
    (proxy::HTTPS, "https", ProxyScheme::Http),
];

fn onc_location_to_server(location: &Object, default_scheme: ProxyScheme) -> Option<ProxyServer> {
    let host = location.get_str(proxy::HOST)?;
    let mut server = ProxyServer::from_uri(host, default_scheme)?;
    if let Some(port) = location.get_i64(proxy::PORT) {
        server.port = u16::try_from(port).ok()?;
    }
    Some(server)
}

/// Convert ONC `ProxySettings` into a generic proxy configuration.
pub fn convert_onc_proxy_settings_to_proxy_config(
    settings: &Object,
) -> Result<ProxyConfig, ProxyError> {
    match settings.get_str(proxy::TYPE) {
        Some(proxy::DIRECT) => Ok(ProxyConfig::direct()),
        Some(proxy::WPAD) => Ok(ProxyConfig::auto_detect()),
        Some(proxy::PAC) => {
            let raw = settings.get_str(proxy::PAC).unwrap_or_default();
            let url = Url::parse(raw).map_err(|err| ProxyError::InvalidPacUrl {
                url: raw.to_string(),
                reason: err.to_string(),
            })?;
            Ok(ProxyConfig::pac_script(url.as_str(), false))
        }
        Some(proxy::MANUAL) => {
            let manual = settings
                .get_object(proxy::MANUAL)
                .ok_or(ProxyError::MissingManual)?;

            let mut rules = Vec::new();
            for (onc_key, url_scheme, default_scheme) in MANUAL_SCHEMES {
                let Some(location) = manual.get_object(onc_key) else {
                    continue;
                };
                match onc_location_to_server(location, *default_scheme) {
                    Some(server) => rules.push(format!("{url_scheme}={}", server.to_uri())),
                    None => {
                        tracing::warn!(scheme = *onc_key, "skipping invalid manual proxy location")
                    }
                }
            }

            let bypass = encode_bypass_rules(&settings.string_list(proxy::EXCLUDE_DOMAINS));
            Ok(ProxyConfig::fixed_servers(rules.join(";"), bypass))
        }
        Some(other) => Err(ProxyError::ConversionUnsupported(format!(
            "proxy type '{other}'"
        ))),
        None => Err(ProxyError::ConversionUnsupported(
            "proxy settings without a type".to_string(),
        )),
    }
}

fn server_to_onc_location(server: &ProxyServer, default_scheme: ProxyScheme) -> Object {
    let host = if server.host.contains(':') {
        format!("[{}]", server.host)
    } else {
        server.host.clone()
    };
    let host = if server.scheme == default_scheme {
        host
    } else {
        format!("{}://{host}", server.scheme)
    };

    let mut location = Object::new();
    location.insert(proxy::HOST.to_string(), Value::String(host));
    location.insert(proxy::PORT.to_string(), Value::from(server.port));
    location
}

/// Convert a generic proxy configuration into ONC `ProxySettings`.
pub fn convert_proxy_config_to_onc_proxy_settings(
    config: &ProxyConfig,
) -> Result<Object, ProxyError> {
    let mut settings = Object::new();
    match config.mode {
        ProxyMode::Direct => {
            settings.insert(proxy::TYPE.into(), proxy::DIRECT.into());
        }
        ProxyMode::AutoDetect => {
            settings.insert(proxy::TYPE.into(), proxy::WPAD.into());
        }
        ProxyMode::PacScript => {
            settings.insert(proxy::TYPE.into(), proxy::PAC.into());
            let url = config.pac_url.clone().unwrap_or_default();
            settings.insert(proxy::PAC.into(), Value::String(url));
        }
        ProxyMode::FixedServers => {
            settings.insert(proxy::TYPE.into(), proxy::MANUAL.into());

            let rules = ProxyRules::parse(config.server.as_deref().unwrap_or_default());
            let mut manual = Object::new();
            for (onc_key, url_scheme) in [
                (proxy::FTP, "ftp"),
                (proxy::HTTP, "http"),
                (proxy::HTTPS, "https"),
                (proxy::SOCKS, "socks"),
            ] {
                let default_scheme = if onc_key == proxy::SOCKS {
                    ProxyScheme::Socks4
                } else {
                    ProxyScheme::Http
                };
                let first = rules
                    .proxies_for(url_scheme)
                    .iter()
                    .find(|server| server.scheme != ProxyScheme::Direct);
                if let Some(server) = first {
                    manual.insert(
                        onc_key.to_string(),
                        Value::Object(server_to_onc_location(server, default_scheme)),
                    );
                }
            }
            settings.insert(proxy::MANUAL.into(), Value::Object(manual));

            let exclude = parse_bypass_rules(config.bypass_list.as_deref().unwrap_or_default());
            if !exclude.is_empty() {
                settings.insert(proxy::EXCLUDE_DOMAINS.into(), Value::from(exclude));
            }
        }
        ProxyMode::System => {
            return Err(ProxyError::ConversionUnsupported(
                "system proxy mode has no ONC equivalent".to_string(),
            ));
        }
    }
    Ok(settings)
}
