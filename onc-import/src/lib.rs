//! Open Network Configuration (ONC) import pipeline.
//!
//! ONC documents describe networks (WiFi, Ethernet, VPN, Cellular, WiMAX),
//! the certificates those networks trust, and device-wide network policy.
//! This library takes a raw document from an administrator or a user import,
//! decrypts it when it is passphrase protected, validates and repairs it
//! against the ONC schema, and resolves the certificate references inside
//! each network so the result can be applied without a certificate store.
//!
//! # Architecture
//!
//! ## Schema
//!
//! - [`names`]: Field names and enumerated values
//! - [`signature`]: Per-object field tables (the schema registry)
//! - [`walk`]: Schema-guided traversal shared by the passes below
//!
//! ## Pipeline stages
//!
//! - [`decrypt`]: PBKDF2/AES-256-CBC/HMAC-SHA1 envelope
//! - [`validator`]: Validation and repair with a verdict
//! - [`substitution`]: `${LOGIN_ID}` / `${LOGIN_EMAIL}` expansion
//! - [`hex_ssid`]: `HexSSID` derivation
//! - [`certificates`]: PEM extraction and reference resolution
//! - [`import`]: The orchestrator tying the stages together
//!
//! ## Related transforms
//!
//! - [`mask`]: Credential masking for display and export
//! - [`proxy`]: ONC `ProxySettings` to and from a generic proxy config
//! - [`recommended`]: `Recommended` list queries
//! - [`network_type`]: Network type patterns (`All`, `Wireless`, ...)
//!
//! ## Reporting and configuration
//!
//! - [`diagnostics`]: Issues raised by every stage
//! - [`report`]: Terminal rendering of import and validation results
//! - [`profile`]: TOML import profiles
//! - [`source`]: Where a document came from
//!
//! # Examples
//!
//! ```ignore
//! use onc_import::import::parse_and_validate_onc_for_import;
//! use onc_import::source::OncSource;
//!
//! let blob = std::fs::read_to_string("policy.onc")?;
//! let outcome = parse_and_validate_onc_for_import(&blob, OncSource::DevicePolicy, "")?;
//! println!("{} networks, success={}", outcome.network_configs.len(), outcome.success);
//! ```
//!
//! # Built on onc-value
//!
//! Documents are ordered JSON objects from `onc-value`, which knows nothing
//! about ONC. All ONC semantics live in this crate.

pub mod certificates;
pub mod decrypt;
pub mod diagnostics;
pub mod hex_ssid;
pub mod import;
pub mod mask;
pub mod names;
pub mod network_type;
pub mod profile;
pub mod proxy;
pub mod recommended;
pub mod report;
pub mod signature;
pub mod source;
pub mod substitution;
pub mod validator;
pub mod walk;
