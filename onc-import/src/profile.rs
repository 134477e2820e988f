use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::import::ImportOptions;
use crate::mask::DEFAULT_MASK;
use crate::source::OncSource;
use crate::substitution::UserSubstitution;
use crate::validator::ValidatorOptions;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse profile {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubstitutionProfile {
    pub login_id: Option<String>,
    pub email: Option<String>,
}

/// Settings applied to every import run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportProfile {
    pub source: OncSource,
    pub mask: String,
    pub mask_credentials: bool,
    pub validator: ValidatorOptions,
    pub substitution: SubstitutionProfile,
}

impl Default for ImportProfile {
    fn default() -> Self {
        Self {
            source: OncSource::UserImport,
            mask: DEFAULT_MASK.to_string(),
            mask_credentials: false,
            validator: ValidatorOptions::default(),
            substitution: SubstitutionProfile::default(),
        }
    }
}

impl ImportProfile {
    pub fn import_options(&self) -> ImportOptions {
        let substitution = UserSubstitution::new(
            self.substitution.login_id.clone(),
            self.substitution.email.clone(),
        );
        ImportOptions {
            substitution: (!substitution.is_empty()).then_some(substitution),
            mask: self.mask_credentials.then(|| self.mask.clone()),
            validator: self.validator,
        }
    }
}

pub fn load_profile(override_path: Option<&Path>) -> Result<ImportProfile, ConfigLoadError> {
    load_profile_with_source(override_path)
        .map(|(profile, _)| profile)
}

/// Load the profile and describe where it came from: `embedded` or
/// `file:<path>`.
pub fn load_profile_with_source(
    override_path: Option<&Path>,
) -> Result<(ImportProfile, String), ConfigLoadError> {
    if let Some(path) = override_path {
        let profile = load_profile_file(path)?;
        return Ok((profile, format!("file:{}", path.display())));
    }
    Ok((load_embedded_profile()?, "embedded".to_string()))
}

fn load_embedded_profile() -> Result<ImportProfile, ConfigLoadError> {
    let raw = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/profiles/default.toml"));
    parse_profile(raw, "embedded")
}

fn load_profile_file(path: &Path) -> Result<ImportProfile, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profile(&raw, &path.display().to_string())
}

fn parse_profile(raw: &str, origin: &str) -> Result<ImportProfile, ConfigLoadError> {
    toml::from_str::<ImportProfile>(raw).map_err(|source| ConfigLoadError::Toml {
        origin: origin.to_string(),
        source,
    })
}
