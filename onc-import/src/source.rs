use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where an ONC document came from.
///
/// Policy sources are validated more strictly and are the only sources whose
/// `Recommended` lists are honored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OncSource {
    #[default]
    Unknown,
    None,
    DevicePolicy,
    UserPolicy,
    UserImport,
}

impl OncSource {
    /// Whether the document was pushed by device or user policy.
    pub fn is_policy(self) -> bool {
        matches!(self, OncSource::DevicePolicy | OncSource::UserPolicy)
    }
}

impl Display for OncSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            OncSource::Unknown => "unknown",
            OncSource::None => "none",
            OncSource::DevicePolicy => "device policy",
            OncSource::UserPolicy => "user policy",
            OncSource::UserImport => "user import",
        };
        f.write_str(text)
    }
}

impl FromStr for OncSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "unknown" => Ok(OncSource::Unknown),
            "none" => Ok(OncSource::None),
            "device-policy" => Ok(OncSource::DevicePolicy),
            "user-policy" => Ok(OncSource::UserPolicy),
            "user-import" => Ok(OncSource::UserImport),
            other => Err(format!("unknown ONC source '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OncSource;

    #[test]
    fn display_names_match_log_wording() {
        assert_eq!(OncSource::DevicePolicy.to_string(), "device policy");
        assert_eq!(OncSource::UserImport.to_string(), "user import");
        assert_eq!(OncSource::Unknown.to_string(), "unknown");
    }

    #[test]
    fn parses_kebab_and_display_forms() {
        assert_eq!("user-policy".parse(), Ok(OncSource::UserPolicy));
        assert_eq!("device policy".parse(), Ok(OncSource::DevicePolicy));
        assert!("bogus".parse::<OncSource>().is_err());
    }

    #[test]
    fn only_policy_sources_are_policy() {
        assert!(OncSource::DevicePolicy.is_policy());
        assert!(OncSource::UserPolicy.is_policy());
        assert!(!OncSource::UserImport.is_policy());
        assert!(!OncSource::None.is_policy());
    }
}
