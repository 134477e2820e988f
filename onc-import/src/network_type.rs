//! Matching networks by ONC type.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::names::network_type;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized network type '{0}'")]
pub struct UnknownNetworkType(pub String);

const ETHERNET: u8 = 1;
const WIFI: u8 = 1 << 1;
const WIMAX: u8 = 1 << 2;
const CELLULAR: u8 = 1 << 3;
const VPN: u8 = 1 << 4;
const WIRELESS: u8 = WIFI | WIMAX | CELLULAR;
const ALL: u8 = ETHERNET | WIRELESS | VPN;

/// A set of network types, as named by ONC type strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkTypePattern {
    mask: u8,
}

impl Default for NetworkTypePattern {
    /// Matches every network type.
    fn default() -> Self {
        Self { mask: ALL }
    }
}

impl NetworkTypePattern {
    /// Parse an ONC type, including the `All` and `Wireless` groups.
    pub fn from_onc_type(onc_type: &str) -> Result<Self, UnknownNetworkType> {
        let mask = match onc_type {
            network_type::ALL_TYPES => ALL,
            network_type::WIRELESS => WIRELESS,
            other => match single_type_mask(other) {
                Some(mask) => mask,
                None => return Err(UnknownNetworkType(other.to_string())),
            },
        };
        Ok(Self { mask })
    }

    /// Whether a network whose `Type` is `onc_type` falls in this pattern.
    pub fn matches(&self, onc_type: &str) -> bool {
        single_type_mask(onc_type)
            .is_some_and(|mask| self.mask & mask != 0)
    }

    /// Whether the two patterns share at least one type.
    pub fn overlaps(&self, other: NetworkTypePattern) -> bool {
        self.mask & other.mask != 0
    }
}

fn single_type_mask(onc_type: &str) -> Option<u8> {
    match onc_type {
        network_type::ETHERNET => Some(ETHERNET),
        network_type::WIFI => Some(WIFI),
        network_type::WIMAX => Some(WIMAX),
        network_type::CELLULAR => Some(CELLULAR),
        network_type::VPN => Some(VPN),
        _ => None,
    }
}

impl Display for NetworkTypePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.mask == ALL {
            return f.write_str(network_type::ALL_TYPES);
        }
        let names: Vec<&str> = [
            (ETHERNET, network_type::ETHERNET),
            (WIFI, network_type::WIFI),
            (WIMAX, network_type::WIMAX),
            (CELLULAR, network_type::CELLULAR),
            (VPN, network_type::VPN),
        ]
        .into_iter()
        .filter(|(bit, _)| self.mask & bit != 0)
        .map(|(_, name)| name)
        .collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::{NetworkTypePattern, UnknownNetworkType};

    #[test]
    fn wireless_covers_radio_types() {
        let wireless = NetworkTypePattern::from_onc_type("Wireless")
            .expect("pattern");
        assert!(wireless.matches("WiFi"));
        assert!(wireless.matches("Cellular"));
        assert!(wireless.matches("WiMAX"));
        assert!(!wireless.matches("Ethernet"));
        assert!(!wireless.matches("VPN"));
        assert_eq!(wireless.to_string(), "WiFi|WiMAX|Cellular");
    }

    #[test]
    fn all_matches_everything() {
        let all = NetworkTypePattern::from_onc_type("All").expect("pattern");
        assert_eq!(all, NetworkTypePattern::default());
        for onc_type in ["Ethernet", "WiFi", "WiMAX", "Cellular", "VPN"] {
            assert!(all.matches(onc_type));
        }
        assert!(!all.matches("Bluetooth"));
    }

    #[test]
    fn single_types_and_overlap() {
        let vpn = NetworkTypePattern::from_onc_type("VPN").expect("pattern");
        let wifi = NetworkTypePattern::from_onc_type("WiFi").expect("pattern");
        assert!(vpn.matches("VPN"));
        assert!(!vpn.overlaps(wifi));
        assert!(wifi.overlaps(NetworkTypePattern::default()));
    }

    #[test]
    fn unknown_types_are_errors() {
        assert_eq!(
            NetworkTypePattern::from_onc_type("Bluetooth"),
            Err(UnknownNetworkType("Bluetooth".to_string()))
        );
    }
}
