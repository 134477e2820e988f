//! Derivation of `WiFi.HexSSID` from `WiFi.SSID`.

use onc_value::{Object, ObjectExt, Value};

use crate::diagnostics::Diagnostics;
use crate::names::{network, wifi};
use crate::signature::Kind;
use crate::walk::walk_mut;

/// Upper-case hex encoding of the bytes of `ssid`.
pub fn hex_encode(ssid: &str) -> String {
    hex::encode_upper(ssid)
}

fn fill_in_node(kind: Kind, object: &mut Object, context: &str, diag: &mut Diagnostics) -> bool {
    if kind != Kind::WiFi || object.contains_key(wifi::HEX_SSID) {
        return true;
    }
    let Some(ssid) = object.get_str(wifi::SSID) else {
        return true;
    };
    if ssid.is_empty() {
        diag.error(
            "empty_ssid",
            format!("{context}.{}", wifi::SSID),
            "SSID is empty, cannot derive HexSSID",
        );
        return false;
    }
    let hex = hex_encode(ssid);
    object.insert(wifi::HEX_SSID.to_string(), Value::String(hex));
    true
}

/// Fill `HexSSID` in every WiFi object below `object`.
///
/// Returns `false` if any WiFi object had an empty SSID.
pub fn fill_in_hex_ssid_fields_in_object(
    kind: Kind,
    object: &mut Object,
    diag: &mut Diagnostics,
) -> bool {
    let context = object
        .get_str(network::GUID)
        .unwrap_or(kind.name())
        .to_string();
    walk_mut(kind, object, &mut |kind, node| {
        fill_in_node(kind, node, &context, diag)
    })
}

/// Fill `HexSSID` in every entry of a `NetworkConfigurations` list.
pub fn fill_in_hex_ssid_fields_in_networks(
    networks: &mut [Value],
    diag: &mut Diagnostics,
) -> bool {
    let mut ok = true;
    for network in networks.iter_mut() {
        if let Value::Object(object) = network {
            ok &= fill_in_hex_ssid_fields_in_object(Kind::NetworkConfiguration, object, diag);
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use onc_value::{json, Object, Value};
    use pretty_assertions::assert_eq;

    use super::{
        fill_in_hex_ssid_fields_in_networks, fill_in_hex_ssid_fields_in_object, hex_encode,
    };
    use crate::diagnostics::Diagnostics;
    use crate::signature::Kind;

    fn object(value: Value) -> Object {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn encodes_bytes_as_upper_hex() {
        assert_eq!(hex_encode("Test"), "54657374");
        assert_eq!(hex_encode("\u{e9}"), "C3A9");
        assert_eq!(hex_encode(""), "");
    }

    #[test]
    fn fills_missing_hex_ssid() {
        let mut network = object(json!({
            "GUID": "a", "Type": "WiFi", "WiFi": {"SSID": "Test", "Security": "None"}
        }));
        let mut diag = Diagnostics::default();
        assert!(fill_in_hex_ssid_fields_in_object(
            Kind::NetworkConfiguration,
            &mut network,
            &mut diag
        ));

        assert_eq!(network["WiFi"]["HexSSID"], json!("54657374"));
        assert_eq!(network["WiFi"]["SSID"], json!("Test"));
        assert!(diag.is_empty());
    }

    #[test]
    fn keeps_existing_hex_ssid() {
        let mut wifi = object(json!({"SSID": "Test", "HexSSID": "DEADBEEF"}));
        let mut diag = Diagnostics::default();
        assert!(fill_in_hex_ssid_fields_in_object(Kind::WiFi, &mut wifi, &mut diag));
        assert_eq!(wifi["HexSSID"], json!("DEADBEEF"));
    }

    #[test]
    fn empty_ssid_logs_one_error() {
        let mut networks = vec![
            json!({"GUID": "empty", "Type": "WiFi", "WiFi": {"SSID": ""}}),
            json!({"GUID": "ok", "Type": "WiFi", "WiFi": {"SSID": "Test"}}),
        ];
        let mut diag = Diagnostics::default();
        assert!(!fill_in_hex_ssid_fields_in_networks(&mut networks, &mut diag));

        assert!(networks[0]["WiFi"].get("HexSSID").is_none());
        assert_eq!(networks[0]["WiFi"]["SSID"], json!(""));
        assert_eq!(networks[1]["WiFi"]["HexSSID"], json!("54657374"));
        assert_eq!(diag.errors(), 1);
        assert_eq!(diag.issues()[0].path, "empty.SSID");
    }
}
