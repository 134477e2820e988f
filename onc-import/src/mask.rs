//! Credential masking for display and export.

use onc_value::{Object, Value};

use crate::signature::{is_credential, Kind};
use crate::walk::walk_mut;

/// Mask used when the caller does not supply one.
pub const DEFAULT_MASK: &str = "********";

/// Return a copy of `object` with every credential field replaced by `mask`.
///
/// Non-credential fields are copied unchanged, including fields the schema
/// does not declare. The input is never modified.
pub fn mask_credentials_in_object(kind: Kind, object: &Object, mask: &str) -> Object {
    let mut masked = object.clone();
    walk_mut(kind, &mut masked, &mut |kind, node| {
        mask_node(kind, node, mask);
        true
    });
    masked
}

fn mask_node(kind: Kind, node: &mut Object, mask: &str) {
    for (name, value) in node.iter_mut() {
        if is_credential(kind, name) {
            *value = Value::String(mask.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use onc_value::{json, parse_file, Object, Value};
    use pretty_assertions::assert_eq;

    use super::{mask_credentials_in_object, DEFAULT_MASK};
    use crate::signature::{Kind, ValueKind};

    fn object(value: Value) -> Object {
        value.as_object().cloned().expect("object literal")
    }

    /// Check every field of `masked` against `original` for `kind`.
    fn assert_masked(kind: Kind, original: &Object, masked: &Object) {
        assert_eq!(
            original.keys().collect::<Vec<_>>(),
            masked.keys().collect::<Vec<_>>()
        );
        for (name, value) in original {
            let after = &masked[name];
            match kind.field(name) {
                Some(sig) if sig.credential => {
                    assert_ne!(after, value, "{kind}.{name} kept its value");
                    assert_eq!(after, &json!(DEFAULT_MASK));
                }
                Some(sig) => match (sig.value, value, after) {
                    (ValueKind::Object(nested), Value::Object(a), Value::Object(b)) => {
                        assert_masked(nested, a, b)
                    }
                    (ValueKind::ObjectList(nested), Value::Array(a), Value::Array(b)) => {
                        for (x, y) in a.iter().zip(b) {
                            if let (Value::Object(x), Value::Object(y)) = (x, y) {
                                assert_masked(nested, x, y);
                            }
                        }
                    }
                    _ => assert_eq!(after, value),
                },
                None => assert_eq!(after, value),
            }
        }
    }

    #[test]
    fn masks_every_credential_in_fixture() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../fixtures/toplevel.onc");
        let doc = parse_file(&path).expect("fixture");
        let masked = mask_credentials_in_object(Kind::Toplevel, &doc, DEFAULT_MASK);

        assert_masked(Kind::Toplevel, &doc, &masked);
        assert_eq!(
            masked["NetworkConfigurations"][0]["WiFi"]["EAP"]["Password"],
            json!(DEFAULT_MASK)
        );
        assert_eq!(masked["Certificates"][2]["PKCS12"], json!(DEFAULT_MASK));
        assert_eq!(
            masked["Certificates"][0]["X509"],
            doc["Certificates"][0]["X509"]
        );
    }

    #[test]
    fn masks_non_string_credentials_and_keeps_input() {
        let wifi = object(json!({"SSID": "net", "Passphrase": 12345678, "Extra": "x"}));
        let masked = mask_credentials_in_object(Kind::WiFi, &wifi, "***");

        assert_eq!(masked["Passphrase"], json!("***"));
        assert_eq!(masked["SSID"], json!("net"));
        assert_eq!(masked["Extra"], json!("x"));
        assert_eq!(wifi["Passphrase"], json!(12345678));
    }

    #[test]
    fn masks_nested_vpn_secrets() {
        let vpn = object(json!({
            "Type": "L2TP-IPsec",
            "IPsec": {"PSK": "shared", "XAUTH": {"Password": "x", "Username": "u"}},
            "L2TP": {"Password": "p", "Username": "u"}
        }));
        let masked = mask_credentials_in_object(Kind::VPN, &vpn, "#");
        assert_eq!(masked["IPsec"]["PSK"], json!("#"));
        assert_eq!(masked["IPsec"]["XAUTH"]["Password"], json!("#"));
        assert_eq!(masked["IPsec"]["XAUTH"]["Username"], json!("u"));
        assert_eq!(masked["L2TP"]["Password"], json!("#"));
    }

    #[test]
    fn leaves_undeclared_objects_untouched() {
        let wifi = object(json!({"SSID": "net", "Vendor": {"Passphrase": "keep"}}));
        let masked = mask_credentials_in_object(Kind::WiFi, &wifi, "***");
        assert_eq!(masked["Vendor"], json!({"Passphrase": "keep"}));
    }
}
