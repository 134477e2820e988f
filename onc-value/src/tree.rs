use serde_json::{Map, Value};

/// A JSON object whose keys keep document order.
pub type Object = Map<String, Value>;

/// The canonical empty unencrypted configuration.
pub const EMPTY_UNENCRYPTED_CONFIGURATION: &str =
    r#"{"Type":"UnencryptedConfiguration","NetworkConfigurations":[],"Certificates":[]}"#;

/// Typed accessors over an [`Object`].
///
/// All lookups are by exact key; dots in key names are not treated as paths.
/// Use [`ObjectExt::get_str_path`] to walk nested objects explicitly.
pub trait ObjectExt {
    /// Return the string stored under `key`, if present and a string.
    fn get_str(&self, key: &str) -> Option<&str>;
    /// Return the integer stored under `key`, if present and integral.
    fn get_i64(&self, key: &str) -> Option<i64>;
    /// Return the boolean stored under `key`, if present and a boolean.
    fn get_bool(&self, key: &str) -> Option<bool>;
    /// Return the list stored under `key`, if present and a list.
    fn get_list(&self, key: &str) -> Option<&Vec<Value>>;
    /// Mutable variant of [`ObjectExt::get_list`].
    fn get_list_mut(&mut self, key: &str) -> Option<&mut Vec<Value>>;
    /// Return the nested object stored under `key`.
    fn get_object(&self, key: &str) -> Option<&Object>;
    /// Mutable variant of [`ObjectExt::get_object`].
    fn get_object_mut(&mut self, key: &str) -> Option<&mut Object>;
    /// Walk nested objects along `path` and return the terminal string.
    fn get_str_path(&self, path: &[&str]) -> Option<&str>;
    /// Collect the string entries of the list under `key`, skipping non-strings.
    fn string_list(&self, key: &str) -> Vec<String>;
}

impl ObjectExt for Object {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    fn get_list(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    fn get_list_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        self.get_mut(key).and_then(Value::as_array_mut)
    }

    fn get_object(&self, key: &str) -> Option<&Object> {
        self.get(key).and_then(Value::as_object)
    }

    fn get_object_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.get_mut(key).and_then(Value::as_object_mut)
    }

    fn get_str_path(&self, path: &[&str]) -> Option<&str> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get_object(segment)?;
        }
        current.get_str(last)
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Object, ObjectExt};

    fn object(value: serde_json::Value) -> Object {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn get_str_path_walks_nested_objects() {
        let root = object(json!({"WiFi": {"EAP": {"Identity": "user"}}}));
        assert_eq!(
            root.get_str_path(&["WiFi", "EAP", "Identity"]),
            Some("user")
        );
        assert_eq!(root.get_str_path(&["WiFi", "Missing"]), None);
        assert_eq!(root.get_str_path(&[]), None);
    }

    #[test]
    fn keys_keep_document_order() {
        let root: Object = serde_json::from_str(r#"{"Type":"x","GUID":"g","Name":"n"}"#)
            .expect("parse");
        let keys: Vec<&str> = root.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Type", "GUID", "Name"]);
    }

    #[test]
    fn string_list_skips_non_strings() {
        let root = object(json!({"Recommended": ["SSID", 3, "AutoConnect"]}));
        assert_eq!(root.string_list("Recommended"), vec!["SSID", "AutoConnect"]);
        assert!(root.string_list("Missing").is_empty());
    }
}
