//! Queries against `Recommended` lists.

use onc_value::{Object, ObjectExt};

use crate::names;

/// Whether `property` is recommended (user-overridable) in `onc`.
///
/// `property` is a dotted path such as `WiFi.AutoConnect`; the property's
/// basename is looked up in the `Recommended` list of the object that holds
/// it, so `WiFi.AutoConnect` checks `WiFi.Recommended` and `Name` checks the
/// top-level `Recommended`.
pub fn is_recommended_value(onc: &Object, property: &str) -> bool {
    let (parents, basename) = match property.rsplit_once('.') {
        Some((parents, basename)) => (Some(parents), basename),
        None => (None, property),
    };

    let mut holder = onc;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            match holder.get_object(segment) {
                Some(child) => holder = child,
                None => return false,
            }
        }
    }

    holder
        .get_list(names::RECOMMENDED)
        .is_some_and(|list| list.iter().any(|entry| entry.as_str() == Some(basename)))
}
