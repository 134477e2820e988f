//! Schema-guided traversal shared by the mutating passes.

use onc_value::{Object, Value};

use crate::signature::{Kind, ValueKind};

/// Apply `action` to `object` and every nested object the schema declares.
///
/// The action runs on a node before its children. Children are found only
/// through fields declared by `kind`; undeclared fields are never entered.
/// Every declared child is visited even after an action reports failure, and
/// the result is the conjunction of all action results.
pub fn walk_mut<F>(kind: Kind, object: &mut Object, action: &mut F) -> bool
where
    F: FnMut(Kind, &mut Object) -> bool,
{
    let mut ok = action(kind, object);

    for signature in kind.fields() {
        let Some(value) = object.get_mut(signature.name) else {
            continue;
        };
        match (signature.value, value) {
            (ValueKind::Object(nested), Value::Object(child)) => {
                ok &= walk_mut(nested, child, action);
            }
            (ValueKind::ObjectList(nested), Value::Array(entries)) => {
                for entry in entries.iter_mut() {
                    if let Value::Object(child) = entry {
                        ok &= walk_mut(nested, child, action);
                    }
                }
            }
            _ => {}
        }
    }

    ok
}

/// Walk each network configuration in `networks`.
pub fn walk_networks_mut<F>(networks: &mut [Value], action: &mut F) -> bool
where
    F: FnMut(Kind, &mut Object) -> bool,
{
    let mut ok = true;
    for network in networks.iter_mut() {
        if let Value::Object(object) = network {
            ok &= walk_mut(Kind::NetworkConfiguration, object, action);
        }
    }
    ok
}
