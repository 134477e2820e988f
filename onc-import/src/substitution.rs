//! Expansion of per-user placeholders in identity fields.

use onc_value::{Object, Value};

use crate::names::{eap, substitutes, vpn};
use crate::signature::Kind;
use crate::walk::{walk_mut, walk_networks_mut};

/// Values available for placeholder expansion.
pub trait StringSubstitution {
    /// Replacement for `${LOGIN_ID}`.
    fn login_id(&self) -> Option<&str>;
    /// Replacement for `${LOGIN_EMAIL}`.
    fn email(&self) -> Option<&str>;
}

/// Substitution backed by values known about the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSubstitution {
    pub login_id: Option<String>,
    pub email: Option<String>,
}

impl UserSubstitution {
    pub fn new(login_id: Option<String>, email: Option<String>) -> Self {
        Self { login_id, email }
    }

    pub fn is_empty(&self) -> bool {
        self.login_id.is_none() && self.email.is_none()
    }
}

impl StringSubstitution for UserSubstitution {
    fn login_id(&self) -> Option<&str> {
        self.login_id.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Fields of `kind` that may carry placeholders.
fn expandable_fields(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::EAP => &[eap::ANONYMOUS_IDENTITY, eap::IDENTITY],
        Kind::L2TP | Kind::OpenVPN => &[vpn::USERNAME],
        _ => &[],
    }
}

fn expand(text: &str, substitution: &dyn StringSubstitution) -> String {
    let mut expanded = text.to_string();
    if let Some(login_id) = substitution.login_id() {
        expanded = expanded.replace(substitutes::LOGIN_ID, login_id);
    }
    if let Some(email) = substitution.email() {
        expanded = expanded.replace(substitutes::EMAIL, email);
    }
    expanded
}

fn expand_node(kind: Kind, object: &mut Object, substitution: &dyn StringSubstitution) {
    for field in expandable_fields(kind) {
        if let Some(Value::String(text)) = object.get_mut(*field) {
            let expanded = expand(text, substitution);
            if expanded != *text {
                tracing::debug!(kind = %kind, field = *field, "expanded placeholders");
                *text = expanded;
            }
        }
    }
}

/// Expand placeholders in `object` and every nested object the schema declares.
pub fn expand_strings_in_object(
    kind: Kind,
    substitution: &dyn StringSubstitution,
    object: &mut Object,
) {
    walk_mut(kind, object, &mut |kind, node| {
        expand_node(kind, node, substitution);
        true
    });
}

/// Expand placeholders in every entry of a `NetworkConfigurations` list.
pub fn expand_strings_in_networks(substitution: &dyn StringSubstitution, networks: &mut [Value]) {
    walk_networks_mut(networks, &mut |kind, node| {
        expand_node(kind, node, substitution);
        true
    });
}
