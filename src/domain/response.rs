use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Result code the processor sends for an authorised transaction.
pub const AUTHORISED: &str = "00";

/// Raw callback fields as posted by the processor, keyed by their exact
/// (upper-case) names.
///
/// Values cannot be read back from here. The only way to get at them is a
/// successful [`crate::application::verifier::ResponseVerifier::verify`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingPayload {
    fields: BTreeMap<String, String>,
}

impl IncomingPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.fields.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub(crate) fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for IncomingPayload
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A callback payload whose signature has been checked.
///
/// Keys are lower-cased, values are untouched, and every field the processor
/// echoed back is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedResult {
    fields: BTreeMap<String, String>,
}

impl ValidatedResult {
    pub(crate) fn from_payload(payload: &IncomingPayload) -> Self {
        Self {
            fields: payload
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect(),
        }
    }

    /// Looks a field up by name. Upper-case names are accepted too.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .or_else(|| self.fields.get(&name.to_lowercase()))
            .map(String::as_str)
    }

    fn required(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    pub fn timestamp(&self) -> &str {
        self.required("timestamp")
    }

    /// `None` when the processor did not echo it (the legacy MD5 callback omits it).
    pub fn merchant_id(&self) -> Option<&str> {
        self.get("merchant_id")
    }

    pub fn order_id(&self) -> &str {
        self.required("order_id")
    }

    pub fn result(&self) -> &str {
        self.required("result")
    }

    pub fn message(&self) -> &str {
        self.required("message")
    }

    pub fn pasref(&self) -> &str {
        self.required("pasref")
    }

    pub fn authcode(&self) -> &str {
        self.required("authcode")
    }

    pub fn is_authorised(&self) -> bool {
        self.result() == AUTHORISED
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.fields
    }
}
