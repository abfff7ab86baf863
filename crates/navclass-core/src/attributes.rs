//! Attribute maps and class token lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the attribute whose value accumulates instead of being replaced.
pub const CLASS: &str = "class";

/// Attribute name to value. `class` holds space-joined tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// The `class` value, or `""` when unset.
    pub fn class(&self) -> &str {
        self.get(CLASS).unwrap_or("")
    }

    /// The `class` value split into tokens.
    pub fn class_tokens(&self) -> Vec<String> {
        split_tokens(self.class())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Split a class string on whitespace. Empty tokens never appear.
pub fn split_tokens(classes: &str) -> Vec<String> {
    classes.split_whitespace().map(str::to_string).collect()
}

/// Join class tokens with single spaces, skipping empty tokens.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
