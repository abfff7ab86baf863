//! Read access to caller-supplied option bags.
//!
//! Render callers hand over whatever they have: a JSON object, a plain map, or
//! a typed record. The merger only needs two capabilities, so it works against
//! [`OptionsBag`] and each concrete shape gets a small adapter.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::MergeError;

/// Lookup capability over a loosely typed option bag.
pub trait OptionsBag {
    /// Raw value stored under `key`.
    fn lookup(&self, key: &str) -> Option<&Value>;

    /// Whether `key` exists, even if its value is null.
    fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Value under `key`, or `default` when absent.
    fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.lookup(key).unwrap_or(default)
    }
}

impl<T: OptionsBag + ?Sized> OptionsBag for &T {
    fn lookup(&self, key: &str) -> Option<&Value> {
        (**self).lookup(key)
    }
}

impl OptionsBag for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Non-object values behave as an empty bag.
impl OptionsBag for Value {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl OptionsBag for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl<S: BuildHasher> OptionsBag for HashMap<String, Value, S> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Adapter for typed records.
///
/// The record is serialized once into its field map; field names (after any
/// serde renames) become option keys. `Option` fields that serialize to
/// `null` still count as present, matching how a record's declared property
/// exists even when unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOptions {
    fields: Map<String, Value>,
}

impl RecordOptions {
    pub fn new<T: Serialize + ?Sized>(record: &T) -> Result<Self, MergeError> {
        let value =
            serde_json::to_value(record).map_err(|e| MergeError::Serialize(e.to_string()))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(MergeError::NotAnObject(value_kind(&other))),
        }
    }
}

impl OptionsBag for RecordOptions {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
