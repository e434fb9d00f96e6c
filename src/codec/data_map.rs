use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single typed value inside a [`DataMap`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DataValue {
    Int(i32),
    Long(i64),
    Double(f64),
}

/// Flat mapping from string keys to typed values, the unit of replication
/// on the sync channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataMap {
    entries: BTreeMap<String, DataValue>,
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_int(&mut self, key: &str, value: i32) {
        self.entries.insert(key.to_string(), DataValue::Int(value));
    }

    pub fn put_long(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), DataValue::Long(value));
    }

    pub fn put_double(&mut self, key: &str, value: f64) {
        self.entries.insert(key.to_string(), DataValue::Double(value));
    }

    pub fn get(&self, key: &str) -> Option<DataValue> {
        self.entries.get(key).copied()
    }

    pub fn remove(&mut self, key: &str) -> Option<DataValue> {
        self.entries.remove(key)
    }
}
