//! In-memory player profile
//!
//! A `ProfilePort` backed by JSON values, for hosts without their own store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ports::ProfilePort;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryProfile {
    properties: BTreeMap<String, serde_json::Value>,
}

impl MemoryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.properties.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.properties.keys()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize the whole profile for saving
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ProfilePort for MemoryProfile {
    fn get_value(&self, key: &str) -> Option<serde_json::Value> {
        self.properties.get(key).cloned()
    }

    fn put_value(&mut self, key: &str, value: serde_json::Value) {
        self.properties.insert(key.to_string(), value);
    }
}
