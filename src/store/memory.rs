//! In-memory configuration store.

use std::collections::HashMap;

use super::ConfigStore;
use crate::error::Result;

/// A [`ConfigStore`] backed by a map, for tests and hosts that manage
/// persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, returning the updated store for chaining.
    pub fn with(mut self, name: impl Into<String>, record: serde_json::Value) -> Self {
        self.records.insert(name.into(), record);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.records.get(name).cloned())
    }

    fn save(&mut self, name: &str, record: &serde_json::Value) -> Result<()> {
        self.records.insert(name.to_string(), record.clone());
        Ok(())
    }
}
