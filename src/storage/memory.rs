#![cfg(test)]

use super::{Result, Storage};
use std::collections::HashMap;

/// In-memory store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub values: HashMap<String, String>,
    pub writes: usize,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
