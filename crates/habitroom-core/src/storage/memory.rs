use std::collections::HashMap;

use super::PersistenceProvider;
use crate::error::StorageError;

/// Process-local store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a namespace, e.g. with bytes written by an earlier session.
    pub fn with_entry(mut self, key: &str, data: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(key.to_string(), data.into());
        self
    }

    /// Raw bytes stored under `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceProvider for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), data.to_vec());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn save_overwrites_and_counts() {
        let mut store = MemoryStore::new().with_entry("k", "old");
        store.save("k", b"new").unwrap();
        assert_eq!(store.get("k"), Some(&b"new"[..]));
        assert_eq!(store.save_count(), 1);
    }
}
