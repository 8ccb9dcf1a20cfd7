use std::collections::HashMap;

use super::PersistenceGateway;
use crate::error::StorageError;

/// In-process store. Contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistenceGateway for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("streak-alice").is_none());
    }

    #[test]
    fn set_overwrites_and_remove_clears() {
        let mut store = MemoryStore::with_entries([("streak-alice", "3")]);
        store.set("streak-alice", "4").unwrap();
        assert_eq!(store.get("streak-alice").as_deref(), Some("4"));
        store.remove("streak-alice").unwrap();
        assert!(store.is_empty());
    }
}
