use crate::store::IndexStore;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Store holding documents in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    indices: HashMap<String, BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: &str, id: &str) -> Option<&Value> {
        self.indices.get(index).and_then(|documents| documents.get(id))
    }

    pub fn len(&self, index: &str) -> usize {
        self.indices.get(index).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.values().all(BTreeMap::is_empty)
    }
}

impl IndexStore for MemoryStore {
    fn exists(&self, index: &str, id: &str) -> Result<bool, String> {
        Ok(self.get(index, id).is_some())
    }

    fn index(&mut self, index: &str, id: &str, document: &Value) -> Result<(), String> {
        self.indices
            .entry(index.to_owned())
            .or_default()
            .insert(id.to_owned(), document.clone());
        Ok(())
    }
}

/// Reads through to a backing store but keeps every write in memory.
///
/// Lets a run report what it would index, including duplicates within the
/// same batch, without touching the backing store.
pub struct DryRunStore<'a> {
    backing: &'a dyn IndexStore,
    pending: MemoryStore,
}

impl<'a> DryRunStore<'a> {
    pub fn new(backing: &'a dyn IndexStore) -> Self {
        Self {
            backing,
            pending: MemoryStore::new(),
        }
    }

    pub fn pending(&self) -> &MemoryStore {
        &self.pending
    }
}

impl IndexStore for DryRunStore<'_> {
    fn exists(&self, index: &str, id: &str) -> Result<bool, String> {
        if self.pending.exists(index, id)? {
            return Ok(true);
        }
        self.backing.exists(index, id)
    }

    fn index(&mut self, index: &str, id: &str, document: &Value) -> Result<(), String> {
        self.pending.index(index, id, document)
    }
}
