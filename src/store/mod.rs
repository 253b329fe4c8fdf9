pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::{DryRunStore, MemoryStore};

use serde_json::Value;

/// Index-like document store keyed by `(index, id)`.
pub trait IndexStore {
    /// Whether a document with `id` is already stored in `index`.
    fn exists(&self, index: &str, id: &str) -> Result<bool, String>;

    /// Store `document` under `id` in `index`, replacing any earlier document.
    fn index(&mut self, index: &str, id: &str, document: &Value) -> Result<(), String>;
}
