use crate::store::IndexStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// One stored line of an index file.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
}

/// File-backed store: one append-only `<index>.jsonl` file per index.
///
/// A later line for the same id supersedes earlier ones.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `index`.
    pub fn index_path(&self, index: &str) -> Result<PathBuf, String> {
        validate_index_name(index)?;
        Ok(self.dir.join(format!("{index}.jsonl")))
    }

    /// Latest stored document for `id`, if any.
    pub fn get(&self, index: &str, id: &str) -> Result<Option<Value>, String> {
        let mut latest = None;
        for stored in self.read_index(index)? {
            if stored.id == id {
                latest = Some(stored.source);
            }
        }
        Ok(latest)
    }

    fn read_index(&self, index: &str) -> Result<Vec<StoredDocument>, String> {
        let path = self.index_path(index)?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&path)
            .map_err(|error| format!("failed to open index '{}': {error}", path.display()))?;
        let mut documents = Vec::new();
        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|error| {
                format!("failed to read index '{}': {error}", path.display())
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let stored: StoredDocument = serde_json::from_str(&line).map_err(|error| {
                format!(
                    "invalid record at line {} of index '{}': {error}",
                    line_number + 1,
                    path.display()
                )
            })?;
            documents.push(stored);
        }
        Ok(documents)
    }
}

impl IndexStore for JsonlStore {
    fn exists(&self, index: &str, id: &str) -> Result<bool, String> {
        Ok(self
            .read_index(index)?
            .iter()
            .any(|stored| stored.id == id))
    }

    fn index(&mut self, index: &str, id: &str, document: &Value) -> Result<(), String> {
        let path = self.index_path(index)?;
        fs::create_dir_all(&self.dir).map_err(|error| {
            format!(
                "failed to create store directory '{}': {error}",
                self.dir.display()
            )
        })?;

        let stored = StoredDocument {
            id: id.to_owned(),
            source: document.clone(),
        };
        let mut line = serde_json::to_string(&stored)
            .map_err(|error| format!("failed to serialize document '{id}': {error}"))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| format!("failed to open index '{}': {error}", path.display()))?;
        file.write_all(line.as_bytes()).map_err(|error| {
            format!(
                "failed to append document to '{}': {error}",
                path.display()
            )
        })?;
        file.flush()
            .map_err(|error| format!("failed to flush index '{}': {error}", path.display()))?;

        Ok(())
    }
}

// Index names become file names.
fn validate_index_name(index: &str) -> Result<(), String> {
    let valid = !index.is_empty()
        && !index.starts_with('.')
        && index
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(format!("invalid index name '{index}'"))
    }
}
