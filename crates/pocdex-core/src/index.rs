//! The index document: identifier to URL.
//!
//! Keys keep the position of their first insertion. Re-inserting a key
//! replaces its URL (last write wins).

use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Default location of the saved document.
pub const DEFAULT_OUTPUT: &str = "poc_index.json";

/// A flat mapping from identifier to URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PocIndex {
    entries: Map<String, Value>,
}

impl PocIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the URL it replaced, if any.
    pub fn insert(&mut self, id: impl Into<String>, url: impl Into<String>) -> Option<String> {
        match self.entries.insert(id.into(), Value::String(url.into())) {
            Some(Value::String(old)) => Some(old),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|url| (k.as_str(), url)))
    }

    /// Returns a copy with keys in lexicographic order.
    pub fn sorted(&self) -> Self {
        let mut keys: Vec<_> = self.entries.keys().cloned().collect();
        keys.sort();

        let mut entries = Map::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.entries.get(&key) {
                entries.insert(key, value.clone());
            }
        }
        Self { entries }
    }

    /// Serializes with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to `path`, replacing whatever was there.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_pretty_json()?;
        debug!("Writing {} entries to {}", self.len(), path.display());
        let mut file = File::create(path).map_err(|e| IndexError::write(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| IndexError::write(path, e))?;
        Ok(())
    }

    /// Reads a document written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| IndexError::read(path, e))?;
        let index: PocIndex = serde_json::from_str(&text)?;
        if let Some((id, _)) = index.entries.iter().find(|(_, v)| !v.is_string()) {
            return Err(IndexError::Corrupted {
                path: path.to_path_buf(),
                message: format!("entry '{}' is not a URL string", id),
            });
        }
        Ok(index)
    }
}
