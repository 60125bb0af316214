//! Static library map: a pre-exported table of variable keys to theme paths.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::Result;

/// One exported variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: Option<String>,
    pub path: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Path(String),
    Entry { name: Option<String>, path: String },
}

/// Variable key to theme path, loaded once per run and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryMap {
    entries: IndexMap<String, LibraryEntry>,
}

impl LibraryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON. Entries are either `"key": "path"` or
    /// `"key": { "name": ..., "path": ... }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: IndexMap<String, RawEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(key, entry)| {
                let entry = match entry {
                    RawEntry::Path(path) => LibraryEntry { name: None, path },
                    RawEntry::Entry { name, path } => LibraryEntry { name, path },
                };
                (key, entry)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn insert(&mut self, key: impl Into<String>, path: impl Into<String>) {
        self.entries.insert(
            key.into(),
            LibraryEntry {
                name: None,
                path: path.into(),
            },
        );
    }

    pub fn with_entry(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(key, path);
        self
    }

    pub fn get(&self, key: &str) -> Option<&LibraryEntry> {
        self.entries.get(key)
    }

    /// Theme path exported for a normalized variable key.
    pub fn path(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
