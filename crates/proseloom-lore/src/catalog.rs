// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lorebook catalog: an ordered collection of lore entries with JSON file
//! persistence.
//!
//! The on-disk format is a plain JSON array of entries using camelCase
//! field names, so catalogs exported from other lorebook tools load
//! unchanged.

use std::path::Path;

use proseloom_core::ProseloomError;
use serde::{Deserialize, Serialize};

/// A reusable snippet of world-building text, activated by key match or
/// unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoreEntry {
    /// Opaque identity, assigned once at creation and never reused.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Activation keys: literal substrings or `/pattern/flags` regexes.
    /// Duplicates are allowed and harmless.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Entries switched off never activate, regardless of key matches.
    pub on: bool,
    /// Activates unconditionally, bypassing key matching.
    pub always_on: bool,
    /// How many characters before the cursor are searched for keys.
    /// Non-positive means only `always_on` can activate this entry.
    pub search_range: i64,
    /// Placement order: lower values are considered first. Unbounded.
    pub priority: i64,
}

impl LoreEntry {
    /// Creates an entry with catalog defaults and a fresh random id.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: "New Entry".to_string(),
            content: String::new(),
            keys: Vec::new(),
            on: true,
            always_on: false,
            search_range: 1000,
            priority: 400,
        }
    }
}

impl Default for LoreEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// The ordered lore entry catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lorebook {
    pub entries: Vec<LoreEntry>,
}

impl Lorebook {
    /// Loads a catalog from a JSON file. A missing file is an empty
    /// catalog, not an error.
    pub fn load(path: &Path) -> Result<Self, ProseloomError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })?;
        serde_json::from_str(&data).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })
    }

    /// Saves the catalog back to its JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ProseloomError> {
        let data = serde_json::to_string_pretty(self).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })?;
        std::fs::write(path, data).map_err(|e| ProseloomError::Storage {
            source: Box::new(e),
        })
    }

    /// Appends a new entry with defaults and returns its id.
    pub fn add_entry(&mut self) -> String {
        let entry = LoreEntry::new();
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }

    /// Removes the entry with the given id. Returns whether one existed.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}
