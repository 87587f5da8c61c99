//! Baseline snapshot of pre-existing global resources.
//!
//! Captured once with `--capture-baseline` before any test activity, then
//! read-only for every later run. Any id recorded here is never a delete
//! candidate for its type.

use super::types::ResourceType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping resource-type key -> (id -> name), global types only.
///
/// BTreeMaps keep the serialized file diff-stable across captures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaselineSnapshot(BTreeMap<String, BTreeMap<String, String>>);

impl BaselineSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from disk. A missing or unparsable file is an error:
    /// running destructively without a known baseline is not allowed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read baseline file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse baseline file {}", path.display()))
    }

    /// Write the snapshot to disk with deterministic key order.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write baseline file {}", path.display()))?;
        Ok(())
    }

    /// Record one pre-existing resource under its type.
    pub fn record(&mut self, resource_type: ResourceType, id: &str, name: &str) {
        self.0
            .entry(resource_type.key().to_string())
            .or_default()
            .insert(id.to_string(), name.to_string());
    }

    /// Whether an id is protected for the given type.
    ///
    /// A type key absent from the file means "no baseline for that type".
    pub fn contains(&self, resource_type: ResourceType, id: &str) -> bool {
        self.0
            .get(resource_type.key())
            .is_some_and(|ids| ids.contains_key(id))
    }

    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
