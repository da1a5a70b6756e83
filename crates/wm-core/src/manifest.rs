//! Manifest types for compiled migration output.
//!
//! A manifest is the ordered, immutable product of one compilation: every
//! migration file, content-hashed and split into statements, ready to be
//! embedded as static data in a distributed artifact. It serializes as a
//! plain JSON array so identical inputs always produce identical bytes.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single compiled migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationEntry {
    /// Manifest position, strictly increasing
    pub idx: u32,

    /// Logical timestamp from the journal
    pub when: i64,

    /// Unique human-readable label
    pub tag: String,

    /// Hex-encoded SHA-256 digest of the raw migration file bytes
    pub hash: String,

    /// Independently executable statements, in source order
    pub sql: Vec<String>,
}

/// The compiled, ordered set of all migrations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    /// Entries in journal order
    pub entries: Vec<MigrationEntry>,
}

impl Manifest {
    /// Create a manifest from compiled entries
    pub fn new(entries: Vec<MigrationEntry>) -> Self {
        Self { entries }
    }

    /// Number of migrations in the manifest
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest contains no migrations
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in manifest order
    pub fn iter(&self) -> impl Iterator<Item = &MigrationEntry> {
        self.entries.iter()
    }

    /// Serialize the manifest as pretty-printed JSON
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the manifest to a file atomically
    ///
    /// Uses write-to-temp-then-rename to prevent corruption. The temp file
    /// includes the process ID to avoid races when multiple processes compile
    /// independent projects concurrently.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = self.to_json()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::IoWithPath {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let temp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        std::fs::write(&temp_path, &json).map_err(|e| CoreError::IoWithPath {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(())
    }

    /// Load a manifest from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CoreError::ManifestParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a MigrationEntry;
    type IntoIter = std::slice::Iter<'a, MigrationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
