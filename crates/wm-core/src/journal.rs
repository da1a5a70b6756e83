//! Migration journal types and sources.
//!
//! The journal is the ordered build-time record of migration files: one entry
//! per file carrying its position (`idx`), logical timestamp (`when`), and
//! human-readable label (`tag`). The compiler never reads the filesystem
//! itself; a [`MigrationSource`] hands it the journal plus the raw bytes of
//! each migration file.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The ordered record of all migration files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    /// Journal entries, in authored order
    pub entries: Vec<JournalEntry>,
}

/// One journal entry describing a single migration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, strictly increasing
    pub idx: u32,

    /// Journal format version
    #[serde(default)]
    pub version: String,

    /// Logical timestamp, monotonically increasing across the journal
    pub when: i64,

    /// Unique human-readable label, also the migration file name stem
    pub tag: String,

    /// Whether the file uses explicit statement breakpoints
    #[serde(default = "default_true")]
    pub breakpoints: bool,
}

fn default_true() -> bool {
    true
}

impl Journal {
    /// Parse a journal from its JSON text
    pub fn parse(path: &Path, content: &str) -> CoreResult<Self> {
        serde_json::from_str(content).map_err(|e| CoreError::JournalParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Supplies the journal and the raw bytes of each migration file.
///
/// This is the boundary between the compiler and whatever produced the
/// migration files; the compiler consumes already-materialized bytes and
/// metadata and performs no filesystem access of its own.
pub trait MigrationSource {
    /// The ordered journal of migration metadata
    fn journal(&self) -> CoreResult<Journal>;

    /// Raw bytes of the migration file for `tag`
    fn read_migration(&self, tag: &str) -> CoreResult<Vec<u8>>;
}

/// Migration source over a generated output directory:
/// `meta/_journal.json` plus one `<tag>.sql` file per entry.
pub struct DirSource {
    out_dir: PathBuf,
}

impl DirSource {
    /// Create a source rooted at the migrations output directory
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Path of the journal file under the output directory
    pub fn journal_path(&self) -> PathBuf {
        self.out_dir.join("meta").join("_journal.json")
    }

    /// Path of the migration file for `tag`
    pub fn migration_path(&self, tag: &str) -> PathBuf {
        self.out_dir.join(format!("{tag}.sql"))
    }
}

impl MigrationSource for DirSource {
    fn journal(&self) -> CoreResult<Journal> {
        let path = self.journal_path();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::JournalNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        Journal::parse(&path, &content)
    }

    fn read_migration(&self, tag: &str) -> CoreResult<Vec<u8>> {
        let path = self.migration_path(tag);
        std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::MigrationFileMissing {
                    tag: tag.to_string(),
                    path: path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "journal_test.rs"]
mod tests;
