//! Error types for wm-core

use thiserror::Error;

/// Core error type for Waymark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: journal file not found
    #[error("[E001] Journal not found: {path}")]
    JournalNotFound { path: String },

    /// E002: journal JSON malformed
    #[error("[E002] Failed to parse journal '{path}': {message}")]
    JournalParseError { path: String, message: String },

    /// E003: journal entries are not strictly ordered
    #[error("[E003] Journal out of order: entry '{tag}' (idx {idx}, when {when}) does not follow '{previous}'")]
    JournalOutOfOrder {
        tag: String,
        idx: u32,
        when: i64,
        previous: String,
    },

    /// E004: migration file referenced by the journal is missing
    #[error("[E004] Migration file not found for tag '{tag}': {path}")]
    MigrationFileMissing { tag: String, path: String },

    /// E005: migration file is not valid UTF-8
    #[error("[E005] Migration file for tag '{tag}' is not valid UTF-8")]
    InvalidUtf8 { tag: String },

    /// E006: statement splitting failed
    #[error("[E006] Failed to split migration '{tag}': {source}")]
    Split {
        tag: String,
        source: wm_sql::SqlError,
    },

    /// E007: config file not found
    #[error("[E007] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E008: failed to parse configuration file
    #[error("[E008] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E009: IO error
    #[error("[E009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E010: IO error with file path context
    #[error("[E010] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E011: manifest artifact malformed
    #[error("[E011] Failed to parse manifest '{path}': {message}")]
    ManifestParseError { path: String, message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
