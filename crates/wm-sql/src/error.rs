//! Error types for wm-sql

use thiserror::Error;

/// Statement splitting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// S001: string literal or quoted identifier never closed
    #[error("[S001] Unterminated {kind} opened on line {line}")]
    UnterminatedString { kind: &'static str, line: usize },

    /// S002: block comment never closed
    #[error("[S002] Unterminated block comment opened on line {line}")]
    UnterminatedComment { line: usize },
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
