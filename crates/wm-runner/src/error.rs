//! Error types for wm-runner

use thiserror::Error;
use wm_db::DbError;

/// Migration runner errors
#[derive(Error, Debug)]
pub enum RunnerError {
    /// M001: creating, querying, or inserting into the history table failed
    #[error("[M001] History table access failed: {0}")]
    History(String),

    /// M002: a migration statement failed; the whole batch was rolled back
    #[error("[M002] Migration '{tag}' failed on statement `{statement}`: {source}")]
    Statement {
        tag: String,
        statement: String,
        source: DbError,
    },

    /// M003: other database failure (transaction control, connection)
    #[error("[M003] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
