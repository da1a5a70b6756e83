//! History table bootstrap and queries.
//!
//! The history table is the sole runtime memory of applied state. Rows are
//! append-only and written inside the same transaction as the schema
//! statements they record; `created_at` stores the migration's logical
//! `when`, not wall-clock apply time.

use crate::error::{RunnerError, RunnerResult};
use wm_core::MigrationEntry;
use wm_db::{Row, SqlConnection, SqlValue};

/// Table recording applied migrations
pub const HISTORY_TABLE: &str = "__waymark_migrations";

const CREATE_HISTORY_TABLE: &str = "CREATE TABLE IF NOT EXISTS __waymark_migrations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    hash TEXT NOT NULL,
    tag TEXT NOT NULL,
    created_at INTEGER NOT NULL
)";

const SELECT_LAST_APPLIED: &str = "SELECT id, hash, tag, created_at
    FROM __waymark_migrations
    ORDER BY created_at DESC
    LIMIT 1";

const SELECT_HISTORY_TABLE: &str = "SELECT name FROM sqlite_master
    WHERE type = 'table' AND name = '__waymark_migrations'";

const INSERT_HISTORY: &str =
    "INSERT INTO __waymark_migrations (hash, tag, created_at) VALUES (?1, ?2, ?3)";

/// A recorded, successfully applied migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub id: i64,
    pub hash: String,
    pub tag: String,
    pub created_at: i64,
}

/// Create the history table if it does not exist
pub async fn ensure_history_table<C>(conn: &C) -> RunnerResult<()>
where
    C: SqlConnection + ?Sized,
{
    conn.run(CREATE_HISTORY_TABLE)
        .await
        .map_err(|e| RunnerError::History(e.to_string()))
}

/// Whether the history table exists at all
pub async fn history_table_exists<C>(conn: &C) -> RunnerResult<bool>
where
    C: SqlConnection + ?Sized,
{
    let row = conn
        .get(SELECT_HISTORY_TABLE)
        .await
        .map_err(|e| RunnerError::History(e.to_string()))?;
    Ok(row.is_some())
}

/// The most recently applied migration, by `created_at`, or `None` when the
/// history is empty
pub async fn last_applied<C>(conn: &C) -> RunnerResult<Option<HistoryRecord>>
where
    C: SqlConnection + ?Sized,
{
    let row = conn
        .get(SELECT_LAST_APPLIED)
        .await
        .map_err(|e| RunnerError::History(e.to_string()))?;
    row.map(record_from_row).transpose()
}

/// Insert a history row for `entry` with bound values.
/// Must be called inside the transaction that applied the entry.
pub async fn record<C>(conn: &C, entry: &MigrationEntry) -> RunnerResult<()>
where
    C: SqlConnection + ?Sized,
{
    conn.run_with(
        INSERT_HISTORY,
        &[
            SqlValue::Text(entry.hash.clone()),
            SqlValue::Text(entry.tag.clone()),
            SqlValue::Integer(entry.when),
        ],
    )
    .await
    .map_err(|e| RunnerError::History(e.to_string()))
}

fn record_from_row(row: Row) -> RunnerResult<HistoryRecord> {
    let field = |name: &str| {
        row.get(name)
            .ok_or_else(|| RunnerError::History(format!("history row missing column '{name}'")))
    };

    let id = field("id")?
        .as_i64()
        .ok_or_else(|| RunnerError::History("history column 'id' is not an integer".into()))?;
    let hash = field("hash")?
        .as_str()
        .ok_or_else(|| RunnerError::History("history column 'hash' is not text".into()))?
        .to_string();
    let tag = field("tag")?
        .as_str()
        .ok_or_else(|| RunnerError::History("history column 'tag' is not text".into()))?
        .to_string();
    let created_at = field("created_at")?.as_i64().ok_or_else(|| {
        RunnerError::History("history column 'created_at' is not an integer".into())
    })?;

    Ok(HistoryRecord {
        id,
        hash,
        tag,
        created_at,
    })
}
