//! Migration runner: applies pending manifest entries atomically.
//!
//! One invocation equals at most one transaction. Entries and their
//! statements execute strictly sequentially, since later statements may
//! depend on the schema effects of earlier ones; the first failure rolls the
//! whole batch back, leaving the database exactly as it was before the call.

use crate::error::{RunnerError, RunnerResult};
use crate::history::{self, HistoryRecord};
use wm_core::{Manifest, MigrationEntry};
use wm_db::{transaction, SqlConnection};

/// Apply all pending migrations from `manifest`, returning the number of
/// entries applied.
///
/// Idempotent: re-invoking with an unchanged manifest and history applies
/// nothing and returns 0. Callers must serialize concurrent invocations
/// against the same database; the runner provides no inter-process locking.
pub async fn apply<C>(manifest: &Manifest, conn: &C) -> RunnerResult<usize>
where
    C: SqlConnection + ?Sized,
{
    history::ensure_history_table(conn).await?;
    let last = history::last_applied(conn).await?;

    let pending = pending_entries(manifest, last.as_ref());
    if pending.is_empty() {
        log::debug!("no pending migrations");
        return Ok(0);
    }

    log::debug!("applying {} pending migrations", pending.len());

    transaction(conn, move |tx| async move {
        let mut applied = 0usize;
        for entry in pending {
            log::debug!("applying migration '{}' ({})", entry.tag, entry.hash);
            for statement in &entry.sql {
                tx.run(statement).await.map_err(|e| RunnerError::Statement {
                    tag: entry.tag.clone(),
                    statement: statement.clone(),
                    source: e,
                })?;
            }
            history::record(tx, entry).await?;
            applied += 1;
        }
        Ok(applied)
    })
    .await
}

/// Partition of a manifest under the last-`when` pending rule.
///
/// `pending` entries would be applied by the next [`apply`]; `applied` holds
/// everything not pending under that rule. An entry older than the last
/// recorded `created_at` is never revisited, so its presence in `applied`
/// does not prove a matching history row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied: Vec<MigrationEntry>,
    pub pending: Vec<MigrationEntry>,
}

/// Partition the manifest entries without modifying the database.
/// Uses the same pending rule as [`apply`].
pub async fn status<C>(manifest: &Manifest, conn: &C) -> RunnerResult<MigrationStatus>
where
    C: SqlConnection + ?Sized,
{
    let last = if history::history_table_exists(conn).await? {
        history::last_applied(conn).await?
    } else {
        None
    };

    let pending = pending_entries(manifest, last.as_ref());
    let applied = manifest
        .iter()
        .filter(|m| !pending.iter().any(|p| p.idx == m.idx))
        .cloned()
        .collect();

    Ok(MigrationStatus {
        applied,
        pending: pending.into_iter().cloned().collect(),
    })
}

/// Entries with no prior history, or logically newer than the last applied
/// record, in ascending `idx` order
fn pending_entries<'m>(
    manifest: &'m Manifest,
    last: Option<&HistoryRecord>,
) -> Vec<&'m MigrationEntry> {
    let mut pending: Vec<&MigrationEntry> = manifest
        .iter()
        .filter(|m| match last {
            None => true,
            Some(record) => m.when > record.created_at,
        })
        .collect();
    pending.sort_by_key(|m| m.idx);
    pending
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
