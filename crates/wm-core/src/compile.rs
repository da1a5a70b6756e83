//! Manifest compiler: ordered journal + migration file bytes -> manifest.
//!
//! Compilation is a pure value-returning step. It holds no state between
//! calls, so concurrent builds of independent projects cannot interfere, and
//! identical inputs always yield a byte-identical manifest.

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::journal::{JournalEntry, MigrationSource};
use crate::manifest::{Manifest, MigrationEntry};
use wm_sql::split_sql;

/// Compile every journal entry into a manifest, in journal order.
///
/// Any failure aborts the whole compilation; a partial manifest is never
/// returned. Journals whose `idx` or `when` values are not strictly
/// increasing are rejected: the runner selects pending migrations by
/// comparing against the last applied `when`, so a non-monotonic journal
/// could silently skip or reapply entries at run time.
pub fn compile(source: &dyn MigrationSource) -> CoreResult<Manifest> {
    let journal = source.journal()?;
    let mut entries = Vec::with_capacity(journal.entries.len());
    let mut previous: Option<&JournalEntry> = None;

    for entry in &journal.entries {
        if let Some(prev) = previous {
            if entry.idx <= prev.idx || entry.when <= prev.when {
                return Err(CoreError::JournalOutOfOrder {
                    tag: entry.tag.clone(),
                    idx: entry.idx,
                    when: entry.when,
                    previous: prev.tag.clone(),
                });
            }
        }

        let bytes = source.read_migration(&entry.tag)?;
        let hash = compute_checksum(&bytes);
        let text = std::str::from_utf8(&bytes).map_err(|_| CoreError::InvalidUtf8 {
            tag: entry.tag.clone(),
        })?;
        let sql = split_sql(text).map_err(|e| CoreError::Split {
            tag: entry.tag.clone(),
            source: e,
        })?;

        log::debug!(
            "compiled migration '{}' ({} statements, hash {})",
            entry.tag,
            sql.len(),
            hash
        );

        entries.push(MigrationEntry {
            idx: entry.idx,
            when: entry.when,
            tag: entry.tag.clone(),
            hash,
            sql,
        });
        previous = Some(entry);
    }

    Ok(Manifest::new(entries))
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
