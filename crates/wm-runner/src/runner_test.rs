use super::*;
use crate::history::HISTORY_TABLE;
use wm_db::{SqlValue, SqliteBackend};

fn entry(idx: u32, when: i64, tag: &str, sql: &[&str]) -> MigrationEntry {
    MigrationEntry {
        idx,
        when,
        tag: tag.to_string(),
        hash: format!("{:064x}", when),
        sql: sql.iter().map(|s| s.to_string()).collect(),
    }
}

fn two_migrations() -> Manifest {
    Manifest::new(vec![
        entry(0, 1000, "0000_init", &["CREATE TABLE t (x INTEGER)"]),
        entry(1, 2000, "0001_add_col", &["ALTER TABLE t ADD y INTEGER"]),
    ])
}

async fn table_exists(conn: &SqliteBackend, name: &str) -> bool {
    conn.get(&format!(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = '{name}'"
    ))
    .await
    .unwrap()
    .is_some()
}

async fn history_rows(conn: &SqliteBackend) -> Vec<(String, i64)> {
    conn.all("SELECT tag, created_at FROM __waymark_migrations ORDER BY created_at")
        .await
        .unwrap()
        .iter()
        .map(|r| {
            (
                r.get("tag").and_then(SqlValue::as_str).unwrap().to_string(),
                r.get("created_at").and_then(SqlValue::as_i64).unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_apply_empty_manifest() {
    let db = SqliteBackend::in_memory().unwrap();
    let applied = apply(&Manifest::default(), &db).await.unwrap();
    assert_eq!(applied, 0);
    assert!(table_exists(&db, HISTORY_TABLE).await);
}

#[tokio::test]
async fn test_apply_then_idempotent() {
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = two_migrations();

    let applied = apply(&manifest, &db).await.unwrap();
    assert_eq!(applied, 2);
    assert!(table_exists(&db, "t").await);
    assert_eq!(
        history_rows(&db).await,
        vec![
            ("0000_init".to_string(), 1000),
            ("0001_add_col".to_string(), 2000),
        ]
    );

    // Unchanged manifest and history: second call is a no-op
    let applied = apply(&manifest, &db).await.unwrap();
    assert_eq!(applied, 0);
    assert_eq!(history_rows(&db).await.len(), 2);
}

#[tokio::test]
async fn test_apply_only_newer_entries() {
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = two_migrations();
    apply(&manifest, &db).await.unwrap();

    let mut extended = manifest.clone();
    extended.entries.push(entry(
        2,
        3000,
        "0002_add_index",
        &["CREATE INDEX idx_y ON t (y)"],
    ));

    let applied = apply(&extended, &db).await.unwrap();
    assert_eq!(applied, 1);
    assert_eq!(history_rows(&db).await.len(), 3);
}

#[tokio::test]
async fn test_multi_statement_entry_runs_sequentially() {
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = Manifest::new(vec![entry(
        0,
        1000,
        "0000_init",
        &[
            "CREATE TABLE t (x INTEGER)",
            "CREATE INDEX idx_x ON t (x)",
            "INSERT INTO t VALUES (1)",
        ],
    )]);

    let applied = apply(&manifest, &db).await.unwrap();
    assert_eq!(applied, 1);

    let row = db.get("SELECT x FROM t").await.unwrap().unwrap();
    assert_eq!(row.get("x").and_then(SqlValue::as_i64), Some(1));
}

#[tokio::test]
async fn test_failed_batch_rolls_back_everything() {
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = Manifest::new(vec![
        entry(0, 1000, "0000_init", &["CREATE TABLE t (x INTEGER)"]),
        entry(
            1,
            2000,
            "0001_bad",
            &["CREATE TABLE u (z INTEGER)", "ALTER TABLE missing ADD w INTEGER"],
        ),
    ]);

    let err = apply(&manifest, &db).await.unwrap_err();
    match err {
        RunnerError::Statement { tag, statement, .. } => {
            assert_eq!(tag, "0001_bad");
            assert!(statement.contains("missing"));
        }
        other => panic!("expected Statement error, got {other}"),
    }

    // Nothing committed: not the first entry, not the failing entry's first
    // statement, and no history rows
    assert!(!table_exists(&db, "t").await);
    assert!(!table_exists(&db, "u").await);
    assert!(history_rows(&db).await.is_empty());
}

#[tokio::test]
async fn test_retry_after_fix_succeeds() {
    let db = SqliteBackend::in_memory().unwrap();
    let broken = Manifest::new(vec![
        entry(0, 1000, "0000_init", &["CREATE TABLE t (x INTEGER)"]),
        entry(1, 2000, "0001_add_col", &["ALTER TABLE missing ADD y INTEGER"]),
    ]);
    assert!(apply(&broken, &db).await.is_err());

    let fixed = two_migrations();
    let applied = apply(&fixed, &db).await.unwrap();
    assert_eq!(applied, 2);
    assert!(table_exists(&db, "t").await);
}

#[tokio::test]
async fn test_pending_rule_against_seeded_history() {
    let db = SqliteBackend::in_memory().unwrap();
    history::ensure_history_table(&db).await.unwrap();
    history::record(&db, &entry(0, 1500, "0000_seeded", &[])).await.unwrap();

    // Only the entry strictly newer than the last created_at is pending
    let manifest = Manifest::new(vec![
        entry(0, 1000, "0000_init", &["CREATE TABLE old (x INTEGER)"]),
        entry(1, 2000, "0001_add", &["CREATE TABLE fresh (y INTEGER)"]),
    ]);

    let applied = apply(&manifest, &db).await.unwrap();
    assert_eq!(applied, 1);
    assert!(!table_exists(&db, "old").await);
    assert!(table_exists(&db, "fresh").await);
}

#[tokio::test]
async fn test_created_at_stores_logical_when() {
    let db = SqliteBackend::in_memory().unwrap();
    apply(&two_migrations(), &db).await.unwrap();

    let last = history::last_applied(&db).await.unwrap().unwrap();
    assert_eq!(last.created_at, 2000);
    assert_eq!(last.tag, "0001_add_col");
    assert_eq!(last.hash, format!("{:064x}", 2000));
}

#[tokio::test]
async fn test_status_partitions_manifest() {
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = two_migrations();

    // Before any apply: history table absent, everything pending
    let before = status(&manifest, &db).await.unwrap();
    assert!(before.applied.is_empty());
    assert_eq!(before.pending.len(), 2);
    assert!(!table_exists(&db, HISTORY_TABLE).await);

    apply(&manifest, &db).await.unwrap();

    let mut extended = manifest.clone();
    extended
        .entries
        .push(entry(2, 3000, "0002_more", &["CREATE TABLE m (x INTEGER)"]));

    let after = status(&extended, &db).await.unwrap();
    assert_eq!(after.applied.len(), 2);
    assert_eq!(after.pending.len(), 1);
    assert_eq!(after.pending[0].tag, "0002_more");
}

#[tokio::test]
async fn test_worked_example() {
    // journal = 0000_init @ 1000, 0001_add_col @ 2000
    let db = SqliteBackend::in_memory().unwrap();
    let manifest = Manifest::new(vec![
        entry(0, 1000, "0000_init", &["CREATE TABLE t (x INTEGER)"]),
        entry(1, 2000, "0001_add_col", &["ALTER TABLE t ADD y INTEGER"]),
    ]);

    assert_eq!(apply(&manifest, &db).await.unwrap(), 2);
    assert_eq!(history_rows(&db).await, vec![
        ("0000_init".to_string(), 1000),
        ("0001_add_col".to_string(), 2000),
    ]);
    assert_eq!(apply(&manifest, &db).await.unwrap(), 0);

    let mut extended = manifest.clone();
    extended
        .entries
        .push(entry(2, 3000, "0002", &["CREATE TABLE t2 (z INTEGER)"]));
    assert_eq!(apply(&extended, &db).await.unwrap(), 1);
}
