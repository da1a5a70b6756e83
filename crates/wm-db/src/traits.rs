//! Connection trait consumed by the migration runner

use crate::error::{DbError, DbResult};
use crate::value::{Row, SqlValue};
use async_trait::async_trait;
use std::future::Future;

/// Proxied SQL connection abstraction.
///
/// This is the whole surface the migration runner needs from a database:
/// statement execution, row queries, and explicit transaction boundaries.
/// Implementations must be Send + Sync.
#[async_trait]
pub trait SqlConnection: Send + Sync {
    /// Execute one statement, discarding any result rows
    async fn run(&self, sql: &str) -> DbResult<()>;

    /// Execute one statement with bound parameter values
    async fn run_with(&self, sql: &str, params: &[SqlValue]) -> DbResult<()>;

    /// Execute a query and return all rows
    async fn all(&self, sql: &str) -> DbResult<Vec<Row>>;

    /// Execute a query and return at most one row
    async fn get(&self, sql: &str) -> DbResult<Option<Row>>;

    /// Open a transaction on this connection
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;
}

/// Run `body` inside a transaction on `conn`.
///
/// Commits when the body returns `Ok`, rolls back on `Err`. The body's error
/// takes precedence over any rollback failure.
pub async fn transaction<'c, C, T, E, F, Fut>(conn: &'c C, body: F) -> Result<T, E>
where
    C: SqlConnection + ?Sized,
    E: From<DbError>,
    F: FnOnce(&'c C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    conn.begin().await?;
    match body(conn).await {
        Ok(value) => {
            conn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            let _ = conn.rollback().await;
            Err(err)
        }
    }
}
