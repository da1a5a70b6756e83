//! SQLite backend implementation over rusqlite

use crate::error::{DbError, DbResult};
use crate::traits::SqlConnection;
use crate::value::{Row, SqlValue};
use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ToSql};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite database backend
pub struct SqliteBackend {
    conn: Mutex<Connection>,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new SQLite connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn run_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        // execute_batch, not execute: a migration statement may contain
        // internal semicolons (trigger and view bodies) that execute rejects
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute SQL with bound parameters synchronously
    fn run_with_sync(&self, sql: &str, params: &[SqlValue]) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute(sql, rusqlite::params_from_iter(params.iter()))
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        Ok(())
    }

    /// Query all rows synchronously
    fn all_sync(&self, sql: &str) -> DbResult<Vec<Row>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt
            .query([])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(DbError::from)? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                let value = row.get_ref(i).map_err(DbError::from)?;
                values.push(value_from_ref(value));
            }
            out.push(Row::new(columns.clone(), values));
        }
        Ok(out)
    }

    fn tx_sync(&self, sql: &'static str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::TransactionError(format!("{}: {}", e, sql)))
    }
}

fn value_from_ref(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(i) => SqlValue::Integer(i),
        ValueRef::Real(f) => SqlValue::Real(f),
        ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => SqlValue::Blob(b.to_vec()),
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::Integer(*i),
            SqlValue::Real(f) => Value::Real(*f),
            SqlValue::Text(s) => Value::Text(s.clone()),
            SqlValue::Blob(b) => Value::Blob(b.clone()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

#[async_trait]
impl SqlConnection for SqliteBackend {
    async fn run(&self, sql: &str) -> DbResult<()> {
        self.run_sync(sql)
    }

    async fn run_with(&self, sql: &str, params: &[SqlValue]) -> DbResult<()> {
        self.run_with_sync(sql, params)
    }

    async fn all(&self, sql: &str) -> DbResult<Vec<Row>> {
        self.all_sync(sql)
    }

    async fn get(&self, sql: &str) -> DbResult<Option<Row>> {
        Ok(self.all_sync(sql)?.into_iter().next())
    }

    async fn begin(&self) -> DbResult<()> {
        self.tx_sync("BEGIN")
    }

    async fn commit(&self) -> DbResult<()> {
        self.tx_sync("COMMIT")
    }

    async fn rollback(&self) -> DbResult<()> {
        self.tx_sync("ROLLBACK")
    }
}
