//! wm-db - Database abstraction layer for Waymark
//!
//! This crate defines the proxied connection trait the migration runner
//! executes against, the value/row model crossing that boundary, and a
//! SQLite reference backend.

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod value;

pub use error::{DbError, DbResult};
pub use sqlite::SqliteBackend;
pub use traits::{transaction, SqlConnection};
pub use value::{Row, SqlValue};
