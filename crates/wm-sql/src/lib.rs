//! wm-sql - SQL statement splitting for Waymark
//!
//! This crate provides the breakpoint-aware statement splitter that turns the
//! raw text of one migration file into an ordered sequence of independently
//! executable statements.

pub mod error;
pub mod splitter;

pub use error::{SqlError, SqlResult};
pub use splitter::{split_sql, STATEMENT_BREAKPOINT};
