//! wm-runner - Migration runner for Waymark
//!
//! Applies the pending subset of a compiled manifest against a proxied
//! database connection: one transaction per batch, history recorded alongside
//! each entry, nothing committed unless the whole batch succeeds.

pub mod error;
pub mod history;
pub mod runner;

pub use error::{RunnerError, RunnerResult};
pub use history::{HistoryRecord, HISTORY_TABLE};
pub use runner::{apply, status, MigrationStatus};
