//! wm-core - Core library for Waymark
//!
//! This crate provides the journal and manifest data model, content
//! checksumming, project configuration, and the manifest compiler that turns
//! an ordered migration journal into an embeddable, statement-split manifest.

pub mod checksum;
pub mod compile;
pub mod config;
pub mod error;
pub mod journal;
pub mod manifest;

pub use checksum::compute_checksum;
pub use compile::compile;
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use journal::{DirSource, Journal, JournalEntry, MigrationSource};
pub use manifest::{Manifest, MigrationEntry};
