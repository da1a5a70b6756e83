//! Apply command implementation

use anyhow::{Context, Result};
use std::path::Path;
use wm_db::SqliteBackend;

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common;

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let root = Path::new(&global.project_dir);
    let config = common::load_config(root, global)?;

    let manifest_path = common::resolve_manifest_path(root, &args.manifest, &config)?;
    let manifest = common::load_manifest(&manifest_path)?;

    let db = SqliteBackend::new(&args.database)
        .with_context(|| format!("Failed to open database {}", args.database))?;

    let applied = wm_runner::apply(&manifest, &db)
        .await
        .context("Migration failed; the batch was rolled back")?;

    if applied == 0 {
        println!("No pending migrations");
    } else {
        println!("Applied {applied} migrations");
    }
    Ok(())
}
