//! Compile command implementation

use anyhow::{Context, Result};
use std::path::Path;
use wm_core::DirSource;

use crate::cli::{CompileArgs, GlobalArgs};
use crate::commands::common;

/// Execute the compile command
pub async fn execute(args: &CompileArgs, global: &GlobalArgs) -> Result<()> {
    let root = Path::new(&global.project_dir);
    let config = common::load_config(root, global)?;

    // A project with no migrations output directory is a no-op, not an error
    let Some(out_dir) = config.out_dir(root) else {
        eprintln!("Warning: no `out` directory configured; nothing to compile");
        return Ok(());
    };

    let source = DirSource::new(&out_dir);
    let manifest =
        wm_core::compile(&source).context("Failed to compile migration manifest")?;

    if global.verbose {
        for entry in &manifest {
            eprintln!(
                "[verbose] {} (when {}, {} statements, hash {})",
                entry.tag,
                entry.when,
                entry.sql.len(),
                entry.hash
            );
        }
    }

    let target = match &args.output {
        Some(output) => Path::new(output).to_path_buf(),
        None => common::resolve_manifest_path(root, &None, &config)?,
    };
    manifest
        .save(&target)
        .with_context(|| format!("Failed to write manifest {}", target.display()))?;

    println!(
        "Compiled {} migrations to {}",
        manifest.len(),
        target.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "compile_test.rs"]
mod tests;
