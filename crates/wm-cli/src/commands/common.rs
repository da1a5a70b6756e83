//! Helpers shared across commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use wm_core::config::CONFIG_FILE;
use wm_core::{Config, CoreError, Manifest};

use crate::cli::GlobalArgs;

/// Load the project config, honouring a `--config` override.
///
/// A missing config file is treated as an empty config (a project may
/// legitimately have no migrations yet); any other failure is fatal.
pub fn load_config(root: &Path, global: &GlobalArgs) -> Result<Config> {
    let path = match &global.config {
        Some(config) => PathBuf::from(config),
        None => root.join(CONFIG_FILE),
    };

    match Config::load(&path) {
        Ok(config) => Ok(config),
        Err(CoreError::ConfigNotFound { .. }) if global.config.is_none() => {
            log::debug!("no {} found, using defaults", CONFIG_FILE);
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load project config"),
    }
}

/// Resolve the manifest artifact path from an explicit argument or the config
pub fn resolve_manifest_path(
    root: &Path,
    explicit: &Option<String>,
    config: &Config,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(path));
    }
    config.manifest_path(root).context(
        "No manifest path configured; pass --manifest or set `out` in waymark.yml",
    )
}

/// Load a manifest artifact
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    Manifest::load(path).with_context(|| format!("Failed to load manifest {}", path.display()))
}
