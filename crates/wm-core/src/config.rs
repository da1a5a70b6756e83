//! Configuration types and parsing for waymark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name at the project root
pub const CONFIG_FILE: &str = "waymark.yml";

/// Project configuration from waymark.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Directory holding the migration journal and SQL files.
    ///
    /// A project with no migrations yet may legitimately omit this; compiling
    /// such a project is a warning-only no-op, not an error.
    #[serde(default)]
    pub out: Option<String>,

    /// Manifest artifact path, relative to the project root.
    /// Defaults to `manifest.json` inside the `out` directory.
    #[serde(default)]
    pub manifest: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CoreError::IoWithPath {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Resolve the migrations output directory against the project root,
    /// or `None` when no output location is configured
    pub fn out_dir(&self, root: &Path) -> Option<PathBuf> {
        self.out.as_ref().map(|out| resolve(root, out))
    }

    /// Resolve the manifest artifact path against the project root
    pub fn manifest_path(&self, root: &Path) -> Option<PathBuf> {
        match &self.manifest {
            Some(manifest) => Some(resolve(root, manifest)),
            None => self.out_dir(root).map(|out| out.join("manifest.json")),
        }
    }
}

/// Join a configured path onto the root unless it is already absolute
fn resolve(root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
