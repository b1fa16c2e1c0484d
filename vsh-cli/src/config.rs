// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration file loading

use serde::Deserialize;
use std::path::{Path, PathBuf};
use vsh_core::{VshError, VshResult};

/// Shell configuration, read from JSON or TOML
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tar archive holding the virtual filesystem
    #[serde(alias = "fs_archive")]
    pub archive_path: PathBuf,

    /// Directory to start in instead of `/`
    #[serde(default)]
    pub start_dir: Option<String>,

    /// Default log filter when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Load a config file. `.toml` files are parsed as TOML, anything else
    /// as JSON. A relative archive path is taken relative to the config file.
    pub fn load(path: &Path) -> VshResult<Self> {
        if !path.is_file() {
            return Err(VshError::Config(format!(
                "Configuration file {} does not exist.",
                path.display()
            )));
        }
        let text = std::fs::read_to_string(path)?;

        let mut config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&text)
                .map_err(|e| VshError::Config(format!("{}: {e}", path.display())))?,
            _ => serde_json::from_str(&text)
                .map_err(|e| VshError::Config(format!("{}: {e}", path.display())))?,
        };

        if config.archive_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.archive_path = dir.join(&config.archive_path);
            }
        }
        Ok(config)
    }
}
