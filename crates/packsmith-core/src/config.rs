use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration loaded from `~/.packsmith/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub index: IndexConfig,
}

/// Resolution policy from `[resolver]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Treat version conflicts as a failed resolution.
    #[serde(default, rename = "fail-on-conflict")]
    pub fail_on_conflict: bool,
    /// Treat missing required dependencies as a failed resolution.
    #[serde(default = "default_true", rename = "fail-on-missing")]
    pub fail_on_missing: bool,
    /// Additional platform ids dropped when normalizing loader manifests.
    #[serde(default, rename = "extra-reserved-ids")]
    pub extra_reserved_ids: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fail_on_conflict: false,
            fail_on_missing: true,
            extra_reserved_ids: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Default index location from `[index]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_index_path")]
    pub path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: default_index_path(),
        }
    }
}

fn default_index_path() -> String {
    "index.toml".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.packsmith/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            packsmith_util::errors::PacksmithError::Config {
                message: format!("Failed to read global config: {e}"),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            packsmith_util::errors::PacksmithError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the Packsmith data directory (`~/.packsmith/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".packsmith")
}
