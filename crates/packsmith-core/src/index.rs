//! Mod index files: the on-disk form of a local mod registry.
//!
//! ```toml
//! [[mods]]
//! id = "sodium"
//! version = "0.5.3"
//! dependencies = [{ id = "fabric-api", version = ">=0.90.0" }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mod_info::ModInfo;

/// Every known version of every mod, flat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModIndex {
    #[serde(default)]
    pub mods: Vec<ModInfo>,
}

impl ModIndex {
    /// Load and parse an index file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            packsmith_util::errors::PacksmithError::Index {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// Parse an index from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        let index: Self = toml::from_str(content).map_err(|e| {
            packsmith_util::errors::PacksmithError::Index {
                message: format!("Failed to parse mod index: {e}"),
            }
        })?;
        if let Some(blank) = index.mods.iter().find(|m| m.id.trim().is_empty()) {
            return Err(packsmith_util::errors::PacksmithError::Index {
                message: format!("entry with version {} has an empty id", blank.version),
            }
            .into());
        }
        tracing::debug!("loaded mod index with {} entries", index.mods.len());
        Ok(index)
    }

    /// Serialize the index to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
