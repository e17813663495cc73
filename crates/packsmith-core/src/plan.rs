use serde::{Deserialize, Serialize};
use std::path::Path;

/// A resolved install plan, written as `pack.lock`.
///
/// `mod` entries are listed in install order: every entry's dependencies
/// appear before it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallPlan {
    #[serde(default, rename = "mod")]
    pub mods: Vec<PlannedMod>,
    #[serde(default, rename = "conflict")]
    pub conflicts: Vec<PlannedConflict>,
    #[serde(default, rename = "missing")]
    pub missing: Vec<PlannedMissing>,
}

/// One mod in install order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMod {
    pub id: String,
    pub version: String,
    /// The mod that pulled this one in; absent when requested directly.
    #[serde(default, rename = "installed-by", skip_serializing_if = "Option::is_none")]
    pub installed_by: Option<String>,
    #[serde(default, rename = "download-url", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, rename = "file-name", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// A mod id that was requested at more than one version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedConflict {
    pub id: String,
    #[serde(rename = "required-by")]
    pub required_by: Vec<String>,
    pub versions: Vec<String>,
}

/// A required dependency nobody could satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMissing {
    pub id: String,
    pub version: String,
}

impl InstallPlan {
    /// Load and parse a `pack.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            packsmith_util::errors::PacksmithError::Generic {
                message: format!("Failed to read install plan: {e}"),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            packsmith_util::errors::PacksmithError::Generic {
                message: format!("Failed to parse install plan: {e}"),
            }
            .into()
        })
    }

    /// Serialize the plan to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write the plan to `path`, replacing any previous plan.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let content = self.to_string_pretty().map_err(|e| {
            packsmith_util::errors::PacksmithError::Generic {
                message: format!("Failed to serialize install plan: {e}"),
            }
        })?;
        packsmith_util::fs::write_atomic(path, &content)
            .map_err(packsmith_util::errors::PacksmithError::Io)?;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
