use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::dependency::{Side, ANY_VERSION};

/// The parsed representation of a `pack.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub pack: PackMetadata,

    /// Requested mods keyed by mod id.
    #[serde(default)]
    pub mods: BTreeMap<String, ModRequest>,
}

/// Pack identity and metadata from the `[pack]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackMetadata {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub minecraft: Option<String>,
    #[serde(default)]
    pub loader: Option<Loader>,
    /// Path of the mod index, relative to the manifest.
    #[serde(default)]
    pub index: Option<String>,
}

/// The mod-loading runtime a pack targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Fabric,
    Quilt,
    Forge,
    NeoForge,
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Loader::Fabric => "fabric",
            Loader::Quilt => "quilt",
            Loader::Forge => "forge",
            Loader::NeoForge => "neoforge",
        })
    }
}

/// A mod requested by the pack, either a bare version expression or a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModRequest {
    Version(String),
    Detailed(DetailedModRequest),
}

/// `sodium = { version = ">=0.5.0", side = "client" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedModRequest {
    #[serde(default = "any_version")]
    pub version: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub side: Side,
}

fn any_version() -> String {
    ANY_VERSION.to_string()
}

impl ModRequest {
    pub fn version_expr(&self) -> &str {
        match self {
            ModRequest::Version(v) => v,
            ModRequest::Detailed(d) => &d.version,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ModRequest::Detailed(d) if d.optional)
    }

    pub fn side(&self) -> Side {
        match self {
            ModRequest::Version(_) => Side::Both,
            ModRequest::Detailed(d) => d.side,
        }
    }
}

impl Manifest {
    /// Load and parse a `pack.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            packsmith_util::errors::PacksmithError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        Self::from_str(&content)
    }

    /// Parse a `pack.toml` from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            packsmith_util::errors::PacksmithError::Manifest {
                message: format!("Failed to parse pack.toml: {e}"),
            }
            .into()
        })
    }

    /// Mods that belong on a dedicated server, in id order.
    pub fn server_requests(&self) -> impl Iterator<Item = (&str, &ModRequest)> {
        self.mods
            .iter()
            .filter(|(_, req)| req.side().on_server())
            .map(|(id, req)| (id.as_str(), req))
    }
}
