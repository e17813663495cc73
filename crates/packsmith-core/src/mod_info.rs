use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dependency::Dependency;

/// Metadata for one concrete version of a mod, as supplied by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Capability or compatibility ids this mod claims to provide.
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default, rename = "download-url", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, rename = "file-name", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ModInfo {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            version: version.into(),
            dependencies: Vec::new(),
            provides: Vec::new(),
            download_url: None,
            file_name: None,
        }
    }

    pub fn with_dependency(mut self, dep: Dependency) -> Self {
        self.dependencies.push(dep);
        self
    }

    pub fn with_provides(mut self, id: impl Into<String>) -> Self {
        self.provides.push(id.into());
        self
    }

    /// Whether this mod answers to `id`, either directly or through `provides`.
    pub fn answers_to(&self, id: &str) -> bool {
        self.id == id || self.provides.iter().any(|p| p == id)
    }

    /// Human-readable name, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl fmt::Display for ModInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}
