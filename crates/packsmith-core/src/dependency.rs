use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version expression that accepts any version.
pub const ANY_VERSION: &str = "*";

/// Which side of a client/server split a mod needs to be installed on.
///
/// Purely informational: the resolver never filters on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
    #[default]
    Both,
}

impl Side {
    /// Whether a mod with this side belongs on a dedicated server.
    pub fn on_server(self) -> bool {
        matches!(self, Side::Server | Side::Both)
    }
}

impl FromStr for Side {
    type Err = String;

    /// Accepts the spellings used across loader manifests
    /// (`client`, `SERVER`, `both`, `*`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Side::Client),
            "server" => Ok(Side::Server),
            "both" | "*" | "" => Ok(Side::Both),
            other => Err(format!("unknown side `{other}`")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Client => "client",
            Side::Server => "server",
            Side::Both => "both",
        })
    }
}

/// A requirement one mod places on another.
///
/// `version` is kept unparsed in the canonical expression syntax
/// (`*`, `1.2.3`, `>=1.0.0,<2.0.0`, `1.0.0-2.0.0`) and parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(rename = "id")]
    pub mod_id: String,
    #[serde(default = "any_version")]
    pub version: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub side: Side,
}

fn any_version() -> String {
    ANY_VERSION.to_string()
}

fn default_required() -> bool {
    true
}

impl Dependency {
    /// A required dependency on both sides.
    pub fn required(mod_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            mod_id: mod_id.into(),
            version: version.into(),
            required: true,
            side: Side::Both,
        }
    }

    /// An optional dependency on both sides.
    pub fn optional(mod_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(mod_id, version)
        }
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mod_id, self.version)?;
        if !self.required {
            f.write_str(" (optional)")?;
        }
        Ok(())
    }
}
