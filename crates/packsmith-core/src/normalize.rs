//! Translation of loader- and registry-specific dependency declarations into
//! the canonical [`Dependency`] shape.
//!
//! Three source shapes are understood:
//! - a loader's own `depends` / `recommends` maps (Fabric, Quilt),
//! - a registry dependency list with a `dependency_type` discriminator,
//! - Maven-style version intervals (Forge and NeoForge `mods.toml`).

use std::collections::BTreeMap;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::dependency::{Dependency, Side, ANY_VERSION};
use crate::mod_info::ModInfo;

/// Ids a Fabric-family manifest may depend on that are never installable mods:
/// the loader, the game, and the Java runtime.
pub const FABRIC_RESERVED_IDS: &[&str] = &["fabricloader", "minecraft", "java"];

/// Platform ids skipped in Forge-family `mods.toml` files.
pub const FORGE_RESERVED_IDS: &[&str] = &["forge", "neoforge", "minecraft"];

#[derive(Debug, Error, Diagnostic)]
pub enum NormalizeError {
    #[error("invalid Maven version range `{range}`: {reason}")]
    #[diagnostic(help("expected forms: [a,b] (a,b) [a,) (,b] [a]"))]
    InvalidMavenRange { range: String, reason: String },

    #[error("failed to parse fabric.mod.json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse mods.toml: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Build dependencies from a loader's `depends` (required) and `recommends`
/// (optional) maps, skipping `reserved` platform ids.
pub fn from_loader_maps(
    depends: &BTreeMap<String, String>,
    recommends: &BTreeMap<String, String>,
    reserved: &[&str],
) -> Vec<Dependency> {
    let is_reserved = |id: &str| reserved.iter().any(|r| *r == id);
    let mut deps = Vec::new();
    for (id, expr) in depends {
        if !is_reserved(id) {
            deps.push(Dependency::required(id.clone(), normalize_expr(expr)));
        }
    }
    for (id, expr) in recommends {
        if !is_reserved(id) {
            deps.push(Dependency::optional(id.clone(), normalize_expr(expr)));
        }
    }
    deps
}

fn normalize_expr(expr: &str) -> String {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        ANY_VERSION.to_string()
    } else {
        trimmed.to_string()
    }
}

/// An entry of a registry's dependency list (Modrinth version objects).
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryDependency {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
    pub dependency_type: String,
}

/// Translate a registry dependency list. Only `required` entries are
/// required; every other type is optional. Entries without a project id
/// cannot be looked up and are dropped.
pub fn from_registry_list(list: &[RegistryDependency]) -> Vec<Dependency> {
    list.iter()
        .filter_map(|entry| {
            let Some(project) = entry.project_id.as_deref() else {
                tracing::debug!(
                    "dropping registry dependency without project id (version {:?})",
                    entry.version_id
                );
                return None;
            };
            Some(if entry.dependency_type == "required" {
                Dependency::required(project, ANY_VERSION)
            } else {
                Dependency::optional(project, ANY_VERSION)
            })
        })
        .collect()
}

/// Translate a Maven interval into the canonical comma-joined syntax.
///
/// `[1.0,2.0)` becomes `>=1.0,<2.0`, `[1.0]` becomes `1.0`, `(,)` becomes `*`.
/// Input without brackets is already a plain version and is returned as is.
pub fn maven_range_to_expr(range: &str) -> Result<String, NormalizeError> {
    let s = range.trim();
    if s.is_empty() {
        return Ok(ANY_VERSION.to_string());
    }
    if !s.starts_with('[') && !s.starts_with('(') {
        return Ok(s.to_string());
    }

    let invalid = |reason: &str| NormalizeError::InvalidMavenRange {
        range: range.to_string(),
        reason: reason.to_string(),
    };

    let open_inclusive = s.starts_with('[');
    let close_inclusive = if s.ends_with(']') {
        true
    } else if s.ends_with(')') {
        false
    } else {
        return Err(invalid("missing closing bracket"));
    };
    if s.len() < 2 {
        return Err(invalid("missing closing bracket"));
    }
    let inner = &s[1..s.len() - 1];
    if inner.contains(['[', ']', '(', ')']) {
        return Err(invalid("multiple intervals are not supported"));
    }

    let Some((lower, upper)) = inner.split_once(',') else {
        let exact = inner.trim();
        if exact.is_empty() {
            return Err(invalid("empty exact version"));
        }
        return Ok(exact.to_string());
    };
    if upper.contains(',') {
        return Err(invalid("too many bounds"));
    }

    let mut clauses = Vec::new();
    let lower = lower.trim();
    if !lower.is_empty() {
        let op = if open_inclusive { ">=" } else { ">" };
        clauses.push(format!("{op}{lower}"));
    }
    let upper = upper.trim();
    if !upper.is_empty() {
        let op = if close_inclusive { "<=" } else { "<" };
        clauses.push(format!("{op}{upper}"));
    }

    if clauses.is_empty() {
        Ok(ANY_VERSION.to_string())
    } else {
        Ok(clauses.join(","))
    }
}

#[derive(Debug, Deserialize)]
struct FabricModJson {
    id: String,
    version: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    depends: BTreeMap<String, FabricPredicate>,
    #[serde(default)]
    recommends: BTreeMap<String, FabricPredicate>,
    #[serde(default)]
    provides: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FabricPredicate {
    One(String),
    AnyOf(Vec<String>),
}

impl FabricPredicate {
    /// A list means "any of these"; the canonical syntax has no disjunction,
    /// so only a single-element list keeps its constraint.
    fn into_expr(self) -> String {
        match self {
            FabricPredicate::One(s) => s,
            FabricPredicate::AnyOf(mut list) if list.len() == 1 => list.remove(0),
            FabricPredicate::AnyOf(list) => {
                if !list.is_empty() {
                    tracing::debug!("widening disjunctive predicate {list:?} to `*`");
                }
                ANY_VERSION.to_string()
            }
        }
    }
}

fn flatten(map: BTreeMap<String, FabricPredicate>) -> BTreeMap<String, String> {
    map.into_iter().map(|(k, v)| (k, v.into_expr())).collect()
}

/// Read a `fabric.mod.json` into a [`ModInfo`].
pub fn parse_fabric_mod_json(content: &str, reserved: &[&str]) -> Result<ModInfo, NormalizeError> {
    let raw: FabricModJson = serde_json::from_str(content)?;
    let dependencies = from_loader_maps(&flatten(raw.depends), &flatten(raw.recommends), reserved);
    Ok(ModInfo {
        name: raw.name.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        version: raw.version,
        dependencies,
        provides: raw.provides,
        download_url: None,
        file_name: None,
    })
}

#[derive(Debug, Deserialize)]
struct ModsToml {
    #[serde(default)]
    mods: Vec<ModsTomlMod>,
    #[serde(default)]
    dependencies: BTreeMap<String, Vec<ModsTomlDependency>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModsTomlMod {
    mod_id: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModsTomlDependency {
    mod_id: String,
    #[serde(default)]
    mandatory: Option<bool>,
    /// NeoForge replaced `mandatory` with `type`.
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    version_range: Option<String>,
    #[serde(default)]
    side: Option<String>,
}

impl ModsTomlDependency {
    /// `None` for declarations that are not dependencies at all
    /// (`incompatible`, `discouraged`).
    fn required(&self) -> Option<bool> {
        match self.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("required") => Some(true),
            Some("optional") => Some(false),
            Some(_) => None,
            None => Some(self.mandatory.unwrap_or(true)),
        }
    }
}

/// Read a Forge or NeoForge `mods.toml` into one [`ModInfo`] per `[[mods]]`
/// entry, translating `versionRange` intervals into canonical expressions.
pub fn parse_forge_mods_toml(
    content: &str,
    reserved: &[&str],
) -> Result<Vec<ModInfo>, NormalizeError> {
    let mut raw: ModsToml = toml::from_str(content)?;
    let mut mods = Vec::with_capacity(raw.mods.len());
    for entry in raw.mods {
        let mut dependencies = Vec::new();
        for dep in raw.dependencies.remove(&entry.mod_id).unwrap_or_default() {
            if reserved.iter().any(|r| *r == dep.mod_id) {
                continue;
            }
            let Some(required) = dep.required() else {
                tracing::debug!("skipping non-dependency declaration on {}", dep.mod_id);
                continue;
            };
            let version = maven_range_to_expr(dep.version_range.as_deref().unwrap_or(""))?;
            let side = dep
                .side
                .as_deref()
                .and_then(|s| s.parse::<Side>().ok())
                .unwrap_or_default();
            dependencies.push(Dependency {
                mod_id: dep.mod_id,
                version,
                required,
                side,
            });
        }
        mods.push(ModInfo {
            name: entry.display_name.unwrap_or_else(|| entry.mod_id.clone()),
            id: entry.mod_id,
            version: entry.version.unwrap_or_else(|| ANY_VERSION.to_string()),
            dependencies,
            provides: Vec::new(),
            download_url: None,
            file_name: None,
        });
    }
    Ok(mods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maven_inclusive_exclusive() {
        assert_eq!(maven_range_to_expr("[1.0,2.0)").unwrap(), ">=1.0,<2.0");
        assert_eq!(maven_range_to_expr("(1.0,2.0]").unwrap(), ">1.0,<=2.0");
    }

    #[test]
    fn maven_open_ends() {
        assert_eq!(maven_range_to_expr("[47,)").unwrap(), ">=47");
        assert_eq!(maven_range_to_expr("(,2.0]").unwrap(), "<=2.0");
        assert_eq!(maven_range_to_expr("(,)").unwrap(), "*");
    }

    #[test]
    fn maven_exact_and_bare() {
        assert_eq!(maven_range_to_expr("[1.5]").unwrap(), "1.5");
        assert_eq!(maven_range_to_expr("1.5").unwrap(), "1.5");
        assert_eq!(maven_range_to_expr("  ").unwrap(), "*");
    }

    #[test]
    fn maven_rejects_malformed() {
        assert!(maven_range_to_expr("[1.0,2.0").is_err());
        assert!(maven_range_to_expr("[1,2),[3,4)").is_err());
        assert!(maven_range_to_expr("[]").is_err());
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let depends = BTreeMap::from([
            ("minecraft".to_string(), "1.20.1".to_string()),
            ("fabric-api".to_string(), ">=0.90.0".to_string()),
        ]);
        let deps = from_loader_maps(&depends, &BTreeMap::new(), FABRIC_RESERVED_IDS);
        assert_eq!(deps, vec![Dependency::required("fabric-api", ">=0.90.0")]);
    }
}
