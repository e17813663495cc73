//! The registry capability the resolver draws candidate mods from, plus an
//! in-memory implementation backed by a [`ModIndex`].

use std::collections::BTreeMap;

use packsmith_core::dependency::ANY_VERSION;
use packsmith_core::index::ModIndex;
use packsmith_core::mod_info::ModInfo;

use crate::error::RegistryError;
use crate::select::find_best_version;

/// Source of mod metadata.
///
/// Implementations that reach the network should apply their own timeouts:
/// the resolver calls these methods synchronously and waits.
pub trait ModRegistry {
    /// The best version of `mod_id` satisfying `version_expr`.
    fn get_mod(&self, mod_id: &str, version_expr: &str) -> Result<ModInfo, RegistryError>;

    /// Every known version of `mod_id`, in no particular order.
    fn get_available_versions(&self, mod_id: &str) -> Result<Vec<ModInfo>, RegistryError>;

    /// The highest known version of `mod_id`.
    fn get_latest_version(&self, mod_id: &str) -> Result<ModInfo, RegistryError> {
        let versions = self.get_available_versions(mod_id)?;
        Ok(find_best_version(&versions, &[ANY_VERSION])?.clone())
    }
}

impl<R: ModRegistry + ?Sized> ModRegistry for &R {
    fn get_mod(&self, mod_id: &str, version_expr: &str) -> Result<ModInfo, RegistryError> {
        (**self).get_mod(mod_id, version_expr)
    }

    fn get_available_versions(&self, mod_id: &str) -> Result<Vec<ModInfo>, RegistryError> {
        (**self).get_available_versions(mod_id)
    }

    fn get_latest_version(&self, mod_id: &str) -> Result<ModInfo, RegistryError> {
        (**self).get_latest_version(mod_id)
    }
}

/// A registry held entirely in memory.
///
/// Lookups by id fall back to mods that list the id in `provides` when no
/// mod carries that id directly.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    mods: BTreeMap<String, Vec<ModInfo>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: ModIndex) -> Self {
        let mut registry = Self::new();
        for info in index.mods {
            registry.insert(info);
        }
        registry
    }

    /// Add a mod version. A second entry with the same id and version
    /// replaces the first.
    pub fn insert(&mut self, info: ModInfo) {
        let versions = self.mods.entry(info.id.clone()).or_default();
        versions.retain(|existing| existing.version != info.version);
        versions.push(info);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, info: ModInfo) -> Self {
        self.insert(info);
        self
    }

    /// Number of distinct mod ids.
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    fn providers_of(&self, mod_id: &str) -> Vec<ModInfo> {
        self.mods
            .values()
            .flatten()
            .filter(|info| info.answers_to(mod_id))
            .cloned()
            .collect()
    }
}

impl ModRegistry for MemoryRegistry {
    fn get_mod(&self, mod_id: &str, version_expr: &str) -> Result<ModInfo, RegistryError> {
        let candidates = self.get_available_versions(mod_id)?;
        Ok(find_best_version(&candidates, &[version_expr])?.clone())
    }

    fn get_available_versions(&self, mod_id: &str) -> Result<Vec<ModInfo>, RegistryError> {
        if let Some(versions) = self.mods.get(mod_id) {
            return Ok(versions.clone());
        }
        let providers = self.providers_of(mod_id);
        if providers.is_empty() {
            return Err(RegistryError::NotFound {
                mod_id: mod_id.to_string(),
            });
        }
        tracing::debug!("{mod_id} resolved through {} provider(s)", providers.len());
        Ok(providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectError;

    fn registry() -> MemoryRegistry {
        MemoryRegistry::new()
            .with(ModInfo::new("fabric-api", "0.90.0"))
            .with(ModInfo::new("fabric-api", "0.92.1"))
            .with(ModInfo::new("fabric-api", "0.83.0"))
            .with(ModInfo::new("quilted-fabric-api", "7.4.0").with_provides("qsl"))
    }

    #[test]
    fn get_mod_picks_best_match() {
        let reg = registry();
        assert_eq!(reg.get_mod("fabric-api", "*").unwrap().version, "0.92.1");
        assert_eq!(
            reg.get_mod("fabric-api", "<0.92.0").unwrap().version,
            "0.90.0"
        );
    }

    #[test]
    fn get_mod_reports_unsatisfiable() {
        let err = registry().get_mod("fabric-api", ">=1.0.0").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NoMatch(SelectError::NoSatisfyingVersion { .. })
        ));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = registry().get_available_versions("sodium").unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotFound {
                mod_id: "sodium".to_string()
            }
        );
    }

    #[test]
    fn provides_is_a_fallback() {
        let found = registry().get_mod("qsl", "*").unwrap();
        assert_eq!(found.id, "quilted-fabric-api");
    }

    #[test]
    fn latest_version() {
        assert_eq!(
            registry().get_latest_version("fabric-api").unwrap().version,
            "0.92.1"
        );
    }

    #[test]
    fn reinserting_replaces() {
        let mut reg = registry();
        reg.insert(ModInfo::new("fabric-api", "0.90.0").with_provides("fabric"));
        let versions = reg.get_available_versions("fabric-api").unwrap();
        assert_eq!(versions.len(), 3);
        assert!(versions.iter().any(|m| m.provides == vec!["fabric".to_string()]));
    }
}
