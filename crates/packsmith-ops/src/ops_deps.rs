//! Operation: read a loader manifest and print its canonical dependencies.

use std::path::Path;

use packsmith_core::config::GlobalConfig;
use packsmith_core::mod_info::ModInfo;
use packsmith_core::normalize::{
    parse_fabric_mod_json, parse_forge_mods_toml, FABRIC_RESERVED_IDS, FORGE_RESERVED_IDS,
};
use packsmith_util::errors::PacksmithError;

/// Loader manifest formats understood by [`read_mod_manifest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `fabric.mod.json` (Fabric and Quilt).
    FabricJson,
    /// `mods.toml` / `neoforge.mods.toml` (Forge and NeoForge).
    ModsToml,
}

impl ManifestKind {
    /// Guess the format from the file extension.
    pub fn detect(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::FabricJson),
            "toml" => Some(Self::ModsToml),
            _ => None,
        }
    }
}

/// Normalize the loader manifest at `path` into one [`ModInfo`] per mod it
/// declares. Platform ids, plus any configured extras, are dropped.
pub fn read_mod_manifest(path: &Path, config: &GlobalConfig) -> miette::Result<Vec<ModInfo>> {
    let kind = ManifestKind::detect(path).ok_or_else(|| PacksmithError::Generic {
        message: format!(
            "{}: expected a fabric.mod.json or mods.toml file",
            path.display()
        ),
    })?;
    let content = std::fs::read_to_string(path).map_err(PacksmithError::Io)?;

    let base = match kind {
        ManifestKind::FabricJson => FABRIC_RESERVED_IDS,
        ManifestKind::ModsToml => FORGE_RESERVED_IDS,
    };
    let reserved: Vec<&str> = base
        .iter()
        .copied()
        .chain(config.resolver.extra_reserved_ids.iter().map(String::as_str))
        .collect();

    let mods = match kind {
        ManifestKind::FabricJson => vec![parse_fabric_mod_json(&content, &reserved)?],
        ManifestKind::ModsToml => parse_forge_mods_toml(&content, &reserved)?,
    };
    Ok(mods)
}

/// Print each declared mod followed by its dependencies.
pub fn deps(path: &Path, config: &GlobalConfig) -> miette::Result<()> {
    for info in read_mod_manifest(path, config)? {
        println!("{info} ({})", info.display_name());
        if info.dependencies.is_empty() {
            println!("  (no dependencies)");
        }
        for dep in &info.dependencies {
            let kind = if dep.required { "requires" } else { "recommends" };
            println!("  {kind} {} {} [{}]", dep.mod_id, dep.version, dep.side);
        }
        for alias in &info.provides {
            println!("  provides {alias}");
        }
    }
    Ok(())
}
