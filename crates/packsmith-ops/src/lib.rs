pub mod ops_best;
pub mod ops_deps;
pub mod ops_resolve;
pub mod ops_tree;

use std::path::{Path, PathBuf};

use packsmith_core::config::GlobalConfig;
use packsmith_core::dependency::Dependency;
use packsmith_core::index::ModIndex;
use packsmith_core::manifest::Manifest;
use packsmith_core::mod_info::ModInfo;
use packsmith_resolver::error::{RegistryError, SelectError};
use packsmith_resolver::registry::{MemoryRegistry, ModRegistry};
use packsmith_resolver::resolver::{ResolutionResult, Resolver};
use packsmith_util::errors::PacksmithError;

/// Where a pack's manifest lives, plus an optional index override.
#[derive(Debug, Clone)]
pub struct PackPaths {
    pub manifest: PathBuf,
    pub index: Option<PathBuf>,
}

/// A manifest with its registry, ready to resolve.
pub struct LoadedPack {
    pub manifest: Manifest,
    /// Directory holding the manifest; plans are written here.
    pub root: PathBuf,
    pub registry: MemoryRegistry,
    /// Top-level mods picked from the registry, ordered by mod id.
    pub requested: Vec<ModInfo>,
    /// Required manifest entries the registry could not satisfy.
    pub unresolved: Vec<Dependency>,
}

impl LoadedPack {
    pub fn resolve(&self) -> miette::Result<ResolutionResult> {
        let result = Resolver::new(&self.registry).resolve(&self.requested)?;
        Ok(result)
    }

    /// Every missing required dependency, top-level entries first.
    pub fn missing<'a>(&'a self, result: &'a ResolutionResult) -> Vec<&'a Dependency> {
        self.unresolved.iter().chain(&result.missing_deps).collect()
    }
}

/// Index location: the explicit override, then `[pack] index`, then the
/// global default. Relative paths are taken from the manifest's directory.
pub fn index_path(
    root: &Path,
    manifest: &Manifest,
    explicit: Option<&Path>,
    config: &GlobalConfig,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let configured = manifest
        .pack
        .index
        .as_deref()
        .unwrap_or(config.index.path.as_str());
    root.join(configured)
}

/// Read the manifest and index, then look up every server-side request.
///
/// Optional requests the registry lacks are skipped; required ones are
/// collected in [`LoadedPack::unresolved`]. A malformed version expression
/// in the manifest is an error.
pub fn load_pack(paths: &PackPaths, config: &GlobalConfig) -> miette::Result<LoadedPack> {
    let manifest = Manifest::from_path(&paths.manifest)?;
    let root = match paths.manifest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let index_file = index_path(&root, &manifest, paths.index.as_deref(), config);
    tracing::debug!("using mod index {}", index_file.display());
    let registry = MemoryRegistry::from_index(ModIndex::from_path(&index_file)?);

    let mut requested = Vec::new();
    let mut unresolved = Vec::new();
    for (id, request) in manifest.server_requests() {
        match registry.get_mod(id, request.version_expr()) {
            Ok(info) => requested.push(info),
            Err(RegistryError::NoMatch(SelectError::InvalidRange(err))) => {
                return Err(PacksmithError::Manifest {
                    message: format!("mod `{id}`: {err}"),
                }
                .into());
            }
            Err(err) if request.is_optional() => {
                tracing::debug!("skipping optional {id}: {err}");
            }
            Err(err) => {
                tracing::warn!("{id}: {err}");
                unresolved.push(Dependency::required(id, request.version_expr()));
            }
        }
    }

    Ok(LoadedPack {
        manifest,
        root,
        registry,
        requested,
        unresolved,
    })
}
