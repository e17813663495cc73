//! Operation: pick the best available version of one mod.

use std::path::Path;

use packsmith_core::index::ModIndex;
use packsmith_core::mod_info::ModInfo;
use packsmith_resolver::registry::{MemoryRegistry, ModRegistry};
use packsmith_resolver::select::find_best_version;

/// The highest version of `mod_id` in the index at `index_file` satisfying
/// every constraint. No constraints means the latest version.
pub fn best_version(
    index_file: &Path,
    mod_id: &str,
    constraints: &[String],
) -> miette::Result<ModInfo> {
    let registry = MemoryRegistry::from_index(ModIndex::from_path(index_file)?);
    if constraints.is_empty() {
        return Ok(registry.get_latest_version(mod_id)?);
    }
    let candidates = registry.get_available_versions(mod_id)?;
    tracing::debug!("{} candidate(s) for {mod_id}", candidates.len());
    Ok(find_best_version(&candidates, constraints)?.clone())
}

/// Print the best version of `mod_id`.
pub fn best(index_file: &Path, mod_id: &str, constraints: &[String]) -> miette::Result<()> {
    let found = best_version(index_file, mod_id, constraints)?;
    match &found.file_name {
        Some(file) => println!("{} {} ({file})", found.id, found.version),
        None => println!("{} {}", found.id, found.version),
    }
    Ok(())
}
