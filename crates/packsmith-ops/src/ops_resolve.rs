//! Operation: resolve a pack and optionally write its install plan.

use packsmith_core::config::GlobalConfig;
use packsmith_core::dependency::Dependency;
use packsmith_core::plan::{InstallPlan, PlannedConflict, PlannedMissing, PlannedMod};
use packsmith_core::PLAN_FILE;
use packsmith_resolver::resolver::ResolutionResult;
use packsmith_util::errors::PacksmithError;
use packsmith_util::progress;

use crate::{load_pack, PackPaths};

/// Options for `packsmith resolve`.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub paths: PackPaths,
    /// Write `pack.lock` next to the manifest.
    pub write_plan: bool,
    pub verbose: bool,
}

/// Resolve the pack, report the outcome, and apply the configured failure
/// policy. The plan is written before the policy is checked.
pub fn resolve(opts: &ResolveOptions, config: &GlobalConfig) -> miette::Result<()> {
    let pack = load_pack(&opts.paths, config)?;
    progress::status(
        "Resolving",
        &format!(
            "{} ({} mods requested)",
            pack.manifest.pack.name,
            pack.requested.len() + pack.unresolved.len()
        ),
    );

    let pb = progress::spinner("Resolving dependencies...");
    let result = pack.resolve();
    pb.finish_and_clear();
    let result = result?;

    for m in &result.resolved_mods {
        if m.is_direct() || !opts.verbose {
            println!("{} {}", m.mod_info.id, m.mod_info.version);
        } else {
            println!("{} {} (via {})", m.mod_info.id, m.mod_info.version, m.installed_by);
        }
    }

    for conflict in result.conflicts.iter() {
        progress::status_warn("Conflict", &conflict.to_string());
    }
    let missing = pack.missing(&result);
    for dep in &missing {
        progress::status_warn("Missing", &dep.to_string());
    }
    for err in &result.errors {
        progress::status_warn("Dropped", &err.to_string());
    }

    if opts.write_plan {
        let plan = to_install_plan(&result, &pack.unresolved);
        let plan_path = pack.root.join(PLAN_FILE);
        plan.write_to(&plan_path)?;
        progress::status("Wrote", &plan_path.display().to_string());
    }

    progress::status(
        "Resolved",
        &format!("{} mods in install order", result.resolved_mods.len()),
    );

    if config.resolver.fail_on_conflict && result.has_conflicts() {
        return Err(PacksmithError::Resolution {
            message: format!("{} version conflict(s)", result.conflicts.len()),
        }
        .into());
    }
    if config.resolver.fail_on_missing && !missing.is_empty() {
        return Err(PacksmithError::Resolution {
            message: format!("{} required mod(s) missing", missing.len()),
        }
        .into());
    }
    Ok(())
}

/// Flatten a resolution into the on-disk plan. `unresolved` lists top-level
/// requests the registry could not satisfy and is recorded as missing ahead
/// of the resolver's own missing dependencies.
pub fn to_install_plan(result: &ResolutionResult, unresolved: &[Dependency]) -> InstallPlan {
    let mods = result
        .resolved_mods
        .iter()
        .map(|m| PlannedMod {
            id: m.mod_info.id.clone(),
            version: m.mod_info.version.clone(),
            installed_by: (!m.is_direct()).then(|| m.installed_by.clone()),
            download_url: m.download_url.clone(),
            file_name: m.file_name.clone(),
        })
        .collect();

    let conflicts = result
        .conflicts
        .iter()
        .map(|c| PlannedConflict {
            id: c.mod_id.clone(),
            required_by: c.required_by.clone(),
            versions: c.versions.clone(),
        })
        .collect();

    let missing = unresolved
        .iter()
        .chain(&result.missing_deps)
        .map(|d| PlannedMissing {
            id: d.mod_id.clone(),
            version: d.version.clone(),
        })
        .collect();

    InstallPlan {
        mods,
        conflicts,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_core::mod_info::ModInfo;
    use packsmith_resolver::registry::MemoryRegistry;
    use packsmith_resolver::resolver::Resolver;

    #[test]
    fn plan_follows_install_order() {
        let mut lib = ModInfo::new("lib", "1.0.0");
        lib.file_name = Some("lib.jar".into());
        let registry = MemoryRegistry::new().with(lib);
        let app = ModInfo::new("app", "2.0.0").with_dependency(Dependency::required("lib", "*"));
        let result = Resolver::new(&registry).resolve(&[app]).unwrap();

        let plan = to_install_plan(&result, &[Dependency::required("ghost", ">=1.0.0")]);
        let ids: Vec<&str> = plan.mods.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["lib", "app"]);
        assert_eq!(plan.mods[0].installed_by.as_deref(), Some("app"));
        assert_eq!(plan.mods[0].file_name.as_deref(), Some("lib.jar"));
        assert!(plan.mods[1].installed_by.is_none());
        assert_eq!(plan.missing.len(), 1);
        assert_eq!(plan.missing[0].id, "ghost");
        assert!(!plan.is_complete());
    }
}
