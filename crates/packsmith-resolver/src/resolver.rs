//! Core resolution algorithm: depth-first traversal over an explicit stack,
//! cycle detection, conflict and missing-dependency accumulation, and
//! topological install ordering.

use std::collections::HashMap;

use packsmith_core::dependency::Dependency;
use packsmith_core::mod_info::ModInfo;
use tracing::{debug, info, warn};

use crate::conflict::{ConflictReport, Sighting};
use crate::error::ResolveError;
use crate::graph::DependencyGraph;
use crate::registry::ModRegistry;
use crate::version::Version;

/// A mod accepted into a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMod {
    pub mod_info: ModInfo,
    pub download_url: Option<String>,
    pub file_name: Option<String>,
    /// The mod that first pulled this one in; empty when requested directly.
    pub installed_by: String,
}

impl ResolvedMod {
    pub fn is_direct(&self) -> bool {
        self.installed_by.is_empty()
    }
}

/// The output of dependency resolution.
///
/// A successful resolution can still be incomplete: check
/// [`has_missing_deps`](Self::has_missing_deps),
/// [`has_conflicts`](Self::has_conflicts) and `errors` before installing.
#[derive(Debug, Clone, Default)]
pub struct ResolutionResult {
    /// Resolved mods in install order.
    pub resolved_mods: Vec<ResolvedMod>,
    pub conflicts: ConflictReport,
    /// Required dependencies the registry could not satisfy.
    pub missing_deps: Vec<Dependency>,
    /// Mod ids in install order; dependencies first.
    pub install_order: Vec<String>,
    /// Requested mods whose branch failed and was left out.
    pub errors: Vec<ResolveError>,
}

impl ResolutionResult {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    pub fn has_missing_deps(&self) -> bool {
        !self.missing_deps.is_empty()
    }

    /// No conflicts, no missing dependencies, no failed branches.
    pub fn is_clean(&self) -> bool {
        !self.has_conflicts() && !self.has_missing_deps() && self.errors.is_empty()
    }

    pub fn get(&self, mod_id: &str) -> Option<&ResolvedMod> {
        self.resolved_mods.iter().find(|m| m.mod_info.id == mod_id)
    }

    /// The dependency graph of the resolved set, for display and queries.
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::from_mods(&self.resolved_mods)
    }
}

/// Resolves requested mods against a registry.
///
/// Holds no state between calls: every [`resolve`](Self::resolve) starts
/// from a fresh context, so one resolver can serve any number of calls,
/// including concurrent ones when `R: Sync`.
pub struct Resolver<R> {
    registry: R,
}

impl<R: ModRegistry> Resolver<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Resolve `mods` and their transitive dependencies.
    ///
    /// A circular dependency inside one requested mod's branch drops that
    /// branch and is recorded in [`ResolutionResult::errors`]; the remaining
    /// mods still resolve. The call itself fails only when the resolved set
    /// cannot be ordered, or when a conflict check meets an unparseable
    /// version.
    pub fn resolve(&self, mods: &[ModInfo]) -> Result<ResolutionResult, ResolveError> {
        let mut ctx = ResolutionContext::default();
        let mut errors = Vec::new();

        for requested in mods {
            match self.resolve_branch(&mut ctx, requested) {
                Ok(()) => {}
                Err(err @ ResolveError::CircularDependency { .. }) => {
                    warn!("dropping {requested}: {err}");
                    errors.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        let result = ctx.finish(errors)?;
        info!(
            resolved = result.resolved_mods.len(),
            conflicts = result.conflicts.len(),
            missing = result.missing_deps.len(),
            "resolution finished"
        );
        Ok(result)
    }

    fn resolve_branch(
        &self,
        ctx: &mut ResolutionContext,
        requested: &ModInfo,
    ) -> Result<(), ResolveError> {
        let mut stack = match ctx.visit(requested.clone(), "", &requested.version, false)? {
            Visit::Enter(frame) => vec![frame],
            Visit::Settled | Visit::Cycle => return Ok(()),
        };

        while let Some(top) = stack.last_mut() {
            let Some(dep) = top.info.dependencies.get(top.next_dep).cloned() else {
                if let Some(done) = stack.pop() {
                    ctx.settle(done);
                }
                continue;
            };
            top.next_dep += 1;
            let parent = top.info.id.clone();

            let found = match self.registry.get_mod(&dep.mod_id, &dep.version) {
                Ok(found) => found,
                Err(err) if dep.required => {
                    warn!("{parent} requires {dep}: {err}");
                    ctx.missing.push(dep);
                    continue;
                }
                Err(err) => {
                    debug!("{parent} recommends {dep}: {err}");
                    continue;
                }
            };

            let found_id = found.id.clone();
            match ctx.visit(found, &parent, &dep.version, !dep.required)? {
                Visit::Enter(frame) => {
                    debug!("{parent} -> {}", frame.info);
                    stack.push(frame);
                }
                Visit::Settled => {}
                Visit::Cycle if !dep.required => {
                    debug!("ignoring optional dependency cycle {parent} -> {found_id}");
                }
                Visit::Cycle => {
                    let err = ResolveError::CircularDependency {
                        chain: cycle_chain(&stack, &found_id),
                    };
                    // Unwind to the nearest frame entered through an optional
                    // edge; its failure is swallowed like any optional miss.
                    loop {
                        let Some(frame) = stack.pop() else {
                            return Err(err);
                        };
                        ctx.abandon(&frame);
                        if frame.via_optional {
                            debug!("optional {} dropped: {err}", frame.info);
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// The ids from the first occurrence of `repeated` on the stack to the top,
/// closed with `repeated` again: `a -> b -> c -> a`.
fn cycle_chain(stack: &[Frame], repeated: &str) -> Vec<String> {
    let start = stack
        .iter()
        .position(|f| f.info.id == repeated)
        .unwrap_or(0);
    stack[start..]
        .iter()
        .map(|f| f.info.id.clone())
        .chain(std::iter::once(repeated.to_string()))
        .collect()
}

/// A mod whose dependencies are being worked through.
struct Frame {
    info: ModInfo,
    required_by: String,
    requested_with: String,
    via_optional: bool,
    next_dep: usize,
}

#[derive(Debug, Clone, Copy)]
enum NodeState {
    Resolving,
    /// Index into [`ResolutionContext::resolved`].
    Resolved(usize),
}

enum Visit {
    Enter(Frame),
    Settled,
    Cycle,
}

struct Settled {
    resolved: ResolvedMod,
    requested_with: String,
}

/// Working state of one `resolve` call.
#[derive(Default)]
struct ResolutionContext {
    states: HashMap<String, NodeState>,
    /// Settled mods in the order they finished.
    resolved: Vec<Settled>,
    conflicts: ConflictReport,
    missing: Vec<Dependency>,
}

impl ResolutionContext {
    fn visit(
        &mut self,
        info: ModInfo,
        required_by: &str,
        requested_with: &str,
        via_optional: bool,
    ) -> Result<Visit, ResolveError> {
        match self.states.get(&info.id).copied() {
            Some(NodeState::Resolving) => Ok(Visit::Cycle),
            Some(NodeState::Resolved(slot)) => {
                self.check_version(slot, &info, required_by, requested_with)?;
                Ok(Visit::Settled)
            }
            None => {
                self.states.insert(info.id.clone(), NodeState::Resolving);
                Ok(Visit::Enter(Frame {
                    info,
                    required_by: required_by.to_string(),
                    requested_with: requested_with.to_string(),
                    via_optional,
                    next_dep: 0,
                }))
            }
        }
    }

    /// Record a conflict when a settled mod is requested at another version.
    /// The settled version stays.
    fn check_version(
        &mut self,
        slot: usize,
        incoming: &ModInfo,
        required_by: &str,
        requested_with: &str,
    ) -> Result<(), ResolveError> {
        let kept = &self.resolved[slot];
        let kept_version = &kept.resolved.mod_info.version;
        if *kept_version == incoming.version
            || Version::parse(kept_version)? == Version::parse(&incoming.version)?
        {
            return Ok(());
        }

        warn!(
            "{} wants {} but {} is already resolved",
            if required_by.is_empty() { "pack" } else { required_by },
            incoming,
            kept.resolved.mod_info
        );
        self.conflicts.record(
            &incoming.id,
            Sighting {
                required_by: &kept.resolved.installed_by,
                version: kept_version,
                version_expr: &kept.requested_with,
            },
            Sighting {
                required_by,
                version: &incoming.version,
                version_expr: requested_with,
            },
        );
        Ok(())
    }

    fn settle(&mut self, frame: Frame) {
        debug!("resolved {}", frame.info);
        self.states
            .insert(frame.info.id.clone(), NodeState::Resolved(self.resolved.len()));
        self.resolved.push(Settled {
            resolved: ResolvedMod {
                download_url: frame.info.download_url.clone(),
                file_name: frame.info.file_name.clone(),
                mod_info: frame.info,
                installed_by: frame.required_by,
            },
            requested_with: frame.requested_with,
        });
    }

    /// Forget a frame dropped while unwinding. Dependencies it already
    /// settled stay resolved and are credited to the frame's own requester.
    fn abandon(&mut self, frame: &Frame) {
        self.states.remove(&frame.info.id);
        for settled in &mut self.resolved {
            if settled.resolved.installed_by == frame.info.id {
                debug!(
                    "{} now installed by {:?}",
                    settled.resolved.mod_info.id, frame.required_by
                );
                settled.resolved.installed_by = frame.required_by.clone();
            }
        }
    }

    /// Order the settled set and assemble the result.
    fn finish(self, errors: Vec<ResolveError>) -> Result<ResolutionResult, ResolveError> {
        let settled: Vec<ResolvedMod> = self.resolved.into_iter().map(|s| s.resolved).collect();
        let order = DependencyGraph::from_mods(&settled).install_order()?;

        let mut slots: Vec<Option<ResolvedMod>> = settled.into_iter().map(Some).collect();
        let resolved_mods: Vec<ResolvedMod> = order
            .iter()
            .filter_map(|idx| slots[idx.index()].take())
            .collect();
        let install_order = resolved_mods
            .iter()
            .map(|m| m.mod_info.id.clone())
            .collect();

        Ok(ResolutionResult {
            resolved_mods,
            conflicts: self.conflicts,
            missing_deps: self.missing,
            install_order,
            errors,
        })
    }
}
