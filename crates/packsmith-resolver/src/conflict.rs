//! Version conflict bookkeeping and reporting.

use std::collections::HashMap;
use std::fmt;

/// Two or more requesters settled on different versions of the same mod.
///
/// The three vectors are parallel and in discovery order; entry 0 is the
/// version that was kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub mod_id: String,
    /// Requesting mod ids; empty for a mod requested directly.
    pub required_by: Vec<String>,
    pub versions: Vec<String>,
    pub version_exprs: Vec<String>,
}

/// One requester's view of a mod, used when recording a conflict.
#[derive(Debug, Clone, Copy)]
pub struct Sighting<'a> {
    pub required_by: &'a str,
    pub version: &'a str,
    pub version_expr: &'a str,
}

/// All conflicts of one resolution, at most one entry per mod id.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    conflicts: Vec<Conflict>,
    by_id: HashMap<String, usize>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `incoming` disagrees with the already-resolved `kept`.
    ///
    /// The first sighting for a mod id creates its entry from both sides;
    /// later sightings only append `incoming`.
    pub fn record(&mut self, mod_id: &str, kept: Sighting<'_>, incoming: Sighting<'_>) {
        if let Some(&slot) = self.by_id.get(mod_id) {
            push_sighting(&mut self.conflicts[slot], incoming);
            return;
        }
        let mut conflict = Conflict {
            mod_id: mod_id.to_string(),
            required_by: Vec::new(),
            versions: Vec::new(),
            version_exprs: Vec::new(),
        };
        push_sighting(&mut conflict, kept);
        push_sighting(&mut conflict, incoming);
        self.by_id.insert(mod_id.to_string(), self.conflicts.len());
        self.conflicts.push(conflict);
    }

    pub fn get(&self, mod_id: &str) -> Option<&Conflict> {
        self.by_id.get(mod_id).map(|&slot| &self.conflicts[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter()
    }

    pub fn as_slice(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

fn push_sighting(conflict: &mut Conflict, sighting: Sighting<'_>) {
    conflict.required_by.push(sighting.required_by.to_string());
    conflict.versions.push(sighting.version.to_string());
    conflict.version_exprs.push(sighting.version_expr.to_string());
}

fn requester(id: &str) -> &str {
    if id.is_empty() {
        "pack"
    } else {
        id
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.mod_id)?;
        for (i, (by, version)) in self.required_by.iter().zip(&self.versions).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{} wants {version}", requester(by))?;
        }
        if let Some(kept) = self.versions.first() {
            write!(f, " (kept {kept})")?;
        }
        Ok(())
    }
}
