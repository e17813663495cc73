//! Best-version selection over a candidate pool.

use packsmith_core::mod_info::ModInfo;

use crate::error::SelectError;
use crate::version::{Version, VersionRange};

/// Pick the highest candidate whose version satisfies every constraint.
///
/// Constraints are parsed up front, so a malformed constraint fails even when
/// no candidate would have been checked against it. Candidates whose own
/// version cannot be parsed are skipped.
pub fn find_best_version<'a, S: AsRef<str>>(
    candidates: &'a [ModInfo],
    constraints: &[S],
) -> Result<&'a ModInfo, SelectError> {
    let Some(first) = candidates.first() else {
        return Err(SelectError::NoVersionsAvailable);
    };

    let ranges = constraints
        .iter()
        .map(|c| VersionRange::parse(c.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    candidates
        .iter()
        .filter_map(|candidate| match Version::parse(&candidate.version) {
            Ok(version) => Some((version, candidate)),
            Err(_) => {
                tracing::debug!("skipping {candidate}: unparseable version");
                None
            }
        })
        .filter(|(version, _)| ranges.iter().all(|range| range.matches(version)))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, candidate)| candidate)
        .ok_or_else(|| SelectError::NoSatisfyingVersion {
            mod_id: first.id.clone(),
            constraints: constraints
                .iter()
                .map(|c| c.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerelease_loses_to_stable() {
        let candidates = vec![
            ModInfo::new("sodium", "0.6.0-beta.2"),
            ModInfo::new("sodium", "0.5.8"),
        ];
        let best = find_best_version(&candidates, &["<0.6.0"]).unwrap();
        assert_eq!(best.version, "0.6.0-beta.2");

        let best = find_best_version(&candidates, &[">=0.5.0,<0.6.0-beta"]).unwrap();
        assert_eq!(best.version, "0.5.8");
    }

    #[test]
    fn unparseable_candidates_are_skipped() {
        let candidates = vec![
            ModInfo::new("create", "mc1.20.1-0.5.1"),
            ModInfo::new("create", "0.5.0"),
        ];
        let best = find_best_version(&candidates, &["*"]).unwrap();
        assert_eq!(best.version, "0.5.0");
    }

    #[test]
    fn no_constraints_means_latest() {
        let candidates = vec![ModInfo::new("jei", "15.2.0"), ModInfo::new("jei", "15.10.0")];
        let none: [&str; 0] = [];
        let best = find_best_version(&candidates, &none).unwrap();
        assert_eq!(best.version, "15.10.0");
    }

    #[test]
    fn bad_constraint_propagates() {
        let candidates = vec![ModInfo::new("jei", "15.2.0")];
        let err = find_best_version(&candidates, &[">=fifteen"]).unwrap_err();
        assert!(matches!(err, SelectError::InvalidRange(_)));
    }
}
