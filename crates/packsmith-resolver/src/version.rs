//! Mod version parsing, comparison, and range matching.
//!
//! Versions are `major[.minor[.patch]]` with an optional suffix starting at
//! the first `-` or `+`. Ordering:
//! - `major`, `minor`, `patch` compare numerically (missing parts are 0)
//! - a version without a suffix sorts after the same version with one
//! - two suffixes compare byte-wise, delimiter included
//!
//! Build metadata is not special-cased: `0.5.3+mc1.20.1` is a pre-release of
//! `0.5.3` under this ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// A parsed mod version.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Everything from the first `-` or `+` on, delimiter included.
    pub prerelease: Option<String>,
    raw: String,
}

impl Version {
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let invalid = || VersionError::InvalidVersion {
            input: input.to_string(),
        };
        if input.is_empty() {
            return Err(invalid());
        }

        let cleaned = input.strip_prefix(['v', 'V']).unwrap_or(input);
        let (numeric, prerelease) = match cleaned.find(['-', '+']) {
            Some(at) => (&cleaned[..at], Some(cleaned[at..].to_string())),
            None => (cleaned, None),
        };

        let mut parts = numeric.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(invalid)?;
        let mut next_part = || match parts.next() {
            Some(p) => p.parse::<u64>().map_err(|_| invalid()),
            None => Ok(0),
        };
        let minor = next_part()?;
        let patch = next_part()?;

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            raw: input.to_string(),
        })
    }

    /// The string this version was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.as_bytes().cmp(b.as_bytes()),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One side of a bounded range.
#[derive(Debug, Clone)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

/// A parsed version constraint.
///
/// Supports: `*`, `1.2.3` (exact), `>=1.0.0`, `>1.0.0`, `<=2.0.0`, `<2.0.0`,
/// `1.0.0-2.0.0` (inclusive), and comma-joined clauses (`>=1.0.0,<2.0.0`).
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub any: bool,
    pub exact: Option<Version>,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    expr: String,
}

impl VersionRange {
    /// A range that matches every version.
    pub fn any() -> Self {
        Self {
            any: true,
            ..Self::empty("*")
        }
    }

    fn empty(expr: &str) -> Self {
        Self {
            any: false,
            exact: None,
            min: None,
            max: None,
            expr: expr.to_string(),
        }
    }

    /// Parse a constraint expression.
    ///
    /// Comma-joined clauses are merged bound by bound: when two clauses set
    /// the same bound, the later one wins (`>=1.0.0,>=2.0.0` keeps only
    /// `>=2.0.0`). Exact and wildcard clauses contribute no bounds to a
    /// merged range.
    pub fn parse(expr: &str) -> Result<Self, VersionError> {
        Self::parse_clause(expr, expr)
    }

    fn parse_clause(clause: &str, whole: &str) -> Result<Self, VersionError> {
        let s = clause.trim();
        let token = |t: &str| {
            Version::parse(t.trim()).map_err(|_| VersionError::InvalidVersionRange {
                input: whole.to_string(),
                token: t.trim().to_string(),
            })
        };

        if s.is_empty() || s == "*" {
            return Ok(Self {
                any: true,
                ..Self::empty(s)
            });
        }

        if s.contains(',') {
            let mut merged = Self::empty(s);
            for part in s.split(',') {
                let sub = Self::parse_clause(part, whole)?;
                if sub.min.is_some() {
                    merged.min = sub.min;
                }
                if sub.max.is_some() {
                    merged.max = sub.max;
                }
            }
            return Ok(merged);
        }

        if let Some((lower, upper)) = split_hyphen_range(s) {
            return Ok(Self {
                min: Some(Bound {
                    version: token(lower)?,
                    inclusive: true,
                }),
                max: Some(Bound {
                    version: token(upper)?,
                    inclusive: true,
                }),
                ..Self::empty(s)
            });
        }

        // Two-character operators first so `>=` is not read as `>` + `=1.0`.
        for (op, is_min, inclusive) in [
            (">=", true, true),
            ("<=", false, true),
            (">", true, false),
            ("<", false, false),
        ] {
            if let Some(rest) = s.strip_prefix(op) {
                let bound = Some(Bound {
                    version: token(rest)?,
                    inclusive,
                });
                let mut range = Self::empty(s);
                if is_min {
                    range.min = bound;
                } else {
                    range.max = bound;
                }
                return Ok(range);
            }
        }

        Ok(Self {
            exact: Some(token(s)?),
            ..Self::empty(s)
        })
    }

    /// Check if a version satisfies this range.
    pub fn matches(&self, version: &Version) -> bool {
        if self.any {
            return true;
        }
        if let Some(ref exact) = self.exact {
            return version == exact;
        }
        if self.min.is_none() && self.max.is_none() {
            return false;
        }
        if let Some(ref min) = self.min {
            let cmp = version.cmp(&min.version);
            if cmp == Ordering::Less || (cmp == Ordering::Equal && !min.inclusive) {
                return false;
            }
        }
        if let Some(ref max) = self.max {
            let cmp = version.cmp(&max.version);
            if cmp == Ordering::Greater || (cmp == Ordering::Equal && !max.inclusive) {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expr.is_empty() {
            f.write_str("*")
        } else {
            f.write_str(&self.expr)
        }
    }
}

/// `1.0.0-2.0.0`: both sides must be three dot-separated integers, so
/// `1.0.0-beta` stays an exact version with a suffix.
fn split_hyphen_range(s: &str) -> Option<(&str, &str)> {
    let (lower, upper) = s.split_once('-')?;
    (is_dotted_triple(lower) && is_dotted_triple(upper)).then_some((lower, upper))
}

fn is_dotted_triple(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}
