//! Error types raised by the resolution engine.

use miette::Diagnostic;
use thiserror::Error;

/// A version string or constraint expression could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum VersionError {
    #[error("invalid version `{input}`")]
    #[diagnostic(help("versions look like 1.2.3, v1.2, or 1.2.3-beta.1"))]
    InvalidVersion { input: String },

    #[error("invalid version range `{input}`: cannot parse version `{token}`")]
    #[diagnostic(help("supported forms: *, 1.2.3, >=1.2.3, <2.0.0, 1.0.0-2.0.0, >=1.0.0,<2.0.0"))]
    InvalidVersionRange { input: String, token: String },
}

/// No candidate could be selected from a pool of versions.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SelectError {
    #[error("no versions available")]
    NoVersionsAvailable,

    #[error("no version of {mod_id} satisfies all constraints ({constraints})")]
    NoSatisfyingVersion { mod_id: String, constraints: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidRange(#[from] VersionError),
}

/// A registry lookup failed. The resolver treats every variant as "not found".
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RegistryError {
    #[error("mod `{mod_id}` not found in registry")]
    NotFound { mod_id: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoMatch(#[from] SelectError),

    #[error("registry backend failed: {message}")]
    Backend { message: String },
}

/// A resolution could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    #[error("circular dependency: {}", chain.join(" -> "))]
    #[diagnostic(help("break the cycle by making one of these dependencies optional"))]
    CircularDependency { chain: Vec<String> },

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidVersion(#[from] VersionError),
}
