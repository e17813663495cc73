use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for Packsmith operations that touch files and user input.
#[derive(Debug, Error, Diagnostic)]
pub enum PacksmithError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed pack manifest (pack.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your pack.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid or unreadable mod index.
    #[error("Index error: {message}")]
    #[diagnostic(help("Each [[mods]] entry needs at least `id` and `version`"))]
    Index { message: String },

    /// Global configuration could not be read or parsed.
    #[error("Config error: {message}")]
    Config { message: String },

    /// Dependency resolution produced an unusable plan.
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PacksmithResult<T> = miette::Result<T>;
