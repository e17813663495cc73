//! Shared utilities for Packsmith.
//!
//! This crate provides cross-cutting concerns used by all other Packsmith
//! crates: error types, filesystem helpers, and terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;
