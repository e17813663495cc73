//! Core data types for Packsmith.
//!
//! This crate defines the types shared by the resolver and the command
//! layer: mods and their dependency declarations, the `pack.toml` manifest,
//! the mod index a local registry is built from, the `pack.lock` install
//! plan, global configuration, and the translation of loader-specific
//! dependency declarations into the canonical [`dependency::Dependency`].
//!
//! This crate is intentionally free of network I/O.

/// Default file name of a pack manifest.
pub const MANIFEST_FILE: &str = "pack.toml";

/// Default file name of a written install plan.
pub const PLAN_FILE: &str = "pack.lock";

pub mod config;
pub mod dependency;
pub mod index;
pub mod manifest;
pub mod mod_info;
pub mod normalize;
pub mod plan;
