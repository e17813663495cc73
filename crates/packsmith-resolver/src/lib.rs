//! Dependency resolution engine: version parsing and constraint ranges,
//! best-version selection, depth-first resolution with cycle and conflict
//! detection, and topological install ordering.
//!
//! The engine performs no I/O of its own; candidate mods come from a
//! [`registry::ModRegistry`] supplied by the caller.

pub mod conflict;
pub mod error;
pub mod graph;
pub mod registry;
pub mod resolver;
pub mod select;
pub mod version;
