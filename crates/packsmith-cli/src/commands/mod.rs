//! Command dispatch and handler modules.

mod best;
mod deps;
mod resolve;
mod tree;

use std::path::PathBuf;

use miette::Result;
use packsmith_ops::PackPaths;
use packsmith_util::errors::PacksmithError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            manifest,
            index,
            write_plan,
        } => resolve::exec(manifest, index, write_plan, cli.verbose),
        Command::Tree {
            manifest,
            index,
            depth,
            why,
        } => tree::exec(manifest, index, depth, why),
        Command::Best {
            mod_id,
            constraints,
            index,
        } => best::exec(&mod_id, &constraints, index),
        Command::Deps { file } => deps::exec(&file),
    }
}

/// Check the manifest exists before anything else is loaded.
fn pack_paths(manifest: PathBuf, index: Option<PathBuf>) -> Result<PackPaths> {
    if !manifest.is_file() {
        return Err(PacksmithError::Manifest {
            message: format!("No {} found", manifest.display()),
        }
        .into());
    }
    Ok(PackPaths { manifest, index })
}
