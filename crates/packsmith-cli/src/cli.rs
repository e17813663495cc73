//! CLI argument definitions for Packsmith.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "packsmith",
    version,
    about = "Resolve Minecraft modpack dependencies into a server install plan",
    long_about = "Packsmith reads a pack.toml, resolves every server-side mod and its \
                  transitive dependencies against a mod index, reports conflicts and \
                  missing mods, and writes an install plan in dependency order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the pack and print the install order
    Resolve {
        /// Path to the pack manifest
        #[arg(short, long, default_value = "pack.toml")]
        manifest: PathBuf,
        /// Mod index to resolve against (overrides [pack] index)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Write pack.lock next to the manifest
        #[arg(long)]
        write_plan: bool,
    },

    /// Print the dependency tree
    Tree {
        /// Path to the pack manifest
        #[arg(short, long, default_value = "pack.toml")]
        manifest: PathBuf,
        /// Mod index to resolve against (overrides [pack] index)
        #[arg(short, long)]
        index: Option<PathBuf>,
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
        /// Explain why a mod is included
        #[arg(long)]
        why: Option<String>,
    },

    /// Show the best available version of a mod
    Best {
        /// Mod id
        mod_id: String,
        /// Version constraints, all of which must hold (e.g. ">=1.0.0" "<2.0.0")
        constraints: Vec<String>,
        /// Mod index to search
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Print the canonical dependencies of a fabric.mod.json or mods.toml
    Deps {
        /// Loader manifest file
        file: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
