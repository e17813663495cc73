//! Handler for `packsmith tree`.

use std::path::PathBuf;

use miette::Result;

use packsmith_core::config::GlobalConfig;
use packsmith_ops::ops_tree::{self, TreeOptions};

pub fn exec(
    manifest: PathBuf,
    index: Option<PathBuf>,
    depth: Option<u32>,
    why: Option<String>,
) -> Result<()> {
    let config = GlobalConfig::load()?;
    let paths = super::pack_paths(manifest, index)?;
    let opts = TreeOptions {
        depth: depth.map(|d| d as usize),
        why,
    };
    ops_tree::tree(&paths, &opts, &config)
}
