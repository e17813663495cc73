//! Handler for `packsmith resolve`.

use std::path::PathBuf;

use miette::Result;

use packsmith_core::config::GlobalConfig;
use packsmith_ops::ops_resolve::{self, ResolveOptions};

pub fn exec(
    manifest: PathBuf,
    index: Option<PathBuf>,
    write_plan: bool,
    verbose: bool,
) -> Result<()> {
    let config = GlobalConfig::load()?;
    let opts = ResolveOptions {
        paths: super::pack_paths(manifest, index)?,
        write_plan,
        verbose,
    };
    ops_resolve::resolve(&opts, &config)
}
