//! Handler for `packsmith best`.

use std::path::PathBuf;

use miette::Result;

use packsmith_core::config::GlobalConfig;
use packsmith_core::manifest::Manifest;
use packsmith_core::MANIFEST_FILE;
use packsmith_ops::{index_path, ops_best};
use packsmith_util::errors::PacksmithError;

pub fn exec(mod_id: &str, constraints: &[String], index: Option<PathBuf>) -> Result<()> {
    let index_file = match index {
        Some(path) => path,
        None => default_index()?,
    };
    ops_best::best(&index_file, mod_id, constraints)
}

/// The index of the enclosing pack, or the configured default.
fn default_index() -> Result<PathBuf> {
    let config = GlobalConfig::load()?;
    let cwd = std::env::current_dir().map_err(PacksmithError::Io)?;
    match packsmith_util::fs::find_ancestor_with(&cwd, MANIFEST_FILE) {
        Some(root) => {
            let manifest = Manifest::from_path(&root.join(MANIFEST_FILE))?;
            Ok(index_path(&root, &manifest, None, &config))
        }
        None => Ok(cwd.join(&config.index.path)),
    }
}
