//! Handler for `packsmith deps`.

use std::path::Path;

use miette::Result;

use packsmith_core::config::GlobalConfig;
use packsmith_ops::ops_deps;

pub fn exec(file: &Path) -> Result<()> {
    let config = GlobalConfig::load()?;
    ops_deps::deps(file, &config)
}
