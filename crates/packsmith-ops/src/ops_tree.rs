//! Operation: display the dependency tree.

use packsmith_core::config::GlobalConfig;

use crate::{load_pack, PackPaths};

/// Options for `packsmith tree`.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Maximum tree depth to display.
    pub depth: Option<usize>,
    /// Show how a single mod ends up in the pack.
    pub why: Option<String>,
}

/// Display the dependency tree for the pack.
pub fn tree(paths: &PackPaths, opts: &TreeOptions, config: &GlobalConfig) -> miette::Result<()> {
    let pack = load_pack(paths, config)?;
    let result = pack.resolve()?;
    let graph = result.graph();

    // Handle --why
    if let Some(ref target) = opts.why {
        if let Some(path) = graph.find_path(target) {
            println!("Path to {target}:");
            for (i, node) in path.iter().enumerate() {
                let indent = "  ".repeat(i);
                println!("{indent}{node}");
            }
        } else {
            println!("Mod '{target}' not found in the pack.");
        }
        return Ok(());
    }

    if graph.is_empty() {
        println!("No mods.");
        return Ok(());
    }
    print!("{}", graph.print_tree(opts.depth));

    if result.has_conflicts() {
        print!("{}", result.conflicts);
    }
    Ok(())
}
