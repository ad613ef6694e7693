use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::commands::{load_config, load_tree, GlobalOptions};
use crate::core::adapter::MinitestAdapter;
use crate::reporting::json::render_spec;

/// Prints the run request for a position as JSON without executing it.
/// 以 JSON 格式打印某个位置的运行请求，但不执行。
pub fn execute(
    options: &GlobalOptions,
    tree_path: PathBuf,
    position: String,
    config_path: PathBuf,
) -> Result<()> {
    let (config, _) = load_config(options, &config_path, true)?;
    let tree = load_tree(&tree_path)?;

    let spec = MinitestAdapter::new(config)
        .build_spec_for(&tree, &position)
        .context("Failed to build the run request")?;

    println!("{}", render_spec(&spec)?);
    Ok(())
}
