use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::commands::load_tree;
use crate::core::error::AdapterError;
use crate::core::{mapping, parser, reconcile};
use crate::infra::fs;
use crate::reporting::json::render_results;

/// Parses a captured Minitest output file against a position tree and
/// prints the reconciled outcomes as JSON. With `position`, only outcomes
/// of positions inside that subtree are printed.
///
/// 根据位置树解析捕获的 Minitest 输出文件，并以 JSON 格式打印协调后的结果。
/// 给出 `position` 时，只打印该子树内位置的结果。
pub fn execute(output_path: PathBuf, tree_path: PathBuf, position: Option<String>) -> Result<()> {
    let tree = load_tree(&tree_path)?;
    let output = fs::read_results(&output_path)
        .with_context(|| format!("Failed to read runner output from {}", output_path.display()))?;

    // The mapping always covers the whole tree so nested tests keep their namespace.
    let name_mapping = mapping::build_mapping(&tree);
    let mut results = reconcile::reconcile(parser::parse(&output), &name_mapping);

    if let Some(id) = position {
        let subtree = tree.find(&id).ok_or(AdapterError::PositionNotFound(id))?;
        let in_scope: HashSet<&str> = subtree.iter().map(|p| p.id.as_str()).collect();
        results.retain(|id, _| in_scope.contains(id.as_str()));
    }

    println!("{}", render_results(&results)?);
    Ok(())
}
