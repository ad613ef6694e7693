use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::{load_config, GlobalOptions};
use crate::core::adapter::MinitestAdapter;
use crate::infra::t;

/// Prints the project root detected above `dir`.
/// 打印在 `dir` 之上检测到的项目根目录。
pub fn execute(options: &GlobalOptions, dir: PathBuf, config_path: PathBuf) -> Result<()> {
    let (config, locale) = load_config(options, &config_path, true)?;
    let dir = fs::canonicalize(&dir)
        .with_context(|| format!("Failed to resolve path: {}", dir.display()))?;

    match MinitestAdapter::new(config).root(&dir) {
        Some(root) => {
            println!("{}", root.display());
            Ok(())
        }
        None => anyhow::bail!(t!("root_not_found", locale = &locale, path = dir.display()).to_string()),
    }
}
