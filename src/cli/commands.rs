//! # CLI Commands / 命令行命令
//!
//! One module per subcommand, plus the helpers they share.
//!
//! 每个子命令一个模块，以及它们共享的辅助函数。

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::core::config::AdapterConfig;
use crate::core::models::Tree;
use crate::infra::t;

pub mod parse;
pub mod root;
pub mod run;
pub mod spec;

/// Options shared by every subcommand.
/// 所有子命令共享的选项。
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub language: String,
    /// `true` when `--lang` was given; it then wins over the config file.
    /// 当给出 `--lang` 时为 `true`；此时它优先于配置文件。
    pub explicit_language: bool,
}

/// Loads the adapter configuration, falling back to defaults when the file
/// does not exist, and applies its language unless `--lang` was given.
///
/// 加载适配器配置，文件不存在时回退到默认值；除非给出了 `--lang`，否则应用其语言设置。
pub fn load_config(options: &GlobalOptions, path: &Path, quiet: bool) -> Result<(AdapterConfig, String)> {
    let exists = path.is_file();
    let config = AdapterConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let locale = if exists && !options.explicit_language {
        let locale = crate::resolve_locale(config.language());
        rust_i18n::set_locale(&locale);
        locale
    } else {
        options.language.clone()
    };

    if !quiet {
        if exists {
            println!("{}", t!("config_loaded", locale = &locale, path = path.display()).cyan());
        } else {
            println!("{}", t!("config_defaults", locale = &locale).dimmed());
        }
    }

    Ok((config, locale))
}

pub fn load_tree(path: &Path) -> Result<Tree> {
    Tree::from_json_file(path)
        .with_context(|| format!("Failed to load position tree from {}", path.display()))
}
