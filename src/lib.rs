//! # Minitest Adapter Library / Minitest 适配器库
//!
//! This library connects an editor's test-runner integration to Minitest:
//! it maps discovered test positions to runner identifiers, builds the
//! runner invocation, parses the verbose report and reconciles it back onto
//! the positions.
//!
//! 此库将编辑器的测试运行集成与 Minitest 连接起来：
//! 它将发现的测试位置映射为运行器标识符，构建运行器调用，解析详细报告，并将其协调回各个位置。
//!
//! ## Modules / 模块
//!
//! - `core` - Data model, configuration, name mapping, planning, parsing and reconciliation
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Console and JSON rendering of results
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、配置、名称映射、运行计划、解析和协调
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 结果的控制台和 JSON 渲染
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::{
    AdapterConfig, AdapterError, MinitestAdapter, Position, PositionKind, RunSpec, TestOutcome,
    TestStatus, Tree,
};

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

/// Picks the best available locale for a requested one.
///
/// The full locale (e.g., "zh-CN") is tried first, then just the language
/// code (e.g., "en" from "en-US"), and finally the default "en".
pub fn resolve_locale(requested: &str) -> String {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&requested) {
        return requested.to_string();
    }

    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}
