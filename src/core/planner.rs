//! # Run Planner Module / 运行计划模块
//!
//! Turns a selected position into the exact Minitest invocation and the
//! context needed later to map the runner's report back onto positions.
//!
//! 将选中的位置转换为确切的 Minitest 调用，以及之后将运行器报告映射回位置所需的上下文。

use crate::core::config::AdapterConfig;
use crate::core::error::AdapterError;
use crate::core::mapping::{build_mapping, enclosing_namespace, runner_test_name, DEFAULT_NAMESPACE};
use crate::core::models::{Position, PositionKind, RunContext, RunSpec, Tree};
use crate::infra::fs;

/// Flag making Minitest print one `Class#test = 0.00 s = .` line per test.
/// 使 Minitest 为每个测试打印一行 `Class#test = 0.00 s = .` 的标志。
pub const VERBOSE_FLAG: &str = "-v";

/// Flag restricting the run to tests whose `Class#test` name matches.
/// 将运行限制为 `Class#test` 名称匹配的测试的标志。
pub const NAME_FLAG: &str = "--name";

/// Glob appended to a directory to select every test file below it.
/// 追加到目录后以选择其下所有测试文件的 glob。
pub const TEST_FILE_GLOB: &str = "**/*_test.rb";

/// Builds the runner arguments (without the command prefix) for `selected`.
/// `full_tree` supplies the enclosing namespace of a selected test.
///
/// 为 `selected` 构建运行器参数（不含命令前缀）。
/// `full_tree` 用于提供选中测试的外层命名空间。
pub fn runner_args(selected: &Position, full_tree: &Tree) -> Vec<String> {
    let path = selected.path.to_string_lossy().into_owned();

    let mut args = match selected.kind {
        PositionKind::Dir => {
            vec![format!("{}/{}", path.trim_end_matches('/'), TEST_FILE_GLOB)]
        }
        PositionKind::File => vec![path],
        PositionKind::Test => {
            let namespace = enclosing_namespace(full_tree, &selected.id);
            vec![
                path,
                NAME_FLAG.to_string(),
                test_filter(namespace, &selected.name),
            ]
        }
        PositionKind::Namespace => vec![
            path,
            NAME_FLAG.to_string(),
            namespace_filter(&selected.name),
        ],
    };

    args.push(VERBOSE_FLAG.to_string());
    args
}

/// `/Namespace#test_name/` with regex metacharacters (including `#`) escaped
/// inside each component.
///
/// `/Namespace#test_name/`，每个组成部分中的正则元字符（包括 `#`）都会被转义。
pub fn test_filter(namespace: Option<&str>, test_name: &str) -> String {
    format!(
        "/{}#{}/",
        regex::escape(namespace.unwrap_or(DEFAULT_NAMESPACE)),
        regex::escape(&runner_test_name(test_name))
    )
}

/// `/(?:^|::)Namespace#/`, matching every test of that class whether or not
/// Minitest reports it nested in a module (`Admin::UsersTest#test_index`).
///
/// `/(?:^|::)Namespace#/`，匹配该类的所有测试，无论 Minitest 报告时是否嵌套在模块中
/// （`Admin::UsersTest#test_index`）。
pub fn namespace_filter(namespace: &str) -> String {
    format!("/(?:^|::){}#/", regex::escape(namespace))
}

/// Builds the complete run request for `selected`.
///
/// The name mapping always covers the whole of `full_tree`, so namespace
/// and directory runs can map every reported test back to its position.
/// A fresh results path is reserved for the executor's captured output;
/// nothing is written to disk until the executor runs.
///
/// 为 `selected` 构建完整的运行请求。
/// 名称映射始终覆盖整个 `full_tree`，以便命名空间和目录运行能够将每个报告的测试映射回其位置。
/// 同时为执行器捕获的输出预留一个新的结果路径；在执行器运行之前不会写入磁盘。
pub fn build_spec(
    config: &AdapterConfig,
    selected: &Position,
    full_tree: &Tree,
) -> Result<RunSpec, AdapterError> {
    let command = config.test_command(runner_args(selected, full_tree));
    if command.is_empty() {
        return Err(AdapterError::EmptyCommand);
    }

    Ok(RunSpec {
        cwd: None,
        command,
        context: RunContext {
            results_path: fs::reserve_results_path()?,
            pos_id: selected.id.clone(),
            name_mappings: build_mapping(full_tree),
        },
    })
}
