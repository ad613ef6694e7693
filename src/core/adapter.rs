//! # Adapter Module / 适配器模块
//!
//! [`MinitestAdapter`] is the entry point an editor integration talks to.
//! It owns the resolved configuration and exposes root detection, directory
//! filtering, test-file recognition, run planning and result collection.
//!
//! [`MinitestAdapter`] 是编辑器集成所使用的入口。
//! 它持有已解析的配置，并提供根目录检测、目录过滤、测试文件识别、运行计划和结果收集功能。

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::core::config::AdapterConfig;
use crate::core::error::AdapterError;
use crate::core::models::{Position, PositionResults, RunSpec, Tree};
use crate::core::{parser, planner, reconcile};
use crate::infra::fs;

/// File name suffix identifying a Minitest file.
/// 标识 Minitest 文件的文件名后缀。
pub const TEST_FILE_SUFFIX: &str = "_test.rb";

/// Structural query handed to the external Ruby parser. Classes become
/// namespaces; `def test_*` methods and `test "..." do` blocks become tests.
///
/// 交给外部 Ruby 解析器的结构查询。类成为命名空间；
/// `def test_*` 方法和 `test "..." do` 块成为测试。
pub const POSITION_QUERY: &str = r#"
((class
  name: [(constant) (scope_resolution)] @namespace.name
) @namespace.definition)

((method
  name: (identifier) @test.name (#match? @test.name "^test_")
) @test.definition)

((call
  method: (identifier) @func_name (#eq? @func_name "test")
  arguments: (argument_list (string (string_content) @test.name))
) @test.definition)
"#;

/// The Minitest adapter with its current configuration.
/// 带有当前配置的 Minitest 适配器。
#[derive(Debug, Clone, Default)]
pub struct MinitestAdapter {
    config: Arc<AdapterConfig>,
}

impl MinitestAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &'static str {
        "minitest"
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Replaces the whole configuration. Run specs built earlier own their
    /// command and mapping and are not affected.
    ///
    /// 替换整个配置。之前构建的运行请求持有自己的命令和映射，不受影响。
    pub fn reconfigure(&mut self, config: AdapterConfig) {
        self.config = Arc::new(config);
    }

    /// Finds the project root above `dir` using the configured marker files.
    /// 使用配置的标记文件在 `dir` 之上查找项目根目录。
    pub fn root(&self, dir: &Path) -> Option<PathBuf> {
        let start = if fs::is_directory(dir) {
            dir
        } else {
            dir.parent()?
        };
        fs::find_root(start, &self.config.root_files())
    }

    /// Decides whether discovery should descend into a directory.
    ///
    /// Directories named in the block-list are always skipped. Otherwise a
    /// directory is kept when its relative path has a single segment or
    /// contains a segment equal to `test`.
    ///
    /// 决定发现过程是否应进入某个目录。
    /// 阻止列表中命名的目录总是被跳过。否则，当相对路径只有一个段或包含等于 `test` 的段时保留该目录。
    pub fn filter_dir(&self, name: &str, rel_path: &Path) -> bool {
        if self.config.filter_dirs().iter().any(|dir| dir == name) {
            return false;
        }

        let segments: Vec<_> = rel_path
            .components()
            .filter_map(|component| match component {
                Component::Normal(segment) => Some(segment),
                _ => None,
            })
            .collect();

        segments.len() <= 1 || segments.iter().any(|segment| *segment == OsStr::new("test"))
    }

    /// A file is a test file iff its name ends with `_test.rb`.
    /// 当且仅当文件名以 `_test.rb` 结尾时，该文件是测试文件。
    pub fn is_test_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(TEST_FILE_SUFFIX))
    }

    pub fn build_spec(&self, selected: &Position, full_tree: &Tree) -> Result<RunSpec, AdapterError> {
        planner::build_spec(&self.config, selected, full_tree)
    }

    /// Looks up `id` in `full_tree` and builds the run request for it.
    /// 在 `full_tree` 中查找 `id` 并为其构建运行请求。
    pub fn build_spec_for(&self, full_tree: &Tree, id: &str) -> Result<RunSpec, AdapterError> {
        let selected = full_tree
            .find(id)
            .ok_or_else(|| AdapterError::PositionNotFound(id.to_string()))?;
        self.build_spec(&selected.position, full_tree)
    }

    /// Reads the run's results file and maps its outcomes onto positions.
    /// An unreadable file is logged and yields no results.
    ///
    /// 读取本次运行的结果文件并将其结果映射到位置上。无法读取的文件会被记录日志，并返回空结果。
    pub fn results(&self, spec: &RunSpec) -> PositionResults {
        let path = &spec.context.results_path;
        match fs::read_results(path) {
            Ok(output) => Self::results_from_output(&output, spec),
            Err(e) => {
                warn!(path = %path.display(), "failed to read results file: {e}");
                PositionResults::new()
            }
        }
    }

    /// Parses captured output and reconciles it with the run request's name mapping.
    /// 解析捕获的输出并与运行请求的名称映射进行协调。
    pub fn results_from_output(output: &str, spec: &RunSpec) -> PositionResults {
        reconcile::reconcile(parser::parse(output), &spec.context.name_mappings)
    }
}
