//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by every stage of a run:
//! the discovered position tree, the runner-name mapping, the run request
//! handed to the executor, and the per-test outcomes produced at the end.
//!
//! 此模块定义了运行各阶段共享的数据结构：
//! 发现的位置树、运行器名称映射、交给执行器的运行请求，以及最终产生的每个测试结果。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::AdapterError;

/// The kind of a node in the position tree.
/// 位置树中节点的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    /// A directory containing test files / 包含测试文件的目录
    Dir,
    /// A single `*_test.rb` file / 单个 `*_test.rb` 文件
    File,
    /// A class or module enclosing tests / 包含测试的类或模块
    Namespace,
    /// An individual test / 单个测试
    Test,
}

impl PositionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionKind::Dir => "dir",
            PositionKind::File => "file",
            PositionKind::Namespace => "namespace",
            PositionKind::Test => "test",
        }
    }
}

/// A single discovered position: a directory, file, namespace or test.
/// 单个已发现的位置：目录、文件、命名空间或测试。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The kind of this position. / 此位置的类型。
    #[serde(rename = "type")]
    pub kind: PositionKind,
    /// The filesystem path of the file or directory holding this position.
    /// 包含此位置的文件或目录的文件系统路径。
    pub path: PathBuf,
    /// The display name, e.g. a class or method name.
    /// 显示名称，例如类名或方法名。
    pub name: String,
    /// A stable identifier, unique within the tree.
    /// 稳定的标识符，在树中唯一。
    pub id: String,
    /// Optional `[start_row, start_col, end_row, end_col]` source range.
    /// 可选的源码范围 `[起始行, 起始列, 结束行, 结束列]`。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[u32; 4]>,
}

/// A node of the position tree. Each node exclusively owns its children.
/// 位置树的节点。每个节点独占其子节点。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub position: Position,
    #[serde(default)]
    pub children: Vec<Tree>,
}

impl Tree {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            children: Vec::new(),
        }
    }

    pub fn with_children(position: Position, children: Vec<Tree>) -> Self {
        Self { position, children }
    }

    /// Loads a position tree from a JSON file produced by an external parser.
    /// 从外部解析器生成的 JSON 文件加载位置树。
    pub fn from_json_file(path: &Path) -> Result<Self, AdapterError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Finds the subtree whose root position has the given id (depth-first).
    /// 查找根位置具有给定 id 的子树（深度优先）。
    pub fn find(&self, id: &str) -> Option<&Tree> {
        if self.position.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Iterates over every position in pre-order.
    /// 按先序遍历每个位置。
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(&node.position)
        })
    }
}

/// Runner identifier (`Class#test_name`) to position id.
/// 运行器标识符（`Class#test_name`）到位置 id 的映射。
pub type NameMapping = HashMap<String, String>;

/// Context threaded unchanged from spec building to result collection.
/// 从构建运行请求到收集结果全程不变传递的上下文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Where the executor stores the captured runner output.
    /// 执行器存放捕获的运行器输出的位置。
    pub results_path: PathBuf,
    /// The id of the position the run was requested for.
    /// 请求运行的位置 id。
    pub pos_id: String,
    pub name_mappings: NameMapping,
}

/// A fully formed execution request for one run.
/// 一次运行的完整执行请求。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Working directory override; `None` keeps the caller's cwd.
    /// 工作目录覆盖；`None` 表示使用调用者的当前目录。
    pub cwd: Option<PathBuf>,
    pub command: Vec<String>,
    pub context: RunContext,
}

/// Outcome status of a single test.
/// 单个测试的结果状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    /// Maps a Minitest verbose result code to a status.
    /// 将 Minitest 详细输出的结果代码映射为状态。
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '.' => Some(TestStatus::Passed),
            'F' | 'E' => Some(TestStatus::Failed),
            'S' => Some(TestStatus::Skipped),
            _ => None,
        }
    }
}

/// Structured detail attached to a failed or skipped test.
/// 附加到失败或跳过测试上的结构化详情。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// The outcome of a single test.
/// 单个测试的结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDetail>,
}

impl TestOutcome {
    pub fn new(status: TestStatus) -> Self {
        Self {
            status,
            errors: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// Outcomes keyed by runner identifier, as produced by the output parser.
/// 由输出解析器产生的、以运行器标识符为键的结果。
pub type ParsedResults = HashMap<String, TestOutcome>;

/// Outcomes keyed by position id, as produced by the reconciler.
/// Ordered so that reports and JSON output are deterministic.
///
/// 由协调器产生的、以位置 id 为键的结果。
/// 有序存储，以保证报告和 JSON 输出的确定性。
pub type PositionResults = BTreeMap<String, TestOutcome>;
