//! # Name Mapping Module / 名称映射模块
//!
//! Translates discovered test positions into the identifiers Minitest prints
//! in its verbose report (`ClassName#test_name`), and builds the per-run table
//! from those identifiers back to position ids.
//!
//! 将发现的测试位置转换为 Minitest 在详细报告中打印的标识符（`ClassName#test_name`），
//! 并构建从这些标识符映射回位置 id 的单次运行表。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::hash_map::Entry;
use tracing::debug;

use crate::core::models::{NameMapping, Position, PositionKind, Tree};

/// Class name Minitest reports when no enclosing namespace exists.
/// 当不存在外层命名空间时 Minitest 报告的类名。
pub const DEFAULT_NAMESPACE: &str = "Minitest::Test";

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Returns the method name Minitest runs for a test position name.
///
/// `def test_adds_numbers` keeps its name. A string test such as
/// `test "adds numbers"` (with or without its quotes) becomes
/// `test_adds_numbers`, matching how `ActiveSupport::TestCase` defines it.
///
/// 返回 Minitest 为某个测试位置名称实际运行的方法名。
pub fn runner_test_name(name: &str) -> String {
    let unquoted = strip_quotes(name.trim());
    let quoted = unquoted.len() != name.trim().len();

    if !quoted && name.starts_with("test_") && !name.contains(char::is_whitespace) {
        return name.to_string();
    }

    // Each whitespace run becomes one `_`, including leading and trailing ones.
    let source = if quoted { unquoted } else { name };
    format!("test_{}", WHITESPACE_RUN.replace_all(source, "_"))
}

fn strip_quotes(name: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = name
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    name
}

/// Builds the runner identifier `Namespace#test_name`.
/// 构建运行器标识符 `Namespace#test_name`。
pub fn runner_id(namespace: Option<&str>, test_name: &str) -> String {
    format!(
        "{}#{}",
        namespace.unwrap_or(DEFAULT_NAMESPACE),
        runner_test_name(test_name)
    )
}

/// Builds the mapping from runner identifier to position id for every test
/// position in `tree`. Namespaces only contribute their name to descendants.
///
/// 为 `tree` 中的每个测试位置构建从运行器标识符到位置 id 的映射。
/// 命名空间只为其后代提供名称上下文。
pub fn build_mapping(tree: &Tree) -> NameMapping {
    let mut mapping = NameMapping::new();
    collect(tree, None, &mut mapping);
    mapping
}

fn collect<'a>(node: &'a Tree, namespace: Option<&'a str>, mapping: &mut NameMapping) {
    let position = &node.position;
    let namespace = match position.kind {
        PositionKind::Namespace => Some(position.name.as_str()),
        PositionKind::Test => {
            let key = runner_id(namespace, &position.name);
            match mapping.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(position.id.clone());
                }
                Entry::Occupied(slot) => {
                    debug!(
                        runner_id = %slot.key(),
                        kept = %slot.get(),
                        dropped = %position.id,
                        "duplicate runner identifier"
                    );
                }
            }
            namespace
        }
        PositionKind::Dir | PositionKind::File => namespace,
    };

    for child in &node.children {
        collect(child, namespace, mapping);
    }
}

/// Returns the chain of positions from the root of `tree` down to `id`.
/// 返回从 `tree` 根节点到 `id` 的位置链。
pub fn ancestry<'a>(tree: &'a Tree, id: &str) -> Option<Vec<&'a Position>> {
    if tree.position.id == id {
        return Some(vec![&tree.position]);
    }
    tree.children.iter().find_map(|child| {
        ancestry(child, id).map(|mut chain| {
            chain.insert(0, &tree.position);
            chain
        })
    })
}

/// Name of the nearest namespace enclosing the position `id`, if any.
/// A namespace position is its own nearest namespace.
///
/// 包含位置 `id` 的最近命名空间名称（如果有）。命名空间位置的最近命名空间就是其自身。
pub fn enclosing_namespace<'a>(tree: &'a Tree, id: &str) -> Option<&'a str> {
    ancestry(tree, id)?
        .into_iter()
        .rev()
        .find(|position| position.kind == PositionKind::Namespace)
        .map(|position| position.name.as_str())
}
