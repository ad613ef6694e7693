use serde::Serialize;

use crate::core::models::{PositionResults, RunSpec};

/// Renders reconciled outcomes as pretty JSON for editor consumers.
/// 将协调后的结果渲染为供编辑器使用的格式化 JSON。
pub fn render_results(results: &PositionResults) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

pub fn render_spec(spec: &RunSpec) -> serde_json::Result<String> {
    serde_json::to_string_pretty(spec)
}

/// The JSON document printed by `run --json`.
/// `run --json` 打印的 JSON 文档。
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub command: &'a [String],
    pub exit_code: Option<i32>,
    pub results: &'a PositionResults,
}

pub fn render_run_report(report: &RunReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
