use tracing::debug;

use crate::core::models::{NameMapping, ParsedResults, PositionResults};

/// Joins parsed outcomes back onto position ids through the run's name
/// mapping. Identifiers unknown to the mapping are dropped; positions with
/// no reported outcome are simply absent from the result.
///
/// 通过本次运行的名称映射将解析结果关联回位置 id。
/// 映射中未知的标识符会被丢弃；没有报告结果的位置不会出现在返回值中。
pub fn reconcile(parsed: ParsedResults, name_mapping: &NameMapping) -> PositionResults {
    parsed
        .into_iter()
        .filter_map(|(runner_id, outcome)| match name_mapping.get(&runner_id) {
            Some(position_id) => Some((position_id.clone(), outcome)),
            None => {
                debug!(runner_id = %runner_id, "no known position for runner identifier");
                None
            }
        })
        .collect()
}
