//! # Reconcile Module Unit Tests / Reconcile 模块单元测试
//!
//! Tests for joining parsed outcomes back onto position ids.
//!
//! 测试将解析结果关联回位置 id。

mod common;

use common::*;
use minitest_adapter::core::mapping::build_mapping;
use minitest_adapter::core::models::{NameMapping, TestStatus};
use minitest_adapter::core::parser::parse;
use minitest_adapter::core::reconcile::reconcile;

#[cfg(test)]
mod reconcile_tests {
    use super::*;

    #[test]
    fn test_passing_line_maps_to_position() {
        let mut mapping = NameMapping::new();
        mapping.insert(
            "CalculatorTest#test_adds_numbers".to_string(),
            "file.rb::CalculatorTest::test_adds_numbers".to_string(),
        );

        let results = reconcile(parse("CalculatorTest#test_adds_numbers = 0.002 s = .\n"), &mapping);

        assert_eq!(results.len(), 1);
        let outcome = &results["file.rb::CalculatorTest::test_adds_numbers"];
        assert_eq!(outcome.status, TestStatus::Passed);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_failure_detail_survives_reconciliation() {
        let results = reconcile(parse(SAMPLE_OUTPUT), &build_mapping(&sample_tree()));
        let outcome = &results[FAILS_ID];

        assert_eq!(outcome.status, TestStatus::Failed);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].line, Some(42));
        assert!(outcome.errors[0].message.contains("Expected: 4"));
        assert!(outcome.errors[0].message.contains("Actual: 5"));
    }

    #[test]
    fn test_unknown_identifiers_are_dropped() {
        let results = reconcile(parse(SAMPLE_OUTPUT), &build_mapping(&sample_tree()));

        assert_eq!(results.len(), 4);
        assert!(!results.keys().any(|id| id.contains("OtherTest")));
    }

    #[test]
    fn test_every_key_comes_from_the_mapping() {
        let mapping = build_mapping(&sample_tree());
        let results = reconcile(parse(SAMPLE_OUTPUT), &mapping);

        for id in results.keys() {
            assert!(mapping.values().any(|known| known == id), "{id}");
        }
    }

    #[test]
    fn test_missing_outputs_are_not_synthesized() {
        let mapping = build_mapping(&sample_tree());
        let results = reconcile(parse("CalculatorTest#test_fails = 0.001 s = F\n"), &mapping);

        assert_eq!(results.len(), 1);
        assert!(results.contains_key(FAILS_ID));
        assert!(!results.contains_key(ADDS_ID));
    }

    #[test]
    fn test_empty_mapping_yields_nothing() {
        assert!(reconcile(parse(SAMPLE_OUTPUT), &NameMapping::new()).is_empty());
    }
}
