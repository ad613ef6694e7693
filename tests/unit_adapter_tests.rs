//! # Adapter Module Unit Tests / Adapter 模块单元测试
//!
//! Tests for root detection, directory filtering, test-file recognition and
//! result collection through the adapter facade.
//!
//! 测试通过适配器门面进行的根目录检测、目录过滤、测试文件识别和结果收集。

mod common;

use common::*;
use minitest_adapter::core::adapter::{MinitestAdapter, POSITION_QUERY};
use minitest_adapter::core::config::AdapterConfig;
use minitest_adapter::core::error::AdapterError;
use minitest_adapter::core::models::TestStatus;
use std::fs;
use std::path::Path;

fn strings(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod test_file_tests {
    use super::*;

    #[test]
    fn test_recognizes_test_files() {
        assert!(MinitestAdapter::is_test_file(Path::new("test/calculator_test.rb")));
        assert!(MinitestAdapter::is_test_file(Path::new("a_test.rb")));
    }

    #[test]
    fn test_rejects_other_files() {
        assert!(!MinitestAdapter::is_test_file(Path::new("test/test_helper.rb")));
        assert!(!MinitestAdapter::is_test_file(Path::new("spec/calculator_spec.rb")));
        assert!(!MinitestAdapter::is_test_file(Path::new("test/calculator_test.rb.bak")));
        assert!(!MinitestAdapter::is_test_file(Path::new("test")));
    }

    #[test]
    fn test_query_declares_namespace_and_test_captures() {
        assert!(POSITION_QUERY.contains("@namespace.name"));
        assert!(POSITION_QUERY.contains("@test.name"));
        assert!(POSITION_QUERY.contains("@test.definition"));
    }
}

#[cfg(test)]
mod filter_dir_tests {
    use super::*;

    #[test]
    fn test_block_listed_names_are_always_excluded() {
        let adapter = MinitestAdapter::default();

        assert!(!adapter.filter_dir(".git", Path::new(".git")));
        assert!(!adapter.filter_dir("node_modules", Path::new("test/node_modules")));
        assert!(!adapter.filter_dir(".git", Path::new("test/fixtures/.git")));
    }

    #[test]
    fn test_top_level_directories_are_kept() {
        let adapter = MinitestAdapter::default();
        assert!(adapter.filter_dir("app", Path::new("app")));
        assert!(adapter.filter_dir("test", Path::new("test")));
    }

    #[test]
    fn test_nested_directories_need_a_test_segment() {
        let adapter = MinitestAdapter::default();

        assert!(adapter.filter_dir("models", Path::new("test/models")));
        assert!(adapter.filter_dir("admin", Path::new("engines/blog/test/admin")));
        assert!(!adapter.filter_dir("models", Path::new("app/models")));
        assert!(!adapter.filter_dir("latest", Path::new("app/latest")));
    }

    #[test]
    fn test_custom_filter_list() {
        let config = AdapterConfig::builder()
            .filter_dirs(strings(&["fixtures"]))
            .build()
            .unwrap();
        let adapter = MinitestAdapter::new(config);

        assert!(!adapter.filter_dir("fixtures", Path::new("test/fixtures")));
        assert!(adapter.filter_dir(".git", Path::new(".git")));
    }
}

#[cfg(test)]
mod root_tests {
    use super::*;

    #[test]
    fn test_root_found_from_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(root.join("Gemfile"), "").unwrap();
        let nested = root.join("test/models");
        fs::create_dir_all(&nested).unwrap();

        let adapter = MinitestAdapter::default();
        assert_eq!(adapter.root(&nested), Some(root.clone()));
    }

    #[test]
    fn test_root_from_file_path_starts_at_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(root.join(".rspec"), "").unwrap();
        fs::create_dir_all(root.join("test")).unwrap();
        let file = root.join("test/a_test.rb");
        fs::write(&file, "").unwrap();

        assert_eq!(MinitestAdapter::default().root(&file), Some(root));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let outer = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(outer.join("Gemfile"), "").unwrap();
        let inner = outer.join("engines/blog");
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join("Gemfile"), "").unwrap();

        assert_eq!(MinitestAdapter::default().root(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_custom_root_marker() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        fs::write(root.join("Rakefile"), "").unwrap();
        fs::write(root.join("Gemfile"), "").unwrap();
        let nested = root.join("sub");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Gemfile"), "").unwrap();

        let config = AdapterConfig::builder()
            .root_files(strings(&["Rakefile"]))
            .build()
            .unwrap();
        assert_eq!(MinitestAdapter::new(config).root(&nested), Some(root));
    }
}

#[cfg(test)]
mod results_tests {
    use super::*;

    #[test]
    fn test_results_read_from_results_file() {
        let adapter = MinitestAdapter::default();
        let spec = adapter.build_spec_for(&sample_tree(), CALC_FILE).unwrap();
        fs::write(&spec.context.results_path, SAMPLE_OUTPUT).unwrap();

        let results = adapter.results(&spec);
        fs::remove_file(&spec.context.results_path).unwrap();

        assert_eq!(results[ADDS_ID].status, TestStatus::Passed);
        assert_eq!(results[FAILS_ID].status, TestStatus::Failed);
        assert_eq!(results[NEGATIVE_ID].status, TestStatus::Skipped);
    }

    #[test]
    fn test_unreadable_results_file_yields_empty_results() {
        let adapter = MinitestAdapter::default();
        let spec = adapter.build_spec_for(&sample_tree(), CALC_FILE).unwrap();

        // Nothing has been executed, so the results file was never written.
        assert!(adapter.results(&spec).is_empty());
    }

    #[test]
    fn test_unknown_position_is_an_error() {
        let err = MinitestAdapter::default()
            .build_spec_for(&sample_tree(), "nope")
            .unwrap_err();
        assert!(matches!(err, AdapterError::PositionNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_reconfigure_does_not_affect_existing_specs() {
        let mut adapter = MinitestAdapter::default();
        let tree = sample_tree();
        let before = adapter.build_spec_for(&tree, CALC_FILE).unwrap();

        adapter.reconfigure(
            AdapterConfig::builder()
                .test_command(minitest_adapter::core::config::CommandTemplate::Static(strings(&["ruby"])))
                .build()
                .unwrap(),
        );
        let after = adapter.build_spec_for(&tree, CALC_FILE).unwrap();

        assert_eq!(before.command[0], "bundle");
        assert_eq!(after.command, strings(&["ruby", CALC_FILE, "-v"]));
    }
}
