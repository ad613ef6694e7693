//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints reconciled test outcomes to the console with color
//! coding and localized labels.
//!
//! 此模块以彩色和本地化标签在控制台打印协调后的测试结果。

use colored::*;

use crate::core::models::{PositionResults, TestStatus};
use crate::infra::t;

/// Counts of outcomes for one run.
/// 一次运行的结果计数。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Test positions in scope that received no outcome.
    /// 范围内没有获得结果的测试位置。
    pub missing: usize,
}

impl SummaryCounts {
    pub fn from_results(results: &PositionResults, expected: usize) -> Self {
        let mut counts = SummaryCounts::default();
        for outcome in results.values() {
            match outcome.status {
                TestStatus::Passed => counts.passed += 1,
                TestStatus::Failed => counts.failed += 1,
                TestStatus::Skipped => counts.skipped += 1,
            }
        }
        counts.missing = expected.saturating_sub(results.len());
        counts
    }
}

fn status_label(status: TestStatus, locale: &str) -> ColoredString {
    match status {
        TestStatus::Passed => t!("status_passed", locale = locale).green(),
        TestStatus::Failed => t!("status_failed", locale = locale).red(),
        TestStatus::Skipped => t!("status_skipped", locale = locale).dimmed(),
    }
}

/// Prints a formatted summary of test outcomes.
///
/// 在控制台打印格式化的测试结果摘要。
///
/// # Arguments / 参数
/// * `results` - Outcomes keyed by position id / 以位置 id 为键的结果
/// * `expected` - Number of test positions in the run's scope / 本次运行范围内的测试位置数量
/// * `locale` - The language locale to use for messages / 用于消息的语言区域设置
///
/// # Output Format / 输出格式
/// ```text
/// --- Test Summary ---
///   - Passed   | test/calc_test.rb::CalculatorTest::test_adds_numbers
///   - Failed   | test/calc_test.rb::CalculatorTest::test_fails
/// 1 passed, 1 failed, 0 skipped, 0 without result
/// ```
pub fn print_summary(results: &PositionResults, expected: usize, locale: &str) -> SummaryCounts {
    println!("\n{}", t!("test_summary_banner", locale = locale).bold());

    if results.is_empty() {
        println!("{}", t!("no_results", locale = locale).yellow());
    }

    for (id, outcome) in results {
        println!("  - {:<10} | {}", status_label(outcome.status, locale), id);
    }

    let counts = SummaryCounts::from_results(results, expected);
    println!(
        "{}",
        t!(
            "summary_counts",
            locale = locale,
            passed = counts.passed,
            failed = counts.failed,
            skipped = counts.skipped,
            missing = counts.missing
        )
        .bold()
    );
    counts
}

/// Prints the error details of every failed test.
/// 打印每个失败测试的错误详情。
pub fn print_failure_details(results: &PositionResults, locale: &str) {
    let failures: Vec<_> = results.iter().filter(|(_, o)| o.is_failed()).collect();
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("failure_details_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for (i, (id, outcome)) in failures.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, failures.len(), id.cyan());
        for error in &outcome.errors {
            if let Some(line) = error.line {
                println!("  {}", t!("line_label", locale = locale, line = line).yellow());
            }
            for message_line in error.message.lines() {
                println!("    {message_line}");
            }
        }
        println!("{}", "-".repeat(80));
    }
}
