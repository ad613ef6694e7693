//! # Output Parser Module / 输出解析模块
//!
//! Extracts per-test outcomes from the text Minitest prints with `-v`.
//! Two independent scans run over the text:
//!
//! 1. the status scan reads `Class#test = 0.002 s = .` lines and decides
//!    which identifiers exist and their status (last line wins);
//! 2. the detail scan reads `Failure:` / `Error:` / `Skipped:` blocks and
//!    attaches messages and line numbers to identifiers already recorded.
//!
//! Terminal escape sequences are stripped before either scan. Text that
//! matches neither pattern is ignored.
//!
//! 从 Minitest 使用 `-v` 打印的文本中提取每个测试的结果。
//! 文本上运行两个独立的扫描：状态扫描读取 `Class#test = 0.002 s = .` 行，
//! 决定哪些标识符存在及其状态（后出现的行优先）；详情扫描读取
//! `Failure:` / `Error:` / `Skipped:` 块，并将消息和行号附加到已记录的标识符上。
//! 两次扫描之前都会去除终端转义序列。不匹配任何模式的文本会被忽略。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::models::{ErrorDetail, ParsedResults, TestOutcome, TestStatus};

static STATUS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?P<id>[^\s#]+#\S+)[ \t]+=[ \t]+(?P<secs>\d+(?:\.\d+)?)[ \t]*s[ \t]+=[ \t]+(?P<code>[.FES])[ \t]*$",
    )
    .expect("status line pattern is valid")
});

static DETAIL_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\d+\)[ \t]+)?(?P<kind>Failure|Error|Skipped):[ \t]*\n(?P<id>[^\s#]+#\S+?)(?:[ \t]+\[(?P<path>[^\]\n]*?):(?P<line>\d+)\])?:[ \t]*\n(?P<body>(?s:.*?))(?:\n\n|\n?\z)",
    )
    .expect("detail block pattern is valid")
});

static BACKTRACE_FRAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<path>[^\s:]+):(?P<line>\d+)(?::in\b.*)?$")
        .expect("backtrace frame pattern is valid")
});

/// The kind of a multi-line detail block.
/// 多行详情块的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Failure,
    Error,
    Skipped,
}

impl BlockKind {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Failure" => Some(BlockKind::Failure),
            "Error" => Some(BlockKind::Error),
            "Skipped" => Some(BlockKind::Skipped),
            _ => None,
        }
    }
}

/// Removes terminal escape sequences and normalizes line endings.
/// 移除终端转义序列并规范化换行符。
pub fn clean_output(raw: &str) -> String {
    strip_ansi_escapes::strip_str(raw).replace("\r\n", "\n")
}

/// Parses raw runner output into outcomes keyed by runner identifier.
/// 将原始运行器输出解析为以运行器标识符为键的结果。
pub fn parse(raw: &str) -> ParsedResults {
    let text = clean_output(raw);
    let mut results = scan_statuses(&text);
    attach_details(&text, &mut results);
    results
}

/// Status scan: one outcome per `Class#test = <secs> s = <code>` line.
/// 状态扫描：每个 `Class#test = <secs> s = <code>` 行产生一个结果。
pub fn scan_statuses(text: &str) -> ParsedResults {
    let mut results = ParsedResults::new();
    for caps in STATUS_LINE.captures_iter(text) {
        let code = caps["code"].chars().next().and_then(TestStatus::from_code);
        if let Some(status) = code {
            let id = caps["id"].to_string();
            if results.insert(id.clone(), TestOutcome::new(status)).is_some() {
                debug!(runner_id = %id, "status line repeated, keeping the latest");
            }
        }
    }
    results
}

/// Detail scan: attaches messages and line numbers from failure, error and
/// skip blocks to identifiers the status scan has already recorded.
///
/// 详情扫描：将失败、错误和跳过块中的消息与行号附加到状态扫描已记录的标识符上。
pub fn attach_details(text: &str, results: &mut ParsedResults) {
    for caps in DETAIL_BLOCK.captures_iter(text) {
        let Some(kind) = BlockKind::from_label(&caps["kind"]) else {
            continue;
        };
        let id = &caps["id"];
        let Some(outcome) = results.get_mut(id) else {
            debug!(runner_id = %id, "detail block without a status line, dropping");
            continue;
        };

        let body = &caps["body"];
        let bracket_line = caps.name("line").and_then(|m| m.as_str().parse().ok());

        match kind {
            BlockKind::Failure => {
                outcome.status = TestStatus::Failed;
                outcome.errors.push(ErrorDetail {
                    message: failure_message(body),
                    line: bracket_line,
                });
            }
            BlockKind::Error => {
                let (message, frame_line) = error_message(body);
                outcome.status = TestStatus::Failed;
                outcome.errors.push(ErrorDetail {
                    message,
                    line: bracket_line.or(frame_line),
                });
            }
            BlockKind::Skipped => {
                if outcome.status == TestStatus::Skipped {
                    outcome.errors.push(ErrorDetail {
                        message: body.trim().to_string(),
                        line: bracket_line,
                    });
                }
            }
        }
    }
}

/// Formats an assertion failure body. An `Expected:` / `Actual:` pair is
/// rendered as `Expected: <a>\n  Actual: <b>`, preceded by any custom
/// message lines; any other body is kept as-is, trimmed.
///
/// 格式化断言失败的内容。`Expected:` / `Actual:` 对会被渲染为
/// `Expected: <a>\n  Actual: <b>`，前面附带任何自定义消息行；其他内容则去除首尾空白后原样保留。
fn failure_message(body: &str) -> String {
    let mut preamble = Vec::new();
    let mut expected = None;
    let mut actual = None;

    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(value) = trimmed.strip_prefix("Expected:") {
            expected = Some(value.trim());
        } else if let Some(value) = trimmed.strip_prefix("Actual:") {
            actual = Some(value.trim());
        } else if expected.is_none() && !trimmed.is_empty() {
            preamble.push(trimmed);
        }
    }

    match (expected, actual) {
        (Some(expected), Some(actual)) => {
            let pair = format!("Expected: {expected}\n  Actual: {actual}");
            if preamble.is_empty() {
                pair
            } else {
                format!("{}\n{}", preamble.join("\n"), pair)
            }
        }
        _ => body.trim().to_string(),
    }
}

/// Splits an error body into its exception message and the line of the
/// first backtrace frame, preferring frames inside `*_test.rb` files.
///
/// 将错误内容拆分为异常消息和第一个回溯帧的行号，优先选择 `*_test.rb` 文件中的帧。
fn error_message(body: &str) -> (String, Option<u32>) {
    let mut message = Vec::new();
    let mut first_frame = None;
    let mut test_frame = None;

    for line in body.lines() {
        if let Some(caps) = BACKTRACE_FRAME.captures(line) {
            let number = caps["line"].parse::<u32>().ok();
            first_frame = first_frame.or(number);
            if test_frame.is_none() && caps["path"].ends_with("_test.rb") {
                test_frame = number;
            }
        } else if first_frame.is_none() {
            message.push(line.trim());
        }
    }

    let message = message
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (message, test_frame.or(first_frame))
}
