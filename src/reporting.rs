//! # Reporting Module / 报告模块
//!
//! This module renders reconciled test outcomes, either as a colorful,
//! localized console summary or as JSON for editor integrations.
//!
//! 此模块渲染协调后的测试结果，可以是彩色的本地化控制台摘要，也可以是供编辑器集成使用的 JSON。

pub mod console;
pub mod json;

// Re-export common reporting functions
pub use console::{print_failure_details, print_summary};
pub use json::{render_results, render_spec};
