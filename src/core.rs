//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the Minitest adapter:
//! the data model, configuration, name mapping, run planning, output
//! parsing and result reconciliation.
//!
//! 此模块包含 Minitest 适配器的核心功能：
//! 数据模型、配置、名称映射、运行计划、输出解析和结果协调。

pub mod adapter;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod parser;
pub mod planner;
pub mod reconcile;

// Re-exports
pub use adapter::MinitestAdapter;
pub use config::AdapterConfig;
pub use error::AdapterError;
pub use models::{Position, PositionKind, RunSpec, TestOutcome, TestStatus, Tree};
