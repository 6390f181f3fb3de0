//! # 批量处理模块
//!
//! 提供统一的顺序批处理能力。
//!
//! ## 功能
//! - 逐项顺序执行（无并行）
//! - 每项之后按限速策略停顿
//! - 进度反馈与统计，失败项总是记录
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs` 和 `properties/enricher.rs` 使用
//! - 使用 `indicatif` 显示进度

pub mod runner;
pub mod throttle;

pub use runner::{BatchResult, BatchRunner, LogLine, ProcessResult};
pub use throttle::{FixedDelay, NoDelay, Throttle};
