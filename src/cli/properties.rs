//! # properties 子命令 CLI 定义
//!
//! 列出支持的物性及混合焓溶剂网格
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/properties.rs`

use clap::Args;
use std::path::PathBuf;

/// properties 子命令参数
#[derive(Args, Debug)]
pub struct PropertiesArgs {
    /// CSV property database to report coverage for (default: built-in dataset)
    #[arg(long, env = "MATBANK_PROPERTY_DB")]
    pub property_db: Option<PathBuf>,
}
