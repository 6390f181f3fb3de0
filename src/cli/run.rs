//! # run 子命令 CLI 定义
//!
//! 完整流水线：获取 -> 保存原始表 -> 补充 -> 保存结果
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 复用 `cli/fetch.rs`, `cli/enrich.rs` 的参数组
//! - 参数传递给 `commands/run.rs`

use super::enrich::EnrichOptions;
use super::fetch::{PubchemOptions, RangeOptions};

use clap::Args;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub range: RangeOptions,

    #[command(flatten)]
    pub pubchem: PubchemOptions,

    #[command(flatten)]
    pub enrich: EnrichOptions,
}
