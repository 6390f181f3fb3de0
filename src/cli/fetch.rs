//! # fetch 子命令 CLI 定义
//!
//! 从 PubChem 按 CID 区间批量获取化合物
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/run.rs` 使用
//! - 参数传递给 `commands/fetch.rs`

use crate::pubchem::DEFAULT_BASE_URL;

use clap::Args;
use std::path::PathBuf;

/// fetch 子命令参数
#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub range: RangeOptions,

    /// Output file for the fetched table (.parquet or .csv)
    #[arg(short, long, default_value = "material_bank.parquet")]
    pub output: PathBuf,

    #[command(flatten)]
    pub pubchem: PubchemOptions,
}

/// CID 区间参数
#[derive(Args, Debug, Clone)]
pub struct RangeOptions {
    /// First PubChem CID of the range (inclusive)
    #[arg(long)]
    pub start: u64,

    /// Last PubChem CID of the range (inclusive)
    #[arg(long)]
    pub end: u64,

    /// Number of CIDs requested per HTTP call
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,
}

/// PubChem 连接参数
#[derive(Args, Debug, Clone)]
pub struct PubchemOptions {
    /// PUG REST base URL
    #[arg(long, env = "PUBCHEM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pause between batches, in milliseconds
    #[arg(long, default_value_t = 200)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "PUBCHEM_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}
