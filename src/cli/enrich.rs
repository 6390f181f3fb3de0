//! # enrich 子命令 CLI 定义
//!
//! 为已有材料表补充物性和混合焓
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/run.rs` 使用
//! - 参数传递给 `commands/enrich.rs`

use clap::Args;
use std::path::PathBuf;

/// enrich 子命令参数
#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Input material table (.parquet from `fetch`, or .csv with CID,smiles,name,formula)
    pub input: PathBuf,

    #[command(flatten)]
    pub options: EnrichOptions,
}

/// 补充参数（enrich 与 run 共用）
#[derive(Args, Debug, Clone)]
pub struct EnrichOptions {
    /// Comma-separated property names (see `matbank properties`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub properties: Vec<String>,

    /// Run name; results are written to <out-dir>/<run-name>.parquet
    #[arg(long)]
    pub run_name: String,

    /// Directory for output files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// CSV property database replacing the built-in dataset
    #[arg(long, env = "MATBANK_PROPERTY_DB")]
    pub property_db: Option<PathBuf>,

    /// Pause after each row, in milliseconds
    #[arg(long, default_value_t = 2)]
    pub row_delay_ms: u64,

    /// Also export <run-name>.csv
    #[arg(long, default_value_t = false)]
    pub csv: bool,
}
