//! # run 命令实现
//!
//! 完整流水线：获取 -> 保存 `<run-name>_bank.parquet` -> 补充 -> 保存 `<run-name>.parquet`。
//! 获取结果先单独落盘，补充阶段中断不会丢失已获取的数据。
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 复用 `commands/fetch.rs`, `commands/enrich.rs`

use super::enrich::{enrich_table, ensure_dir};
use super::fetch::fetch_bank;
use crate::cli::run::RunArgs;
use crate::error::Result;
use crate::persist::{self, parquet_table};
use crate::utils::output;

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("Building Material Bank");

    // 在发出任何请求之前校验输出参数
    persist::validate_run_name(&args.enrich.run_name)?;
    ensure_dir(&args.enrich.out_dir)?;

    let mut table = fetch_bank(&args.range, &args.pubchem)?;

    let bank_path = persist::run_output_path(
        &args.enrich.out_dir,
        &format!("{}_bank", args.enrich.run_name.trim()),
        "parquet",
    );
    parquet_table::write_table(&table, &bank_path)?;
    output::print_saved(
        &format!("{} fetched compounds", table.len()),
        &bank_path.display().to_string(),
    );

    output::print_header("Enriching Material Table");
    enrich_table(&mut table, &args.enrich)?;

    Ok(())
}
