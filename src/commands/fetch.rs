//! # fetch 命令实现
//!
//! 按 CID 区间从 PubChem 批量获取化合物并保存为表格文件。
//!
//! ## 依赖关系
//! - 使用 `cli/fetch.rs` 定义的参数
//! - 使用 `pubchem/`, `persist/`
//! - 使用 `utils/output.rs`

use crate::batch::FixedDelay;
use crate::cli::fetch::{FetchArgs, PubchemOptions, RangeOptions};
use crate::error::Result;
use crate::models::MaterialTable;
use crate::persist;
use crate::pubchem::{BatchFetcher, CidRange, HttpTransport};
use crate::utils::output;

use std::time::Duration;

/// 执行 fetch 命令
pub fn execute(args: FetchArgs) -> Result<()> {
    output::print_header("Fetching Compounds from PubChem");

    let table = fetch_bank(&args.range, &args.pubchem)?;

    if table.is_empty() {
        output::print_warning("No compounds retrieved; writing an empty table.");
    }

    persist::save_table(&table, &args.output)?;
    output::print_saved(
        &format!("{} compounds", table.len()),
        &args.output.display().to_string(),
    );

    Ok(())
}

/// 获取区间内的化合物（fetch 与 run 共用）
pub(crate) fn fetch_bank(range: &RangeOptions, pubchem: &PubchemOptions) -> Result<MaterialTable> {
    let cid_range = CidRange::new(range.start, range.end)?;
    let chunks = cid_range.chunks(range.batch_size)?.len();

    output::print_info(&format!(
        "CID {}-{}: {} compounds in {} batches of up to {}",
        cid_range.start(),
        cid_range.end(),
        cid_range.len(),
        chunks,
        range.batch_size
    ));
    output::print_info(&format!("Endpoint: {}", pubchem.base_url));

    let transport = HttpTransport::new(pubchem.timeout_secs.map(Duration::from_secs))?;
    let throttle = FixedDelay::from_millis(pubchem.delay_ms);
    let fetcher = BatchFetcher::new(&pubchem.base_url, transport, &throttle);

    let (table, report) = fetcher.generate_material_bank(cid_range, range.batch_size)?;

    output::print_separator();
    if report.failed_chunks > 0 {
        output::print_warning(&format!(
            "{} of {} batches failed and were skipped",
            report.failed_chunks, report.chunks
        ));
    }
    output::print_success(&format!(
        "Retrieved {} of {} requested CIDs ({} absent from responses)",
        report.retrieved,
        report.requested,
        report.absent()
    ));

    Ok(table)
}
