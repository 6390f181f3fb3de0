//! # enrich 命令实现
//!
//! 读取材料表，补充物性与混合焓，写出 `<run-name>.parquet`。
//!
//! ## 依赖关系
//! - 使用 `cli/enrich.rs` 定义的参数
//! - 使用 `properties/`, `persist/`
//! - 使用 `utils/output.rs`

use crate::batch::FixedDelay;
use crate::cli::enrich::{EnrichArgs, EnrichOptions};
use crate::error::{MatbankError, Result};
use crate::models::MaterialTable;
use crate::persist::{self, csv_table};
use crate::properties::{EnrichReport, PropertyDatabase, PropertyEnricher};
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 enrich 命令
pub fn execute(args: EnrichArgs) -> Result<()> {
    output::print_header("Enriching Material Table");

    let mut table = persist::load_table(&args.input)?;
    output::print_info(&format!(
        "Loaded {} compounds from '{}'",
        table.len(),
        args.input.display()
    ));

    enrich_table(&mut table, &args.options)?;
    Ok(())
}

/// 补充并写出（enrich 与 run 共用），返回 parquet 路径
pub(crate) fn enrich_table(table: &mut MaterialTable, options: &EnrichOptions) -> Result<PathBuf> {
    persist::validate_run_name(&options.run_name)?;
    ensure_dir(&options.out_dir)?;

    let backend = load_backend(options.property_db.as_deref())?;
    let throttle = FixedDelay::from_millis(options.row_delay_ms);
    let enricher = PropertyEnricher::new(&backend, &throttle);

    let (path, report) = enricher.process_materials(
        table,
        options.properties.as_slice(),
        &options.run_name,
        &options.out_dir,
    )?;

    print_summary(&report);

    if options.csv {
        let csv_path = persist::run_output_path(&options.out_dir, &options.run_name, "csv");
        csv_table::write_table(table, &csv_path)?;
        output::print_saved("CSV export", &csv_path.display().to_string());
    }

    output::print_done(&format!("Results saved to '{}'", path.display()));
    Ok(path)
}

/// 加载物性数据库（用户 CSV 或内置数据集）
fn load_backend(path: Option<&Path>) -> Result<PropertyDatabase> {
    let db = match path {
        Some(path) => PropertyDatabase::from_path(path)?,
        None => PropertyDatabase::embedded()?,
    };

    if db.is_empty() {
        return Err(MatbankError::InvalidArgument(
            "property database contains no compounds".to_string(),
        ));
    }

    let source = path
        .map(|p| format!("'{}'", p.display()))
        .unwrap_or_else(|| "built-in dataset".to_string());
    output::print_info(&format!(
        "Property database: {} ({} compounds)",
        source,
        db.len()
    ));
    Ok(db)
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| MatbankError::FileWriteError {
        path: dir.display().to_string(),
        source: e,
    })
}

fn print_summary(report: &EnrichReport) {
    let rows = vec![
        SummaryRow {
            item: "Compounds",
            value: report.rows.to_string(),
        },
        SummaryRow {
            item: "Failed compounds",
            value: report.failed_rows.to_string(),
        },
        SummaryRow {
            item: "Property columns",
            value: report.property_columns.to_string(),
        },
        SummaryRow {
            item: "Mixing columns",
            value: report.mixing_columns.to_string(),
        },
        SummaryRow {
            item: "Missing cells",
            value: report.missing_cells.to_string(),
        },
    ];

    output::print_separator();
    println!("{}", Table::new(rows));

    if !report.rejected.is_empty() {
        output::print_warning(&format!("Ignored properties: {}", report.rejected.join(", ")));
    }
}
