//! # 材料表持久化模块
//!
//! 材料表的读写：parquet 为主输出格式，CSV 用于外部输入和可选导出。
//!
//! ## 子模块
//! - `parquet_table`: Parquet 读写（arrow + parquet）
//! - `csv_table`: CSV 读写
//!
//! ## 依赖关系
//! - 被 `properties/enricher.rs` 和 `commands/` 使用
//! - 使用 `models/`

pub mod csv_table;
pub mod parquet_table;

use crate::error::{MatbankError, Result};
use crate::models::MaterialTable;

use std::path::{Path, PathBuf};

pub const CID_COLUMN: &str = "CID";
pub const SMILES_COLUMN: &str = "smiles";
pub const NAME_COLUMN: &str = "name";
pub const FORMULA_COLUMN: &str = "formula";

/// 按扩展名读取材料表（.parquet / .csv）
pub fn load_table(path: &Path) -> Result<MaterialTable> {
    if !path.exists() {
        return Err(MatbankError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("parquet") => parquet_table::read_table(path),
        Some("csv") => csv_table::read_table(path),
        _ => Err(MatbankError::UnsupportedFormat(format!(
            "'{}' (expected .parquet or .csv)",
            path.display()
        ))),
    }
}

/// 按扩展名写出材料表（.parquet / .csv）
pub fn save_table(table: &MaterialTable, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("parquet") => parquet_table::write_table(table, path),
        Some("csv") => csv_table::write_table(table, path),
        _ => Err(MatbankError::UnsupportedFormat(format!(
            "'{}' (expected .parquet or .csv)",
            path.display()
        ))),
    }
}

/// 校验运行名称（用作输出文件名）
pub fn validate_run_name(run_name: &str) -> Result<()> {
    let trimmed = run_name.trim();
    if trimmed.is_empty() {
        return Err(MatbankError::InvalidArgument(
            "run name must not be empty".to_string(),
        ));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(MatbankError::InvalidArgument(format!(
            "run name '{}' must not contain path separators",
            run_name
        )));
    }
    Ok(())
}

/// `<out_dir>/<run_name>.<ext>`
pub fn run_output_path(out_dir: &Path, run_name: &str, ext: &str) -> PathBuf {
    out_dir.join(format!("{}.{}", run_name.trim(), ext))
}
