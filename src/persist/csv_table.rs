//! # CSV 表读写
//!
//! 用于读取外部提供的等价材料表，以及可选的 CSV 导出。
//! 表头：`CID,smiles,name,formula`，其后为文本列和数值列；缺失值为空单元格。
//!
//! ## 依赖关系
//! - 被 `persist/mod.rs`, `commands/enrich.rs` 使用
//! - 使用 `csv` 库

use super::{CID_COLUMN, FORMULA_COLUMN, NAME_COLUMN, SMILES_COLUMN};
use crate::error::{MatbankError, Result};
use crate::models::{Column, CompoundRecord, MaterialTable, TextColumn};

use std::path::Path;

/// 从 CSV 文件读取材料表
///
/// 基础列按表头反序列化为 `CompoundRecord`。额外列中所有非空单元格均可解析为
/// 数值的，保留为数值列；其余额外列原样保留为文本列。SMILES 为空的行被跳过。
pub fn read_table(path: &Path) -> Result<MaterialTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = rdr.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let cid_col = position(CID_COLUMN)
        .ok_or_else(|| parse_error(path, &format!("missing '{}' column", CID_COLUMN)))?;
    let smiles_col = position(SMILES_COLUMN)
        .ok_or_else(|| parse_error(path, &format!("missing '{}' column", SMILES_COLUMN)))?;
    let name_col = position(NAME_COLUMN);
    let formula_col = position(FORMULA_COLUMN);

    let base = [Some(cid_col), Some(smiles_col), name_col, formula_col];
    let extra_cols: Vec<usize> = (0..headers.len())
        .filter(|i| !base.contains(&Some(*i)))
        .collect();

    let mut table = MaterialTable::new();
    // 每个额外列的原始单元格
    let mut extra: Vec<Vec<Option<String>>> = vec![Vec::new(); extra_cols.len()];

    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        if record.get(smiles_col).unwrap_or("").is_empty() {
            continue;
        }

        let compound: CompoundRecord = record.deserialize(Some(&headers)).map_err(|e| {
            parse_error(path, &format!("row {}: {}", line + 2, e))
        })?;
        if !table.insert(compound) {
            continue;
        }

        for (values, &col) in extra.iter_mut().zip(&extra_cols) {
            let raw = record.get(col).unwrap_or("");
            values.push((!raw.is_empty()).then(|| raw.to_string()));
        }
    }

    for (raw, &col) in extra.into_iter().zip(&extra_cols) {
        let name = headers[col].to_string();
        match parse_numeric(&raw) {
            Some(values) => table.push_column(Column { name, values }),
            None => table.push_text_column(TextColumn { name, values: raw }),
        };
    }

    Ok(table)
}

/// 整列解析为数值；任一非空单元格不是数值则返回 None
fn parse_numeric(raw: &[Option<String>]) -> Option<Vec<Option<f64>>> {
    raw.iter()
        .map(|cell| match cell {
            Some(s) => s.parse::<f64>().ok().map(Some),
            None => Some(None),
        })
        .collect()
}

/// 导出材料表为 CSV
pub fn write_table(table: &MaterialTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![CID_COLUMN, SMILES_COLUMN, NAME_COLUMN, FORMULA_COLUMN];
    header.extend(table.text_columns().iter().map(|c| c.name.as_str()));
    header.extend(table.column_names());
    wtr.write_record(&header)?;

    for (row, record) in table.records().iter().enumerate() {
        let mut fields = vec![
            record.cid.to_string(),
            record.smiles.clone(),
            record.name.clone().unwrap_or_default(),
            record.formula.clone().unwrap_or_default(),
        ];
        fields.extend(
            table
                .text_columns()
                .iter()
                .map(|c| c.values[row].clone().unwrap_or_default()),
        );
        fields.extend(table.columns().iter().map(|c| match c.values[row] {
            Some(v) => v.to_string(),
            None => String::new(),
        }));
        wtr.write_record(&fields)?;
    }

    wtr.flush().map_err(|e| MatbankError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

fn parse_error(path: &Path, reason: &str) -> MatbankError {
    MatbankError::ParseError {
        format: "CSV".to_string(),
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
