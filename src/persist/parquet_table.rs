//! # Parquet 表读写
//!
//! 模式：`CID` Int64, `smiles` Utf8, `name` Utf8?, `formula` Utf8?，
//! 之后是输入表保留的文本列（可空 Utf8），最后每个数值列为可空 Float64。
//! 缺失值写为 null。
//!
//! 读取时对兼容类型做转换（UInt64/Int32 CID、LargeUtf8、Float32 等）。
//! 额外的数值列保留为数值列，其余可转为字符串的列保留为文本列。
//!
//! ## 依赖关系
//! - 被 `persist/mod.rs`, `properties/enricher.rs`, `commands/` 使用
//! - 使用 `arrow`, `parquet`

use super::{CID_COLUMN, FORMULA_COLUMN, NAME_COLUMN, SMILES_COLUMN};
use crate::error::{MatbankError, Result};
use crate::models::{Column, CompoundRecord, MaterialTable, TextColumn};

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// 材料表的 Arrow 模式
pub fn table_schema(table: &MaterialTable) -> Schema {
    let mut fields = vec![
        Field::new(CID_COLUMN, DataType::Int64, false),
        Field::new(SMILES_COLUMN, DataType::Utf8, false),
        Field::new(NAME_COLUMN, DataType::Utf8, true),
        Field::new(FORMULA_COLUMN, DataType::Utf8, true),
    ];
    fields.extend(
        table
            .text_columns()
            .iter()
            .map(|c| Field::new(&c.name, DataType::Utf8, true)),
    );
    fields.extend(
        table
            .columns()
            .iter()
            .map(|c| Field::new(&c.name, DataType::Float64, true)),
    );
    Schema::new(fields)
}

/// 转换为单个 RecordBatch
pub fn to_record_batch(table: &MaterialTable) -> Result<RecordBatch> {
    let records = table.records();

    let cids = records
        .iter()
        .map(|r| {
            i64::try_from(r.cid).map_err(|_| {
                MatbankError::InvalidArgument(format!("CID {} does not fit in Int64", r.cid))
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(cids)),
        Arc::new(StringArray::from(
            records.iter().map(|r| Some(r.smiles.as_str())).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.name.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            records.iter().map(|r| r.formula.as_deref()).collect::<Vec<_>>(),
        )),
    ];
    for column in table.text_columns() {
        arrays.push(Arc::new(StringArray::from(
            column.values.iter().map(|v| v.as_deref()).collect::<Vec<_>>(),
        )));
    }
    for column in table.columns() {
        arrays.push(Arc::new(Float64Array::from(column.values.clone())));
    }

    Ok(RecordBatch::try_new(Arc::new(table_schema(table)), arrays)?)
}

/// 写出为 parquet 文件
pub fn write_table(table: &MaterialTable, path: &Path) -> Result<()> {
    let batch = to_record_batch(table)?;

    let file = File::create(path).map_err(|e| MatbankError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

/// 从 parquet 文件读取
pub fn read_table(path: &Path) -> Result<MaterialTable> {
    let file = File::open(path).map_err(|e| MatbankError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    for required in [CID_COLUMN, SMILES_COLUMN] {
        if schema.index_of(required).is_err() {
            return Err(parse_error(path, &format!("missing '{}' column", required)));
        }
    }

    let extra_fields: Vec<_> = schema
        .fields()
        .iter()
        .filter(|f| {
            ![CID_COLUMN, SMILES_COLUMN, NAME_COLUMN, FORMULA_COLUMN].contains(&f.name().as_str())
        })
        .collect();

    // 额外的数值列
    let mut extra: Vec<Column> = extra_fields
        .iter()
        .filter(|f| f.data_type().is_numeric())
        .map(|f| Column {
            name: f.name().clone(),
            values: Vec::new(),
        })
        .collect();

    // 额外的文本列
    let mut text: Vec<TextColumn> = extra_fields
        .iter()
        .filter(|f| {
            !f.data_type().is_numeric() && can_cast_types(f.data_type(), &DataType::Utf8)
        })
        .map(|f| TextColumn {
            name: f.name().clone(),
            values: Vec::new(),
        })
        .collect();

    let mut table = MaterialTable::new();

    for batch in reader {
        let batch = batch?;

        let cids = column_as(&batch, CID_COLUMN, DataType::Int64)?;
        let cids = downcast::<Int64Array>(&cids, CID_COLUMN, path)?;
        let smiles = column_as(&batch, SMILES_COLUMN, DataType::Utf8)?;
        let smiles = downcast::<StringArray>(&smiles, SMILES_COLUMN, path)?;
        let names = optional_column_as(&batch, NAME_COLUMN, DataType::Utf8)?;
        let names = names
            .as_ref()
            .map(|a| downcast::<StringArray>(a, NAME_COLUMN, path))
            .transpose()?;
        let formulas = optional_column_as(&batch, FORMULA_COLUMN, DataType::Utf8)?;
        let formulas = formulas
            .as_ref()
            .map(|a| downcast::<StringArray>(a, FORMULA_COLUMN, path))
            .transpose()?;

        let numeric = extra
            .iter()
            .map(|c| column_as(&batch, &c.name, DataType::Float64))
            .collect::<Result<Vec<ArrayRef>>>()?;
        let numeric = numeric
            .iter()
            .zip(&extra)
            .map(|(a, c)| downcast::<Float64Array>(a, &c.name, path))
            .collect::<Result<Vec<&Float64Array>>>()?;
        let strings = text
            .iter()
            .map(|c| column_as(&batch, &c.name, DataType::Utf8))
            .collect::<Result<Vec<ArrayRef>>>()?;
        let strings = strings
            .iter()
            .zip(&text)
            .map(|(a, c)| downcast::<StringArray>(a, &c.name, path))
            .collect::<Result<Vec<&StringArray>>>()?;

        for row in 0..batch.num_rows() {
            if cids.is_null(row) || smiles.is_null(row) || smiles.value(row).is_empty() {
                continue;
            }
            let cid = u64::try_from(cids.value(row))
                .map_err(|_| parse_error(path, &format!("negative CID {}", cids.value(row))))?;

            let record = CompoundRecord {
                cid,
                smiles: smiles.value(row).to_string(),
                name: string_at(names, row),
                formula: string_at(formulas, row),
            };
            if !table.insert(record) {
                continue;
            }

            for (column, values) in extra.iter_mut().zip(&numeric) {
                let value = (!values.is_null(row)).then(|| values.value(row));
                column.values.push(value.filter(|v| v.is_finite()));
            }
            for (column, values) in text.iter_mut().zip(&strings) {
                column.values.push(string_at(Some(*values), row));
            }
        }
    }

    for column in text {
        table.push_text_column(column);
    }
    for column in extra {
        table.push_column(column);
    }

    Ok(table)
}

fn column_as(batch: &RecordBatch, name: &str, data_type: DataType) -> Result<ArrayRef> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| MatbankError::Other(format!("column '{}' disappeared mid-file", name)))?;
    Ok(cast(column.as_ref(), &data_type)?)
}

fn optional_column_as(
    batch: &RecordBatch,
    name: &str,
    data_type: DataType,
) -> Result<Option<ArrayRef>> {
    match batch.column_by_name(name) {
        Some(column) => Ok(Some(cast(column.as_ref(), &data_type)?)),
        None => Ok(None),
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str, path: &Path) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| parse_error(path, &format!("unexpected type for column '{}'", name)))
}

fn string_at(array: Option<&StringArray>, row: usize) -> Option<String> {
    array
        .filter(|a| !a.is_null(row))
        .map(|a| a.value(row).to_string())
}

fn parse_error(path: &Path, reason: &str) -> MatbankError {
    MatbankError::ParseError {
        format: "parquet".to_string(),
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
