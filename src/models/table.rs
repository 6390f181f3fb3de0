//! # 材料表数据模型
//!
//! 有序的化合物记录集合，附带按列存储的数值派生列（物性、混合焓）。
//! 外部输入表中的其余列作为文本列原样保留，写出时排在基础列之后。
//! 缺失值以 `None` 表示，写出时为 parquet null。
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs` 填充记录
//! - 被 `properties/enricher.rs` 逐列修改
//! - 被 `persist/` 读写

use super::CompoundRecord;

use std::collections::HashMap;

/// 数值列
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// 文本列（输入表中的非数值列）
#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
    pub name: String,
    pub values: Vec<Option<String>>,
}

/// 材料表
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    records: Vec<CompoundRecord>,
    /// CID -> 行号
    index: HashMap<u64, usize>,
    text_columns: Vec<TextColumn>,
    columns: Vec<Column>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入记录；CID 已存在时保留原记录并返回 false
    pub fn insert(&mut self, record: CompoundRecord) -> bool {
        if self.index.contains_key(&record.cid) {
            return false;
        }
        self.index.insert(record.cid, self.records.len());
        self.records.push(record);
        for column in &mut self.text_columns {
            column.values.push(None);
        }
        for column in &mut self.columns {
            column.values.push(None);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CompoundRecord] {
        &self.records
    }

    pub fn get(&self, cid: u64) -> Option<&CompoundRecord> {
        self.index.get(&cid).map(|&row| &self.records[row])
    }

    pub fn contains(&self, cid: u64) -> bool {
        self.index.contains_key(&cid)
    }

    /// 确保列存在（新列初始化为缺失），返回列号
    ///
    /// 同名文本列被派生列取代。
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(pos) = self.column_position(name) {
            return pos;
        }
        self.text_columns.retain(|c| c.name != name);
        self.columns.push(Column {
            name: name.to_string(),
            values: vec![None; self.records.len()],
        });
        self.columns.len() - 1
    }

    /// 确保列存在并将所有值重置为缺失，返回列号
    pub fn reset_column(&mut self, name: &str) -> usize {
        let pos = self.ensure_column(name);
        self.columns[pos].values.iter_mut().for_each(|v| *v = None);
        pos
    }

    /// 以已有数据追加一列（读取持久化表时使用）
    pub fn push_column(&mut self, column: Column) -> bool {
        if column.values.len() != self.records.len() || self.has_column(&column.name) {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// 以已有数据追加一个文本列
    pub fn push_text_column(&mut self, column: TextColumn) -> bool {
        if column.values.len() != self.records.len() || self.has_column(&column.name) {
            return false;
        }
        self.text_columns.push(column);
        true
    }

    /// 写入单元格，非有限值视为缺失
    pub fn set(&mut self, column: usize, row: usize, value: Option<f64>) {
        self.columns[column].values[row] = value.filter(|v| v.is_finite());
    }

    pub fn value(&self, column: &str, row: usize) -> Option<f64> {
        self.column(column)
            .and_then(|c| c.values.get(row).copied().flatten())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn text_columns(&self) -> &[TextColumn] {
        &self.text_columns
    }

    pub fn text(&self, column: &str, row: usize) -> Option<&str> {
        self.text_columns
            .iter()
            .find(|c| c.name == column)
            .and_then(|c| c.values.get(row))
            .and_then(|v| v.as_deref())
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    fn has_column(&self, name: &str) -> bool {
        self.column_position(name).is_some() || self.text_columns.iter().any(|c| c.name == name)
    }
}

impl FromIterator<CompoundRecord> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = CompoundRecord>>(iter: I) -> Self {
        let mut table = MaterialTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
