//! # CSV 物性数据库
//!
//! 内置物性后端：每行一个化合物，列为
//! `name, aliases, cas, <属性键>...`，别名以 `;` 分隔。
//! 空单元格表示该属性不可用。默认数据集随程序嵌入，也可由用户 CSV 替换。
//!
//! 名称查找不区分大小写，覆盖名称、别名（含 IUPAC 名称）和 CAS 号。
//!
//! ## 依赖关系
//! - 实现 `properties/backend.rs` 的 PropertyBackend
//! - 使用 `properties/mixing.rs` 估算混合焓
//! - 使用 `csv` 库读取数据

use super::backend::{Chemical, Mixture, PropertyBackend};
use super::catalog::Attribute;
use super::mixing::{regular_solution_enthalpy, LiquidComponent};
use crate::error::{MatbankError, Result};

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 嵌入的默认数据集
const DEFAULT_DATA: &str = include_str!("../../data/compounds.csv");

/// CSV 物性数据库
#[derive(Debug, Clone, Default)]
pub struct PropertyDatabase {
    entries: Vec<Chemical>,
    /// 规范化名称 -> 条目序号
    index: HashMap<String, usize>,
}

impl PropertyDatabase {
    /// 加载嵌入的默认数据集
    pub fn embedded() -> Result<Self> {
        Self::from_reader(DEFAULT_DATA.as_bytes(), "<embedded>")
    }

    /// 从 CSV 文件加载
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| MatbankError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// 从任意 CSV 源加载
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();

        let name_col = headers
            .iter()
            .position(|h| h == "name")
            .ok_or_else(|| parse_error(source, "missing 'name' column"))?;
        let alias_col = headers.iter().position(|h| h == "aliases");
        let cas_col = headers.iter().position(|h| h == "cas");
        let attribute_cols: Vec<(usize, Attribute)> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| Attribute::from_key(h).map(|attr| (i, attr)))
            .collect();

        let mut db = PropertyDatabase::default();

        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let name = record.get(name_col).unwrap_or("");
            if name.is_empty() {
                continue;
            }

            let mut chemical = Chemical::new(name);
            for &(col, attr) in &attribute_cols {
                let cell = record.get(col).unwrap_or("");
                if cell.is_empty() {
                    continue;
                }
                let value: f64 = cell.parse().map_err(|_| {
                    parse_error(
                        source,
                        &format!(
                            "row {}: invalid value '{}' for {}",
                            line + 2,
                            cell,
                            attr.key()
                        ),
                    )
                })?;
                chemical.insert(attr, value);
            }

            let mut keys = vec![name.to_string()];
            if let Some(aliases) = alias_col.and_then(|c| record.get(c)) {
                keys.extend(aliases.split(';').map(|a| a.to_string()));
            }
            if let Some(cas) = cas_col.and_then(|c| record.get(c)) {
                keys.push(cas.to_string());
            }

            let pos = db.entries.len();
            db.entries.push(chemical);
            for key in keys {
                let key = normalize(&key);
                if !key.is_empty() {
                    db.index.entry(key).or_insert(pos);
                }
            }
        }

        Ok(db)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn chemicals(&self) -> &[Chemical] {
        &self.entries
    }

    /// 按名称、别名或 CAS 号查找
    pub fn lookup(&self, name: &str) -> Option<&Chemical> {
        self.index.get(&normalize(name)).map(|&i| &self.entries[i])
    }

    fn liquid(&self, name: &str) -> Result<LiquidComponent> {
        LiquidComponent::from_chemical(&self.chemical(name)?)
    }
}

impl PropertyBackend for PropertyDatabase {
    fn chemical(&self, name: &str) -> Result<Chemical> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| MatbankError::CompoundNotFound {
                name: name.to_string(),
            })
    }

    fn mixture(&self, components: [&str; 2], zs: [f64; 2]) -> Result<Mixture> {
        let mixture = Mixture::new(components, zs)?;
        let a = self.liquid(components[0])?;
        let b = self.liquid(components[1])?;
        Ok(mixture.with_enthalpy_of_mixing(regular_solution_enthalpy(&a, &b, zs)))
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn parse_error(source: &str, reason: &str) -> MatbankError {
    MatbankError::ParseError {
        format: "property database".to_string(),
        path: source.to_string(),
        reason: reason.to_string(),
    }
}
