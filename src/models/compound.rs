//! # 化合物记录数据模型
//!
//! 存储从 PubChem 获取的单个化合物信息。
//!
//! ## 依赖关系
//! - 被 `pubchem/` 创建
//! - 被 `models/table.rs`, `persist/` 使用

use serde::Deserialize;

/// 化合物记录（以 CID 为键，入表后不可变）
///
/// 字段名与材料表的基础列一致，CSV 输入按表头直接反序列化。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompoundRecord {
    /// PubChem 化合物标识符
    #[serde(rename = "CID")]
    pub cid: u64,

    /// 规范结构字符串 (SMILES)
    pub smiles: String,

    /// 显示名称（IUPAC 名称，可能缺失）
    pub name: Option<String>,

    /// 分子式
    pub formula: Option<String>,
}

impl CompoundRecord {
    pub fn new(cid: u64, smiles: impl Into<String>) -> Self {
        CompoundRecord {
            cid,
            smiles: smiles.into(),
            name: None,
            formula: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// 用于日志的名称（缺失时回退到 CID）
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("CID {}", self.cid),
        }
    }
}
