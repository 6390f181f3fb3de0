//! # PubChem PUG REST 响应解析
//!
//! 解析 `property/.../JSON` 接口返回的固定结构：
//!
//! ```text
//! {"PropertyTable": {"Properties": [
//!     {"CID": 702, "IsomericSMILES": "CCO", "IUPACName": "ethanol", "MolecularFormula": "C2H6O"}
//! ]}}
//! ```
//!
//! 缺失 `PropertyTable` 或 `Properties` 视为空列表；
//! 缺少 CID 或结构字符串的条目被丢弃。
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs` 使用
//! - 使用 `serde_json`

use crate::error::Result;
use crate::models::CompoundRecord;

use serde::Deserialize;

/// 请求的三个属性字段
pub const REQUESTED_FIELDS: [&str; 3] = ["IsomericSMILES", "IUPACName", "MolecularFormula"];

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
    #[serde(rename = "PropertyTable", default)]
    property_table: PropertyTable,
}

#[derive(Debug, Default, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<PropertyItem>,
}

#[derive(Debug, Deserialize)]
struct PropertyItem {
    #[serde(rename = "CID")]
    cid: Option<u64>,

    // 新版接口将 IsomericSMILES 返回为 SMILES
    #[serde(rename = "IsomericSMILES", alias = "SMILES")]
    smiles: Option<String>,

    #[serde(rename = "IUPACName")]
    name: Option<String>,

    #[serde(rename = "MolecularFormula")]
    formula: Option<String>,
}

/// 解析响应体为化合物记录（按响应顺序）
pub fn parse_property_table(body: &str) -> Result<Vec<CompoundRecord>> {
    let response: PropertyTableResponse = serde_json::from_str(body)?;

    let records = response
        .property_table
        .properties
        .into_iter()
        .filter_map(|item| {
            let cid = item.cid.filter(|&cid| cid != 0)?;
            let smiles = item.smiles.filter(|s| !s.is_empty())?;
            Some(CompoundRecord {
                cid,
                smiles,
                name: item.name,
                formula: item.formula,
            })
        })
        .collect();

    Ok(records)
}
