//! # properties 命令实现
//!
//! 列出支持的物性、属性键、单位以及物性数据库的覆盖情况，
//! 并打印混合焓的溶剂 / 摩尔分数网格。
//!
//! ## 依赖关系
//! - 使用 `cli/properties.rs` 定义的参数
//! - 使用 `properties/catalog.rs`, `properties/database.rs`

use crate::cli::properties::PropertiesArgs;
use crate::error::Result;
use crate::properties::catalog::{mixing_column_name, mixing_grid};
use crate::properties::{PropertyDatabase, SUPPORTED_PROPERTIES};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 物性目录行
#[derive(Debug, Clone, Tabled)]
struct PropertyRow {
    #[tabled(rename = "Property")]
    property: &'static str,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "Coverage")]
    coverage: String,
}

/// 执行 properties 命令
pub fn execute(args: PropertiesArgs) -> Result<()> {
    output::print_header("Supported Properties");

    let db = match &args.property_db {
        Some(path) => PropertyDatabase::from_path(path)?,
        None => PropertyDatabase::embedded()?,
    };
    let chemicals = db.chemicals();

    let rows: Vec<PropertyRow> = SUPPORTED_PROPERTIES
        .iter()
        .map(|&(property, attr)| {
            let covered = chemicals
                .iter()
                .filter(|c| c.attribute(attr).is_ok())
                .count();
            PropertyRow {
                property,
                key: attr.key(),
                unit: attr.unit(),
                coverage: format!("{}/{}", covered, chemicals.len()),
            }
        })
        .collect();

    println!("{}", Table::new(rows));

    output::print_separator();
    output::print_info("Mixing enthalpy columns (J/mol, regular-solution estimate at 298.15 K):");
    for (solvent, x) in mixing_grid() {
        println!("    {}", mixing_column_name(solvent, x));
    }

    Ok(())
}
