//! # 物性补充模块
//!
//! 为材料表补充物性估算值与二元混合焓。
//!
//! ## 子模块
//! - `catalog`: 支持的物性、溶剂和摩尔分数目录
//! - `backend`: 物性后端接口（化学对象 / 混合物）
//! - `database`: 基于 CSV 的内置物性后端
//! - `mixing`: 正规溶液混合焓估算
//! - `enricher`: 逐行补充循环
//!
//! ## 依赖关系
//! - 被 `commands/enrich.rs`, `commands/run.rs`, `commands/properties.rs` 使用
//! - 使用 `models/`, `batch/`, `persist/`

pub mod backend;
pub mod catalog;
pub mod database;
pub mod enricher;
pub mod mixing;

pub use backend::{Chemical, Mixture, PropertyBackend};
pub use catalog::{Attribute, MOLE_FRACTIONS, SOLVENTS, SUPPORTED_PROPERTIES};
pub use database::PropertyDatabase;
pub use enricher::{validate_properties, EnrichReport, PropertyEnricher, Validation};
