//! # 数据模型模块
//!
//! 定义化合物记录和材料表数据模型。
//!
//! ## 依赖关系
//! - 被 `pubchem/`, `properties/`, `persist/` 和 `commands/` 使用
//! - 子模块: compound, table

pub mod compound;
pub mod table;

pub use compound::CompoundRecord;
pub use table::{Column, MaterialTable, TextColumn};
