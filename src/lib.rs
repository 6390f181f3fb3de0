//! # matbank - 化合物物性库构建工具
//!
//! 从 PubChem 按 CID 区间批量获取化合物，补充物性估算值与二元混合焓，
//! 写出单个 parquet 表。两个阶段均可作为库函数调用：
//!
//! ```no_run
//! use matbank::batch::FixedDelay;
//! use matbank::properties::{PropertyDatabase, PropertyEnricher};
//! use matbank::pubchem::{BatchFetcher, CidRange, HttpTransport, DEFAULT_BASE_URL};
//! use std::path::Path;
//!
//! # fn main() -> matbank::error::Result<()> {
//! let pause = FixedDelay::from_millis(200);
//! let fetcher = BatchFetcher::new(DEFAULT_BASE_URL, HttpTransport::new(None)?, &pause);
//! let (mut bank, _) = fetcher.generate_material_bank(CidRange::new(1, 250)?, 100)?;
//!
//! let db = PropertyDatabase::embedded()?;
//! let row_pause = FixedDelay::from_millis(2);
//! let enricher = PropertyEnricher::new(&db, &row_pause);
//! enricher.process_materials(&mut bank, &["melting point", "density"], "run1", Path::new("."))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/         (命令行参数定义)
//!   ├── commands/    (命令执行逻辑)
//!   │     ├── pubchem/    (批量获取)
//!   │     ├── properties/ (物性补充)
//!   │     └── persist/    (表格读写)
//!   ├── batch/       (顺序批处理与限速)
//!   ├── models/      (数据模型)
//!   ├── utils/       (工具函数)
//!   └── error.rs     (错误处理)
//! ```

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod models;
pub mod persist;
pub mod properties;
pub mod pubchem;
pub mod utils;
