//! # PubChem 批量获取模块
//!
//! 通过 PUG REST 接口按 CID 区间批量获取化合物结构、名称和分子式。
//!
//! ## 子模块
//! - `range`: CID 区间分块
//! - `client`: HTTP 传输层
//! - `response`: JSON 响应解析
//! - `fetcher`: 批量获取循环
//!
//! ## 依赖关系
//! - 被 `commands/fetch.rs`, `commands/run.rs` 使用
//! - 使用 `models/`, `batch/`

pub mod client;
pub mod fetcher;
pub mod range;
pub mod response;

pub use client::{HttpResponse, HttpTransport, Transport, DEFAULT_BASE_URL};
pub use fetcher::{BatchFetcher, FetchReport};
pub use range::{Chunk, Chunks, CidRange};
