//! # 统一错误处理模块
//!
//! 定义 matbank 的所有错误类型，使用 `thiserror` 派生。
//!
//! 批次、行、单元格级别的失败在各自循环中被吸收为日志和缺失值，
//! 只有参数错误和输出 I/O 错误会终止命令。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// matbank 统一错误类型
#[derive(Error, Debug)]
pub enum MatbankError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 网络错误
    // ─────────────────────────────────────────────────────────────
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Status code {status} for batch {first}-{last}")]
    HttpStatus { first: u64, last: u64, status: u16 },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // 表格持久化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    // ─────────────────────────────────────────────────────────────
    // 物性查询错误
    // ─────────────────────────────────────────────────────────────
    #[error("Compound '{name}' not found in property database")]
    CompoundNotFound { name: String },

    #[error("Attribute '{attribute}' unavailable for '{compound}'")]
    MissingAttribute { compound: String, attribute: String },

    #[error("Invalid mixture: {0}")]
    InvalidMixture(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MatbankError>;
