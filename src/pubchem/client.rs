//! # HTTP 传输层
//!
//! `Transport` 抽象一次 GET 请求，便于在测试中替换网络。
//! `HttpTransport` 基于 `reqwest` 阻塞客户端实现。
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs` 使用
//! - 使用 `reqwest`

use crate::error::{MatbankError, Result};

use std::time::Duration;

/// 默认 PUG REST 根地址
pub const DEFAULT_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// HTTP 响应（状态码 + 响应体）
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 一次 GET 请求
pub trait Transport {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// 基于 reqwest 的阻塞传输
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout` 为 `None` 时不设超时
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        // 阻塞客户端默认 30 秒超时，None 需显式传入
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("matbank/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| MatbankError::Http {
                url: DEFAULT_BASE_URL.to_string(),
                source: e,
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().map_err(|e| MatbankError::Http {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| MatbankError::Http {
            url: url.to_string(),
            source: e,
        })?;

        Ok(HttpResponse { status, body })
    }
}
