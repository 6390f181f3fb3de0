//! # 批量获取器
//!
//! 将 CID 区间分块，每块发起一次请求，合并结果为材料表。
//!
//! ## 功能
//! - 每块一次 GET，请求 SMILES / IUPAC 名称 / 分子式
//! - 传输失败、非成功状态码、响应体解析失败：记录日志，该块不贡献记录，不重试
//! - 块之间按限速策略停顿
//!
//! ## 依赖关系
//! - 使用 `pubchem/range.rs`, `pubchem/response.rs`, `pubchem/client.rs`
//! - 使用 `batch/` 顺序执行与限速
//! - 被 `commands/fetch.rs`, `commands/run.rs` 调用

use super::client::Transport;
use super::range::{Chunk, CidRange};
use super::response::{parse_property_table, REQUESTED_FIELDS};
use crate::batch::{BatchRunner, ProcessResult, Throttle};
use crate::error::{MatbankError, Result};
use crate::models::{CompoundRecord, MaterialTable};

/// 获取统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// 发出的请求（块）数
    pub chunks: usize,
    /// 失败的块数
    pub failed_chunks: usize,
    /// 请求的 CID 数
    pub requested: u128,
    /// 获得的记录数
    pub retrieved: usize,
}

impl FetchReport {
    /// 响应中缺失（或被丢弃）的 CID 数
    pub fn absent(&self) -> u128 {
        self.requested.saturating_sub(self.retrieved as u128)
    }
}

/// PubChem 批量获取器
pub struct BatchFetcher<'a, T: Transport> {
    base_url: String,
    transport: T,
    throttle: &'a dyn Throttle,
    trace: bool,
}

impl<'a, T: Transport> BatchFetcher<'a, T> {
    pub fn new(base_url: &str, transport: T, throttle: &'a dyn Throttle) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            throttle,
            trace: true,
        }
    }

    /// 是否逐块打印追踪信息
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// 构造单块请求地址
    pub fn batch_url(&self, chunk: &Chunk) -> String {
        format!(
            "{}/compound/cid/{}/property/{}/JSON",
            self.base_url,
            chunk.joined(),
            REQUESTED_FIELDS.join(",")
        )
    }

    /// 获取单块
    pub fn fetch_chunk(&self, chunk: &Chunk) -> Result<Vec<CompoundRecord>> {
        let response = self.transport.get(&self.batch_url(chunk))?;
        if !response.is_success() {
            return Err(MatbankError::HttpStatus {
                first: chunk.first,
                last: chunk.last,
                status: response.status,
            });
        }
        parse_property_table(&response.body)
    }

    /// 获取整个区间，生成材料表
    ///
    /// 只有参数错误会返回 `Err`；单块失败只记录日志。
    pub fn generate_material_bank(
        &self,
        range: CidRange,
        batch_size: usize,
    ) -> Result<(MaterialTable, FetchReport)> {
        let chunks = range.chunks(batch_size)?;

        let mut table = MaterialTable::new();
        let mut report = FetchReport {
            chunks: chunks.len(),
            requested: range.len(),
            ..Default::default()
        };

        let runner = BatchRunner::new(self.throttle, "Fetching")
            .trace(self.trace)
            .progress(|i| format!("Batch {} completed", i + 1));
        let result = runner.run(chunks, |i, chunk| match self.fetch_chunk(&chunk) {
            Ok(records) => {
                let count = records.len();
                for record in records {
                    table.insert(record);
                }
                ProcessResult::Success(format!("Batch {} completed ({} records)", i + 1, count))
            }
            Err(e @ MatbankError::Json(_)) => {
                ProcessResult::Failed(format!("Error processing batch {}", chunk), e.to_string())
            }
            Err(e) => {
                ProcessResult::Failed(format!("Failed to retrieve batch {}", chunk), e.to_string())
            }
        });

        report.failed_chunks = result.failed;
        report.retrieved = table.len();

        Ok((table, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::NoDelay;
    use crate::pubchem::client::HttpResponse;
    use std::cell::{Cell, RefCell};

    struct CountingThrottle(Cell<usize>);

    impl Throttle for CountingThrottle {
        fn pause(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// 按 CID 区间返回预设响应，并记录请求地址
    struct MockTransport {
        urls: RefCell<Vec<String>>,
        respond: fn(&str) -> Result<HttpResponse>,
    }

    impl MockTransport {
        fn new(respond: fn(&str) -> Result<HttpResponse>) -> Self {
            Self {
                urls: RefCell::new(Vec::new()),
                respond,
            }
        }
    }

    impl Transport for &MockTransport {
        fn get(&self, url: &str) -> Result<HttpResponse> {
            self.urls.borrow_mut().push(url.to_string());
            (self.respond)(url)
        }
    }

    /// 从请求地址中取出 CID 列表
    fn requested_cids(url: &str) -> Vec<u64> {
        let ids = url
            .split("/cid/")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .unwrap();
        ids.split(',').map(|s| s.parse().unwrap()).collect()
    }

    /// 为每个 CID 生成一条完整记录
    fn echo_all(url: &str) -> Result<HttpResponse> {
        let items: Vec<String> = requested_cids(url)
            .iter()
            .map(|cid| {
                format!(
                    r#"{{"CID": {cid}, "IsomericSMILES": "C{cid}", "IUPACName": "compound-{cid}", "MolecularFormula": "CH4"}}"#
                )
            })
            .collect();
        Ok(HttpResponse {
            status: 200,
            body: format!(
                r#"{{"PropertyTable": {{"Properties": [{}]}}}}"#,
                items.join(",")
            ),
        })
    }

    #[test]
    fn test_batch_url() {
        let transport = MockTransport::new(echo_all);
        let fetcher = BatchFetcher::new("https://example.org/rest/pug/", &transport, &NoDelay);
        let url = fetcher.batch_url(&Chunk { first: 1, last: 3 });
        assert_eq!(
            url,
            "https://example.org/rest/pug/compound/cid/1,2,3/property/IsomericSMILES,IUPACName,MolecularFormula/JSON"
        );
    }

    #[test]
    fn test_one_request_per_chunk() {
        let transport = MockTransport::new(echo_all);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay).trace(false);

        let (table, report) = fetcher
            .generate_material_bank(CidRange::new(1, 250).unwrap(), 100)
            .unwrap();

        let urls = transport.urls.borrow();
        let sizes: Vec<usize> = urls.iter().map(|u| requested_cids(u).len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(report.chunks, 3);
        assert_eq!(report.failed_chunks, 0);
        assert_eq!(table.len(), 250);
        assert_eq!(report.absent(), 0);
        assert_eq!(table.records()[0].cid, 1);
        assert_eq!(table.get(250).unwrap().name.as_deref(), Some("compound-250"));
    }

    #[test]
    fn test_failed_chunk_contributes_nothing() {
        fn second_chunk_fails(url: &str) -> Result<HttpResponse> {
            if requested_cids(url)[0] == 11 {
                return Ok(HttpResponse {
                    status: 503,
                    body: "Service Unavailable".to_string(),
                });
            }
            echo_all(url)
        }

        let transport = MockTransport::new(second_chunk_fails);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay).trace(false);
        let (table, report) = fetcher
            .generate_material_bank(CidRange::new(1, 30).unwrap(), 10)
            .unwrap();

        assert_eq!(transport.urls.borrow().len(), 3);
        assert_eq!(report.failed_chunks, 1);
        assert_eq!(table.len(), 20);
        assert!((11..=20).all(|cid| !table.contains(cid)));
        assert!((1..=10).chain(21..=30).all(|cid| table.contains(cid)));
        assert_eq!(report.absent(), 10);
    }

    #[test]
    fn test_unparseable_and_transport_errors_are_absorbed() {
        fn flaky(url: &str) -> Result<HttpResponse> {
            match requested_cids(url)[0] {
                1 => Ok(HttpResponse {
                    status: 200,
                    body: "not json".to_string(),
                }),
                3 => Err(MatbankError::Other("connection reset".to_string())),
                _ => echo_all(url),
            }
        }

        let transport = MockTransport::new(flaky);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay).trace(false);
        let (table, report) = fetcher
            .generate_material_bank(CidRange::new(1, 6).unwrap(), 2)
            .unwrap();

        assert_eq!(report.failed_chunks, 2);
        let cids: Vec<u64> = table.records().iter().map(|r| r.cid).collect();
        assert_eq!(cids, vec![5, 6]);
    }

    #[test]
    fn test_item_without_smiles_is_omitted() {
        fn partial(_url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse {
                status: 200,
                body: r#"{"PropertyTable": {"Properties": [
                    {"CID": 2, "IsomericSMILES": "CC", "IUPACName": "ethane"},
                    {"CID": 1, "IUPACName": "mystery"}
                ]}}"#
                    .to_string(),
            })
        }

        let transport = MockTransport::new(partial);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay).trace(false);
        let (table, report) = fetcher
            .generate_material_bank(CidRange::new(1, 2).unwrap(), 100)
            .unwrap();

        assert!(!table.contains(1));
        assert_eq!(table.records()[0].cid, 2);
        assert_eq!(report.retrieved, 1);
    }

    #[test]
    fn test_pause_after_every_chunk() {
        fn always_down(_url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse {
                status: 500,
                body: String::new(),
            })
        }

        let throttle = CountingThrottle(Cell::new(0));
        let transport = MockTransport::new(echo_all);
        let fetcher = BatchFetcher::new("http://mock", &transport, &throttle).trace(false);
        fetcher
            .generate_material_bank(CidRange::new(1, 250).unwrap(), 100)
            .unwrap();
        assert_eq!(throttle.0.get(), 3);

        // 失败的块同样停顿
        let throttle = CountingThrottle(Cell::new(0));
        let transport = MockTransport::new(always_down);
        let fetcher = BatchFetcher::new("http://mock", &transport, &throttle).trace(false);
        let (table, report) = fetcher
            .generate_material_bank(CidRange::new(1, 25).unwrap(), 10)
            .unwrap();
        assert_eq!(throttle.0.get(), 3);
        assert_eq!(report.failed_chunks, 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_status_error_names_the_chunk() {
        fn not_found(_url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse {
                status: 404,
                body: "PUGREST.NotFound".to_string(),
            })
        }

        let transport = MockTransport::new(not_found);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay);
        let err = fetcher.fetch_chunk(&Chunk { first: 101, last: 200 }).unwrap_err();
        assert!(matches!(
            err,
            MatbankError::HttpStatus {
                first: 101,
                last: 200,
                status: 404
            }
        ));
        assert_eq!(err.to_string(), "Status code 404 for batch 101-200");
    }

    #[test]
    fn test_invalid_batch_size_is_error() {
        let transport = MockTransport::new(echo_all);
        let fetcher = BatchFetcher::new("http://mock", &transport, &NoDelay);
        assert!(fetcher
            .generate_material_bank(CidRange::new(1, 2).unwrap(), 0)
            .is_err());
        assert!(transport.urls.borrow().is_empty());
    }
}
