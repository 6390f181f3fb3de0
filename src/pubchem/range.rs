//! # CID 区间与分块
//!
//! 将闭区间 `[start, end]` 按批大小切分为连续的块，保持顺序，
//! 最后一块可能更短。区间内每个 CID 恰好出现在一个块中。
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs` 使用
//! - 被 `cli/fetch.rs` 的参数构造

use crate::error::{MatbankError, Result};

/// CID 闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidRange {
    start: u64,
    end: u64,
}

impl CidRange {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(MatbankError::InvalidRange(format!(
                "start CID {} is greater than end CID {}",
                start, end
            )));
        }
        Ok(CidRange { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// 区间内 CID 数量（`[0, u64::MAX]` 共 2^64 个，超出 u64）
    pub fn len(&self) -> u128 {
        u128::from(self.end - self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// 按批大小切分
    pub fn chunks(&self, batch_size: usize) -> Result<Chunks> {
        if batch_size == 0 {
            return Err(MatbankError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Chunks {
            next: Some(self.start),
            end: self.end,
            batch_size: batch_size as u64,
        })
    }
}

/// 连续的 CID 块
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub first: u64,
    pub last: u64,
}

impl Chunk {
    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> {
        self.first..=self.last
    }

    /// 逗号连接的 CID 列表
    pub fn joined(&self) -> String {
        self.ids()
            .map(|cid| cid.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// 块迭代器
#[derive(Debug, Clone)]
pub struct Chunks {
    next: Option<u64>,
    end: u64,
    batch_size: u64,
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let first = self.next?;
        let last = first.saturating_add(self.batch_size - 1).min(self.end);
        self.next = if last == self.end { None } else { Some(last + 1) };
        Some(Chunk { first, last })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(first) => {
                usize::try_from((self.end - first) / self.batch_size + 1).unwrap_or(usize::MAX)
            }
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Chunks {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(start: u64, end: u64, batch_size: usize) -> Vec<usize> {
        CidRange::new(start, end)
            .unwrap()
            .chunks(batch_size)
            .unwrap()
            .map(|c| c.len())
            .collect()
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(sizes(1, 250, 100), vec![100, 100, 50]);
        assert_eq!(sizes(0, 250, 100), vec![100, 100, 51]);
        assert_eq!(sizes(1, 200, 100), vec![100, 100]);
        assert_eq!(sizes(5, 5, 100), vec![1]);
        assert_eq!(sizes(1, 3, 1), vec![1, 1, 1]);
    }

    #[test]
    fn test_every_cid_in_exactly_one_chunk() {
        for (start, end, batch) in [(1, 250, 100), (17, 1003, 7), (3, 9, 64), (1, 97, 97)] {
            let range = CidRange::new(start, end).unwrap();
            let chunks: Vec<Chunk> = range.chunks(batch).unwrap().collect();

            let expected = ((range.len() as usize) + batch - 1) / batch;
            assert_eq!(chunks.len(), expected);
            assert_eq!(range.chunks(batch).unwrap().len(), expected);

            let ids: Vec<u64> = chunks.iter().flat_map(|c| c.ids()).collect();
            assert_eq!(ids, (start..=end).collect::<Vec<_>>());
            assert!(chunks.iter().all(|c| c.len() <= batch));
        }
    }

    #[test]
    fn test_range_end_at_u64_max() {
        let range = CidRange::new(u64::MAX - 2, u64::MAX).unwrap();
        let chunks: Vec<Chunk> = range.chunks(2).unwrap().collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].last, u64::MAX);

        let full = CidRange::new(0, u64::MAX).unwrap();
        assert_eq!(full.len(), u128::from(u64::MAX) + 1);
        let mut chunks = full.chunks(usize::MAX).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks.next().unwrap().last, u64::MAX - 1);
        assert_eq!(chunks.next(), Some(Chunk { first: u64::MAX, last: u64::MAX }));
        assert_eq!(chunks.next(), None);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            CidRange::new(10, 1),
            Err(MatbankError::InvalidRange(_))
        ));
        assert!(matches!(
            CidRange::new(1, 10).unwrap().chunks(0),
            Err(MatbankError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_joined_ids() {
        let chunk = Chunk { first: 3, last: 6 };
        assert_eq!(chunk.joined(), "3,4,5,6");
        assert_eq!(chunk.to_string(), "3-6");
    }
}
