//! # 批量执行器
//!
//! 顺序执行批量处理任务。
//!
//! ## 功能
//! - 顺序迭代，每项处理后调用限速策略
//! - 进度条显示，逐项追踪输出
//! - 失败项总是记录日志（不受追踪开关影响）
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `pubchem/fetcher.rs`, `properties/enricher.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `batch/throttle.rs` 停顿

use super::Throttle;
use crate::utils::{output, progress};

/// 单项处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (项目标签, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(label, err) => {
                self.failed += 1;
                self.failures.push((label, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 单项处理后输出的一行日志
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    Error(String),
    Skip(String),
    Trace(String),
}

/// 批量执行器
pub struct BatchRunner<'a> {
    throttle: &'a dyn Throttle,
    message: String,
    trace: bool,
    progress: Option<fn(usize) -> String>,
}

impl<'a> BatchRunner<'a> {
    /// 创建新的批量执行器
    pub fn new(throttle: &'a dyn Throttle, message: &str) -> Self {
        Self {
            throttle,
            message: message.to_string(),
            trace: true,
            progress: None,
        }
    }

    /// 是否逐项打印追踪信息
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// 失败项的进度追踪行（成功项使用其自身消息）
    pub fn progress(mut self, progress: fn(usize) -> String) -> Self {
        self.progress = Some(progress);
        self
    }

    /// 第 `i` 项处理结果对应的日志行
    pub fn log_lines(&self, i: usize, result: &ProcessResult) -> Vec<LogLine> {
        let mut lines = Vec::new();
        if let ProcessResult::Failed(label, err) = result {
            lines.push(LogLine::Error(format!("{}: {}", label, err)));
        }
        if self.trace {
            match result {
                ProcessResult::Success(msg) => lines.push(LogLine::Trace(msg.clone())),
                ProcessResult::Skipped(msg) => lines.push(LogLine::Skip(msg.clone())),
                ProcessResult::Failed(..) => {
                    if let Some(progress) = self.progress {
                        lines.push(LogLine::Trace(progress(i)));
                    }
                }
            }
        }
        lines
    }

    /// 顺序处理列表
    ///
    /// `processor` 接收 (序号, 项目)。每项处理之后（包括最后一项）都会停顿一次。
    pub fn run<T, I, F>(&self, items: I, mut processor: F) -> BatchResult
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
        F: FnMut(usize, T) -> ProcessResult,
    {
        let items = items.into_iter();
        let pb = progress::create_progress_bar(items.len() as u64, &self.message);

        let mut batch_result = BatchResult::default();

        for (i, item) in items.enumerate() {
            let result = processor(i, item);

            let lines = self.log_lines(i, &result);
            if !lines.is_empty() {
                pb.suspend(|| {
                    for line in &lines {
                        match line {
                            LogLine::Error(msg) => output::print_error(msg),
                            LogLine::Skip(msg) => output::print_skip(msg),
                            LogLine::Trace(msg) => output::print_trace(msg),
                        }
                    }
                });
            }

            batch_result.merge(result);
            self.throttle.pause();
            pb.inc(1);
        }

        pb.finish_and_clear();

        batch_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::NoDelay;
    use std::cell::Cell;

    struct CountingThrottle(Cell<usize>);

    impl Throttle for CountingThrottle {
        fn pause(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_runner_pauses_after_every_item() {
        let throttle = CountingThrottle(Cell::new(0));
        let runner = BatchRunner::new(&throttle, "Testing").trace(false);

        let result = runner.run(vec![1, 2, 3, 4], |i, n| match n % 3 {
            0 => ProcessResult::Failed(format!("item {}", i), "divisible".to_string()),
            1 => ProcessResult::Success(format!("item {}", i)),
            _ => ProcessResult::Skipped(format!("item {}", i)),
        });

        assert_eq!(throttle.0.get(), 4);
        assert_eq!(result.total(), 4);
        assert_eq!(result.success, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(
            result.failures,
            vec![("item 2".to_string(), "divisible".to_string())]
        );
    }

    #[test]
    fn test_failures_logged_with_progress_trace() {
        let runner =
            BatchRunner::new(&NoDelay, "Testing").progress(|i| format!("Item {} processed", i));
        let failed = ProcessResult::Failed("item 3".to_string(), "boom".to_string());

        assert_eq!(
            runner.log_lines(3, &failed),
            vec![
                LogLine::Error("item 3: boom".to_string()),
                LogLine::Trace("Item 3 processed".to_string()),
            ]
        );
        assert_eq!(
            runner.log_lines(0, &ProcessResult::Success("ok".to_string())),
            vec![LogLine::Trace("ok".to_string())]
        );

        // 关闭追踪后失败仍然输出
        let quiet = BatchRunner::new(&NoDelay, "Testing").trace(false);
        assert_eq!(
            quiet.log_lines(3, &failed),
            vec![LogLine::Error("item 3: boom".to_string())]
        );
        assert!(quiet
            .log_lines(0, &ProcessResult::Success("ok".to_string()))
            .is_empty());
    }
}
