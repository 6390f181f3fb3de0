//! # 限速策略
//!
//! 批次之间、行之间的固定停顿。阻塞等待，无指数退避、无抖动。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 由 `commands/` 根据命令行参数构造

use std::time::Duration;

/// 限速策略
pub trait Throttle {
    /// 每处理完一项后调用
    fn pause(&self);
}

/// 固定时长的阻塞停顿
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        FixedDelay(Duration::from_millis(ms))
    }
}

impl Throttle for FixedDelay {
    fn pause(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// 不停顿
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn pause(&self) {}
}
