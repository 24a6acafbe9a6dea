//! 毫秒时钟
//!
//! 控制核心每个 tick 只读一次时间，并把它显式传给两条腿的状态机。
//! 时间戳是单调递增的 `u64` 毫秒数，差值一律用 `wrapping_sub` 计算。

use std::cell::Cell;
use std::time::Instant;

/// 单调毫秒时钟
pub trait Clock {
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// 系统时钟：自构造起经过的毫秒数
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // u64 毫秒约 5.8 亿年，截断不会发生
        self.origin.elapsed().as_millis() as u64
    }
}

/// 手动时钟（测试与回放用）
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    /// 前进 `delta_ms`（按 u64 回绕）
    pub fn advance(&self, delta_ms: u64) {
        self.now.set(self.now.get().wrapping_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// `now` 相对 `since` 的经过时间（回绕安全）
#[inline]
pub fn elapsed_since(since: u64, now: u64) -> u64 {
    now.wrapping_sub(since)
}

/// `now` 是否早于 `last`（时钟回拨）
///
/// 差值超过 u64 范围一半视为回拨，而不是回绕后的前进。
#[inline]
pub fn is_backward_step(last: u64, now: u64) -> bool {
    now.wrapping_sub(last) > u64::MAX / 2
}
