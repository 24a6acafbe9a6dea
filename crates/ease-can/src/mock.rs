//! Mock 发送端
//!
//! 用于测试的模拟 CAN 总线：记录所有发送的帧，并可按 CAN ID 或按调用序号注入失败。

use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::{BusTransmitter, CanError, EaseFrame};

/// 模拟发送端
#[derive(Debug, Default)]
pub struct MockTransmitter {
    /// 成功发送的帧（按发送顺序）
    sent: Vec<EaseFrame>,
    /// 所有尝试发送的帧（含失败）
    attempts: Vec<EaseFrame>,
    /// 这些 CAN ID 的帧总是发送失败
    failing_ids: HashSet<u32>,
    /// 按顺序消费的一次性失败（true = 本次失败）
    scripted: VecDeque<bool>,
}

impl MockTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让指定 CAN ID 的帧总是失败（模拟 NACK）
    pub fn fail_id(&mut self, can_id: u32) -> &mut Self {
        self.failing_ids.insert(can_id);
        self
    }

    /// 取消指定 CAN ID 的失败注入
    pub fn heal_id(&mut self, can_id: u32) -> &mut Self {
        self.failing_ids.remove(&can_id);
        self
    }

    /// 追加一次性结果脚本：`true` 表示对应的那次发送失败
    pub fn script<I: IntoIterator<Item = bool>>(&mut self, outcomes: I) -> &mut Self {
        self.scripted.extend(outcomes);
        self
    }

    pub fn sent(&self) -> &[EaseFrame] {
        &self.sent
    }

    pub fn attempts(&self) -> &[EaseFrame] {
        &self.attempts
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.attempts.clear();
    }
}

impl BusTransmitter for MockTransmitter {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError> {
        self.attempts.push(frame);

        let scripted_failure = self.scripted.pop_front().unwrap_or(false);
        if scripted_failure || self.failing_ids.contains(&frame.id) {
            trace!("Mock send failed: ID=0x{:X}", frame.id);
            return Err(CanError::BusBusy);
        }

        self.sent.push(frame);
        Ok(())
    }
}
