//! 单腿步态状态机
//!
//! 每个 tick 依次执行：
//! 1. 轨迹回放相位的游标前进一格
//! 2. 对当前相位的切换条件求值
//! 3. 条件满足时切换到后继相位（游标归零、进入时间设为 `now`），进入钩子执行一次
//!
//! 每个 tick 最多切换一次；切换发生时，本 tick 输出新相位的初始目标。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::clock::{elapsed_since, is_backward_step};
use crate::error::GaitError;
use crate::phase::{GaitPhaseKind, LegCycle, LegTargets, PhaseSpec};

/// 腿标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegIdentity {
    Left,
    Right,
}

impl LegIdentity {
    pub const BOTH: [LegIdentity; 2] = [LegIdentity::Left, LegIdentity::Right];

    pub fn name(&self) -> &'static str {
        match self {
            LegIdentity::Left => "left",
            LegIdentity::Right => "right",
        }
    }
}

impl fmt::Display for LegIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单腿运行状态
///
/// 切换时整体替换（相位、进入时间、游标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegState {
    pub phase_index: usize,
    pub entered_at: u64,
    pub cursor: usize,
    /// 相位在 tick 之外进入（启动或外部指令），下一个 tick 先输出采样 0，不推进游标
    pub fresh: bool,
}

impl LegState {
    fn enter(phase_index: usize, now: u64, fresh: bool) -> Self {
        Self {
            phase_index,
            entered_at: now,
            cursor: 0,
            fresh,
        }
    }
}

/// 一次相位切换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub leg: LegIdentity,
    pub from: GaitPhaseKind,
    pub to: GaitPhaseKind,
    /// 切换时刻（ms）
    pub at: u64,
}

/// 单腿步态状态机
#[derive(Debug, Clone)]
pub struct LegGaitStateMachine {
    leg: LegIdentity,
    cycle: LegCycle,
    state: LegState,
    /// 最近一次观测到的时间，用于识别时钟回拨
    last_now: u64,
    transitions: u64,
}

impl LegGaitStateMachine {
    /// 在 `now` 时刻进入循环的第一个相位
    pub fn new(leg: LegIdentity, cycle: LegCycle, now: u64) -> Self {
        let state = LegState::enter(0, now, true);
        info!(
            "{} leg starts in {} at {} ms ({} phases)",
            leg,
            cycle.phase(0).kind,
            now,
            cycle.len()
        );
        Self {
            leg,
            cycle,
            state,
            last_now: now,
            transitions: 0,
        }
    }

    /// 推进一个控制周期
    ///
    /// 返回本 tick 发生的相位切换（若有）。
    pub fn tick(&mut self, now: u64, sensor_triggered: bool) -> Option<PhaseTransition> {
        let now = self.observe(now);

        let spec = self.cycle.phase(self.state.phase_index);
        if self.state.fresh {
            self.state.fresh = false;
        } else {
            self.state.cursor = spec.behavior.advance(self.state.cursor);
        }

        let elapsed = elapsed_since(self.state.entered_at, now);
        if !spec.condition.fires(elapsed, sensor_triggered) {
            return None;
        }

        // 新相位的采样 0 就是本 tick 的输出
        let next = self.cycle.next_index(self.state.phase_index);
        Some(self.enter(next, now, false))
    }

    /// 当前输出目标（幂等）
    pub fn targets(&self) -> LegTargets {
        self.current().behavior.targets_at(self.state.cursor)
    }

    /// 外部指令切换到指定相位（`Never` 条件的唯一出口）
    pub fn enter_phase(
        &mut self,
        kind: GaitPhaseKind,
        now: u64,
    ) -> Result<PhaseTransition, GaitError> {
        let index = self
            .cycle
            .index_of(kind)
            .ok_or(GaitError::PhaseNotInCycle {
                leg: self.leg,
                kind,
            })?;
        let now = self.observe(now);
        Ok(self.enter(index, now, true))
    }

    pub fn leg(&self) -> LegIdentity {
        self.leg
    }

    pub fn phase(&self) -> GaitPhaseKind {
        self.current().kind
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn phase_entered_at(&self) -> u64 {
        self.state.entered_at
    }

    /// 自启动以来的切换次数
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn state(&self) -> LegState {
        self.state
    }

    pub fn cycle(&self) -> &LegCycle {
        &self.cycle
    }

    fn current(&self) -> &PhaseSpec {
        self.cycle.phase(self.state.phase_index)
    }

    /// 时钟回拨时沿用上一次的时间，保证回拨不会触发切换
    fn observe(&mut self, now: u64) -> u64 {
        if is_backward_step(self.last_now, now) {
            warn!(
                "{} leg: clock stepped backwards ({} ms < {} ms), holding last time",
                self.leg, now, self.last_now
            );
            return self.last_now;
        }
        self.last_now = now;
        now
    }

    /// 进入钩子
    fn enter(&mut self, index: usize, now: u64, fresh: bool) -> PhaseTransition {
        let from = self.current().kind;
        self.state = LegState::enter(index, now, fresh);
        self.transitions += 1;

        let to = self.current().kind;
        info!("{} leg: {} -> {} at {} ms", self.leg, from, to, now);

        PhaseTransition {
            leg: self.leg,
            from,
            to,
            at: now,
        }
    }
}
