//! 步态相位定义
//!
//! - [`GaitPhaseKind`]: 相位标识（封闭集合）
//! - [`PhaseBehavior`]: 相位输出（恒定目标 / 轨迹回放）
//! - [`TransitionCondition`]: 离开相位的条件（时间 / 传感器 / 仅外部指令）
//! - [`LegCycle`]: 一条腿的有序相位循环，最后一个相位的后继是第一个
//!
//! 行为与条件都是按值存放的枚举，状态机只保存相位下标，切换时不分配内存。

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::trajectory::TrajectoryTable;

/// 相位标识
///
/// 前三个用于传感器驱动的三相步态，其余用于轨迹回放步态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitPhaseKind {
    Stance,
    SwingUp,
    SwingDown,
    InitialContact,
    LoadingResponse,
    MidStance,
    TerminalStance,
    PreSwing,
    InitialSwing,
    MidSwing,
    TerminalSwing,
}

impl GaitPhaseKind {
    pub const ALL: [GaitPhaseKind; 11] = [
        GaitPhaseKind::Stance,
        GaitPhaseKind::SwingUp,
        GaitPhaseKind::SwingDown,
        GaitPhaseKind::InitialContact,
        GaitPhaseKind::LoadingResponse,
        GaitPhaseKind::MidStance,
        GaitPhaseKind::TerminalStance,
        GaitPhaseKind::PreSwing,
        GaitPhaseKind::InitialSwing,
        GaitPhaseKind::MidSwing,
        GaitPhaseKind::TerminalSwing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GaitPhaseKind::Stance => "Stance",
            GaitPhaseKind::SwingUp => "SwingUp",
            GaitPhaseKind::SwingDown => "SwingDown",
            GaitPhaseKind::InitialContact => "InitialContact",
            GaitPhaseKind::LoadingResponse => "LoadingResponse",
            GaitPhaseKind::MidStance => "MidStance",
            GaitPhaseKind::TerminalStance => "TerminalStance",
            GaitPhaseKind::PreSwing => "PreSwing",
            GaitPhaseKind::InitialSwing => "InitialSwing",
            GaitPhaseKind::MidSwing => "MidSwing",
            GaitPhaseKind::TerminalSwing => "TerminalSwing",
        }
    }
}

impl fmt::Display for GaitPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单关节目标：位置（rad）与速度（rad/s）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointSetpoint {
    pub position: f64,
    #[serde(default)]
    pub velocity: f64,
}

impl JointSetpoint {
    pub const fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// 速度为 0 的保持位置
    pub const fn hold(position: f64) -> Self {
        Self::new(position, 0.0)
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// 一条腿的髋、膝目标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegTargets {
    pub hip: JointSetpoint,
    pub knee: JointSetpoint,
}

impl LegTargets {
    pub const fn new(hip: JointSetpoint, knee: JointSetpoint) -> Self {
        Self { hip, knee }
    }

    pub fn is_finite(&self) -> bool {
        self.hip.is_finite() && self.knee.is_finite()
    }
}

/// 相位输出行为
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseBehavior {
    /// 恒定目标
    ConstantTarget { hip: JointSetpoint, knee: JointSetpoint },
    /// 轨迹回放
    TrajectoryReplay { samples: TrajectoryTable },
}

impl PhaseBehavior {
    pub fn constant(hip: JointSetpoint, knee: JointSetpoint) -> Self {
        PhaseBehavior::ConstantTarget { hip, knee }
    }

    pub fn replay(samples: TrajectoryTable) -> Self {
        PhaseBehavior::TrajectoryReplay { samples }
    }

    /// 游标处的目标（只读）
    pub fn targets_at(&self, cursor: usize) -> LegTargets {
        match self {
            PhaseBehavior::ConstantTarget { hip, knee } => LegTargets::new(*hip, *knee),
            PhaseBehavior::TrajectoryReplay { samples } => samples.sample(cursor),
        }
    }

    /// 每个 tick 的游标推进；恒定目标的游标始终为 0
    pub fn advance(&self, cursor: usize) -> usize {
        match self {
            PhaseBehavior::ConstantTarget { .. } => 0,
            PhaseBehavior::TrajectoryReplay { samples } => samples.advance(cursor),
        }
    }

    fn validate(&self, kind: GaitPhaseKind) -> Result<(), ConfigError> {
        match self {
            PhaseBehavior::ConstantTarget { hip, knee } => {
                if !hip.is_finite() || !knee.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field: format!("{} constant target", kind),
                    });
                }
            },
            PhaseBehavior::TrajectoryReplay { samples } => {
                if let Some(i) = samples.samples().iter().position(|s| !s.is_finite()) {
                    return Err(ConfigError::NonFinite {
                        field: format!("{} trajectory sample {}", kind, i),
                    });
                }
            },
        }
        Ok(())
    }
}

/// 相位切换条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionCondition {
    /// 进入相位后经过时间严格大于阈值
    ElapsedTime { threshold_ms: u64 },
    /// 该腿传感器在求值时刻为触发状态（电平）
    SensorEvent,
    /// 只能由外部指令离开
    Never,
}

impl TransitionCondition {
    pub fn fires(&self, elapsed_ms: u64, sensor_triggered: bool) -> bool {
        match *self {
            TransitionCondition::ElapsedTime { threshold_ms } => elapsed_ms > threshold_ms,
            TransitionCondition::SensorEvent => sensor_triggered,
            TransitionCondition::Never => false,
        }
    }
}

/// 单个相位：标识 + 行为 + 条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSpec {
    pub kind: GaitPhaseKind,
    pub condition: TransitionCondition,
    pub behavior: PhaseBehavior,
}

impl PhaseSpec {
    pub fn new(
        kind: GaitPhaseKind,
        behavior: PhaseBehavior,
        condition: TransitionCondition,
    ) -> Self {
        Self {
            kind,
            condition,
            behavior,
        }
    }
}

/// 一条腿的相位循环（非空、相位不重复）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PhaseSpec>", into = "Vec<PhaseSpec>")]
pub struct LegCycle {
    phases: Vec<PhaseSpec>,
}

impl LegCycle {
    pub fn new(phases: Vec<PhaseSpec>) -> Result<Self, ConfigError> {
        if phases.is_empty() {
            return Err(ConfigError::EmptyCycle);
        }

        let mut seen = HashSet::with_capacity(phases.len());
        for phase in &phases {
            if !seen.insert(phase.kind) {
                return Err(ConfigError::DuplicatePhase(phase.kind));
            }
            phase.behavior.validate(phase.kind)?;
        }

        Ok(Self { phases })
    }

    /// 内置预设使用：相位在编译期确定，不需要校验
    pub(crate) fn from_known_phases(phases: Vec<PhaseSpec>) -> Self {
        debug_assert!(Self::new(phases.clone()).is_ok());
        Self { phases }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// 始终为 `false`，构造时已拒绝空循环
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[PhaseSpec] {
        &self.phases
    }

    /// 下标处的相位，越界按循环取模
    pub fn phase(&self, index: usize) -> &PhaseSpec {
        &self.phases[index % self.phases.len()]
    }

    /// 后继相位下标（最后一个回到第一个）
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phases.len()
    }

    pub fn index_of(&self, kind: GaitPhaseKind) -> Option<usize> {
        self.phases.iter().position(|p| p.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = GaitPhaseKind> + '_ {
        self.phases.iter().map(|p| p.kind)
    }
}

impl TryFrom<Vec<PhaseSpec>> for LegCycle {
    type Error = ConfigError;

    fn try_from(phases: Vec<PhaseSpec>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<LegCycle> for Vec<PhaseSpec> {
    fn from(cycle: LegCycle) -> Self {
        cycle.phases
    }
}
