//! 预置步态
//!
//! - [`sensor_gait`]: 三相传感器步态（Stance → SwingUp → SwingDown）
//! - [`trajectory_gait`]: 五相轨迹回放步态，回放录制的髋/膝角度表

use crate::controller::JointChannels;
use crate::config::GaitConfig;
use crate::error::ConfigError;
use crate::gait_tables::{GAIT_TABLE_LEN, HIP_LEFT, HIP_RIGHT, KNEE_LEFT, KNEE_RIGHT};
use crate::phase::{
    GaitPhaseKind, JointSetpoint, LegCycle, LegTargets, PhaseBehavior, PhaseSpec,
    TransitionCondition,
};
use crate::trajectory::TrajectoryTable;

/// Stance 保持时间（ms）
pub const STANCE_HOLD_MS: u64 = 1000;

/// SwingUp 姿态：髋、膝（rad）
pub const SWING_UP_POSE: (f64, f64) = (0.4, 0.6);

/// SwingDown 姿态：髋、膝（rad）
pub const SWING_DOWN_POSE: (f64, f64) = (-0.1, -0.3);

/// 轨迹回放步态的相位边界（步态周期百分比）
///
/// 初始着地、站立中期、站立末期、摆动中期、摆动末期的起点。
pub const TRAJECTORY_PHASE_PERCENT: [usize; 5] = [0, 2, 31, 62, 87];

/// 轨迹回放步态的相位顺序，与 [`TRAJECTORY_PHASE_PERCENT`] 对应
pub const TRAJECTORY_PHASE_KINDS: [GaitPhaseKind; 5] = [
    GaitPhaseKind::InitialContact,
    GaitPhaseKind::MidStance,
    GaitPhaseKind::TerminalStance,
    GaitPhaseKind::MidSwing,
    GaitPhaseKind::TerminalSwing,
];

/// 三相传感器步态
///
/// Stance 保持零位 1 s 后进入 SwingUp；SwingUp、SwingDown 由该腿传感器触发切换。
pub fn sensor_gait() -> GaitConfig {
    GaitConfig::new(JointChannels::default(), sensor_cycle(), sensor_cycle())
}

fn sensor_cycle() -> LegCycle {
    let pose = |(hip, knee): (f64, f64)| {
        PhaseBehavior::constant(JointSetpoint::hold(hip), JointSetpoint::hold(knee))
    };

    LegCycle::from_known_phases(vec![
        PhaseSpec::new(
            GaitPhaseKind::Stance,
            pose((0.0, 0.0)),
            TransitionCondition::ElapsedTime {
                threshold_ms: STANCE_HOLD_MS,
            },
        ),
        PhaseSpec::new(
            GaitPhaseKind::SwingUp,
            pose(SWING_UP_POSE),
            TransitionCondition::SensorEvent,
        ),
        PhaseSpec::new(
            GaitPhaseKind::SwingDown,
            pose(SWING_DOWN_POSE),
            TransitionCondition::SensorEvent,
        ),
    ])
}

/// 五相轨迹回放步态
///
/// 每个 tick 回放一个采样，`tick_period_ms` 为控制周期。
/// 每个相位的时长为 `(采样数 - 1) × tick_period_ms`，最后一个采样输出后的下一个 tick
/// 切换到下一相位。速度取相邻采样的前向差分（按周期回绕）。
/// 右腿回放自己的角度表，整体平移半个周期。
pub fn trajectory_gait(tick_period_ms: u64) -> Result<GaitConfig, ConfigError> {
    let period_ms = tick_period_ms.max(1);
    let left = replay_cycle(&HIP_LEFT, &KNEE_LEFT, period_ms, 0)?;
    let right = replay_cycle(&HIP_RIGHT, &KNEE_RIGHT, period_ms, GAIT_TABLE_LEN / 2)?;
    Ok(GaitConfig::new(JointChannels::default(), left, right))
}

/// 按百分比边界切分录制表
fn replay_cycle(
    hip: &[f64],
    knee: &[f64],
    period_ms: u64,
    shift: usize,
) -> Result<LegCycle, ConfigError> {
    let samples = sampled_cycle(hip, knee, period_ms as f64 / 1000.0, shift);
    let len = samples.len();

    let bounds: Vec<usize> = TRAJECTORY_PHASE_PERCENT
        .iter()
        .map(|&p| (p * len + 50) / 100)
        .chain(std::iter::once(len))
        .collect();

    let mut phases = Vec::with_capacity(TRAJECTORY_PHASE_KINDS.len());
    for (i, kind) in TRAJECTORY_PHASE_KINDS.iter().enumerate() {
        let table = TrajectoryTable::new(samples[bounds[i]..bounds[i + 1]].to_vec())?;
        let threshold_ms = (table.len() as u64 - 1) * period_ms;
        phases.push(PhaseSpec::new(
            *kind,
            PhaseBehavior::replay(table),
            TransitionCondition::ElapsedTime { threshold_ms },
        ));
    }

    LegCycle::new(phases)
}

/// 位置表 → (位置, 速度) 采样，`shift` 为循环左移的采样数
fn sampled_cycle(hip: &[f64], knee: &[f64], dt_s: f64, shift: usize) -> Vec<LegTargets> {
    let len = hip.len().min(knee.len());
    if len == 0 {
        return Vec::new();
    }

    let setpoint = |table: &[f64], i: usize| {
        let here = table[(i + shift) % len];
        let next = table[(i + shift + 1) % len];
        JointSetpoint::new(here, (next - here) / dt_s)
    };

    (0..len)
        .map(|i| LegTargets::new(setpoint(hip, i), setpoint(knee, i)))
        .collect()
}
