//! 四关节步态控制器
//!
//! 持有左右两条腿的状态机、四个关节通道和总线发送端。每个 tick：
//!
//! ```text
//! now + 传感器 → 左腿状态机 / 右腿状态机
//!             → 4 个 JointTarget（左髋、左膝、右髋、右膝）
//!             → MotorCommand::to_frame()（关节固定增益）
//!             → BusTransmitter::send() × 4
//! ```
//!
//! 单个关节发送失败只记录日志和计数，其余关节照常发送，状态机不受影响。

use ease_can::{BusTransmitter, CanError};
use ease_protocol::{
    DEFAULT_LEFT_HIP_ID, DEFAULT_LEFT_KNEE_ID, DEFAULT_RIGHT_HIP_ID, DEFAULT_RIGHT_KNEE_ID,
    MotorCommand,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::clock::Clock;
use crate::config::GaitConfig;
use crate::error::{ConfigError, GaitError};
use crate::leg::{LegGaitStateMachine, LegIdentity, PhaseTransition};
use crate::phase::{GaitPhaseKind, LegTargets};
use crate::sensor::SensorTrigger;

/// 默认比例增益
pub const DEFAULT_KP: f64 = 40.0;
/// 默认微分增益
pub const DEFAULT_KD: f64 = 2.0;
/// 默认前馈力矩（N·m）
pub const DEFAULT_TORQUE_FF: f64 = 0.1;

/// 关节标识（固定发送顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointId {
    LeftHip,
    LeftKnee,
    RightHip,
    RightKnee,
}

impl JointId {
    /// 发送顺序
    pub const ALL: [JointId; 4] = [
        JointId::LeftHip,
        JointId::LeftKnee,
        JointId::RightHip,
        JointId::RightKnee,
    ];

    pub fn leg(&self) -> LegIdentity {
        match self {
            JointId::LeftHip | JointId::LeftKnee => LegIdentity::Left,
            JointId::RightHip | JointId::RightKnee => LegIdentity::Right,
        }
    }

    pub fn is_hip(&self) -> bool {
        matches!(self, JointId::LeftHip | JointId::RightHip)
    }

    pub fn name(&self) -> &'static str {
        match self {
            JointId::LeftHip => "left_hip",
            JointId::LeftKnee => "left_knee",
            JointId::RightHip => "right_hip",
            JointId::RightKnee => "right_knee",
        }
    }
}

impl std::fmt::Display for JointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 单关节目标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTarget {
    pub joint: JointId,
    /// 位置（rad）
    pub position: f64,
    /// 速度（rad/s）
    pub velocity: f64,
}

/// 关节通道：CAN 驱动器 ID + 固定增益
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointChannel {
    pub id: u8,
    #[serde(default = "default_kp")]
    pub kp: f64,
    #[serde(default = "default_kd")]
    pub kd: f64,
    #[serde(default = "default_torque_ff")]
    pub torque_ff: f64,
}

fn default_kp() -> f64 {
    DEFAULT_KP
}

fn default_kd() -> f64 {
    DEFAULT_KD
}

fn default_torque_ff() -> f64 {
    DEFAULT_TORQUE_FF
}

impl JointChannel {
    /// 默认增益
    pub const fn new(id: u8) -> Self {
        Self {
            id,
            kp: DEFAULT_KP,
            kd: DEFAULT_KD,
            torque_ff: DEFAULT_TORQUE_FF,
        }
    }

    pub const fn with_gains(id: u8, kp: f64, kd: f64, torque_ff: f64) -> Self {
        Self {
            id,
            kp,
            kd,
            torque_ff,
        }
    }

    /// 构建该关节的 MIT 指令
    pub fn command(&self, position: f64, velocity: f64) -> MotorCommand {
        MotorCommand::new(self.id, position, velocity, self.kp, self.kd, self.torque_ff)
    }

    fn is_finite(&self) -> bool {
        self.kp.is_finite() && self.kd.is_finite() && self.torque_ff.is_finite()
    }
}

/// 四个关节通道
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointChannels {
    pub left_hip: JointChannel,
    pub left_knee: JointChannel,
    pub right_hip: JointChannel,
    pub right_knee: JointChannel,
}

impl Default for JointChannels {
    fn default() -> Self {
        Self {
            left_hip: JointChannel::new(DEFAULT_LEFT_HIP_ID),
            left_knee: JointChannel::new(DEFAULT_LEFT_KNEE_ID),
            right_hip: JointChannel::new(DEFAULT_RIGHT_HIP_ID),
            right_knee: JointChannel::new(DEFAULT_RIGHT_KNEE_ID),
        }
    }
}

impl JointChannels {
    pub fn get(&self, joint: JointId) -> &JointChannel {
        match joint {
            JointId::LeftHip => &self.left_hip,
            JointId::LeftKnee => &self.left_knee,
            JointId::RightHip => &self.right_hip,
            JointId::RightKnee => &self.right_knee,
        }
    }

    /// ID 不重复，增益均为有限值
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, a) in JointId::ALL.iter().enumerate() {
            let channel = self.get(*a);
            if !channel.is_finite() {
                return Err(ConfigError::NonFinite {
                    field: format!("{} gains", a),
                });
            }
            if JointId::ALL[i + 1..].iter().any(|b| self.get(*b).id == channel.id) {
                return Err(ConfigError::DuplicateJointId { id: channel.id });
            }
        }
        Ok(())
    }
}

/// 单个 tick 的结果
#[derive(Debug)]
pub struct TickReport {
    /// 本 tick 使用的时间（ms）
    pub now: u64,
    /// 四个关节目标（发送顺序）
    pub targets: [JointTarget; 4],
    /// 对应的发送结果
    pub outcomes: [Result<(), CanError>; 4],
    /// 左、右腿本 tick 的相位切换
    pub transitions: [Option<PhaseTransition>; 2],
}

impl TickReport {
    pub fn all_sent(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_ok())
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    pub fn target(&self, joint: JointId) -> &JointTarget {
        // targets 与 JointId::ALL 同序
        &self.targets[joint as usize]
    }
}

/// 发送统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransmitStats {
    pub ticks: u64,
    pub frames_sent: u64,
    pub frames_failed: u64,
}

/// 步态控制器
pub struct GaitController<T: BusTransmitter> {
    left: LegGaitStateMachine,
    right: LegGaitStateMachine,
    joints: JointChannels,
    transmitter: T,
    stats: TransmitStats,
}

impl<T: BusTransmitter> GaitController<T> {
    /// 校验配置并在 `now` 时刻启动两条腿
    pub fn new(config: GaitConfig, transmitter: T, now: u64) -> Result<Self, GaitError> {
        config.validate()?;
        let GaitConfig {
            joints,
            left,
            right,
        } = config;

        info!(
            "Gait controller starting: joints 0x{:02X}/0x{:02X}/0x{:02X}/0x{:02X}",
            joints.left_hip.id, joints.left_knee.id, joints.right_hip.id, joints.right_knee.id
        );

        Ok(Self {
            left: LegGaitStateMachine::new(LegIdentity::Left, left, now),
            right: LegGaitStateMachine::new(LegIdentity::Right, right, now),
            joints,
            transmitter,
            stats: TransmitStats::default(),
        })
    }

    /// 一个控制周期：两条腿各推进一次，然后按固定顺序发送 4 帧
    pub fn tick(&mut self, now: u64, left_triggered: bool, right_triggered: bool) -> TickReport {
        let transitions = [
            self.left.tick(now, left_triggered),
            self.right.tick(now, right_triggered),
        ];

        let targets = self.targets();
        let outcomes = targets.map(|target| self.dispatch(&target));

        self.stats.ticks += 1;
        let report = TickReport {
            now,
            targets,
            outcomes,
            transitions,
        };
        debug!(
            "tick {} @ {} ms: left={} right={} failures={}",
            self.stats.ticks,
            now,
            self.left.phase(),
            self.right.phase(),
            report.failures()
        );
        report
    }

    /// 读一次时钟、每条腿读一次传感器，然后执行 [`tick`](Self::tick)
    pub fn tick_with<C, S>(&mut self, clock: &C, sensors: &mut S) -> TickReport
    where
        C: Clock + ?Sized,
        S: SensorTrigger + ?Sized,
    {
        let now = clock.now_millis();
        let left = sensors.is_triggered(LegIdentity::Left);
        let right = sensors.is_triggered(LegIdentity::Right);
        self.tick(now, left, right)
    }

    /// 外部指令切换相位；新相位的目标在下一次 tick 发送
    pub fn force_phase(
        &mut self,
        leg: LegIdentity,
        kind: GaitPhaseKind,
        now: u64,
    ) -> Result<PhaseTransition, GaitError> {
        self.leg_mut(leg).enter_phase(kind, now)
    }

    /// 当前四个关节目标（不推进状态）
    pub fn targets(&self) -> [JointTarget; 4] {
        let left = self.left.targets();
        let right = self.right.targets();
        JointId::ALL.map(|joint| {
            let leg_targets: &LegTargets = match joint.leg() {
                LegIdentity::Left => &left,
                LegIdentity::Right => &right,
            };
            let setpoint = if joint.is_hip() {
                leg_targets.hip
            } else {
                leg_targets.knee
            };
            JointTarget {
                joint,
                position: setpoint.position,
                velocity: setpoint.velocity,
            }
        })
    }

    pub fn leg(&self, leg: LegIdentity) -> &LegGaitStateMachine {
        match leg {
            LegIdentity::Left => &self.left,
            LegIdentity::Right => &self.right,
        }
    }

    fn leg_mut(&mut self, leg: LegIdentity) -> &mut LegGaitStateMachine {
        match leg {
            LegIdentity::Left => &mut self.left,
            LegIdentity::Right => &mut self.right,
        }
    }

    pub fn joints(&self) -> &JointChannels {
        &self.joints
    }

    pub fn stats(&self) -> TransmitStats {
        self.stats
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    pub fn into_transmitter(self) -> T {
        self.transmitter
    }

    fn dispatch(&mut self, target: &JointTarget) -> Result<(), CanError> {
        let channel = self.joints.get(target.joint);
        let frame = channel.command(target.position, target.velocity).to_frame();
        trace!(
            "{} -> ID=0x{:X} data={:02X?}",
            target.joint,
            frame.id,
            frame.data_slice()
        );

        match self.transmitter.send(frame) {
            Ok(()) => {
                self.stats.frames_sent += 1;
                Ok(())
            },
            Err(e) => {
                self.stats.frames_failed += 1;
                warn!("Failed to send {} command (ID=0x{:X}): {}", target.joint, frame.id, e);
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::phase::{JointSetpoint, LegCycle, PhaseBehavior, PhaseSpec, TransitionCondition};
    use crate::sensor::SensorFn;
    use ease_can::MockTransmitter;
    use ease_protocol::mit_command_id;

    fn constant_cycle(hip: f64, knee: f64) -> LegCycle {
        LegCycle::new(vec![PhaseSpec::new(
            GaitPhaseKind::Stance,
            PhaseBehavior::constant(JointSetpoint::new(hip, 0.5), JointSetpoint::hold(knee)),
            TransitionCondition::Never,
        )])
        .unwrap()
    }

    fn config() -> GaitConfig {
        GaitConfig {
            joints: JointChannels::default(),
            left: constant_cycle(0.1, 0.2),
            right: constant_cycle(-0.1, -0.2),
        }
    }

    #[test]
    fn test_tick_dispatch_order_and_targets() {
        let mut ctrl = GaitController::new(config(), MockTransmitter::new(), 0).unwrap();
        let report = ctrl.tick(10, false, false);

        assert!(report.all_sent());
        let ids: Vec<u32> = ctrl.transmitter().sent().iter().map(|f| f.id).collect();
        assert_eq!(
            ids,
            vec![
                mit_command_id(0x61),
                mit_command_id(0x62),
                mit_command_id(0x63),
                mit_command_id(0x68)
            ]
        );

        assert_eq!(report.target(JointId::LeftHip).position, 0.1);
        assert_eq!(report.target(JointId::LeftHip).velocity, 0.5);
        assert_eq!(report.target(JointId::LeftKnee).position, 0.2);
        assert_eq!(report.target(JointId::RightHip).position, -0.1);
        assert_eq!(report.target(JointId::RightKnee).position, -0.2);
        for (i, joint) in JointId::ALL.iter().enumerate() {
            assert_eq!(report.targets[i].joint, *joint);
        }
    }

    #[test]
    fn test_failed_send_does_not_stop_other_joints() {
        let mut mock = MockTransmitter::new();
        mock.fail_id(mit_command_id(0x62));
        let mut ctrl = GaitController::new(config(), mock, 0).unwrap();

        let report = ctrl.tick(10, false, false);
        assert_eq!(report.failures(), 1);
        assert!(report.outcomes[1].is_err());
        assert_eq!(ctrl.transmitter().attempts().len(), 4);
        assert_eq!(ctrl.transmitter().sent().len(), 3);
        assert_eq!(
            ctrl.stats(),
            TransmitStats {
                ticks: 1,
                frames_sent: 3,
                frames_failed: 1
            }
        );
    }

    #[test]
    fn test_duplicate_joint_ids_rejected() {
        let mut cfg = config();
        cfg.joints.right_knee.id = cfg.joints.left_hip.id;
        assert!(matches!(
            GaitController::new(cfg, MockTransmitter::new(), 0),
            Err(GaitError::Config(ConfigError::DuplicateJointId { id: 0x61 }))
        ));
    }

    #[test]
    fn test_non_finite_gain_rejected() {
        let mut cfg = config();
        cfg.joints.left_knee.kd = f64::INFINITY;
        assert!(matches!(
            GaitController::new(cfg, MockTransmitter::new(), 0),
            Err(GaitError::Config(ConfigError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_tick_with_reads_clock_and_sensors_once() {
        let mut ctrl = GaitController::new(config(), MockTransmitter::new(), 0).unwrap();
        let clock = ManualClock::new(25);
        let mut reads = Vec::new();
        let mut sensors = SensorFn(|leg: LegIdentity| {
            reads.push(leg);
            false
        });

        let report = ctrl.tick_with(&clock, &mut sensors);
        drop(sensors);
        assert_eq!(report.now, 25);
        assert_eq!(reads, vec![LegIdentity::Left, LegIdentity::Right]);
    }

    #[test]
    fn test_force_phase_unknown_kind() {
        let mut ctrl = GaitController::new(config(), MockTransmitter::new(), 0).unwrap();
        assert!(matches!(
            ctrl.force_phase(LegIdentity::Right, GaitPhaseKind::SwingUp, 5),
            Err(GaitError::PhaseNotInCycle {
                leg: LegIdentity::Right,
                ..
            })
        ));
        assert!(ctrl.force_phase(LegIdentity::Right, GaitPhaseKind::Stance, 5).is_ok());
        assert_eq!(ctrl.leg(LegIdentity::Right).transitions(), 1);
    }

    #[test]
    fn test_joint_channel_defaults() {
        let joints = JointChannels::default();
        assert_eq!(joints.get(JointId::RightKnee).id, 0x68);
        assert_eq!(joints.left_hip.kp, DEFAULT_KP);
        assert_eq!(joints.left_hip.kd, DEFAULT_KD);
        assert_eq!(joints.left_hip.torque_ff, DEFAULT_TORQUE_FF);
        assert!(joints.validate().is_ok());
        assert_eq!(JointId::RightKnee.leg(), LegIdentity::Right);
        assert!(!JointId::RightKnee.is_hip());
    }

    #[test]
    fn test_into_transmitter() {
        let mut ctrl = GaitController::new(config(), MockTransmitter::new(), 0).unwrap();
        ctrl.tick(1, false, false);
        ctrl.transmitter_mut().clear();
        ctrl.tick(2, false, false);
        let mock = ctrl.into_transmitter();
        assert_eq!(mock.sent().len(), 4);
    }
}
