//! # EASE Gait Control
//!
//! 外骨骼双腿步态控制核心：每条腿一个相位状态机，控制器每个 tick 汇总
//! 四个关节目标并编码成执行器指令帧发送。
//!
//! ## 模块
//!
//! - `phase`: 相位标识、相位行为、切换条件、腿的相位循环
//! - `trajectory`: 轨迹回放表
//! - `leg`: 单腿步态状态机
//! - `controller`: 四关节控制器（tick → 4 帧）
//! - `clock` / `sensor`: 外部协作者（毫秒时钟、每腿触发信号、力传感器阈值）
//! - `config`: TOML 配置
//! - `presets`: 内置步态
//!
//! ## 示例
//!
//! ```rust
//! use ease_can::MockTransmitter;
//! use ease_gait::{GaitController, GaitPhaseKind, presets};
//!
//! let mut ctrl = GaitController::new(presets::sensor_gait(), MockTransmitter::new(), 0).unwrap();
//!
//! let report = ctrl.tick(1001, false, false);
//! assert!(report.all_sent());
//! assert_eq!(ctrl.leg(ease_gait::LegIdentity::Left).phase(), GaitPhaseKind::SwingUp);
//! assert_eq!(ctrl.transmitter().sent().len(), 4);
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
mod gait_tables;
pub mod leg;
pub mod phase;
pub mod presets;
pub mod sensor;
pub mod trajectory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GaitConfig;
pub use controller::{
    GaitController, JointChannel, JointChannels, JointId, JointTarget, TickReport, TransmitStats,
};
pub use error::{ConfigError, GaitError};
pub use leg::{LegGaitStateMachine, LegIdentity, LegState, PhaseTransition};
pub use phase::{
    GaitPhaseKind, JointSetpoint, LegCycle, LegTargets, PhaseBehavior, PhaseSpec,
    TransitionCondition,
};
pub use sensor::{
    EdgeDetector, ForceSensorTrigger, ForceThreshold, NoSensors, SensorFn, SensorTrigger,
};
pub use trajectory::TrajectoryTable;

pub use gait_tables::GAIT_TABLE_LEN;
