//! 步态层错误类型定义

use thiserror::Error;

use crate::phase::GaitPhaseKind;
use crate::LegIdentity;

/// 配置错误
///
/// 构造期检查失败时返回，控制器拒绝启动。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 腿的相位循环为空
    #[error("Leg cycle has no phases")]
    EmptyCycle,

    /// 轨迹表为空
    #[error("Trajectory table is empty")]
    EmptyTrajectory,

    /// 同一循环内相位重复
    #[error("Phase {0} appears more than once in one leg cycle")]
    DuplicatePhase(GaitPhaseKind),

    /// 同一 CAN ID 分配给了多个关节
    #[error("Wire id 0x{id:02X} is assigned to more than one joint")]
    DuplicateJointId { id: u8 },

    /// 非有限数值（NaN / inf）
    #[error("Non-finite value in {field}")]
    NonFinite { field: String },

    /// 力传感器标定样本为空
    #[error("Force sensor calibration needs at least one sample")]
    EmptyCalibration,

    /// TOML 解析错误
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 读取配置文件失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 步态控制错误
#[derive(Error, Debug)]
pub enum GaitError {
    #[error("Invalid gait configuration: {0}")]
    Config(#[from] ConfigError),

    /// 指定相位不在该腿的循环中
    #[error("Phase {kind} is not part of the {leg} leg cycle")]
    PhaseNotInCycle { leg: LegIdentity, kind: GaitPhaseKind },
}
