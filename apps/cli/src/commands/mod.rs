//! 命令定义和实现

pub mod config;
pub mod decode;
pub mod frame;
pub mod run;

pub use config::ConfigCommand;
pub use decode::DecodeCommand;
pub use frame::FrameCommand;
pub use run::RunCommand;

use anyhow::Result;
use clap::ValueEnum;
use ease_gait::{GaitConfig, presets};

/// 内置步态
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 三相传感器步态
    Sensor,
    /// 五相轨迹回放步态
    Trajectory,
}

impl Preset {
    pub fn build(self, period_ms: u64) -> Result<GaitConfig> {
        Ok(match self {
            Preset::Sensor => presets::sensor_gait(),
            Preset::Trajectory => presets::trajectory_gait(period_ms)?,
        })
    }
}
