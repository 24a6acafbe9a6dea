//! # 步态配置
//!
//! 构造期配置：每条腿的相位循环 + 四个关节通道，可从 TOML 加载。
//!
//! ```toml
//! [joints.left_hip]
//! id = 0x61
//! kp = 40.0
//! kd = 2.0
//! torque_ff = 0.1
//! # ... left_knee / right_hip / right_knee
//!
//! [[left]]
//! kind = "stance"
//! condition = { type = "elapsed_time", threshold_ms = 1000 }
//! behavior = { type = "constant_target", hip = { position = 0.0 }, knee = { position = 0.0 } }
//!
//! [[left]]
//! kind = "swing_up"
//! condition = { type = "sensor_event" }
//! behavior = { type = "constant_target", hip = { position = 0.4 }, knee = { position = 0.6 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::JointChannels;
use crate::error::ConfigError;
use crate::leg::LegIdentity;
use crate::phase::LegCycle;

/// 步态配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitConfig {
    /// 关节通道（缺省为出厂 ID 和增益）
    #[serde(default)]
    pub joints: JointChannels,

    /// 左腿相位循环
    pub left: LegCycle,

    /// 右腿相位循环
    pub right: LegCycle,
}

impl GaitConfig {
    pub fn new(joints: JointChannels, left: LegCycle, right: LegCycle) -> Self {
        Self {
            joints,
            left,
            right,
        }
    }

    /// 从 TOML 字符串解析并校验
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GaitConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 序列化为 TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// 校验配置
    ///
    /// `LegCycle` 在构造/反序列化时已校验（非空、不重复、有限值），
    /// 这里只检查关节通道。
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.joints.validate()
    }

    pub fn cycle(&self, leg: LegIdentity) -> &LegCycle {
        match leg {
            LegIdentity::Left => &self.left,
            LegIdentity::Right => &self.right,
        }
    }
}
