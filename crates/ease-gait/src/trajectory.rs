//! 轨迹回放表
//!
//! 有限、非空的采样序列，每个采样包含髋、膝两个关节的 (位置, 速度)。
//! 游标每个 tick 前进一格，到达末尾后停在最后一个采样（不回绕）。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::phase::LegTargets;

/// 轨迹回放表（保证非空）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LegTargets>", into = "Vec<LegTargets>")]
pub struct TrajectoryTable {
    samples: Vec<LegTargets>,
}

impl TrajectoryTable {
    /// 构造轨迹表，空序列返回 `ConfigError::EmptyTrajectory`
    pub fn new(samples: Vec<LegTargets>) -> Result<Self, ConfigError> {
        if samples.is_empty() {
            return Err(ConfigError::EmptyTrajectory);
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// 始终为 `false`，构造时已拒绝空表
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 最后一个采样的下标
    pub fn last_index(&self) -> usize {
        self.samples.len() - 1
    }

    /// 读取游标处的采样（只读，不前进）
    ///
    /// 越界游标按最后一个采样处理。
    pub fn sample(&self, cursor: usize) -> LegTargets {
        self.samples[cursor.min(self.last_index())]
    }

    /// 游标前进一格，停在 `len - 1`
    pub fn advance(&self, cursor: usize) -> usize {
        cursor.saturating_add(1).min(self.last_index())
    }

    pub fn samples(&self) -> &[LegTargets] {
        &self.samples
    }
}

impl TryFrom<Vec<LegTargets>> for TrajectoryTable {
    type Error = ConfigError;

    fn try_from(samples: Vec<LegTargets>) -> Result<Self, Self::Error> {
        Self::new(samples)
    }
}

impl From<TrajectoryTable> for Vec<LegTargets> {
    fn from(table: TrajectoryTable) -> Self {
        table.samples
    }
}
