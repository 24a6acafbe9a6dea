//! 协议字段范围常量
//!
//! 集中定义执行器 MIT 指令各字段的范围和位宽，避免在代码中散落"魔法数"。
//! 这些值是与执行器固件的兼容性约定，不要更改。

use crate::fixed_point::FieldRange;

/// 位置参考：-12.56 ~ 12.56 rad，16 位
pub const POSITION_RANGE: FieldRange = FieldRange::new(-12.56, 12.56, 16);

/// 速度参考：-33.0 ~ 33.0 rad/s，12 位
pub const VELOCITY_RANGE: FieldRange = FieldRange::new(-33.0, 33.0, 12);

/// 比例增益：0 ~ 500，12 位
pub const KP_RANGE: FieldRange = FieldRange::new(0.0, 500.0, 12);

/// 微分增益：0 ~ 5，12 位
pub const KD_RANGE: FieldRange = FieldRange::new(0.0, 5.0, 12);

/// 前馈力矩：-65 ~ 65 N·m，12 位
pub const TORQUE_RANGE: FieldRange = FieldRange::new(-65.0, 65.0, 12);

/// MIT 指令帧长度
pub const MOTOR_COMMAND_LEN: usize = 8;

/// 伺服模式反馈帧长度
pub const MOTOR_FEEDBACK_LEN: usize = 8;

/// 默认电机极对数（eRPM -> 机械 RPM 换算）
pub const DEFAULT_POLE_PAIRS: u32 = 21;

// 重新导出 CAN ID 常量（从 ids.rs）
pub use crate::ids::{MIT_COMMAND_PREFIX, mit_command_id};
