//! CAN ID 常量定义
//!
//! 执行器 MIT 指令使用扩展帧，ID 由指令前缀和驱动器 ID 组成：
//!
//! ```text
//! can_id = (MIT_COMMAND_PREFIX << 8) | driver_id
//! ```

/// MIT 指令前缀（高字节）
pub const MIT_COMMAND_PREFIX: u32 = 0x08;

/// 默认驱动器 ID：左髋
pub const DEFAULT_LEFT_HIP_ID: u8 = 0x61;

/// 默认驱动器 ID：左膝
pub const DEFAULT_LEFT_KNEE_ID: u8 = 0x62;

/// 默认驱动器 ID：右髋
pub const DEFAULT_RIGHT_HIP_ID: u8 = 0x63;

/// 默认驱动器 ID：右膝
pub const DEFAULT_RIGHT_KNEE_ID: u8 = 0x68;

/// 计算驱动器的 MIT 指令 CAN ID
#[inline]
pub const fn mit_command_id(driver_id: u8) -> u32 {
    (MIT_COMMAND_PREFIX << 8) | driver_id as u32
}

/// 从 CAN ID 中提取驱动器 ID（低 8 位）
#[inline]
pub const fn driver_id_of(can_id: u32) -> u8 {
    (can_id & 0xFF) as u8
}

/// 判断 CAN ID 是否为 MIT 指令
#[inline]
pub const fn is_mit_command_id(can_id: u32) -> bool {
    (can_id >> 8) == MIT_COMMAND_PREFIX
}
