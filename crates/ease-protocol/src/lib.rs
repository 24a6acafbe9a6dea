//! # EASE Protocol
//!
//! 关节执行器 CAN 协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `fixed_point`: 浮点 <-> 定点整数转换（饱和、截断）
//! - `ids`: CAN ID 常量与关节地址
//! - `constants`: 协议字段范围常量
//! - `control`: 控制帧构建（MIT 指令）
//! - `feedback`: 反馈帧解析（伺服模式状态）
//!
//! ## 字节序
//!
//! 协议使用 Motorola (MSB) 高位在前（大端字节序）。
//! 本模块提供了字节序转换工具函数。

pub mod constants;
pub mod control;
pub mod feedback;
pub mod fixed_point;
pub mod ids;

// 重新导出常用类型
pub use constants::*;
pub use control::*;
pub use feedback::*;
pub use fixed_point::*;
pub use ids::*;

/// CAN 2.0 帧的统一抽象
///
/// # 设计目的
///
/// `EaseFrame` 是协议层和硬件层之间的中间抽象：
/// - **层次解耦**：协议层不依赖底层 CAN 实现（SocketCAN / Mock）
/// - **统一接口**：上层通过 `BusTransmitter` trait 使用统一的帧类型
///
/// # 在架构中的位置
///
/// ```text
/// Protocol Layer (ease-protocol)
///     ↓ MotorCommand::to_frame() 构建 / TryFrom<EaseFrame> 解析
/// EaseFrame (此类型)
///     ↓ 转换逻辑在 CAN 层实现
/// CAN Layer (ease-can)
///     ↓ SocketCAN 适配器
/// Hardware
/// ```
///
/// # 转换示例
///
/// ```rust
/// use ease_protocol::EaseFrame;
///
/// // 创建扩展帧
/// let frame = EaseFrame::new_extended(0x0861, &[1, 2, 3, 4]);
///
/// assert_eq!(frame.id(), 0x0861);
/// assert!(frame.is_extended);
/// assert_eq!(frame.data_slice(), &[1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaseFrame {
    /// CAN ID（标准帧或扩展帧）
    pub id: u32,

    /// 帧数据（固定 8 字节，未使用部分为 0）
    pub data: [u8; 8],

    /// 有效数据长度 (0-8)
    pub len: u8,

    /// 是否为扩展帧（29-bit ID）
    pub is_extended: bool,
}

impl EaseFrame {
    /// 创建标准帧
    pub fn new_standard(id: u16, data: &[u8]) -> Self {
        Self::new(id as u32, data, false)
    }

    /// 创建扩展帧
    pub fn new_extended(id: u32, data: &[u8]) -> Self {
        Self::new(id, data, true)
    }

    fn new(id: u32, data: &[u8], is_extended: bool) -> Self {
        let mut fixed_data = [0u8; 8];
        let len = data.len().min(8);
        fixed_data[..len].copy_from_slice(&data[..len]);

        Self {
            id,
            data: fixed_data,
            len: len as u8,
            is_extended,
        }
    }

    /// 获取数据切片（只包含有效数据）
    pub fn data_slice(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// 获取 CAN ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// 获取完整数据（8字节固定数组）
    pub fn data(&self) -> &[u8; 8] {
        &self.data
    }
}

use thiserror::Error;

/// 协议解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid frame length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid CAN ID: 0x{id:X}")]
    InvalidCanId { id: u32 },
}

/// 大端字节序转 i16
pub fn bytes_to_i16_be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// i16 转大端字节序
pub fn i16_to_bytes_be(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_extended_pads_data() {
        let frame = EaseFrame::new_extended(0x0861, &[0xAA, 0xBB]);
        assert_eq!(frame.len, 2);
        assert_eq!(frame.data, [0xAA, 0xBB, 0, 0, 0, 0, 0, 0]);
        assert_eq!(frame.data_slice(), &[0xAA, 0xBB]);
        assert!(frame.is_extended);
    }

    #[test]
    fn test_new_standard_truncates_long_payload() {
        let frame = EaseFrame::new_standard(0x123, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(frame.len, 8);
        assert_eq!(frame.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!frame.is_extended);
        assert_eq!(frame.id(), 0x123);
    }

    #[test]
    fn test_bytes_to_i16_be() {
        assert_eq!(bytes_to_i16_be([0x12, 0x34]), 0x1234);
        assert_eq!(bytes_to_i16_be([0xFF, 0xFF]), -1);
    }

    #[test]
    fn test_i16_to_bytes_be() {
        assert_eq!(i16_to_bytes_be(0x1234), [0x12, 0x34]);
        assert_eq!(i16_to_bytes_be(-1), [0xFF, 0xFF]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_frame_serde_json() {
        let frame = EaseFrame::new_extended(0x0862, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let json = serde_json::to_string(&frame).unwrap();
        let back: EaseFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }
}
