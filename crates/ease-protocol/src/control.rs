//! 控制帧结构体定义
//!
//! 关节执行器 MIT 指令的构建与解析。

use crate::constants::*;
use crate::ids::{driver_id_of, is_mit_command_id, mit_command_id};
use crate::{EaseFrame, ProtocolError};

// ============================================================================
// MIT 控制指令结构体
// ============================================================================

/// MIT 控制指令（扩展帧 `0x08xx`）
///
/// 一帧携带一个关节的位置参考、速度参考、比例增益、微分增益和前馈力矩。
/// 每个字段在打包前先饱和到协议范围内，超出范围的值不会被拒绝。
///
/// 注意：此指令使用跨字节的 12 位字段打包，布局是执行器固件的兼容性约定。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand {
    pub driver_id: u8,  // CAN ID 低字节
    pub position: f64,  // 位置参考 (rad)
    pub velocity: f64,  // 速度参考 (rad/s)
    pub kp: f64,        // 比例增益
    pub kd: f64,        // 微分增益
    pub torque_ff: f64, // 前馈力矩 (N·m)
}

/// 打包后的定点字段（原始整数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommandRaw {
    pub position: u32, // 16 位
    pub velocity: u32, // 12 位
    pub kp: u32,       // 12 位
    pub kd: u32,       // 12 位
    pub torque_ff: u32, // 12 位
}

impl MotorCommand {
    /// 创建 MIT 控制指令
    ///
    /// 参数范围（执行器固件约定，固定值，不要更改）：
    /// - position: -12.56 ~ 12.56 rad
    /// - velocity: -33.0 ~ 33.0 rad/s
    /// - kp: 0.0 ~ 500.0
    /// - kd: 0.0 ~ 5.0
    /// - torque_ff: -65.0 ~ 65.0 N·m
    pub fn new(
        driver_id: u8,
        position: f64,
        velocity: f64,
        kp: f64,
        kd: f64,
        torque_ff: f64,
    ) -> Self {
        Self {
            driver_id,
            position,
            velocity,
            kp,
            kd,
            torque_ff,
        }
    }

    /// 量化所有字段
    pub fn quantize(&self) -> MotorCommandRaw {
        MotorCommandRaw {
            position: POSITION_RANGE.encode(self.position),
            velocity: VELOCITY_RANGE.encode(self.velocity),
            kp: KP_RANGE.encode(self.kp),
            kd: KD_RANGE.encode(self.kd),
            torque_ff: TORQUE_RANGE.encode(self.torque_ff),
        }
    }

    /// 打包 8 字节负载
    ///
    /// 协议位域布局：
    /// - Byte 0: Kp [bit11~bit4]
    /// - Byte 1: Kp [bit3~bit0] | Kd [bit11~bit8] (跨字节打包)
    /// - Byte 2: Kd [bit7~bit0]
    /// - Byte 3-4: Pos (16位，高位在前)
    /// - Byte 5: Vel [bit11~bit4]
    /// - Byte 6: Vel [bit3~bit0] | T_ff [bit11~bit8] (跨字节打包)
    /// - Byte 7: T_ff [bit7~bit0]
    pub fn encode_payload(&self) -> [u8; MOTOR_COMMAND_LEN] {
        let raw = self.quantize();
        let mut data = [0u8; MOTOR_COMMAND_LEN];

        data[0] = ((raw.kp >> 4) & 0xFF) as u8;
        data[1] = (((raw.kp & 0x0F) << 4) | ((raw.kd >> 8) & 0x0F)) as u8;
        data[2] = (raw.kd & 0xFF) as u8;

        data[3] = ((raw.position >> 8) & 0xFF) as u8;
        data[4] = (raw.position & 0xFF) as u8;

        data[5] = ((raw.velocity >> 4) & 0xFF) as u8;
        data[6] = (((raw.velocity & 0x0F) << 4) | ((raw.torque_ff >> 8) & 0x0F)) as u8;
        data[7] = (raw.torque_ff & 0xFF) as u8;

        data
    }

    /// 转换为 CAN 帧（扩展帧）
    pub fn to_frame(self) -> EaseFrame {
        EaseFrame::new_extended(mit_command_id(self.driver_id), &self.encode_payload())
    }

    /// 从负载解出原始定点字段
    pub fn unpack_payload(data: &[u8; MOTOR_COMMAND_LEN]) -> MotorCommandRaw {
        let kp = ((data[0] as u32) << 4) | ((data[1] as u32) >> 4);
        let kd = (((data[1] as u32) & 0x0F) << 8) | data[2] as u32;
        let position = ((data[3] as u32) << 8) | data[4] as u32;
        let velocity = ((data[5] as u32) << 4) | ((data[6] as u32) >> 4);
        let torque_ff = (((data[6] as u32) & 0x0F) << 8) | data[7] as u32;

        MotorCommandRaw {
            position,
            velocity,
            kp,
            kd,
            torque_ff,
        }
    }
}

impl MotorCommandRaw {
    /// 反量化为工程单位（精度受量化步长限制）
    pub fn to_command(self, driver_id: u8) -> MotorCommand {
        MotorCommand {
            driver_id,
            position: POSITION_RANGE.decode(self.position),
            velocity: VELOCITY_RANGE.decode(self.velocity),
            kp: KP_RANGE.decode(self.kp),
            kd: KD_RANGE.decode(self.kd),
            torque_ff: TORQUE_RANGE.decode(self.torque_ff),
        }
    }
}

impl TryFrom<EaseFrame> for MotorCommand {
    type Error = ProtocolError;

    /// 解析 MIT 指令帧（用于诊断和录制回看）
    fn try_from(frame: EaseFrame) -> Result<Self, Self::Error> {
        // 验证 CAN ID
        if !frame.is_extended || !is_mit_command_id(frame.id) {
            return Err(ProtocolError::InvalidCanId { id: frame.id });
        }

        // 验证数据长度
        if (frame.len as usize) < MOTOR_COMMAND_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: MOTOR_COMMAND_LEN,
                actual: frame.len as usize,
            });
        }

        let raw = Self::unpack_payload(&frame.data);
        Ok(raw.to_command(driver_id_of(frame.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_command_new() {
        let cmd = MotorCommand::new(0x61, 1.0, 2.0, 40.0, 2.0, 0.1);
        assert_eq!(cmd.driver_id, 0x61);
        assert_eq!(cmd.position, 1.0);
        assert_eq!(cmd.velocity, 2.0);
        assert_eq!(cmd.kp, 40.0);
        assert_eq!(cmd.kd, 2.0);
        assert_eq!(cmd.torque_ff, 0.1);
    }

    #[test]
    fn test_golden_frame() {
        // 默认调参下的零位保持指令，字节必须与固件约定完全一致
        let frame = MotorCommand::new(0x61, 0.0, 0.0, 40.0, 2.0, 0.1).to_frame();

        assert_eq!(frame.id, 0x0861);
        assert!(frame.is_extended);
        assert_eq!(frame.len, 8);
        assert_eq!(
            frame.data,
            [0x14, 0x76, 0x66, 0x7F, 0xFF, 0x7F, 0xF8, 0x02]
        );
    }

    #[test]
    fn test_quantize_default_gains() {
        let raw = MotorCommand::new(0x61, 0.0, 0.0, 40.0, 2.0, 0.1).quantize();
        assert_eq!(raw.position, 0x7FFF);
        assert_eq!(raw.velocity, 0x7FF);
        assert_eq!(raw.kp, 327);
        assert_eq!(raw.kd, 1638);
        assert_eq!(raw.torque_ff, 2050);
    }

    #[test]
    fn test_frame_saturates_out_of_range() {
        // 超出范围的值被饱和，不会报错
        let max = MotorCommand::new(0x01, 100.0, 100.0, 1000.0, 10.0, 100.0).to_frame();
        assert_eq!(max.data, [0xFF; 8]);

        let min = MotorCommand::new(0x01, -100.0, -100.0, -1.0, -1.0, -100.0).to_frame();
        assert_eq!(min.data, [0x00; 8]);
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let cmd = MotorCommand::new(0x62, -0.4, 1.2, 40.0, 2.0, 0.1);
        let raw = MotorCommand::unpack_payload(&cmd.encode_payload());
        assert_eq!(raw, cmd.quantize());
    }

    #[test]
    fn test_try_from_frame() {
        let cmd = MotorCommand::new(0x63, 0.5, -1.0, 40.0, 2.0, 0.1);
        let decoded = MotorCommand::try_from(cmd.to_frame()).unwrap();

        assert_eq!(decoded.driver_id, 0x63);
        assert!((decoded.position - 0.5).abs() <= POSITION_RANGE.step());
        assert!((decoded.velocity + 1.0).abs() <= VELOCITY_RANGE.step());
        assert!((decoded.kp - 40.0).abs() <= KP_RANGE.step());
        assert!((decoded.kd - 2.0).abs() <= KD_RANGE.step());
        assert!((decoded.torque_ff - 0.1).abs() <= TORQUE_RANGE.step());
    }

    #[test]
    fn test_try_from_rejects_standard_frame() {
        let frame = EaseFrame::new_standard(0x0861, &[0; 8]);
        assert!(matches!(
            MotorCommand::try_from(frame),
            Err(ProtocolError::InvalidCanId { id: 0x0861 })
        ));
    }

    #[test]
    fn test_try_from_rejects_short_frame() {
        let frame = EaseFrame::new_extended(0x0861, &[0; 4]);
        assert!(matches!(
            MotorCommand::try_from(frame),
            Err(ProtocolError::InvalidLength {
                expected: 8,
                actual: 4
            })
        ));
    }
}
