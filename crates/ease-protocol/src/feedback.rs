//! 反馈帧结构体定义
//!
//! 执行器伺服模式周期性上报的状态帧（8 字节，大端）：
//!
//! | Byte | 内容 | 比例 |
//! |------|------|------|
//! | 0-1 | 位置 int16 | 0.1 deg |
//! | 2-3 | 速度 int16 | 10 eRPM |
//! | 4-5 | 电流 int16 | 0.01 A |
//! | 6 | 温度 int8 | 1 °C |
//! | 7 | 故障码 u8 | - |

use num_enum::FromPrimitive;

use crate::constants::{DEFAULT_POLE_PAIRS, MOTOR_FEEDBACK_LEN};
use crate::{EaseFrame, ProtocolError, bytes_to_i16_be};

/// 驱动器故障码
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum MotorFault {
    /// 正常
    Ok = 0,
    /// 电机过温
    MotorOverTemperature = 1,
    /// 过流
    OverCurrent = 2,
    /// 过压
    OverVoltage = 3,
    /// 欠压
    UnderVoltage = 4,
    /// 编码器故障
    EncoderFault = 5,
    /// MOSFET 过温
    MosfetOverTemperature = 6,
    /// 电机堵转
    MotorLock = 7,
    /// 未知故障码（原值保留）
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MotorFault {
    /// 原始故障码
    pub fn code(&self) -> u8 {
        match *self {
            MotorFault::Ok => 0,
            MotorFault::MotorOverTemperature => 1,
            MotorFault::OverCurrent => 2,
            MotorFault::OverVoltage => 3,
            MotorFault::UnderVoltage => 4,
            MotorFault::EncoderFault => 5,
            MotorFault::MosfetOverTemperature => 6,
            MotorFault::MotorLock => 7,
            MotorFault::Unknown(code) => code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, MotorFault::Ok)
    }

    /// 故障描述
    pub fn description(&self) -> String {
        match self {
            MotorFault::Ok => "OK".to_string(),
            MotorFault::MotorOverTemperature => "Motor Over-Temp".to_string(),
            MotorFault::OverCurrent => "Over-Current".to_string(),
            MotorFault::OverVoltage => "Over-Voltage".to_string(),
            MotorFault::UnderVoltage => "Under-Voltage".to_string(),
            MotorFault::EncoderFault => "Encoder Fault".to_string(),
            MotorFault::MosfetOverTemperature => "MOSFET Over-Temp".to_string(),
            MotorFault::MotorLock => "Motor Lock".to_string(),
            MotorFault::Unknown(code) => format!("Unknown({})", code),
        }
    }
}

/// 伺服模式状态反馈
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorFeedback {
    /// 驱动器 ID（CAN ID 低字节）
    pub driver_id: u8,
    pub position_raw: i16,
    pub speed_raw: i16,
    pub current_raw: i16,
    /// 温度（°C）
    pub temperature_c: i8,
    pub fault: MotorFault,
}

impl MotorFeedback {
    /// 从 8 字节负载解析
    pub fn from_payload(driver_id: u8, data: &[u8]) -> Result<Self, ProtocolError> {
        if data.len() < MOTOR_FEEDBACK_LEN {
            return Err(ProtocolError::InvalidLength {
                expected: MOTOR_FEEDBACK_LEN,
                actual: data.len(),
            });
        }

        Ok(Self {
            driver_id,
            position_raw: bytes_to_i16_be([data[0], data[1]]),
            speed_raw: bytes_to_i16_be([data[2], data[3]]),
            current_raw: bytes_to_i16_be([data[4], data[5]]),
            temperature_c: data[6] as i8,
            fault: MotorFault::from(data[7]),
        })
    }

    /// 位置（度）
    pub fn position_deg(&self) -> f64 {
        self.position_raw as f64 * 0.1
    }

    /// 位置（弧度）
    pub fn position_rad(&self) -> f64 {
        self.position_deg().to_radians()
    }

    /// 电角速度（eRPM）
    pub fn speed_erpm(&self) -> f64 {
        self.speed_raw as f64 * 10.0
    }

    /// 机械转速（RPM）
    ///
    /// `pole_pairs` 为 0 时返回 `None`
    pub fn speed_mech_rpm(&self, pole_pairs: u32) -> Option<f64> {
        if pole_pairs == 0 {
            None
        } else {
            Some(self.speed_erpm() / pole_pairs as f64)
        }
    }

    /// 按默认极对数换算的机械转速（RPM）
    pub fn speed_mech_rpm_default(&self) -> f64 {
        self.speed_erpm() / DEFAULT_POLE_PAIRS as f64
    }

    /// 电流（A）
    pub fn current_a(&self) -> f64 {
        self.current_raw as f64 * 0.01
    }
}

impl TryFrom<EaseFrame> for MotorFeedback {
    type Error = ProtocolError;

    fn try_from(frame: EaseFrame) -> Result<Self, Self::Error> {
        Self::from_payload((frame.id & 0xFF) as u8, frame.data_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motor_fault_from_u8() {
        assert_eq!(MotorFault::from(0), MotorFault::Ok);
        assert_eq!(MotorFault::from(2), MotorFault::OverCurrent);
        assert_eq!(MotorFault::from(7), MotorFault::MotorLock);
        assert_eq!(MotorFault::from(42), MotorFault::Unknown(42));
    }

    #[test]
    fn test_motor_fault_code_roundtrip() {
        for code in 0u8..=10 {
            assert_eq!(MotorFault::from(code).code(), code);
        }
    }

    #[test]
    fn test_motor_fault_description() {
        assert_eq!(MotorFault::Ok.description(), "OK");
        assert_eq!(MotorFault::EncoderFault.description(), "Encoder Fault");
        assert_eq!(MotorFault::Unknown(9).description(), "Unknown(9)");
        assert!(MotorFault::Ok.is_ok());
        assert!(!MotorFault::MotorLock.is_ok());
    }

    #[test]
    fn test_parse_feedback() {
        // 位置 900 (90.0°)，速度 -21 (-210 eRPM)，电流 150 (1.5 A)，温度 35°C，无故障
        let data = [0x03, 0x84, 0xFF, 0xEB, 0x00, 0x96, 35, 0x00];
        let fb = MotorFeedback::from_payload(0x61, &data).unwrap();

        assert_eq!(fb.driver_id, 0x61);
        assert!((fb.position_deg() - 90.0).abs() < 1e-9);
        assert!((fb.position_rad() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((fb.speed_erpm() + 210.0).abs() < 1e-9);
        assert!((fb.speed_mech_rpm(21).unwrap() + 10.0).abs() < 1e-9);
        assert!((fb.speed_mech_rpm_default() + 10.0).abs() < 1e-9);
        assert_eq!(fb.speed_mech_rpm(0), None);
        assert!((fb.current_a() - 1.5).abs() < 1e-9);
        assert_eq!(fb.temperature_c, 35);
        assert!(fb.fault.is_ok());
    }

    #[test]
    fn test_parse_negative_temperature_and_fault() {
        let data = [0, 0, 0, 0, 0, 0, 0xF6, 0x05];
        let fb = MotorFeedback::from_payload(0x62, &data).unwrap();
        assert_eq!(fb.temperature_c, -10);
        assert_eq!(fb.fault, MotorFault::EncoderFault);
    }

    #[test]
    fn test_parse_short_payload() {
        let result = MotorFeedback::from_payload(0x61, &[0; 6]);
        assert_eq!(
            result,
            Err(ProtocolError::InvalidLength {
                expected: 8,
                actual: 6
            })
        );
    }

    #[test]
    fn test_try_from_frame_uses_low_byte_as_driver_id() {
        let frame = EaseFrame::new_extended(0x2968, &[0, 10, 0, 0, 0, 0, 20, 0]);
        let fb = MotorFeedback::try_from(frame).unwrap();
        assert_eq!(fb.driver_id, 0x68);
        assert!((fb.position_deg() - 1.0).abs() < 1e-9);
    }
}
