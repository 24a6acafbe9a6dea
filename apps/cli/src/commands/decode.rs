//! decode 命令
//!
//! 解码 8 字节负载：默认按伺服模式反馈帧解析，`--command` 时按 MIT 指令解析

use anyhow::{Result, bail};
use clap::Args;
use ease_protocol::{
    DEFAULT_POLE_PAIRS, MOTOR_COMMAND_LEN, MotorCommand, MotorFeedback,
};

use crate::utils::{parse_driver_id, parse_payload};

/// 负载解码参数
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// 十六进制负载（如 `0384FFEB00962300` 或 `03 84 FF EB ...`）
    pub payload: String,

    /// 驱动器 ID（仅用于显示）
    #[arg(long, value_parser = parse_driver_id, default_value = "0")]
    pub id: u8,

    /// 电机极对数（eRPM → 机械 RPM）
    #[arg(long, default_value_t = DEFAULT_POLE_PAIRS)]
    pub pole_pairs: u32,

    /// 按 MIT 指令负载解码
    #[arg(long)]
    pub command: bool,
}

impl DecodeCommand {
    pub fn execute(&self) -> Result<()> {
        let data = parse_payload(&self.payload)?;
        let text = if self.command {
            decode_command(self.id, &data)?
        } else {
            decode_feedback(self.id, &data, self.pole_pairs)?
        };
        println!("{}", text);
        Ok(())
    }
}

fn decode_command(id: u8, data: &[u8]) -> Result<String> {
    let Ok(payload) = <[u8; MOTOR_COMMAND_LEN]>::try_from(data) else {
        bail!("MIT command payload must be {} bytes, got {}", MOTOR_COMMAND_LEN, data.len());
    };

    let raw = MotorCommand::unpack_payload(&payload);
    let cmd = raw.to_command(id);
    Ok(format!(
        "driver 0x{:02X}\n\
         position:  {:>9.4} rad   (raw {})\n\
         velocity:  {:>9.4} rad/s (raw {})\n\
         kp:        {:>9.4}       (raw {})\n\
         kd:        {:>9.4}       (raw {})\n\
         torque_ff: {:>9.4} N·m   (raw {})",
        cmd.driver_id,
        cmd.position,
        raw.position,
        cmd.velocity,
        raw.velocity,
        cmd.kp,
        raw.kp,
        cmd.kd,
        raw.kd,
        cmd.torque_ff,
        raw.torque_ff
    ))
}

fn decode_feedback(id: u8, data: &[u8], pole_pairs: u32) -> Result<String> {
    let fb = MotorFeedback::from_payload(id, data)?;
    let mech_rpm = match fb.speed_mech_rpm(pole_pairs) {
        Some(rpm) => format!("{:.1} RPM", rpm),
        None => "n/a (pole pairs = 0)".to_string(),
    };

    Ok(format!(
        "driver 0x{:02X}\n\
         position:    {:.1} deg ({:.4} rad)\n\
         speed:       {:.0} eRPM / {}\n\
         current:     {:.2} A\n\
         temperature: {} °C\n\
         fault:       {} ({})",
        fb.driver_id,
        fb.position_deg(),
        fb.position_rad(),
        fb.speed_erpm(),
        mech_rpm,
        fb.current_a(),
        fb.temperature_c,
        fb.fault.code(),
        fb.fault.description()
    ))
}
