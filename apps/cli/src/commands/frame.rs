//! frame 命令
//!
//! 编码一帧关节 MIT 指令并打印 CAN ID 与负载

use anyhow::Result;
use clap::Args;
use ease_gait::controller::{DEFAULT_KD, DEFAULT_KP, DEFAULT_TORQUE_FF};
use ease_protocol::{EaseFrame, MotorCommand};

use crate::utils::{format_bytes, parse_driver_id};

/// 指令编码参数
#[derive(Args, Debug)]
pub struct FrameCommand {
    /// 驱动器 ID（如 0x61）
    #[arg(short, long, value_parser = parse_driver_id)]
    pub joint: u8,

    /// 目标位置（rad）
    #[arg(short, long, allow_negative_numbers = true)]
    pub position: f64,

    /// 目标速度（rad/s）
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub velocity: f64,

    /// 比例增益
    #[arg(long, default_value_t = DEFAULT_KP)]
    pub kp: f64,

    /// 微分增益
    #[arg(long, default_value_t = DEFAULT_KD)]
    pub kd: f64,

    /// 前馈力矩（N·m）
    #[arg(long, default_value_t = DEFAULT_TORQUE_FF, allow_negative_numbers = true)]
    pub torque: f64,
}

impl FrameCommand {
    pub fn command(&self) -> MotorCommand {
        MotorCommand::new(self.joint, self.position, self.velocity, self.kp, self.kd, self.torque)
    }

    pub fn execute(&self) -> Result<()> {
        let cmd = self.command();
        let frame = cmd.to_frame();
        println!("{}", render(&cmd, &frame));
        Ok(())
    }
}

fn render(cmd: &MotorCommand, frame: &EaseFrame) -> String {
    let raw = cmd.quantize();
    format!(
        "ID:   0x{:04X} (extended)\n\
         data: {}\n\
         raw:  position={} velocity={} kp={} kd={} torque={}",
        frame.id,
        format_bytes(frame.data_slice()),
        raw.position,
        raw.velocity,
        raw.kp,
        raw.kd,
        raw.torque_ff
    )
}
