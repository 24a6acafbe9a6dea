//! 发送端选择
//!
//! - `--dry-run`: [`LogTransmitter`]，帧只写入日志
//! - 否则打开 SocketCAN 接口（仅 Linux）

use anyhow::Result;
use ease_can::{BusTransmitter, CanError, EaseFrame};
use tracing::{debug, info};

use crate::utils::format_bytes;

/// 只记录不发送的发送端
#[derive(Debug, Default)]
pub struct LogTransmitter {
    frames: u64,
}

impl LogTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl BusTransmitter for LogTransmitter {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError> {
        self.frames += 1;
        debug!("[dry-run] ID=0x{:04X} [{}]", frame.id, format_bytes(frame.data_slice()));
        Ok(())
    }
}

impl Drop for LogTransmitter {
    fn drop(&mut self) {
        info!("[dry-run] {} frames logged", self.frames());
    }
}

/// 按命令行参数打开发送端
pub fn open(interface: &str, dry_run: bool) -> Result<Box<dyn BusTransmitter>> {
    if dry_run {
        return Ok(Box::new(LogTransmitter::new()));
    }
    open_socketcan(interface)
}

#[cfg(target_os = "linux")]
fn open_socketcan(interface: &str) -> Result<Box<dyn BusTransmitter>> {
    use anyhow::Context;
    use std::time::Duration;

    let tx = ease_can::SocketCanTransmitter::new(interface)
        .and_then(|tx| tx.with_write_timeout(Duration::from_millis(2)))
        .with_context(|| format!("Failed to open CAN interface '{}'", interface))?;
    Ok(Box::new(tx))
}

#[cfg(not(target_os = "linux"))]
fn open_socketcan(interface: &str) -> Result<Box<dyn BusTransmitter>> {
    anyhow::bail!("SocketCAN is only available on Linux (interface '{}'); use --dry-run", interface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_transmitter_counts_frames() {
        let mut tx = LogTransmitter::new();
        tx.send(EaseFrame::new_extended(0x0861, &[0; 8])).unwrap();
        tx.send(EaseFrame::new_extended(0x0862, &[0; 8])).unwrap();
        assert_eq!(tx.frames(), 2);
    }

    #[test]
    fn test_open_dry_run() {
        let mut tx = open("unused", true).unwrap();
        assert!(tx.send(EaseFrame::new_extended(0x0861, &[0; 8])).is_ok());
    }
}
