//! SocketCAN 发送端实现
//!
//! Linux 平台下通过内核 SocketCAN 子系统发送执行器指令帧。
//!
//! ## 限制
//!
//! - **仅限 Linux 平台**
//! - **接口配置**：波特率等配置由系统工具（`ip link`）完成，不在应用层设置
//! - **权限要求**：可能需要 `dialout` 组权限或 `sudo`

use std::fs;
use std::io;
use std::time::Duration;

use socketcan::{CanFrame, CanSocket, EmbeddedFrame, ExtendedId, Socket, StandardId};
use tracing::{error, trace, warn};

use crate::{BusTransmitter, CanDeviceError, CanDeviceErrorKind, CanError, EaseFrame};

/// IFF_UP 标志位（`/sys/class/net/<iface>/flags`）
const IFF_UP: u32 = 0x1;

/// 接口名最大长度（IFNAMSIZ - 1）
const MAX_IFACE_NAME_LEN: usize = 15;

/// 检查 CAN 接口是否存在且已启动（管理态 UP）
///
/// 读取 `/sys/class/net/<iface>/flags`，只读操作，不需要特殊权限。
///
/// - `Ok(true)`: 接口存在且 IFF_UP 为真
/// - `Ok(false)`: 接口存在但处于 DOWN 状态
/// - `Err(CanError::Device)`: 接口不存在或接口名无效
pub fn check_interface_status(interface: &str) -> Result<bool, CanError> {
    if interface.is_empty() || interface.len() > MAX_IFACE_NAME_LEN || interface.contains('/') {
        return Err(CanError::Device(CanDeviceError::new(
            CanDeviceErrorKind::InvalidFrame,
            format!("Invalid interface name '{}'", interface),
        )));
    }

    let path = format!("/sys/class/net/{}/flags", interface);
    let content = fs::read_to_string(&path).map_err(|e| {
        let kind = match e.kind() {
            io::ErrorKind::NotFound => CanDeviceErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => CanDeviceErrorKind::AccessDenied,
            _ => CanDeviceErrorKind::Backend,
        };
        CanError::Device(CanDeviceError::new(
            kind,
            format!(
                "CAN interface '{}' is not available ({}). Please create it first:\n  sudo ip link add dev {} type can",
                interface, e, interface
            ),
        ))
    })?;

    let flags = parse_flags(&content).ok_or_else(|| {
        CanError::Device(CanDeviceError::new(
            CanDeviceErrorKind::Backend,
            format!("Unexpected flags '{}' for '{}'", content.trim(), interface),
        ))
    })?;

    Ok(flags & IFF_UP != 0)
}

fn parse_flags(content: &str) -> Option<u32> {
    let trimmed = content.trim();
    let hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    u32::from_str_radix(hex, 16).ok()
}

/// SocketCAN 发送端
///
/// # 示例
///
/// ```no_run
/// use ease_can::{BusTransmitter, EaseFrame, SocketCanTransmitter};
///
/// let mut tx = SocketCanTransmitter::new("can0").unwrap();
/// let frame = EaseFrame::new_extended(0x0861, &[0; 8]);
/// tx.send(frame).unwrap();
/// ```
pub struct SocketCanTransmitter {
    socket: CanSocket,
    interface: String,
}

impl SocketCanTransmitter {
    /// 打开 CAN 接口
    ///
    /// 接口必须已经通过 `ip link` 配置并启动。
    pub fn new(interface: impl Into<String>) -> Result<Self, CanError> {
        let interface = interface.into();

        // 1. 检查接口状态（仅检查，不自动配置）
        if !check_interface_status(&interface)? {
            return Err(CanError::Device(CanDeviceError::new(
                CanDeviceErrorKind::Busy,
                format!(
                    "CAN interface '{}' exists but is not UP. Please start it first:\n  sudo ip link set up {}",
                    interface, interface
                ),
            )));
        }

        // 2. 打开 SocketCAN 接口
        let socket = CanSocket::open(&interface).map_err(|e| {
            CanError::Device(CanDeviceError::new(
                CanDeviceErrorKind::Backend,
                format!("Failed to open CAN interface '{}': {}", interface, e),
            ))
        })?;

        trace!("SocketCAN interface '{}' opened", interface);
        Ok(Self { socket, interface })
    }

    /// 设置写超时；控制核心不重试，超时属于发送端的时间预算
    pub fn with_write_timeout(self, timeout: Duration) -> Result<Self, CanError> {
        self.socket.set_write_timeout(timeout).map_err(CanError::Io)?;
        Ok(self)
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    fn to_can_frame(frame: &EaseFrame) -> Result<CanFrame, CanError> {
        let data = frame.data_slice();
        let can_frame = if frame.is_extended {
            ExtendedId::new(frame.id).and_then(|id| CanFrame::new(id, data))
        } else {
            StandardId::new(frame.id as u16).and_then(|id| CanFrame::new(id, data))
        };

        can_frame.ok_or_else(|| {
            CanError::Device(CanDeviceError::new(
                CanDeviceErrorKind::InvalidFrame,
                format!("Failed to create frame with ID 0x{:X}", frame.id),
            ))
        })
    }
}

impl BusTransmitter for SocketCanTransmitter {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError> {
        let can_frame = Self::to_can_frame(&frame)?;

        self.socket
            .write_frame(&can_frame)
            .map_err(|e| map_write_error(&self.interface, e))?;

        trace!("Sent CAN frame: ID=0x{:X}, data={:02X?}", frame.id, frame.data_slice());
        Ok(())
    }
}

/// 写失败分类：总线关闭和设备拔出为致命错误，发送队列满和超时可在下一个 tick 恢复
fn map_write_error(interface: &str, e: io::Error) -> CanError {
    match e.raw_os_error() {
        Some(libc::ENETDOWN) => {
            error!("CAN bus off on '{}': {}", interface, e);
            CanError::BusOff
        },
        Some(libc::ENODEV) => {
            error!("CAN device '{}' disappeared: {}", interface, e);
            CanError::Device(CanDeviceError::new(
                CanDeviceErrorKind::NoDevice,
                format!("CAN interface '{}' is gone: {}", interface, e),
            ))
        },
        Some(libc::ENOBUFS) => CanError::BusBusy,
        _ if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            CanError::Timeout
        },
        _ => {
            warn!("SocketCAN write error on '{}': {}", interface, e);
            CanError::Io(e)
        },
    }
}
