//! # EASE CAN Adapter Layer
//!
//! CAN 硬件抽象层：控制核心只依赖 [`BusTransmitter`] 的契约，
//! 具体收发器（SocketCAN、Mock）在此实现。

use thiserror::Error;

// 重新导出 ease-protocol 中的 EaseFrame
pub use ease_protocol::EaseFrame;

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub mod socketcan;

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub use socketcan::SocketCanTransmitter;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransmitter;

/// CAN 适配层统一错误类型
#[derive(Error, Debug)]
pub enum CanError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Device Error: {0}")]
    Device(#[from] CanDeviceError),
    #[error("Write timeout")]
    Timeout,
    #[error("Bus busy")]
    BusBusy,
    #[error("Bus off")]
    BusOff,
}

impl CanError {
    /// 是否为不可恢复错误：总线关闭，或设备不存在/无权限
    pub fn is_fatal(&self) -> bool {
        match self {
            CanError::BusOff => true,
            CanError::Device(e) => e.is_fatal(),
            _ => false,
        }
    }
}

/// 设备/后端错误的结构化分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanDeviceErrorKind {
    NotFound,
    NoDevice,
    AccessDenied,
    Busy,
    InvalidFrame,
    Backend,
}

/// 结构化设备错误
#[derive(Error, Debug, Clone)]
#[error("{kind:?}: {message}")]
pub struct CanDeviceError {
    pub kind: CanDeviceErrorKind,
    pub message: String,
}

impl CanDeviceError {
    pub fn new(kind: CanDeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// 是否为不可恢复错误（设备不存在或无权限）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            CanDeviceErrorKind::NoDevice
                | CanDeviceErrorKind::AccessDenied
                | CanDeviceErrorKind::NotFound
        )
    }
}

/// 总线发送端
///
/// 控制核心每个 tick 对每个关节调用一次 `send`。
///
/// **契约**：
/// - 每次调用只尝试一次，重试策略（如需要）由实现方负责
/// - 失败不会影响控制核心的状态机，下一个 tick 会发送新的目标
/// - 任何阻塞时间预算属于实现方（例如 SocketCAN 的写超时）
pub trait BusTransmitter {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError>;
}

impl<T: BusTransmitter + ?Sized> BusTransmitter for &mut T {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError> {
        (**self).send(frame)
    }
}

impl<T: BusTransmitter + ?Sized> BusTransmitter for Box<T> {
    fn send(&mut self, frame: EaseFrame) -> Result<(), CanError> {
        (**self).send(frame)
    }
}
