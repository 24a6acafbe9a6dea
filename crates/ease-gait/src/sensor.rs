//! 传感器触发信号
//!
//! 状态机只消费每条腿一个布尔量（"传感器已触发"），按电平而非边沿判定。
//! 力传感器的模拟量采样在这里被转换成该布尔量。

use tracing::{debug, trace};

use crate::LegIdentity;
use crate::error::ConfigError;

/// 默认触发阈值（ADC 计数，高于基线）
pub const DEFAULT_TRIGGER_DELTA: f64 = 50.0;

/// 默认松弛带宽（ADC 计数，基线两侧）
pub const DEFAULT_RELAX_BAND: f64 = 5.0;

/// 每条腿的触发信号源
///
/// 每个 tick 对每条腿恰好调用一次。
pub trait SensorTrigger {
    fn is_triggered(&mut self, leg: LegIdentity) -> bool;
}

impl<S: SensorTrigger + ?Sized> SensorTrigger for &mut S {
    fn is_triggered(&mut self, leg: LegIdentity) -> bool {
        (**self).is_triggered(leg)
    }
}

/// 无传感器：始终未触发
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensors;

impl SensorTrigger for NoSensors {
    fn is_triggered(&mut self, _leg: LegIdentity) -> bool {
        false
    }
}

/// 闭包信号源
///
/// ```rust
/// use ease_gait::{LegIdentity, SensorFn, SensorTrigger};
///
/// let mut sensors = SensorFn(|leg: LegIdentity| leg == LegIdentity::Left);
/// assert!(sensors.is_triggered(LegIdentity::Left));
/// assert!(!sensors.is_triggered(LegIdentity::Right));
/// ```
pub struct SensorFn<F>(pub F);

impl<F: FnMut(LegIdentity) -> bool> SensorTrigger for SensorFn<F> {
    fn is_triggered(&mut self, leg: LegIdentity) -> bool {
        (self.0)(leg)
    }
}

/// 力传感器触发边界
///
/// 基线取静止时采样的均值；
/// - 触发：`sample - baseline > trigger_delta`
/// - 松弛：`|sample - baseline| < relax_band`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceThreshold {
    baseline: f64,
    trigger_delta: f64,
    relax_band: f64,
}

impl ForceThreshold {
    /// 使用默认阈值构造
    pub fn new(baseline: f64) -> Self {
        Self {
            baseline,
            trigger_delta: DEFAULT_TRIGGER_DELTA,
            relax_band: DEFAULT_RELAX_BAND,
        }
    }

    /// 用静止采样标定基线
    pub fn calibrate(samples: &[u16]) -> Result<Self, ConfigError> {
        if samples.is_empty() {
            return Err(ConfigError::EmptyCalibration);
        }

        let sum: u64 = samples.iter().map(|&s| s as u64).sum();
        let baseline = sum as f64 / samples.len() as f64;
        debug!("Force sensor calibrated: baseline={:.1} from {} samples", baseline, samples.len());
        Ok(Self::new(baseline))
    }

    pub fn with_trigger_delta(mut self, delta: f64) -> Self {
        self.trigger_delta = delta;
        self
    }

    pub fn with_relax_band(mut self, band: f64) -> Self {
        self.relax_band = band;
        self
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn trigger_delta(&self) -> f64 {
        self.trigger_delta
    }

    pub fn relax_band(&self) -> f64 {
        self.relax_band
    }

    pub fn is_triggered(&self, sample: u16) -> bool {
        sample as f64 - self.baseline > self.trigger_delta
    }

    pub fn is_relaxed(&self, sample: u16) -> bool {
        (sample as f64 - self.baseline).abs() < self.relax_band
    }
}

/// 双腿力传感器触发源
///
/// `sample` 每次返回指定腿当前的 ADC 读数。
pub struct ForceSensorTrigger<S> {
    left: ForceThreshold,
    right: ForceThreshold,
    sample: S,
}

impl<S: FnMut(LegIdentity) -> u16> ForceSensorTrigger<S> {
    pub fn new(left: ForceThreshold, right: ForceThreshold, sample: S) -> Self {
        Self {
            left,
            right,
            sample,
        }
    }

    pub fn threshold(&self, leg: LegIdentity) -> &ForceThreshold {
        match leg {
            LegIdentity::Left => &self.left,
            LegIdentity::Right => &self.right,
        }
    }
}

impl<S: FnMut(LegIdentity) -> u16> SensorTrigger for ForceSensorTrigger<S> {
    fn is_triggered(&mut self, leg: LegIdentity) -> bool {
        let sample = (self.sample)(leg);
        let triggered = self.threshold(leg).is_triggered(sample);
        trace!("Force sensor {}: sample={} triggered={}", leg, sample, triggered);
        triggered
    }
}

/// 按键下降沿检测（上拉输入，按下为低电平）
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    last_high: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 输入当前电平，从高到低跳变时返回 `true`
    pub fn was_pressed(&mut self, level_high: bool) -> bool {
        let pressed = self.last_high && !level_high;
        self.last_high = level_high;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibrate_baseline_is_mean() {
        let t = ForceThreshold::calibrate(&[100, 102, 98, 100]).unwrap();
        assert!((t.baseline() - 100.0).abs() < 1e-9);
        assert_eq!(t.trigger_delta(), DEFAULT_TRIGGER_DELTA);
        assert_eq!(t.relax_band(), DEFAULT_RELAX_BAND);
    }

    #[test]
    fn test_calibrate_empty() {
        assert!(matches!(ForceThreshold::calibrate(&[]), Err(ConfigError::EmptyCalibration)));
    }

    #[test]
    fn test_trigger_is_strictly_greater() {
        let t = ForceThreshold::new(100.0);
        assert!(!t.is_triggered(150));
        assert!(t.is_triggered(151));
        // 低于基线不触发
        assert!(!t.is_triggered(0));
    }

    #[test]
    fn test_relaxed_band() {
        let t = ForceThreshold::new(100.0).with_relax_band(5.0);
        assert!(t.is_relaxed(100));
        assert!(t.is_relaxed(96));
        assert!(t.is_relaxed(104));
        assert!(!t.is_relaxed(105));
        assert!(!t.is_relaxed(95));
    }

    #[test]
    fn test_force_sensor_trigger_per_leg() {
        let left = ForceThreshold::new(100.0);
        let right = ForceThreshold::new(200.0).with_trigger_delta(10.0);
        let mut sensors = ForceSensorTrigger::new(left, right, |leg| match leg {
            LegIdentity::Left => 180,
            LegIdentity::Right => 205,
        });

        assert!(sensors.is_triggered(LegIdentity::Left));
        assert!(!sensors.is_triggered(LegIdentity::Right));
        assert_eq!(sensors.threshold(LegIdentity::Right).trigger_delta(), 10.0);
    }

    #[test]
    fn test_no_sensors_and_closure() {
        let mut none = NoSensors;
        assert!(!none.is_triggered(LegIdentity::Left));

        let mut count = 0;
        let mut sensors = SensorFn(|_: LegIdentity| {
            count += 1;
            true
        });
        assert!(sensors.is_triggered(LegIdentity::Right));
        assert!((&mut sensors).is_triggered(LegIdentity::Left));
        drop(sensors);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_edge_detector_falling_edge_only() {
        let mut button = EdgeDetector::new();
        // 初始视为低电平，第一次低电平不算按下
        assert!(!button.was_pressed(false));
        assert!(!button.was_pressed(true));
        assert!(button.was_pressed(false));
        // 持续按住不重复触发
        assert!(!button.was_pressed(false));
        assert!(!button.was_pressed(true));
        assert!(button.was_pressed(false));
    }
}
