//! 定点编码
//!
//! 执行器固件使用的线性定点格式：在声明的 `[min, max]` 范围内，
//! 将工程单位浮点数映射为 `bits` 位无符号整数。
//!
//! 公式：`trunc((x - min) * (2^bits - 1) / (max - min))`
//!
//! **截断而非四舍五入**：向零截断（`as` 转换），与固件的线上字节一致。
//!
//! 超出范围的输入不会被拒绝，只会被饱和到边界。

/// 指定位宽能表示的最大整数（`2^bits - 1`）
///
/// `bits` 取值 `1..=32`，超出部分按 32 处理，0 按 1 处理。
#[inline]
pub const fn max_uint(bits: u32) -> u32 {
    let bits = if bits == 0 {
        1
    } else if bits > 32 {
        32
    } else {
        bits
    };
    ((1u64 << bits) - 1) as u32
}

/// 将浮点数转换为无符号定点整数（饱和 + 截断）
///
/// - 先将 `x` 限制在 `[x_min, x_max]`
/// - `x <= x_min`（含 NaN）得到 0，`x >= x_max` 得到 `2^bits - 1`
/// - 范围退化（`x_max <= x_min`）时返回 0
///
/// # 示例
///
/// ```rust
/// use ease_protocol::fixed_point::float_to_uint;
///
/// assert_eq!(float_to_uint(5.0, 0.0, 10.0, 12), 2047); // 2047.5 截断
/// assert_eq!(float_to_uint(-1.0, 0.0, 10.0, 12), 0);
/// assert_eq!(float_to_uint(11.0, 0.0, 10.0, 12), 4095);
/// ```
pub fn float_to_uint(x: f64, x_min: f64, x_max: f64, bits: u32) -> u32 {
    let span = x_max - x_min;
    let max_int = max_uint(bits);
    if span.is_nan() || span <= 0.0 {
        return 0;
    }

    // NaN 按最小值处理
    if x.is_nan() || x <= x_min {
        return 0;
    }
    if x >= x_max {
        return max_int;
    }

    let scaled = (x - x_min) * max_int as f64 / span;
    (scaled as u32).min(max_int)
}

/// 将无符号定点整数转换回浮点数
///
/// 公式：`x_int * (x_max - x_min) / (2^bits - 1) + x_min`
///
/// 超出位宽的高位会被屏蔽。
pub fn uint_to_float(x_int: u32, x_min: f64, x_max: f64, bits: u32) -> f64 {
    let max_int = max_uint(bits);
    let span = x_max - x_min;
    (x_int & max_int) as f64 * span / max_int as f64 + x_min
}

/// 一个协议字段的声明范围和位宽
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub bits: u32,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64, bits: u32) -> Self {
        Self { min, max, bits }
    }

    /// 编码（饱和 + 截断）
    #[inline]
    pub fn encode(&self, value: f64) -> u32 {
        float_to_uint(value, self.min, self.max, self.bits)
    }

    /// 解码
    #[inline]
    pub fn decode(&self, raw: u32) -> f64 {
        uint_to_float(raw, self.min, self.max, self.bits)
    }

    /// 一个量化步长：`(max - min) / (2^bits - 1)`
    #[inline]
    pub fn step(&self) -> f64 {
        (self.max - self.min) / max_uint(self.bits) as f64
    }

    /// 编码所能产生的最大整数
    #[inline]
    pub fn max_raw(&self) -> u32 {
        max_uint(self.bits)
    }

    /// 把值饱和到范围内（NaN 视为最小值）
    pub fn saturate(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_uint() {
        assert_eq!(max_uint(8), 0xFF);
        assert_eq!(max_uint(12), 0xFFF);
        assert_eq!(max_uint(16), 0xFFFF);
        assert_eq!(max_uint(32), u32::MAX);
        assert_eq!(max_uint(0), 1);
        assert_eq!(max_uint(40), u32::MAX);
    }

    #[test]
    fn test_float_to_uint_truncates() {
        // 5.0 / 10.0 * 4095 = 2047.5，截断为 2047
        assert_eq!(float_to_uint(5.0, 0.0, 10.0, 12), 2047);
        // 40 / 500 * 4095 = 327.6，截断为 327（四舍五入会得到 328）
        assert_eq!(float_to_uint(40.0, 0.0, 500.0, 12), 327);
    }

    #[test]
    fn test_float_to_uint_boundary() {
        assert_eq!(float_to_uint(0.0, 0.0, 10.0, 12), 0);
        assert_eq!(float_to_uint(10.0, 0.0, 10.0, 12), 4095);
        assert_eq!(float_to_uint(-12.56, -12.56, 12.56, 16), 0);
        assert_eq!(float_to_uint(12.56, -12.56, 12.56, 16), 0xFFFF);
    }

    #[test]
    fn test_float_to_uint_saturates() {
        assert_eq!(float_to_uint(-100.0, -33.0, 33.0, 12), 0);
        assert_eq!(float_to_uint(100.0, -33.0, 33.0, 12), 4095);
        assert_eq!(float_to_uint(f64::INFINITY, -33.0, 33.0, 12), 4095);
        assert_eq!(float_to_uint(f64::NEG_INFINITY, -33.0, 33.0, 12), 0);
    }

    #[test]
    fn test_float_to_uint_nan_is_min() {
        assert_eq!(float_to_uint(f64::NAN, -65.0, 65.0, 12), 0);
    }

    #[test]
    fn test_float_to_uint_degenerate_span() {
        assert_eq!(float_to_uint(1.0, 5.0, 5.0, 12), 0);
        assert_eq!(float_to_uint(1.0, 5.0, -5.0, 12), 0);
    }

    #[test]
    fn test_uint_to_float_boundary() {
        assert!((uint_to_float(0, 0.0, 10.0, 12) - 0.0).abs() < 1e-12);
        assert!((uint_to_float(4095, 0.0, 10.0, 12) - 10.0).abs() < 1e-12);
        // 高位被屏蔽
        assert!((uint_to_float(0x1FFF, 0.0, 10.0, 12) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_field_range_step() {
        let range = FieldRange::new(0.0, 5.0, 12);
        assert!((range.step() - 5.0 / 4095.0).abs() < 1e-15);
        assert_eq!(range.max_raw(), 4095);
        assert_eq!(range.encode(2.0), 1638);
        assert!((range.decode(1638) - 2.0).abs() < range.step());
    }

    #[test]
    fn test_field_range_saturate() {
        let range = FieldRange::new(-1.0, 1.0, 8);
        assert_eq!(range.saturate(2.0), 1.0);
        assert_eq!(range.saturate(-2.0), -1.0);
        assert_eq!(range.saturate(f64::NAN), -1.0);
        assert_eq!(range.saturate(0.25), 0.25);
    }
}
