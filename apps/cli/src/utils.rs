//! 参数解析工具

use anyhow::{Context, Result, bail};

/// 解析驱动器 ID：支持 `0x61` 或十进制 `97`
pub fn parse_driver_id(s: &str) -> Result<u8> {
    let s = s.trim();
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    value.with_context(|| format!("Invalid driver id '{}'", s))
}

/// 解析十六进制负载，忽略空格、`:` 和 `-` 分隔符
pub fn parse_payload(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();
    let cleaned = cleaned.strip_prefix("0x").unwrap_or(&cleaned);

    if cleaned.is_empty() {
        bail!("Empty payload");
    }
    hex::decode(cleaned).with_context(|| format!("Invalid hex payload '{}'", s))
}

/// 以空格分隔的大写十六进制显示
pub fn format_bytes(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}
