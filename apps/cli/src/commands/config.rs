//! 配置管理命令
//!
//! 校验步态配置文件，或导出内置步态为 TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use ease_gait::{GaitConfig, LegIdentity};

use super::Preset;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 检查配置文件
    Check {
        /// 配置文件路径
        file: PathBuf,
    },

    /// 导出内置步态
    Dump {
        /// 内置步态
        #[arg(short, long, value_enum, default_value_t = Preset::Sensor)]
        preset: Preset,

        /// 控制周期（ms，轨迹步态的相位时长按此计算）
        #[arg(long, default_value_t = 10)]
        period_ms: u64,

        /// 输出文件（缺省打印到标准输出）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Check { file } => Self::check_(&file),
            ConfigCommand::Dump {
                preset,
                period_ms,
                output,
            } => Self::dump_(preset, period_ms, output.as_deref()),
        }
    }

    fn check_(file: &Path) -> Result<()> {
        let config = GaitConfig::load_from_file(file)
            .with_context(|| format!("Invalid gait config '{}'", file.display()))?;

        println!("✅ {}", file.display());
        println!("{}", summary(&config));
        Ok(())
    }

    fn dump_(preset: Preset, period_ms: u64, output: Option<&Path>) -> Result<()> {
        let config = preset.build(period_ms)?;
        let content = config.to_toml_string().context("Failed to serialize config")?;

        match output {
            Some(path) => {
                fs::write(path, content)
                    .with_context(|| format!("Failed to write '{}'", path.display()))?;
                println!("✅ Wrote {:?} gait to {}", preset, path.display());
            },
            None => print!("{}", content),
        }
        Ok(())
    }
}

/// 配置摘要：关节 ID 与每条腿的相位序列
pub fn summary(config: &GaitConfig) -> String {
    let j = &config.joints;
    let mut lines = vec![format!(
        "  joints: left_hip=0x{:02X} left_knee=0x{:02X} right_hip=0x{:02X} right_knee=0x{:02X}",
        j.left_hip.id, j.left_knee.id, j.right_hip.id, j.right_knee.id
    )];

    for leg in LegIdentity::BOTH {
        let kinds: Vec<String> = config.cycle(leg).kinds().map(|k| k.to_string()).collect();
        lines.push(format!("  {:<5}:  {}", leg, kinds.join(" -> ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ease_gait::presets;

    #[test]
    fn test_summary() {
        let text = summary(&presets::sensor_gait());
        assert!(text.contains("left_hip=0x61"), "{}", text);
        assert!(text.contains("right_knee=0x68"), "{}", text);
        assert!(text.contains("Stance -> SwingUp -> SwingDown"), "{}", text);
    }

    #[test]
    fn test_dump_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.toml");

        ConfigCommand::Dump {
            preset: Preset::Trajectory,
            period_ms: 10,
            output: Some(path.clone()),
        }
        .execute()
        .unwrap();

        assert!(ConfigCommand::Check { file: path }.execute().is_ok());
    }

    #[test]
    fn test_check_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "left = []\nright = []\n").unwrap();

        let err = ConfigCommand::Check { file: path }.execute().unwrap_err();
        assert!(format!("{:#}", err).contains("no phases"), "{:#}", err);
    }
}
