//! # EASE CLI
//!
//! Command-line interface for the EASE exoskeleton gait controller.
//!
//! ```bash
//! # 无硬件运行传感器步态（帧只打印到日志）
//! ease-cli run --preset sensor --dry-run --ticks 500 --simulate-contact-ms 800
//!
//! # 在 can0 上运行轨迹回放步态
//! ease-cli run --preset trajectory --interface can0 --period-ms 10
//!
//! # 编码单帧 / 解码负载
//! ease-cli frame --joint 0x61 --position 0.0 --velocity 0.0
//! ease-cli decode 0384FFEB00962300 --id 0x61
//!
//! # 配置
//! ease-cli config dump --preset sensor > gait.toml
//! ease-cli config check gait.toml
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod transmitter;
mod utils;

use commands::{ConfigCommand, DecodeCommand, FrameCommand, RunCommand};

/// EASE CLI - 外骨骼步态控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "ease-cli")]
#[command(
    about = "Command-line interface for the EASE exoskeleton gait controller",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 运行步态控制循环
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 编码一帧关节指令并打印
    Frame {
        #[command(flatten)]
        args: FrameCommand,
    },

    /// 解码 8 字节负载（反馈帧或指令帧）
    Decode {
        #[command(flatten)]
        args: DecodeCommand,
    },

    /// 步态配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ease_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => args.execute(),
        Commands::Frame { args } => args.execute(),
        Commands::Decode { args } => args.execute(),
        Commands::Config(cmd) => cmd.execute(),
    }
}
