//! run 命令
//!
//! 步态控制循环：每个周期读一次时钟、每条腿读一次传感器，发送 4 帧关节指令。
//! 周期由绝对时间锚点保持，超时（overrun）时记录日志并重置锚点。
//! 单帧发送失败不中断循环；总线关闭或设备丢失时停止。

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Args;
use ease_gait::{
    Clock, GaitConfig, GaitController, LegIdentity, NoSensors, SensorTrigger, SystemClock,
};
use tracing::{error, info, warn};

use super::Preset;
use super::config::summary;
use crate::transmitter;

/// 控制循环参数
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 步态配置文件（TOML），优先于 --preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内置步态
    #[arg(short, long, value_enum, default_value_t = Preset::Sensor)]
    pub preset: Preset,

    /// CAN 接口
    #[arg(short, long, default_value = "can0")]
    pub interface: String,

    /// 不打开 CAN 接口，帧只写入日志
    #[arg(long)]
    pub dry_run: bool,

    /// 控制周期（ms）
    #[arg(long, default_value_t = 10)]
    pub period_ms: u64,

    /// 运行的 tick 数（缺省一直运行到 Ctrl+C）
    #[arg(long)]
    pub ticks: Option<u64>,

    /// 模拟着地：每条腿每隔 N ms 触发一次传感器（右腿错开半个间隔）
    #[arg(long)]
    pub simulate_contact_ms: Option<u64>,
}

impl RunCommand {
    pub fn load_config(&self) -> Result<GaitConfig> {
        match &self.config {
            Some(path) => GaitConfig::load_from_file(path)
                .with_context(|| format!("Failed to load gait config '{}'", path.display())),
            None => self.preset.build(self.period_ms),
        }
    }

    pub fn execute(&self) -> Result<()> {
        let config = self.load_config()?;
        println!("{}", summary(&config));

        let tx = transmitter::open(&self.interface, self.dry_run)?;

        let running = Arc::new(AtomicBool::new(true));
        let r = running.clone();
        ctrlc::set_handler(move || {
            r.store(false, Ordering::SeqCst);
        })
        .context("Failed to set Ctrl+C handler")?;

        let clock = SystemClock::new();
        let mut controller = GaitController::new(config, tx, clock.now_millis())?;

        let result = match self.simulate_contact_ms {
            Some(interval_ms) => {
                let mut sensors = SimulatedContact::new(&clock, interval_ms);
                self.run_loop(&mut controller, &clock, &mut sensors, &running)
            },
            None => self.run_loop(&mut controller, &clock, &mut NoSensors, &running),
        };

        let stats = controller.stats();
        println!();
        println!("📊 Ticks: {}", stats.ticks);
        println!("  frames sent:   {}", stats.frames_sent);
        println!("  frames failed: {}", stats.frames_failed);
        for leg in LegIdentity::BOTH {
            let state = controller.leg(leg);
            println!("  {:<5} leg: {} ({} transitions)", leg, state.phase(), state.transitions());
        }
        result
    }

    fn run_loop<T, S>(
        &self,
        controller: &mut GaitController<T>,
        clock: &SystemClock,
        sensors: &mut S,
        running: &AtomicBool,
    ) -> Result<()>
    where
        T: ease_can::BusTransmitter,
        S: SensorTrigger,
    {
        let period = Duration::from_millis(self.period_ms.max(1));
        info!("Control loop started: period {:?}", period);

        let mut next_tick = Instant::now();
        let mut ticks = 0u64;

        while running.load(Ordering::SeqCst) {
            if let Some(max) = self.ticks
                && ticks >= max
            {
                break;
            }

            let report = controller.tick_with(clock, sensors);
            for t in report.transitions.iter().flatten() {
                println!("[{:>8} ms] {:<5} {} -> {}", t.at, t.leg, t.from, t.to);
            }
            ticks += 1;

            let fatal = report
                .targets
                .iter()
                .zip(&report.outcomes)
                .find_map(|(target, outcome)| match outcome {
                    Err(e) if e.is_fatal() => Some((target.joint, e)),
                    _ => None,
                });
            if let Some((joint, e)) = fatal {
                error!("Fatal CAN error on {} at tick {}, stopping", joint, ticks);
                bail!("Fatal CAN error on {}: {}", joint, e);
            }

            // 睡眠到下一个锚点
            next_tick += period;
            let now = Instant::now();
            if next_tick > now {
                spin_sleep::sleep(next_tick - now);
            } else {
                warn!(
                    "Control loop overrun: tick {} finished {:?} after its deadline",
                    ticks,
                    now.duration_since(next_tick)
                );
                next_tick = now;
            }
        }

        info!("Control loop stopped after {} ticks", ticks);
        Ok(())
    }
}

/// 模拟着地信号：每条腿每隔 `interval_ms` 触发一个 tick
struct SimulatedContact<'a> {
    clock: &'a SystemClock,
    interval_ms: u64,
    last: [u64; 2],
}

impl<'a> SimulatedContact<'a> {
    fn new(clock: &'a SystemClock, interval_ms: u64) -> Self {
        let start = clock.now_millis();
        Self {
            clock,
            interval_ms,
            last: [start, start.wrapping_add(interval_ms / 2)],
        }
    }

    fn fire_at(&mut self, leg: LegIdentity, now: u64) -> bool {
        let slot = match leg {
            LegIdentity::Left => 0,
            LegIdentity::Right => 1,
        };
        // 右腿的初始锚点在未来，回绕差值视为未到期
        let since = now.wrapping_sub(self.last[slot]);
        if since >= self.interval_ms && since <= u64::MAX / 2 {
            self.last[slot] = now;
            true
        } else {
            false
        }
    }
}

impl SensorTrigger for SimulatedContact<'_> {
    fn is_triggered(&mut self, leg: LegIdentity) -> bool {
        let now = self.clock.now_millis();
        self.fire_at(leg, now)
    }
}
