//! KitBot simulator: runs the control core against a scripted match.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SimDriverStation   SimActuators   LogEventSink          │
//! │  (Mode + Input)     (Actuator)     (EventSink)           │
//! │  JsonConfigFile     ManualClock / MonotonicClock         │
//! │  (Config)           (Clock)                              │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        ModeScheduler (pure logic)              │      │
//! │  │  AutonomousSequencer · TeleopMapper            │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use log::{info, warn};

use kitbot::adapters::config_store::JsonConfigFile;
use kitbot::adapters::log_sink::LogEventSink;
use kitbot::adapters::sim::{SimActuators, SimDriverStation};
use kitbot::adapters::time::{ManualClock, MonotonicClock};
use kitbot::app::events::AppEvent;
use kitbot::app::ports::{ClockPort, ConfigPort, EventSink};
use kitbot::config::{RobotConfig, validate_config};
use kitbot::scheduler::ModeScheduler;

#[derive(Parser, Debug)]
#[command(name = "kitbot-sim")]
#[command(about = "Run the KitBot control core through a scripted practice match", long_about = None)]
struct Args {
    /// JSON config file.  Takes precedence over `--profile`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in profile: `brushless` or `classic`.
    #[arg(long, default_value = "brushless")]
    profile: String,

    /// Autonomous chooser key ("do nothing", "launch drive", "launch", "drive").
    ///
    /// Omit to leave the chooser unset.
    #[arg(long)]
    routine: Option<String>,

    /// Pace ticks against the wall clock instead of simulated time.
    #[arg(long)]
    realtime: bool,

    /// Write the effective config as JSON to this path and exit.
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

// ── Clock pacing ──────────────────────────────────────────────

/// Simulated time jumps one period per tick; real time sleeps until the
/// next tick boundary.
enum Pacing {
    Simulated(ManualClock),
    Realtime(MonotonicClock),
}

impl ClockPort for Pacing {
    fn now_secs(&self) -> f64 {
        match self {
            Self::Simulated(c) => c.now_secs(),
            Self::Realtime(c) => c.now_secs(),
        }
    }
}

impl Pacing {
    /// Wait for the boundary after tick `tick` (zero-based).
    fn wait_next(&self, tick: u64, period: Duration) {
        match self {
            Self::Simulated(c) => c.advance(period.as_secs_f64()),
            Self::Realtime(c) => {
                let target = period.as_secs_f64() * (tick + 1) as f64;
                let now = c.now_secs();
                if now > target {
                    warn!(
                        "Tick {} overran by {:.1} ms",
                        tick,
                        (now - target) * 1000.0
                    );
                } else {
                    std::thread::sleep(Duration::from_secs_f64(target - now));
                }
            }
        }
    }
}

// ── Config ────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<RobotConfig> {
    let fallback = || {
        RobotConfig::profile(&args.profile)
            .ok_or_else(|| anyhow!("unknown profile '{}'", args.profile))
    };

    let Some(path) = &args.config else {
        let cfg = fallback()?;
        info!("Config: built-in '{}' profile", args.profile);
        return Ok(cfg);
    };
    match JsonConfigFile::new(path).load() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(
                "Config load from {} failed ({}), using '{}' profile",
                path.display(),
                e,
                args.profile
            );
            fallback()
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("KitBot simulator v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    validate_config(&config)?;

    if let Some(path) = &args.dump_config {
        JsonConfigFile::new(path).save(&config)?;
        info!("Config written to {}", path.display());
        return Ok(());
    }

    let period = Duration::from_millis(u64::from(config.tick_interval_ms));
    let telemetry_every = u64::from(config.telemetry_interval_ticks);

    let mut ds = SimDriverStation::scripted_match(args.routine.as_deref());
    let mut hw = SimActuators::new();
    let mut sink = LogEventSink::new();
    let clock = if args.realtime {
        Pacing::Realtime(MonotonicClock::new())
    } else {
        Pacing::Simulated(ManualClock::new(0.0))
    };

    let mut scheduler = ModeScheduler::new(config);
    scheduler.start(&mut hw, &mut sink);

    // One extra second so the closing disabled step is observed.
    let end_secs = ds.end_secs() + 1.0;
    let mut tick: u64 = 0;
    loop {
        let now = clock.now_secs();
        if now > end_secs {
            break;
        }
        ds.seek(now);
        scheduler.tick(&mut ds, &clock, &mut hw, &mut sink);
        if scheduler.tick_count() % telemetry_every == 0 {
            sink.emit(&AppEvent::Telemetry(scheduler.build_telemetry(now)));
        }
        clock.wait_next(tick, period);
        tick += 1;
    }

    if !hw.last().is_stopped() {
        return Err(anyhow!("match ended with actuators still commanded"));
    }
    info!(
        "Match complete: {} ticks, {} actuator writes, {} events",
        scheduler.tick_count(),
        hw.writes(),
        sink.emitted()
    );
    Ok(())
}
