//! Mode scheduler, the once-per-tick control driver.
//!
//! ```text
//!  ModePort ──▶ ┌──────────────────────────────┐
//!  ClockPort ─▶ │        ModeScheduler         │ ──▶ ActuatorPort (1 write/tick)
//!  InputPort ─▶ │ Disabled │ Autonomous │ Teleop│ ──▶ EventSink (transitions)
//!               └──────────────────────────────┘
//! ```
//!
//! Each tick:
//! 1. read the mode;
//! 2. on a mode edge, run the entry action (autonomous: capture the start
//!    time and resolve the routine once; teleop: clear edge state);
//! 3. dispatch to the sequencer, the mapper, or the stopped vector;
//! 4. write the vector to the actuator port exactly once.
//!
//! Runs to completion; nothing here blocks, sleeps or retries.

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::{ActuatorPort, ClockPort, EventSink, InputPort, ModePort};
use crate::autonomous::{AutonomousSequencer, AutonomousTuning, PhaseKind, RoutineVariant};
use crate::config::RobotConfig;
use crate::mode::Mode;
use crate::output::ActuatorCommandVector;
use crate::teleop::TeleopMapper;

pub struct ModeScheduler {
    config: RobotConfig,
    mapper: TeleopMapper,
    mode: Mode,
    /// Present only while in autonomous.
    auto: Option<AutonomousSequencer>,
    last_phase: Option<PhaseKind>,
    mode_entered_secs: f64,
    last_command: ActuatorCommandVector,
    tick_count: u64,
}

impl ModeScheduler {
    /// Construct the scheduler from configuration.  Starts in `Disabled`.
    pub fn new(config: RobotConfig) -> Self {
        let mapper = TeleopMapper::from_config(&config);
        Self {
            config,
            mapper,
            mode: Mode::Disabled,
            auto: None,
            last_phase: None,
            mode_entered_secs: 0.0,
            last_command: ActuatorCommandVector::STOPPED,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the actuators and park them.  Call once before the first tick.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.configure(&self.config.current_limits);
        hw.apply(&ActuatorCommandVector::STOPPED);
        sink.emit(&AppEvent::Started {
            tick_interval_ms: self.config.tick_interval_ms,
        });
        info!(
            "ModeScheduler started at {} ms/tick, {} teleop rules",
            self.config.tick_interval_ms,
            self.mapper.rules().len()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control tick and return the vector that was written.
    ///
    /// `ds` satisfies **both** [`ModePort`] and [`InputPort`], the way a
    /// driver station reports both.
    pub fn tick(
        &mut self,
        ds: &mut (impl ModePort + InputPort),
        clock: &impl ClockPort,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> ActuatorCommandVector {
        self.tick_count += 1;
        let mode = ds.mode();
        let now = clock.now_secs();

        if mode != self.mode {
            self.transition(mode, now, ds, sink);
        }

        let command = match mode {
            Mode::Disabled => ActuatorCommandVector::STOPPED,
            Mode::Autonomous => self.autonomous_tick(now, sink),
            Mode::Teleop => self.teleop_tick(ds, sink),
        };

        hw.apply(&command);
        self.last_command = command;
        command
    }

    fn autonomous_tick(&mut self, now: f64, sink: &mut impl EventSink) -> ActuatorCommandVector {
        let Some(seq) = &self.auto else {
            warn!("Autonomous tick without a resolved routine, stopping");
            return ActuatorCommandVector::STOPPED;
        };
        let elapsed = seq.elapsed(now);
        let phase = seq.phase_at(elapsed);

        if self.last_phase != Some(phase.kind) {
            info!(
                "Autonomous phase: {:?} -> {:?} at {:.2}s",
                self.last_phase, phase.kind, elapsed
            );
            sink.emit(&AppEvent::PhaseChanged {
                from: self.last_phase,
                to: phase.kind,
                elapsed_secs: elapsed,
            });
            self.last_phase = Some(phase.kind);
        }
        phase.command
    }

    fn teleop_tick(
        &mut self,
        ds: &mut impl InputPort,
        sink: &mut impl EventSink,
    ) -> ActuatorCommandVector {
        let before = self.mapper.last_match();
        let command = self.mapper.map(&ds.snapshot());
        let after = self.mapper.last_match();
        if after != before {
            sink.emit(&AppEvent::TeleopRuleChanged {
                from: self.mapper.describe(before),
                to: self.mapper.describe(after),
            });
        }
        command
    }

    fn transition(
        &mut self,
        to: Mode,
        now: f64,
        ds: &impl ModePort,
        sink: &mut impl EventSink,
    ) {
        let from = self.mode;
        info!("Mode transition: {} -> {}", from, to);

        // Exit: the routine lives only as long as autonomous.
        if from == Mode::Autonomous {
            self.auto = None;
            self.last_phase = None;
        }

        match to {
            Mode::Autonomous => {
                let variant = RoutineVariant::resolve(ds.selected_routine());
                let tuning = AutonomousTuning::resolve(variant, &self.config.autonomous);
                let hold_at_secs = tuning.last_threshold();
                info!(
                    "Autonomous: '{}' start={:.3}s hold at +{:.2}s",
                    variant, now, hold_at_secs
                );
                self.auto = Some(AutonomousSequencer::new(now, tuning));
                sink.emit(&AppEvent::AutonomousStarted {
                    variant,
                    start_secs: now,
                    hold_at_secs,
                });
            }
            Mode::Teleop => self.mapper.reset(),
            Mode::Disabled => {}
        }

        self.mode = to;
        self.mode_entered_secs = now;
        sink.emit(&AppEvent::ModeChanged { from, to });
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot for the given clock reading.
    pub fn build_telemetry(&self, now_secs: f64) -> TelemetryData {
        TelemetryData {
            timestamp_secs: now_secs,
            mode: self.mode,
            secs_in_mode: (now_secs - self.mode_entered_secs).max(0.0),
            variant: self.auto.as_ref().map(AutonomousSequencer::variant),
            phase: self.last_phase,
            command: self.last_command,
            tick_count: self.tick_count,
        }
    }

    /// Mode seen on the most recent tick.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active autonomous routine, if in autonomous.
    pub fn autonomous(&self) -> Option<&AutonomousSequencer> {
        self.auto.as_ref()
    }

    /// Vector written on the most recent tick.
    pub fn last_command(&self) -> ActuatorCommandVector {
        self.last_command
    }

    /// Total ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
