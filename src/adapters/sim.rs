//! Simulation adapters for host runs and tests.
//!
//! - [`SimDriverStation`] replays a scripted timeline of mode and operator
//!   input.  Implements both [`ModePort`] and [`InputPort`].
//! - [`SimActuators`] clamps, records and counts every write, like a motor
//!   bus that never talks back.

use log::{debug, info};

use crate::app::ports::{ActuatorPort, InputPort, ModePort};
use crate::config::CurrentLimits;
use crate::input::{DpadQuadrant, InputSnapshot};
use crate::mode::Mode;
use crate::output::ActuatorCommandVector;

// ───────────────────────────────────────────────────────────────
// Driver station
// ───────────────────────────────────────────────────────────────

/// From `at_secs` onward the field reports `mode` and the operator
/// holds `input`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub at_secs: f64,
    pub mode: Mode,
    pub input: InputSnapshot,
}

/// Scripted mode/input source.
#[derive(Debug, Clone, Default)]
pub struct SimDriverStation {
    routine: Option<String>,
    script: Vec<ScriptStep>,
    cursor: usize,
    mode: Mode,
    input: InputSnapshot,
}

impl SimDriverStation {
    /// Empty timeline: disabled with idle controls until steps are added.
    pub fn new(routine: Option<&str>) -> Self {
        Self {
            routine: routine.map(str::to_owned),
            ..Self::default()
        }
    }

    /// Add a step.  Steps are kept ordered by time; equal times keep
    /// insertion order.
    #[must_use]
    pub fn at(mut self, at_secs: f64, mode: Mode, input: InputSnapshot) -> Self {
        let idx = self.script.partition_point(|s| s.at_secs <= at_secs);
        self.script.insert(
            idx,
            ScriptStep {
                at_secs,
                mode,
                input,
            },
        );
        self
    }

    /// A short practice match: pre-match disabled, 15 s autonomous, a
    /// disabled gap, then a tour of every teleop binding.
    pub fn scripted_match(routine: Option<&str>) -> Self {
        let idle = InputSnapshot::IDLE;
        Self::new(routine)
            .at(0.0, Mode::Disabled, idle)
            .at(1.0, Mode::Autonomous, idle)
            .at(16.0, Mode::Disabled, idle)
            .at(18.0, Mode::Teleop, idle.with_axes(0.6, 0.0))
            .at(20.0, Mode::Teleop, idle.with_axes(0.6, 0.3).with_dpad(DpadQuadrant::North))
            .at(21.0, Mode::Teleop, idle.with_dpad(DpadQuadrant::East))
            .at(22.0, Mode::Teleop, idle.with_dpad(DpadQuadrant::South))
            .at(23.0, Mode::Teleop, idle.with_button(6).with_dpad(DpadQuadrant::North))
            .at(24.0, Mode::Teleop, idle.with_dpad(DpadQuadrant::West))
            .at(25.0, Mode::Teleop, idle.with_button(5).with_button(3))
            .at(26.0, Mode::Teleop, idle.with_button(4).with_axes(0.0, -0.5))
            .at(27.0, Mode::Teleop, idle)
            .at(28.0, Mode::Disabled, idle)
    }

    /// Apply every step due at or before `now_secs`.  Never rewinds.
    pub fn seek(&mut self, now_secs: f64) {
        while let Some(step) = self.script.get(self.cursor) {
            if step.at_secs > now_secs {
                break;
            }
            if step.mode != self.mode {
                debug!("SimDriverStation: {} at {:.2}s", step.mode, step.at_secs);
            }
            self.mode = step.mode;
            self.input = step.input;
            self.cursor += 1;
        }
    }

    /// Time of the last scripted step.
    pub fn end_secs(&self) -> f64 {
        self.script.last().map_or(0.0, |s| s.at_secs)
    }
}

impl ModePort for SimDriverStation {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn selected_routine(&self) -> Option<&str> {
        self.routine.as_deref()
    }
}

impl InputPort for SimDriverStation {
    fn snapshot(&mut self) -> InputSnapshot {
        self.input
    }
}

// ───────────────────────────────────────────────────────────────
// Actuators
// ───────────────────────────────────────────────────────────────

/// Recording actuator bus.
#[derive(Debug, Clone)]
pub struct SimActuators {
    limits: Option<CurrentLimits>,
    last: ActuatorCommandVector,
    writes: u64,
    history: Option<Vec<ActuatorCommandVector>>,
}

impl Default for SimActuators {
    fn default() -> Self {
        Self::new()
    }
}

impl SimActuators {
    /// Keep only the last write.
    pub fn new() -> Self {
        Self {
            limits: None,
            last: ActuatorCommandVector::STOPPED,
            writes: 0,
            history: None,
        }
    }

    /// Keep every write.
    pub fn recording() -> Self {
        Self {
            history: Some(Vec::new()),
            ..Self::new()
        }
    }

    /// Limits from the last `configure`, if any.
    pub fn limits(&self) -> Option<CurrentLimits> {
        self.limits
    }

    /// Last value actually driven onto the motors (after clamping).
    pub fn last(&self) -> ActuatorCommandVector {
        self.last
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Every clamped write, if recording.
    pub fn history(&self) -> &[ActuatorCommandVector] {
        self.history.as_deref().unwrap_or(&[])
    }
}

impl ActuatorPort for SimActuators {
    fn configure(&mut self, limits: &CurrentLimits) {
        info!(
            "SimActuators: current limits drive={}A feeder={}A launcher={}A",
            limits.drive_amps, limits.feeder_amps, limits.launcher_amps
        );
        self.limits = Some(*limits);
    }

    fn apply(&mut self, command: &ActuatorCommandVector) {
        let driven = command.clamped();
        self.last = driven;
        self.writes += 1;
        if let Some(history) = &mut self.history {
            history.push(driven);
        }
    }
}
