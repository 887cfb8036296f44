//! Time-gated autonomous phase sequencer.
//!
//! The sequencer owns nothing but the autonomous start timestamp and an
//! immutable phase table.  Every tick the phase is re-selected from
//! elapsed time alone, so equal elapsed times always give equal commands
//! and a missed tick cannot desynchronise the script.
//!
//! Phase `i` covers `[threshold_{i-1}, threshold_i)` (the first starts at
//! zero); at or past the last threshold the absorbing Hold phase stops
//! everything.

pub mod phases;
pub mod routine;

use heapless::Vec;

use crate::output::ActuatorCommandVector;
use phases::{MAX_TABLE, Phase, build_phase_table};

pub use phases::PhaseKind;
pub use routine::{AutonomousTuning, DriveBias, RoutineVariant};

/// Index of the phase active at `elapsed` given ascending `thresholds`.
///
/// Equal to the number of thresholds at or below `elapsed`, which makes it
/// a non-decreasing step function of `elapsed`.  NaN selects phase 0.
pub fn select_phase(thresholds: &[f64], elapsed: f64) -> usize {
    thresholds.partition_point(|t| *t <= elapsed)
}

/// Runs one resolved autonomous routine.
#[derive(Debug, Clone)]
pub struct AutonomousSequencer {
    start_secs: f64,
    tuning: AutonomousTuning,
    table: Vec<Phase, MAX_TABLE>,
    thresholds: Vec<f64, MAX_TABLE>,
}

impl AutonomousSequencer {
    /// Capture the start timestamp and build the phase table.
    pub fn new(start_secs: f64, tuning: AutonomousTuning) -> Self {
        let table = build_phase_table(&tuning);
        let thresholds = tuning.thresholds().collect();
        Self {
            start_secs,
            tuning,
            table,
            thresholds,
        }
    }

    /// Seconds since autonomous start, clamped to zero if the clock stepped
    /// backwards.
    pub fn elapsed(&self, now_secs: f64) -> f64 {
        let elapsed = now_secs - self.start_secs;
        if elapsed > 0.0 { elapsed } else { 0.0 }
    }

    /// The unique phase active at `elapsed`.
    pub fn phase_at(&self, elapsed: f64) -> &Phase {
        let idx = select_phase(&self.thresholds, elapsed).min(self.table.len() - 1);
        &self.table[idx]
    }

    /// Command vector for a given elapsed time.
    pub fn command_at(&self, elapsed: f64) -> ActuatorCommandVector {
        self.phase_at(elapsed).command
    }

    /// Command vector for the current clock reading.
    pub fn command_now(&self, now_secs: f64) -> ActuatorCommandVector {
        self.command_at(self.elapsed(now_secs))
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn variant(&self) -> RoutineVariant {
        self.tuning.variant
    }

    pub fn phases(&self) -> &[Phase] {
        &self.table
    }
}
