//! Phase table builder.
//!
//! Each scripted step becomes one row holding its time interval and the
//! fixed command vector it emits.  A terminal Hold row is appended after
//! the last threshold.
//!
//! ```text
//!   0 ── SpinUp ──▶ t1 ── Feed ──▶ t2 ── Drive ──▶ t3 ── Hold ──▶ ∞
//!        launcher        launcher        drive pair        all zero
//!                        + feeder
//! ```

use heapless::Vec;

use super::routine::AutonomousTuning;
use crate::config::{MAX_PHASES, PhaseTemplate};
use crate::output::{ActuatorCommandVector, DrivePower, GroupCommand};

/// Scripted phases plus the terminal Hold row.
pub const MAX_TABLE: usize = MAX_PHASES + 1;

/// What a phase does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    SpinUp,
    Feed,
    Drive,
    /// Terminal, absorbing: everything stopped.
    Hold,
}

impl From<PhaseTemplate> for PhaseKind {
    fn from(t: PhaseTemplate) -> Self {
        match t {
            PhaseTemplate::SpinUp => Self::SpinUp,
            PhaseTemplate::Feed => Self::Feed,
            PhaseTemplate::Drive => Self::Drive,
        }
    }
}

/// One row of the phase table: active on `[start_secs, end_secs)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub index: usize,
    pub kind: PhaseKind,
    pub start_secs: f64,
    /// `f64::INFINITY` for the Hold row.
    pub end_secs: f64,
    pub command: ActuatorCommandVector,
}

impl Phase {
    pub fn contains(&self, elapsed: f64) -> bool {
        elapsed >= self.start_secs && elapsed < self.end_secs
    }
}

/// Resolve a template against the tuning.
pub fn command_for(kind: PhaseKind, tuning: &AutonomousTuning) -> ActuatorCommandVector {
    let (drive, group) = match kind {
        PhaseKind::SpinUp => (
            DrivePower::STOPPED,
            GroupCommand::new(tuning.launcher_speed, 0.0),
        ),
        PhaseKind::Feed => (
            DrivePower::STOPPED,
            GroupCommand::new(tuning.launcher_speed, tuning.feeder_speed),
        ),
        PhaseKind::Drive => (tuning.drive, GroupCommand::STOPPED),
        PhaseKind::Hold => return ActuatorCommandVector::STOPPED,
    };
    ActuatorCommandVector::compose(drive, group, 0.0)
}

/// Build the phase table.  Called once at autonomous entry.
///
/// `steps` holds at most `MAX_PHASES` rows, so the table always fits.
pub fn build_phase_table(tuning: &AutonomousTuning) -> Vec<Phase, MAX_TABLE> {
    let starts = core::iter::once(0.0).chain(tuning.thresholds());
    let scripted = tuning
        .steps
        .iter()
        .zip(starts)
        .enumerate()
        .map(|(index, (step, start_secs))| {
            let kind = PhaseKind::from(step.template);
            Phase {
                index,
                kind,
                start_secs,
                end_secs: step.end_secs,
                command: command_for(kind, tuning),
            }
        });
    let hold = Phase {
        index: tuning.steps.len(),
        kind: PhaseKind::Hold,
        start_secs: tuning.last_threshold(),
        end_secs: f64::INFINITY,
        command: ActuatorCommandVector::STOPPED,
    };
    scripted.chain(core::iter::once(hold)).collect()
}
