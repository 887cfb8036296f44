//! Outbound application events.
//!
//! The [`ModeScheduler`](crate::scheduler::ModeScheduler) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log to the console,
//! publish to the dashboard, record for a test.

use crate::autonomous::{PhaseKind, RoutineVariant};
use crate::mode::Mode;
use crate::output::ActuatorCommandVector;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The scheduler has started (carries the loop period).
    Started { tick_interval_ms: u32 },

    /// Match control changed the mode.
    ModeChanged { from: Mode, to: Mode },

    /// Autonomous routine resolved at mode entry.
    AutonomousStarted {
        variant: RoutineVariant,
        start_secs: f64,
        hold_at_secs: f64,
    },

    /// The autonomous sequencer moved to a new phase.
    PhaseChanged {
        from: Option<PhaseKind>,
        to: PhaseKind,
        elapsed_secs: f64,
    },

    /// A different teleop rule now owns the launcher/feeder group.
    TeleopRuleChanged {
        from: &'static str,
        to: &'static str,
    },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub timestamp_secs: f64,
    pub mode: Mode,
    pub secs_in_mode: f64,
    pub variant: Option<RoutineVariant>,
    pub phase: Option<PhaseKind>,
    pub command: ActuatorCommandVector,
    pub tick_count: u64,
}
