//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each [`AppEvent`] as one
//! `TAG | key=value` line through the `log` facade.  A dashboard adapter
//! would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] at `info` level.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted += 1;
        match event {
            AppEvent::Telemetry(t) => {
                let c = &t.command;
                info!(
                    "TELEM | t={:.2}s mode={} in_mode={:.2}s | phase={:?} | \
                     drive={:+.2}/{:+.2} launcher={:+.2} feeder={:+.2} claw={:+.2} | ticks={}",
                    t.timestamp_secs,
                    t.mode,
                    t.secs_in_mode,
                    t.phase,
                    c.left_drive,
                    c.right_drive,
                    c.launcher,
                    c.feeder,
                    c.claw,
                    t.tick_count,
                );
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from, to);
            }
            AppEvent::AutonomousStarted {
                variant,
                start_secs,
                hold_at_secs,
            } => {
                info!(
                    "AUTO | routine='{}' start={:.3}s hold_at=+{:.2}s",
                    variant, start_secs, hold_at_secs
                );
            }
            AppEvent::PhaseChanged {
                from,
                to,
                elapsed_secs,
            } => {
                info!("PHASE | {:?} -> {:?} at={:.2}s", from, to, elapsed_secs);
            }
            AppEvent::TeleopRuleChanged { from, to } => {
                info!("RULE | {} -> {}", from, to);
            }
            AppEvent::Started { tick_interval_ms } => {
                info!("START | tick={}ms", tick_interval_ms);
            }
        }
    }
}
