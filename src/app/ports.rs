//! Port traits: the hexagonal boundary between the control core and the
//! robot platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ModeScheduler (domain)
//! ```
//!
//! Platform adapters (driver station, motor controllers, clock, dashboard,
//! config storage) implement these traits.  The
//! [`ModeScheduler`](crate::scheduler::ModeScheduler) consumes them via
//! generics, so the core never touches hardware directly.
//!
//! All ports are assumed non-blocking and fast relative to the tick period.

use crate::config::{CurrentLimits, RobotConfig};
use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::mode::Mode;
use crate::output::ActuatorCommandVector;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait ClockPort {
    /// Seconds since an arbitrary epoch.  Should never decrease; the core
    /// tolerates it if it does.
    fn now_secs(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: driver station → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for operator controls.
pub trait InputPort {
    /// Current state of every control the core reads.
    fn snapshot(&mut self) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Mode port (driven adapter: match control → domain)
// ───────────────────────────────────────────────────────────────

/// Match-control state.
pub trait ModePort {
    /// Mode the field currently commands.
    fn mode(&self) -> Mode;

    /// Key chosen on the pre-match routine chooser, if any.
    fn selected_routine(&self) -> Option<&str>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → motor controllers)
// ───────────────────────────────────────────────────────────────

/// Write-side port for motor commands.
pub trait ActuatorPort {
    /// Apply current limits.  Called once before the first tick.
    fn configure(&mut self, limits: &CurrentLimits);

    /// Write one tick's commands.  Implementations clamp to `[-1, 1]`.
    fn apply(&mut self, command: &ActuatorCommandVector);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / dashboard)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists robot configuration.
///
/// Implementations MUST validate with
/// [`validate_config`](crate::config::validate_config) on both paths and
/// reject invalid values rather than clamping them.
pub trait ConfigPort {
    /// Load configuration.  Returns [`RobotConfig::default()`] if nothing
    /// is stored.
    fn load(&self) -> Result<RobotConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &RobotConfig) -> Result<(), ConfigError>;
}
