//! Clock adapters.
//!
//! - [`MonotonicClock`] wraps `std::time::Instant` for real-time runs.
//! - [`ManualClock`] is set explicitly, for simulation and tests.

use std::cell::Cell;
use std::time::Instant;

use crate::app::ports::ClockPort;

/// Seconds since construction, from the host monotonic timer.
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to.
///
/// Interior mutability lets the runner advance it while the scheduler
/// holds a shared reference.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_secs: f64) -> Self {
        Self {
            now: Cell::new(start_secs),
        }
    }

    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl ClockPort for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
