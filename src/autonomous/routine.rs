//! Routine selection and tuning resolution.
//!
//! The pre-match chooser publishes a string key; [`RoutineVariant::resolve`]
//! turns it into a variant, and [`AutonomousTuning::resolve`] combines the
//! variant with the configured script into the immutable tuning record the
//! sequencer runs from.

use core::fmt;

use heapless::Vec;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{AutonomousConfig, MAX_PHASES, PhaseStep};
use crate::output::DrivePower;

// ---------------------------------------------------------------------------
// Routine variant
// ---------------------------------------------------------------------------

/// Which autonomous script runs this match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoutineVariant {
    /// Sit still.
    NothingAuto,
    /// Launch the preloaded note, then drive out.
    #[default]
    LaunchAndDrive,
    /// Launch only; the drive phase runs at zero.
    LaunchOnly,
    /// Drive only; the launcher stays off.
    DriveOnly,
}

impl RoutineVariant {
    pub const ALL: [Self; 4] = [
        Self::NothingAuto,
        Self::LaunchAndDrive,
        Self::LaunchOnly,
        Self::DriveOnly,
    ];

    /// Chooser key published on the dashboard.
    pub fn chooser_key(self) -> &'static str {
        match self {
            Self::NothingAuto => "do nothing",
            Self::LaunchAndDrive => "launch drive",
            Self::LaunchOnly => "launch",
            Self::DriveOnly => "drive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.chooser_key() == key)
    }

    /// Resolve the chooser selection.
    ///
    /// No selection falls back to the default (`LaunchAndDrive`); an
    /// unrecognised key resolves to `NothingAuto`.
    pub fn resolve(selection: Option<&str>) -> Self {
        match selection {
            None => Self::default(),
            Some(key) => Self::from_key(key).unwrap_or_else(|| {
                warn!("Routine: unknown chooser key '{}', running {}", key, Self::NothingAuto);
                Self::NothingAuto
            }),
        }
    }

    /// Whether the launcher runs.
    pub fn launches(self) -> bool {
        matches!(self, Self::LaunchAndDrive | Self::LaunchOnly)
    }

    /// Whether the feeder runs in its phase.  Only `NothingAuto` zeroes it.
    pub fn feeds(self) -> bool {
        !matches!(self, Self::NothingAuto)
    }

    /// Whether the drivetrain moves.
    pub fn drives(self) -> bool {
        matches!(self, Self::LaunchAndDrive | Self::DriveOnly)
    }
}

impl fmt::Display for RoutineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chooser_key())
    }
}

// ---------------------------------------------------------------------------
// Drive bias
// ---------------------------------------------------------------------------

/// Direction the drive phase leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DriveBias {
    #[default]
    Straight,
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// Tuning
// ---------------------------------------------------------------------------

/// Immutable per-match autonomous parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AutonomousTuning {
    pub variant: RoutineVariant,
    /// Scripted phases, thresholds strictly increasing.
    pub steps: Vec<PhaseStep, MAX_PHASES>,
    pub launcher_speed: f64,
    pub feeder_speed: f64,
    pub drive: DrivePower,
}

impl AutonomousTuning {
    /// Apply the variant's zero overrides to the configured script.
    pub fn resolve(variant: RoutineVariant, cfg: &AutonomousConfig) -> Self {
        let launcher_speed = if variant.launches() { cfg.launcher_speed } else { 0.0 };
        let feeder_speed = if variant.feeds() { cfg.feeder_speed } else { 0.0 };
        let drive = if variant.drives() {
            cfg.bias_speeds.for_bias(cfg.drive_bias)
        } else {
            DrivePower::STOPPED
        };
        Self {
            variant,
            steps: cfg.phases.clone(),
            launcher_speed,
            feeder_speed,
            drive,
        }
    }

    /// Phase end thresholds, in order.
    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|s| s.end_secs)
    }

    /// Threshold at which the terminal Hold phase begins.
    pub fn last_threshold(&self) -> f64 {
        self.steps.last().map_or(0.0, |s| s.end_secs)
    }
}
