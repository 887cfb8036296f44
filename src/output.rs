//! Per-tick actuator command vector.
//!
//! Produced fresh every tick by the autonomous sequencer, the teleop
//! mapper, or the disabled path, and written once to the
//! [`ActuatorPort`](crate::app::ports::ActuatorPort).  Every field is a
//! normalised power in `[-1, 1]`.

use serde::{Deserialize, Serialize};

/// Left/right drivetrain power pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DrivePower {
    pub left: f64,
    pub right: f64,
}

impl DrivePower {
    pub const STOPPED: Self = Self { left: 0.0, right: 0.0 };

    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// Launcher/feeder pair written by a single teleop rule or autonomous phase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupCommand {
    pub launcher: f64,
    pub feeder: f64,
}

impl GroupCommand {
    pub const STOPPED: Self = Self { launcher: 0.0, feeder: 0.0 };

    pub const fn new(launcher: f64, feeder: f64) -> Self {
        Self { launcher, feeder }
    }
}

/// Commands for every actuator on the robot, for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActuatorCommandVector {
    pub left_drive: f64,
    pub right_drive: f64,
    pub launcher: f64,
    pub feeder: f64,
    pub claw: f64,
}

impl ActuatorCommandVector {
    /// All actuators stopped.
    pub const STOPPED: Self = Self {
        left_drive: 0.0,
        right_drive: 0.0,
        launcher: 0.0,
        feeder: 0.0,
        claw: 0.0,
    };

    /// Assemble a vector from its three independent groups.
    pub const fn compose(drive: DrivePower, group: GroupCommand, claw: f64) -> Self {
        Self {
            left_drive: drive.left,
            right_drive: drive.right,
            launcher: group.launcher,
            feeder: group.feeder,
            claw,
        }
    }

    pub fn drive(&self) -> DrivePower {
        DrivePower::new(self.left_drive, self.right_drive)
    }

    pub fn group(&self) -> GroupCommand {
        GroupCommand::new(self.launcher, self.feeder)
    }

    /// True when every actuator is commanded to exactly zero.
    pub fn is_stopped(&self) -> bool {
        self.as_array().iter().all(|v| *v == 0.0)
    }

    /// True when every field lies within `[-1, 1]`.
    pub fn in_range(&self) -> bool {
        self.as_array().iter().all(|v| (-1.0..=1.0).contains(v))
    }

    /// Fields in sink order: left, right, launcher, feeder, claw.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.left_drive,
            self.right_drive,
            self.launcher,
            self.feeder,
            self.claw,
        ]
    }

    /// Bit-exact representation, for determinism checks.
    pub fn to_bits(&self) -> [u64; 5] {
        self.as_array().map(f64::to_bits)
    }

    /// Copy with every field clamped into `[-1, 1]`; NaN becomes zero.
    ///
    /// The core never relies on this; it exists for sinks.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) };
        Self {
            left_drive: c(self.left_drive),
            right_drive: c(self.right_drive),
            launcher: c(self.launcher),
            feeder: c(self.feeder),
            claw: c(self.claw),
        }
    }
}
