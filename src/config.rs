//! Robot configuration parameters
//!
//! Every tunable number in the control engine lives here: autonomous phase
//! thresholds and speeds, teleop launcher/feeder/claw speeds, button
//! bindings, loop timing and motor current limits.  Two built-in profiles
//! describe the two robot builds; values can be overridden from a JSON file.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::autonomous::DriveBias;
use crate::error::ConfigError;
use crate::input::MAX_BUTTONS;
use crate::output::{DrivePower, GroupCommand};
use crate::teleop::rules::Activation;

/// Maximum number of scripted autonomous phases (the Hold phase is implicit).
pub const MAX_PHASES: usize = 8;

// ---------------------------------------------------------------------------
// Autonomous
// ---------------------------------------------------------------------------

/// Command template for one scripted autonomous phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseTemplate {
    /// Launcher spinning, everything else stopped.
    SpinUp,
    /// Launcher spinning and feeder pushing the note in.
    Feed,
    /// Drivetrain at the bias pair, launcher and feeder stopped.
    Drive,
}

/// One scripted phase: runs from the previous step's end until `end_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseStep {
    /// Threshold (seconds since autonomous start) at which this phase ends.
    pub end_secs: f64,
    pub template: PhaseTemplate,
}

impl PhaseStep {
    pub const fn new(end_secs: f64, template: PhaseTemplate) -> Self {
        Self { end_secs, template }
    }
}

/// Tank drive pair for each drive bias.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasSpeeds {
    pub straight: DrivePower,
    pub left: DrivePower,
    pub right: DrivePower,
}

impl BiasSpeeds {
    pub fn for_bias(&self, bias: DriveBias) -> DrivePower {
        match bias {
            DriveBias::Straight => self.straight,
            DriveBias::Left => self.left,
            DriveBias::Right => self.right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomousConfig {
    /// Ordered phase script; thresholds must be strictly increasing.
    pub phases: Vec<PhaseStep, MAX_PHASES>,
    /// Signed launcher power used by SpinUp and Feed.
    pub launcher_speed: f64,
    /// Signed feeder power used by Feed.
    pub feeder_speed: f64,
    /// Which drive pair the Drive phase uses.
    pub drive_bias: DriveBias,
    pub bias_speeds: BiasSpeeds,
}

// ---------------------------------------------------------------------------
// Teleop
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleopConfig {
    /// Launcher magnitude for the bumper shot (emitted negated).
    pub launcher_bumper_speed: f64,
    /// Launcher magnitude for the midfield shot (emitted negated).
    pub launcher_midfield_speed: f64,
    /// Launcher power when intaking through the launcher (emitted as is).
    pub launcher_intake_speed: f64,
    /// Launcher power for the override button (full reverse).
    pub launcher_override_power: f64,
    /// Signed feeder intake power.  Reverse-intake uses it as is, d-pad West
    /// negates it.
    pub feeder_in_speed: f64,
    /// What the d-pad South slot commands.
    pub dpad_south: GroupCommand,
    pub reverse_intake_button: u8,
    pub launcher_override_button: u8,
    /// Activation style of each rule, in table order.
    pub activations: RuleActivations,
}

/// Per-rule activation style.  Defaults to [`Activation::Level`] everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleActivations {
    pub reverse_intake: Activation,
    pub bumper_shot: Activation,
    pub midfield_shot: Activation,
    pub south_slot: Activation,
    pub launcher_intake: Activation,
    pub launcher_override: Activation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClawConfig {
    pub forward_button: u8,
    pub reverse_button: u8,
    pub output_power: f64,
}

/// Motor controller current limits, handed to the actuator sink at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLimits {
    pub drive_amps: u8,
    pub feeder_amps: u8,
    pub launcher_amps: u8,
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

/// Core robot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Control loop period (milliseconds).
    pub tick_interval_ms: u32,
    /// Telemetry report interval (ticks).
    pub telemetry_interval_ticks: u32,
    pub autonomous: AutonomousConfig,
    pub teleop: TeleopConfig,
    pub claw: ClawConfig,
    pub current_limits: CurrentLimits,
}

fn phase_list(steps: &[PhaseStep]) -> Vec<PhaseStep, MAX_PHASES> {
    steps.iter().copied().take(MAX_PHASES).collect()
}

impl RobotConfig {
    /// Brushless CAN build: 4-phase autonomous with drive bias selection.
    pub fn brushless() -> Self {
        Self {
            tick_interval_ms: 20, // 50 Hz
            telemetry_interval_ticks: 50,
            autonomous: AutonomousConfig {
                phases: phase_list(&[
                    PhaseStep::new(4.0, PhaseTemplate::SpinUp),
                    PhaseStep::new(6.5, PhaseTemplate::Feed),
                    PhaseStep::new(7.5, PhaseTemplate::Drive),
                ]),
                launcher_speed: -1.0,
                feeder_speed: -0.7,
                drive_bias: DriveBias::Straight,
                bias_speeds: BiasSpeeds {
                    straight: DrivePower::new(-0.8, -0.8),
                    left: DrivePower::new(-0.6, -0.5),
                    right: DrivePower::new(-0.5, -0.6),
                },
            },
            teleop: TeleopConfig {
                launcher_bumper_speed: 1.0,
                launcher_midfield_speed: 1.0,
                launcher_intake_speed: 1.0,
                launcher_override_power: -1.0,
                feeder_in_speed: -0.7,
                dpad_south: GroupCommand::STOPPED,
                reverse_intake_button: 6,
                launcher_override_button: 5,
                activations: RuleActivations::default(),
            },
            claw: ClawConfig {
                forward_button: 3,
                reverse_button: 4,
                output_power: 0.5,
            },
            current_limits: CurrentLimits {
                drive_amps: 60,
                feeder_amps: 60,
                launcher_amps: 60,
            },
        }
    }

    /// Classic brushed build: 3-phase straight-drive autonomous, amp
    /// scoring on d-pad South and edge-latched overrides.
    pub fn classic() -> Self {
        let straight = DrivePower::new(-0.5, -0.5);
        Self {
            tick_interval_ms: 20,
            telemetry_interval_ticks: 50,
            autonomous: AutonomousConfig {
                phases: phase_list(&[
                    PhaseStep::new(2.0, PhaseTemplate::SpinUp),
                    PhaseStep::new(4.0, PhaseTemplate::Feed),
                    PhaseStep::new(4.0 + 1.5, PhaseTemplate::Drive),
                ]),
                launcher_speed: 1.0,
                feeder_speed: 1.0,
                drive_bias: DriveBias::Straight,
                // No steering on this build: every bias drives straight.
                bias_speeds: BiasSpeeds {
                    straight,
                    left: straight,
                    right: straight,
                },
            },
            teleop: TeleopConfig {
                launcher_bumper_speed: 1.0,
                launcher_midfield_speed: 0.8,
                launcher_intake_speed: 1.0,
                launcher_override_power: -1.0,
                feeder_in_speed: -0.4,
                dpad_south: GroupCommand::new(0.17, 0.4),
                reverse_intake_button: 6,
                launcher_override_button: 5,
                activations: RuleActivations {
                    reverse_intake: Activation::EdgeLatched,
                    launcher_override: Activation::EdgeLatched,
                    ..RuleActivations::default()
                },
            },
            claw: ClawConfig {
                forward_button: 3,
                reverse_button: 4,
                output_power: 0.5,
            },
            current_limits: CurrentLimits {
                drive_amps: 60,
                feeder_amps: 80,
                launcher_amps: 80,
            },
        }
    }

    /// Look up a built-in profile by name.
    pub fn profile(name: &str) -> Option<Self> {
        match name {
            "brushless" => Some(Self::brushless()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self::brushless()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn unit_range(v: f64) -> bool {
    v.is_finite() && (-1.0..=1.0).contains(&v)
}

fn drive_in_range(d: DrivePower) -> bool {
    unit_range(d.left) && unit_range(d.right)
}

fn button_in_range(b: u8) -> bool {
    (1..=MAX_BUTTONS).contains(&b)
}

/// Range-check every field.  Rejects rather than clamps.
pub fn validate_config(cfg: &RobotConfig) -> Result<(), ConfigError> {
    if !(5..=100).contains(&cfg.tick_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "tick_interval_ms must be 5–100",
        ));
    }
    if cfg.telemetry_interval_ticks == 0 {
        return Err(ConfigError::ValidationFailed(
            "telemetry_interval_ticks must be at least 1",
        ));
    }

    let auto = &cfg.autonomous;
    if auto.phases.is_empty() {
        return Err(ConfigError::ValidationFailed(
            "autonomous.phases must not be empty",
        ));
    }
    let mut previous = 0.0;
    for step in &auto.phases {
        if !step.end_secs.is_finite() || step.end_secs <= previous {
            return Err(ConfigError::ValidationFailed(
                "autonomous.phases thresholds must be finite and strictly increasing from 0",
            ));
        }
        previous = step.end_secs;
    }
    if !unit_range(auto.launcher_speed) || !unit_range(auto.feeder_speed) {
        return Err(ConfigError::ValidationFailed(
            "autonomous launcher/feeder speed must be within -1.0–1.0",
        ));
    }
    let bias = &auto.bias_speeds;
    if !(drive_in_range(bias.straight) && drive_in_range(bias.left) && drive_in_range(bias.right))
    {
        return Err(ConfigError::ValidationFailed(
            "autonomous.bias_speeds must be within -1.0–1.0",
        ));
    }

    let t = &cfg.teleop;
    let speeds = [
        t.launcher_bumper_speed,
        t.launcher_midfield_speed,
        t.launcher_intake_speed,
        t.launcher_override_power,
        t.feeder_in_speed,
        t.dpad_south.launcher,
        t.dpad_south.feeder,
    ];
    if !speeds.iter().all(|v| unit_range(*v)) {
        return Err(ConfigError::ValidationFailed(
            "teleop speeds must be within -1.0–1.0",
        ));
    }
    if !button_in_range(t.reverse_intake_button) || !button_in_range(t.launcher_override_button) {
        return Err(ConfigError::ValidationFailed(
            "teleop button indices must be 1–32",
        ));
    }

    let c = &cfg.claw;
    if !button_in_range(c.forward_button) || !button_in_range(c.reverse_button) {
        return Err(ConfigError::ValidationFailed("claw button indices must be 1–32"));
    }
    if !c.output_power.is_finite() || !(0.0..=1.0).contains(&c.output_power) {
        return Err(ConfigError::ValidationFailed(
            "claw.output_power must be 0.0–1.0",
        ));
    }

    let l = &cfg.current_limits;
    if l.drive_amps == 0 || l.feeder_amps == 0 || l.launcher_amps == 0 {
        return Err(ConfigError::ValidationFailed(
            "current limits must be non-zero",
        ));
    }
    Ok(())
}
