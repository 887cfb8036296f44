//! Teleop input mapper.
//!
//! Maps one [`InputSnapshot`] to one [`ActuatorCommandVector`] through three
//! independent groups:
//!
//! ```text
//!  snapshot ──┬──▶ rule table (first match) ──▶ launcher, feeder
//!             ├──▶ claw buttons              ──▶ claw
//!             └──▶ arcade mix (last)         ──▶ left, right
//! ```
//!
//! The only state carried between ticks is the edge-latched rules'
//! "held last tick" mask.

pub mod drive;
pub mod rules;

use log::debug;

use crate::config::{ClawConfig, RobotConfig, TeleopConfig};
use crate::input::InputSnapshot;
use crate::output::ActuatorCommandVector;
use rules::{RuleMatch, RuleTable, TeleopRule, build_rule_table, evaluate, latched_held};

/// Claw power: forward button wins over reverse, neither stops.
pub fn claw_power(cfg: &ClawConfig, snapshot: &InputSnapshot) -> f64 {
    if snapshot.buttons.is_held(cfg.forward_button) {
        cfg.output_power
    } else if snapshot.buttons.is_held(cfg.reverse_button) {
        -cfg.output_power
    } else {
        0.0
    }
}

pub struct TeleopMapper {
    rules: RuleTable,
    claw: ClawConfig,
    held_last_tick: u32,
    last_match: RuleMatch,
}

impl TeleopMapper {
    pub fn new(teleop: &TeleopConfig, claw: &ClawConfig) -> Self {
        Self {
            rules: build_rule_table(teleop),
            claw: *claw,
            held_last_tick: 0,
            last_match: RuleMatch::Default,
        }
    }

    pub fn from_config(config: &RobotConfig) -> Self {
        Self::new(&config.teleop, &config.claw)
    }

    /// Forget edge state.  Called on teleop entry.
    pub fn reset(&mut self) {
        self.held_last_tick = 0;
        self.last_match = RuleMatch::Default;
    }

    /// Map one tick of input.
    pub fn map(&mut self, snapshot: &InputSnapshot) -> ActuatorCommandVector {
        let matched = evaluate(&self.rules, snapshot, self.held_last_tick);
        self.held_last_tick = latched_held(&self.rules, snapshot);

        if matched != self.last_match {
            debug!(
                "Teleop: {} -> {}",
                self.describe(self.last_match),
                self.describe(matched)
            );
        }
        self.last_match = matched;

        let group = rules::command_for(&self.rules, matched);
        let claw = claw_power(&self.claw, snapshot);
        let drive = drive::drive_from_axes(snapshot);
        ActuatorCommandVector::compose(drive, group, claw)
    }

    /// Rule that owned the launcher/feeder group on the last tick.
    pub fn last_match(&self) -> RuleMatch {
        self.last_match
    }

    /// Human-readable name of a match result.
    pub fn describe(&self, matched: RuleMatch) -> &'static str {
        match matched {
            RuleMatch::Rule(i) => self.rules.get(i).map_or("unknown", |r| r.name),
            RuleMatch::Released(_) => "released",
            RuleMatch::Default => "stopped",
        }
    }

    pub fn rules(&self) -> &[TeleopRule] {
        &self.rules
    }
}
