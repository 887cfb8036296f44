//! Ordered launcher/feeder rule table.
//!
//! Rules are evaluated top to bottom and the first match owns the
//! launcher/feeder group for the tick.  Nothing is ever blended.
//!
//! | # | Trigger                 | Launcher                 | Feeder            |
//! |---|-------------------------|--------------------------|-------------------|
//! | 1 | reverse-intake button   | −bumper                  | feeder_in         |
//! | 2 | d-pad North             | −bumper                  | 0                 |
//! | 3 | d-pad East              | −midfield                | 0                 |
//! | 4 | d-pad South             | configured slot          | configured slot   |
//! | 5 | d-pad West              | +intake                  | −feeder_in        |
//! | 6 | launcher-override button| override power           | 0                 |
//! | – | nothing matched         | 0                        | 0                 |
//!
//! ## Activation
//!
//! A [`Activation::Level`] rule matches on every tick its trigger is
//! asserted and stops matching when it is released.  An
//! [`Activation::EdgeLatched`] rule also matches while asserted, and on the
//! single tick its trigger goes from asserted to released it emits the
//! stopped command, unless some other rule is asserted on that tick.
//! Asserted rules always outrank a release.  That needs one bit of state
//! per rule: whether its trigger was asserted last tick.  Each rule's style
//! comes from [`RuleActivations`](crate::config::RuleActivations).

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::TeleopConfig;
use crate::input::{DpadQuadrant, InputSnapshot};
use crate::output::GroupCommand;

/// Rule table capacity.  Must stay ≤ 32 (one edge bit per rule in a `u32`).
pub const MAX_RULES: usize = 8;

/// How a rule reacts to its trigger over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Activation {
    /// Apply while held; recomputed from scratch every tick.
    #[default]
    Level,
    /// Apply while held; reset to zero on the release tick.
    EdgeLatched,
}

/// Input condition for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Button(u8),
    Dpad(DpadQuadrant),
}

impl Trigger {
    pub fn is_asserted(self, snapshot: &InputSnapshot) -> bool {
        match self {
            Self::Button(index) => snapshot.buttons.is_held(index),
            Self::Dpad(quadrant) => quadrant != DpadQuadrant::None && snapshot.dpad == quadrant,
        }
    }
}

/// One row: condition → command template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleopRule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub activation: Activation,
    pub command: GroupCommand,
}

pub type RuleTable = Vec<TeleopRule, MAX_RULES>;

/// Result of one table evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMatch {
    /// Rule at this index is asserted.
    Rule(usize),
    /// Edge-latched rule at this index was just released.
    Released(usize),
    /// Nothing matched.
    #[default]
    Default,
}

/// Build the rule table from configuration.  Called once at start-up.
pub fn build_rule_table(cfg: &TeleopConfig) -> RuleTable {
    let rows = [
        TeleopRule {
            name: "reverse intake",
            trigger: Trigger::Button(cfg.reverse_intake_button),
            activation: cfg.activations.reverse_intake,
            command: GroupCommand::new(-cfg.launcher_bumper_speed, cfg.feeder_in_speed),
        },
        TeleopRule {
            name: "bumper shot",
            trigger: Trigger::Dpad(DpadQuadrant::North),
            activation: cfg.activations.bumper_shot,
            command: GroupCommand::new(-cfg.launcher_bumper_speed, 0.0),
        },
        TeleopRule {
            name: "midfield shot",
            trigger: Trigger::Dpad(DpadQuadrant::East),
            activation: cfg.activations.midfield_shot,
            command: GroupCommand::new(-cfg.launcher_midfield_speed, 0.0),
        },
        TeleopRule {
            name: "south slot",
            trigger: Trigger::Dpad(DpadQuadrant::South),
            activation: cfg.activations.south_slot,
            command: cfg.dpad_south,
        },
        TeleopRule {
            name: "launcher intake",
            trigger: Trigger::Dpad(DpadQuadrant::West),
            activation: cfg.activations.launcher_intake,
            command: GroupCommand::new(cfg.launcher_intake_speed, -cfg.feeder_in_speed),
        },
        TeleopRule {
            name: "launcher override",
            trigger: Trigger::Button(cfg.launcher_override_button),
            activation: cfg.activations.launcher_override,
            command: GroupCommand::new(cfg.launcher_override_power, 0.0),
        },
    ];
    rows.into_iter().take(MAX_RULES).collect()
}

/// Bitmask of edge-latched rules whose trigger is asserted in `snapshot`.
pub fn latched_held(table: &[TeleopRule], snapshot: &InputSnapshot) -> u32 {
    table
        .iter()
        .enumerate()
        .filter(|(_, r)| r.activation == Activation::EdgeLatched && r.trigger.is_asserted(snapshot))
        .fold(0, |bits, (i, _)| bits | (1 << i))
}

/// First-match evaluation.  `held_last_tick` is the previous tick's
/// [`latched_held`] mask.  A release only counts when nothing is asserted.
pub fn evaluate(table: &[TeleopRule], snapshot: &InputSnapshot, held_last_tick: u32) -> RuleMatch {
    if let Some(i) = table.iter().position(|r| r.trigger.is_asserted(snapshot)) {
        return RuleMatch::Rule(i);
    }
    table
        .iter()
        .enumerate()
        .position(|(i, r)| r.activation == Activation::EdgeLatched && held_last_tick & (1 << i) != 0)
        .map_or(RuleMatch::Default, RuleMatch::Released)
}

/// Group command for an evaluation result.
pub fn command_for(table: &[TeleopRule], matched: RuleMatch) -> GroupCommand {
    match matched {
        RuleMatch::Rule(i) => table.get(i).map_or(GroupCommand::STOPPED, |r| r.command),
        RuleMatch::Released(_) | RuleMatch::Default => GroupCommand::STOPPED,
    }
}
