//! Integration tests for the ModeScheduler → sequencer/mapper → actuators
//! pipeline.

use crate::mock_hw::{ActuatorCall, MockDriverStation, MockHardware, RecordingSink};

use kitbot::adapters::time::ManualClock;
use kitbot::app::events::AppEvent;
use kitbot::autonomous::{PhaseKind, RoutineVariant};
use kitbot::config::RobotConfig;
use kitbot::input::{DpadQuadrant, InputSnapshot};
use kitbot::mode::Mode;
use kitbot::output::ActuatorCommandVector;
use kitbot::scheduler::ModeScheduler;

struct Rig {
    scheduler: ModeScheduler,
    ds: MockDriverStation,
    clock: ManualClock,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Rig {
    fn new(config: RobotConfig, ds: MockDriverStation) -> Self {
        let mut rig = Self {
            scheduler: ModeScheduler::new(config),
            ds,
            clock: ManualClock::new(0.0),
            hw: MockHardware::new(),
            sink: RecordingSink::new(),
        };
        rig.scheduler.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    fn tick_at(&mut self, mode: Mode, now: f64) -> ActuatorCommandVector {
        self.ds.mode = mode;
        self.clock.set(now);
        self.scheduler
            .tick(&mut self.ds, &self.clock, &mut self.hw, &mut self.sink)
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_applies_current_limits_before_first_write() {
    let rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    let limits = RobotConfig::brushless().current_limits;
    assert_eq!(limits.drive_amps, 60);
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::Configure(limits),
            ActuatorCall::Apply(ActuatorCommandVector::STOPPED),
        ]
    );
}

// ── Exactly one write per tick ───────────────────────────────

#[test]
fn every_tick_writes_exactly_once() {
    let mut rig = Rig::new(RobotConfig::classic(), MockDriverStation::new());
    let script = [
        Mode::Disabled,
        Mode::Autonomous,
        Mode::Autonomous,
        Mode::Disabled,
        Mode::Teleop,
        Mode::Teleop,
        Mode::Autonomous,
        Mode::Disabled,
    ];
    for (i, mode) in script.iter().enumerate() {
        let before = rig.hw.apply_count();
        let returned = rig.tick_at(*mode, i as f64 * 0.02);
        assert_eq!(rig.hw.apply_count(), before + 1, "tick {i} ({mode})");
        assert_eq!(rig.hw.last_applied(), Some(returned));
    }
}

// ── Disable forces zero ───────────────────────────────────────

#[test]
fn disabled_tick_after_autonomous_is_all_zero() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    let v = rig.tick_at(Mode::Autonomous, 5.0);
    assert!(!v.is_stopped(), "spin-up should be commanding the launcher");

    let v = rig.tick_at(Mode::Disabled, 5.02);
    assert!(v.is_stopped());
    assert!(rig.scheduler.autonomous().is_none());
}

#[test]
fn disabled_tick_after_teleop_is_all_zero() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    rig.ds.input = InputSnapshot::IDLE
        .with_dpad(DpadQuadrant::North)
        .with_button(3)
        .with_axes(1.0, 0.0);
    assert!(!rig.tick_at(Mode::Teleop, 1.0).is_stopped());
    // Controls still held, but the field disabled the robot.
    assert!(rig.tick_at(Mode::Disabled, 1.02).is_stopped());
}

#[test]
fn disabled_ignores_operator_input() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    rig.ds.input = InputSnapshot::IDLE.with_button(6);
    assert!(rig.tick_at(Mode::Disabled, 0.0).is_stopped());
    assert_eq!(rig.ds.polls, 0);
}

// ── Autonomous entry ──────────────────────────────────────────

#[test]
fn reentering_autonomous_restarts_the_script() {
    let mut rig = Rig::new(RobotConfig::classic(), MockDriverStation::new());
    rig.tick_at(Mode::Autonomous, 10.0);
    assert_eq!(rig.tick_at(Mode::Autonomous, 13.0).feeder, 1.0);
    rig.tick_at(Mode::Disabled, 13.02);

    // Fresh start: elapsed measured from the new entry, so spin-up again.
    let v = rig.tick_at(Mode::Autonomous, 50.0);
    assert_eq!(v.launcher, 1.0);
    assert_eq!(v.feeder, 0.0);
    assert_eq!(rig.scheduler.autonomous().unwrap().start_secs(), 50.0);
}

#[test]
fn autonomous_started_event_carries_resolved_routine() {
    let mut rig = Rig::new(RobotConfig::classic(), MockDriverStation::with_routine("drive"));
    rig.tick_at(Mode::Autonomous, 7.0);
    assert!(rig.sink.events.contains(&AppEvent::AutonomousStarted {
        variant: RoutineVariant::DriveOnly,
        start_secs: 7.0,
        hold_at_secs: 5.5,
    }));
    assert_eq!(rig.sink.mode_changes(), vec![(Mode::Disabled, Mode::Autonomous)]);
}

#[test]
fn missing_selection_runs_launch_and_drive() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    rig.tick_at(Mode::Autonomous, 0.0);
    assert_eq!(
        rig.scheduler.autonomous().unwrap().variant(),
        RoutineVariant::LaunchAndDrive
    );
}

#[test]
fn phase_changes_reported_once_each() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    let mut t = 0.0;
    while t < 9.0 {
        rig.tick_at(Mode::Autonomous, t);
        t += 0.02;
    }
    let changes: Vec<(Option<PhaseKind>, PhaseKind)> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::PhaseChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (None, PhaseKind::SpinUp),
            (Some(PhaseKind::SpinUp), PhaseKind::Feed),
            (Some(PhaseKind::Feed), PhaseKind::Drive),
            (Some(PhaseKind::Drive), PhaseKind::Hold),
        ]
    );
}

// ── Teleop entry ──────────────────────────────────────────────

#[test]
fn teleop_entry_clears_edge_state() {
    // Classic build edge-latches the reverse-intake rule.
    let mut rig = Rig::new(RobotConfig::classic(), MockDriverStation::new());
    rig.ds.input = InputSnapshot::IDLE.with_button(6);
    rig.tick_at(Mode::Teleop, 0.0);
    rig.tick_at(Mode::Disabled, 0.02);

    // Button released while disabled; teleop re-entry must not report a
    // stale release.
    rig.ds.input = InputSnapshot::IDLE;
    let v = rig.tick_at(Mode::Teleop, 0.04);
    assert!(v.is_stopped());
    assert!(!rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::TeleopRuleChanged { to: "released", .. })));
}

#[test]
fn telemetry_tracks_last_write() {
    let mut rig = Rig::new(RobotConfig::brushless(), MockDriverStation::new());
    rig.ds.input = InputSnapshot::IDLE.with_button(4);
    rig.tick_at(Mode::Teleop, 3.0);
    let t = rig.scheduler.build_telemetry(4.0);
    assert_eq!(t.command.claw, -0.5);
    assert_eq!(t.secs_in_mode, 1.0);
    assert_eq!(t.mode, Mode::Teleop);
}
