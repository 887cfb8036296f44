//! End-to-end match scenarios through the scheduler with mock adapters.

use crate::mock_hw::{MockDriverStation, MockHardware, RecordingSink};

use kitbot::adapters::sim::{SimActuators, SimDriverStation};
use kitbot::adapters::time::ManualClock;
use kitbot::app::events::AppEvent;
use kitbot::config::RobotConfig;
use kitbot::input::{ButtonSet, DpadQuadrant, InputSnapshot};
use kitbot::mode::Mode;
use kitbot::output::{ActuatorCommandVector, DrivePower};
use kitbot::scheduler::ModeScheduler;

fn autonomous_at(
    config: RobotConfig,
    routine: Option<&str>,
    start: f64,
    offsets: &[f64],
) -> Vec<ActuatorCommandVector> {
    let mut scheduler = ModeScheduler::new(config);
    let mut ds = match routine {
        Some(key) => MockDriverStation::with_routine(key),
        None => MockDriverStation::new(),
    };
    ds.mode = Mode::Autonomous;
    let clock = ManualClock::new(start);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // Entry tick captures the start time.
    scheduler.tick(&mut ds, &clock, &mut hw, &mut sink);
    offsets
        .iter()
        .map(|dt| {
            clock.set(start + dt);
            scheduler.tick(&mut ds, &clock, &mut hw, &mut sink)
        })
        .collect()
}

fn teleop_once(config: RobotConfig, input: InputSnapshot) -> ActuatorCommandVector {
    let mut scheduler = ModeScheduler::new(config);
    let mut ds = MockDriverStation::new();
    ds.mode = Mode::Teleop;
    ds.input = input;
    let clock = ManualClock::new(0.0);
    scheduler.tick(&mut ds, &clock, &mut MockHardware::new(), &mut RecordingSink::new())
}

// ── Autonomous ────────────────────────────────────────────────

#[test]
fn launch_only_on_classic_thresholds() {
    let v = autonomous_at(RobotConfig::classic(), Some("launch"), 100.0, &[1.0, 3.0, 5.0, 10.0]);
    let tuned = RobotConfig::classic().autonomous;

    // t=1: spinning up, wheels still.
    assert_eq!(v[0].launcher, tuned.launcher_speed);
    assert_eq!(v[0].feeder, 0.0);
    assert_eq!(v[0].drive(), ActuatorCommandVector::STOPPED.drive());
    // t=3: feeding.
    assert_eq!(v[1].feeder, tuned.feeder_speed);
    assert_eq!(v[1].drive(), ActuatorCommandVector::STOPPED.drive());
    // t=5: drive phase, but this routine never drives.
    assert!(v[2].is_stopped(), "{:?}", v[2]);
    // t=10: hold.
    assert!(v[3].is_stopped());
}

#[test]
fn launch_and_drive_on_brushless_thresholds() {
    let v = autonomous_at(RobotConfig::brushless(), None, 0.0, &[3.99, 4.0, 6.49, 6.5, 7.49, 7.5, 60.0]);
    assert_eq!(v[0].launcher, -1.0);
    assert_eq!(v[0].feeder, 0.0);
    assert_eq!((v[1].launcher, v[1].feeder), (-1.0, -0.7));
    assert_eq!((v[2].launcher, v[2].feeder), (-1.0, -0.7));
    assert_eq!((v[3].left_drive, v[3].right_drive), (-0.8, -0.8));
    assert_eq!(v[3].launcher, 0.0);
    assert_eq!((v[4].left_drive, v[4].right_drive), (-0.8, -0.8));
    assert!(v[5].is_stopped());
    assert!(v[6].is_stopped());
}

#[test]
fn unknown_routine_key_runs_nothing() {
    let v = autonomous_at(RobotConfig::brushless(), Some("spin in circles"), 0.0, &[0.0, 2.0, 5.0, 7.0, 8.0]);
    assert!(v.iter().all(ActuatorCommandVector::is_stopped));
}

#[test]
fn do_nothing_routine_is_all_zero() {
    let v = autonomous_at(RobotConfig::classic(), Some("do nothing"), 3.0, &[0.0, 1.0, 3.0, 5.0]);
    assert!(v.iter().all(ActuatorCommandVector::is_stopped));
}

#[test]
fn drive_only_feeds_but_never_spins_the_launcher() {
    let v = autonomous_at(RobotConfig::brushless(), Some("drive"), 0.0, &[1.0, 5.0, 7.0, 9.0]);
    assert!(v[0].is_stopped());
    assert_eq!(v[1].launcher, 0.0);
    assert_eq!(v[1].feeder, -0.7);
    assert_eq!(v[1].drive(), DrivePower::STOPPED);
    assert_eq!(v[2].drive().left, -0.8);
    assert_eq!(v[2].launcher, 0.0);
    assert!(v[3].is_stopped());
}

#[test]
fn backwards_clock_holds_first_phase() {
    let v = autonomous_at(RobotConfig::classic(), None, 20.0, &[3.0, -5.0]);
    assert_eq!(v[0].feeder, 1.0);
    // Elapsed clamps to zero: back in spin-up.
    assert_eq!(v[1].launcher, 1.0);
    assert_eq!(v[1].feeder, 0.0);
}

#[test]
fn claw_is_idle_throughout_autonomous() {
    let offsets: Vec<f64> = (0..500).map(|i| f64::from(i) * 0.02).collect();
    let v = autonomous_at(RobotConfig::brushless(), None, 0.0, &offsets);
    assert!(v.iter().all(|c| c.claw == 0.0));
}

// ── Teleop ────────────────────────────────────────────────────

#[test]
fn dpad_west_intakes_with_negated_feeder() {
    let west = InputSnapshot::new(ButtonSet::EMPTY, 270, 0.0, 0.0);
    let v = teleop_once(RobotConfig::brushless(), west);
    assert_eq!(v.launcher, 1.0);
    assert_eq!(v.feeder, 0.7);

    let cfg = RobotConfig::classic();
    let feeder_in = cfg.teleop.feeder_in_speed;
    let v = teleop_once(cfg, west);
    assert_eq!(v.feeder, -feeder_in);
}

#[test]
fn forward_half_drives_both_sides_backwards() {
    let busy = [
        InputSnapshot::IDLE,
        InputSnapshot::IDLE.with_button(6).with_button(3),
        InputSnapshot::IDLE.with_dpad(DpadQuadrant::East).with_button(4),
    ];
    for input in busy {
        let v = teleop_once(RobotConfig::brushless(), input.with_axes(0.5, 0.0));
        assert_eq!((v.left_drive, v.right_drive), (-0.5, -0.5), "{input:?}");
    }
}

#[test]
fn reverse_intake_beats_dpad_north_without_blending() {
    let input = InputSnapshot::IDLE.with_button(6).with_dpad(DpadQuadrant::North);
    let v = teleop_once(RobotConfig::brushless(), input);
    assert_eq!(v.launcher, -1.0);
    assert_eq!(v.feeder, -0.7);
}

#[test]
fn untouched_controls_command_nothing() {
    for cfg in [RobotConfig::brushless(), RobotConfig::classic()] {
        assert!(teleop_once(cfg, InputSnapshot::IDLE).is_stopped());
    }
}

#[test]
fn unknown_pov_angle_reads_as_centred() {
    let diagonal = InputSnapshot::new(ButtonSet::EMPTY, 45, 0.0, 0.0);
    assert_eq!(diagonal.dpad, DpadQuadrant::None);
    assert!(teleop_once(RobotConfig::classic(), diagonal).is_stopped());
}

/// The feeder constant is used as-is by autonomous feed and reverse
/// intake but negated by d-pad West.  Kept literally; this pins it.
#[test]
fn feeder_sign_differs_between_contexts() {
    let cfg = RobotConfig::brushless();
    let feeder_in = cfg.teleop.feeder_in_speed;
    assert_eq!(cfg.autonomous.feeder_speed, feeder_in);

    let auto = autonomous_at(cfg.clone(), None, 0.0, &[5.0]);
    let reverse = teleop_once(cfg.clone(), InputSnapshot::IDLE.with_button(6));
    let west = teleop_once(cfg, InputSnapshot::IDLE.with_dpad(DpadQuadrant::West));

    assert_eq!(auto[0].feeder, feeder_in);
    assert_eq!(reverse.feeder, feeder_in);
    assert_eq!(west.feeder, -feeder_in);
}

// ── Full scripted match ───────────────────────────────────────

#[test]
fn scripted_match_runs_clean() {
    let config = RobotConfig::classic();
    let period = f64::from(config.tick_interval_ms) / 1000.0;
    let mut scheduler = ModeScheduler::new(config);
    let mut ds = SimDriverStation::scripted_match(Some("launch drive"));
    let mut hw = SimActuators::recording();
    let mut sink = RecordingSink::new();
    let clock = ManualClock::new(0.0);

    scheduler.start(&mut hw, &mut sink);
    let end = ds.end_secs() + 0.5;
    let mut ticks = 0u64;
    let mut now = 0.0;
    while now <= end {
        ds.seek(now);
        clock.set(now);
        scheduler.tick(&mut ds, &clock, &mut hw, &mut sink);
        ticks += 1;
        now = ticks as f64 * period;
    }

    assert_eq!(hw.writes(), ticks + 1);
    assert!(hw.history().iter().all(ActuatorCommandVector::in_range));
    assert!(hw.last().is_stopped());
    assert_eq!(
        sink.mode_changes(),
        vec![
            (Mode::Disabled, Mode::Autonomous),
            (Mode::Autonomous, Mode::Disabled),
            (Mode::Disabled, Mode::Teleop),
            (Mode::Teleop, Mode::Disabled),
        ]
    );
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::TeleopRuleChanged { to: "released", .. })));
}
