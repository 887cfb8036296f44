//! Config loading and validation through the ConfigPort adapters.

use kitbot::adapters::config_store::{JsonConfigFile, MemoryConfigStore, parse_json};
use kitbot::app::ports::ConfigPort;
use kitbot::config::{PhaseStep, PhaseTemplate, RobotConfig, validate_config};
use kitbot::error::ConfigError;
use kitbot::teleop::rules::Activation;

#[test]
fn both_profiles_validate() {
    for name in ["brushless", "classic"] {
        let cfg = RobotConfig::profile(name).unwrap();
        assert_eq!(validate_config(&cfg), Ok(()), "{name}");
    }
    assert!(RobotConfig::profile("swerve").is_none());
}

#[test]
fn decreasing_thresholds_rejected() {
    let mut cfg = RobotConfig::classic();
    cfg.autonomous.phases.clear();
    cfg.autonomous.phases.push(PhaseStep::new(4.0, PhaseTemplate::SpinUp)).unwrap();
    cfg.autonomous.phases.push(PhaseStep::new(2.0, PhaseTemplate::Feed)).unwrap();
    assert!(matches!(validate_config(&cfg), Err(ConfigError::ValidationFailed(_))));
}

#[test]
fn custom_profile_survives_json_file() {
    let mut cfg = RobotConfig::brushless();
    cfg.teleop.activations.midfield_shot = Activation::EdgeLatched;
    cfg.autonomous.launcher_speed = -0.9;

    let path = std::env::temp_dir().join(format!("kitbot-it-{}.json", std::process::id()));
    let file = JsonConfigFile::new(&path);
    file.save(&cfg).unwrap();
    let loaded = file.load().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, cfg);
}

#[test]
fn memory_store_rejects_invalid_before_persisting() {
    let store = MemoryConfigStore::new();
    store.save(&RobotConfig::classic()).unwrap();

    let mut bad = RobotConfig::classic();
    bad.teleop.reverse_intake_button = 0;
    assert!(matches!(store.save(&bad), Err(ConfigError::ValidationFailed(_))));
    assert_eq!(store.load().unwrap(), RobotConfig::classic());
}

#[test]
fn truncated_json_is_corrupted() {
    let text = serde_json::to_string(&RobotConfig::classic()).unwrap();
    let cut = &text[..text.len() / 2];
    assert_eq!(parse_json(cut), Err(ConfigError::Corrupted));
}
