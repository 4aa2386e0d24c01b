// Config loading and validation tests

use leakwatch::config::AppConfig;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[publishing]
broadcast_capacity = 60

[simulation]
tick_interval_ms = 2000
history_capacity = 30
phase_step = 0.1
seed = 42
start_live = true

[monitoring]
stats_log_interval_secs = 60
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.publishing.broadcast_capacity, 60);
    assert_eq!(config.simulation.tick_interval_ms, 2000);
    assert_eq!(config.simulation.history_capacity, 30);
    assert_eq!(config.simulation.seed, Some(42));
    assert!(config.simulation.start_live);
    assert_eq!(config.monitoring.stats_log_interval_secs, 60);
}

#[test]
fn test_config_simulation_section_defaults() {
    let minimal = r#"
[server]
port = 8081
host = "127.0.0.1"

[publishing]
broadcast_capacity = 10

[monitoring]
stats_log_interval_secs = 60
"#;
    let config = AppConfig::load_from_str(minimal).expect("load_from_str");
    assert_eq!(config.simulation.tick_interval_ms, 2000);
    assert_eq!(config.simulation.history_capacity, 30);
    assert_eq!(config.simulation.phase_step, 0.1);
    assert_eq!(config.simulation.seed, None);
    assert!(config.simulation.start_live);
}

#[test]
fn test_config_generator_settings_follow_simulation_section() {
    let custom = VALID_CONFIG
        .replace("history_capacity = 30", "history_capacity = 5")
        .replace("phase_step = 0.1", "phase_step = 0.25");
    let config = AppConfig::load_from_str(&custom).unwrap();
    let settings = config.simulation.generator_settings();
    assert_eq!(settings.history_capacity, 5);
    assert_eq!(settings.phase_step, 0.25);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_broadcast_capacity_zero() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 60", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_tick_interval_zero() {
    let bad = VALID_CONFIG.replace("tick_interval_ms = 2000", "tick_interval_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("tick_interval_ms"));
}

#[test]
fn test_config_validation_rejects_history_capacity_zero() {
    let bad = VALID_CONFIG.replace("history_capacity = 30", "history_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("history_capacity"));
}

#[test]
fn test_config_validation_rejects_non_positive_phase_step() {
    let bad = VALID_CONFIG.replace("phase_step = 0.1", "phase_step = -0.1");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("phase_step"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_missing_section_fails() {
    let bad = VALID_CONFIG.replace("[publishing]\nbroadcast_capacity = 60\n", "");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_load_from_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load_from_path(&path).expect("load_from_path");
    assert_eq!(config.server.port, 8081);
}

#[test]
fn test_config_load_from_missing_path_names_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load_from_path(&path).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
