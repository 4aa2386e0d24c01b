use serde::Deserialize;

use crate::simulator::telemetry::{DEFAULT_HISTORY_CAPACITY, DEFAULT_PHASE_STEP, GeneratorSettings};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub publishing: PublishingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Max number of telemetry snapshots kept in the broadcast channel for /ws/telemetry (slow clients may lag).
    pub broadcast_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_phase_step")]
    pub phase_step: f64,
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Whether ticking starts immediately or waits for PUT /api/live.
    #[serde(default = "default_start_live")]
    pub start_live: bool,
}

fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_phase_step() -> f64 {
    DEFAULT_PHASE_STEP
}

fn default_start_live() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            history_capacity: default_history_capacity(),
            phase_step: default_phase_step(),
            seed: None,
            start_live: default_start_live(),
        }
    }
}

impl SimulationConfig {
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            history_capacity: self.history_capacity,
            phase_step: self.phase_step,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (ws_telemetry clients, ticks) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        anyhow::ensure!(
            self.simulation.tick_interval_ms > 0,
            "simulation.tick_interval_ms must be > 0, got {}",
            self.simulation.tick_interval_ms
        );
        anyhow::ensure!(
            self.simulation.history_capacity > 0,
            "simulation.history_capacity must be > 0, got {}",
            self.simulation.history_capacity
        );
        anyhow::ensure!(
            self.simulation.phase_step.is_finite() && self.simulation.phase_step > 0.0,
            "simulation.phase_step must be a positive number, got {}",
            self.simulation.phase_step
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
