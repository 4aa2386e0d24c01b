// Tick worker: advances the simulator on a fixed interval while live and
// broadcasts one snapshot per tick. Paused = no ticks; resume restarts the
// timer, missed ticks are never replayed.

use crate::models::TelemetrySnapshot;
use crate::simulator::Simulator;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, watch};
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Rate limit for "no receivers" message (avoid logging every tick when no one is on /ws/telemetry)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Live / paused flag shared by the worker and the HTTP API.
#[derive(Clone)]
pub struct LiveSwitch(Arc<watch::Sender<bool>>);

impl LiveSwitch {
    pub fn new(live: bool) -> Self {
        let (tx, _) = watch::channel(live);
        Self(Arc::new(tx))
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.0.subscribe()
    }

    pub fn is_live(&self) -> bool {
        *self.0.borrow()
    }

    /// Returns the previous value.
    pub fn set(&self, live: bool) -> bool {
        self.0.send_replace(live)
    }

    pub fn pause(&self) {
        self.set(false);
    }

    pub fn resume(&self) {
        self.set(true);
    }
}

/// Simulator, channels, and shutdown for the worker.
pub struct WorkerDeps {
    pub simulator: SharedSimulator,
    pub tx: broadcast::Sender<TelemetrySnapshot>,
    pub live_rx: watch::Receiver<bool>,
    pub ws_telemetry_connections: Arc<AtomicUsize>,
    pub ticks_total: Arc<AtomicU64>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub tick_interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Runs one simulator tick under the lock.
pub fn run_one_tick(simulator: &Mutex<Simulator>) -> anyhow::Result<TelemetrySnapshot> {
    let mut sim = simulator
        .lock()
        .map_err(|e| anyhow::anyhow!("simulator lock poisoned: {}", e))?;
    Ok(sim.tick())
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        simulator,
        tx,
        mut live_rx,
        ws_telemetry_connections,
        ticks_total,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        tick_interval_ms,
        stats_log_interval_secs,
    } = config;

    let stats_log_interval = Duration::from_secs(stats_log_interval_secs);

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", tick_interval_ms);

    let task = async move {
        let mut tick = interval(Duration::from_millis(tick_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(stats_log_interval);
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut live = *live_rx.borrow_and_update();
        let mut last_no_receivers_warn: Option<Instant> = None;

        tracing::info!(live, "Simulation worker started");

        loop {
            tokio::select! {
                _ = tick.tick(), if live => {
                    let snapshot = match run_one_tick(&simulator) {
                        Ok(s) => s,
                        Err(e) => {
                            // A poisoned lock never recovers; stop instead of failing every tick.
                            tracing::error!(error = %e, operation = "tick", "simulation tick failed; worker stopping");
                            break;
                        }
                    };
                    ticks_total.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(
                        operation = "tick",
                        system_health = snapshot.system_health,
                        "Tick complete"
                    );

                    if tx.send(snapshot).is_err() {
                        let should_warn = last_no_receivers_warn
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                        if should_warn {
                            tracing::debug!(
                                operation = "broadcast_snapshot",
                                "No active WebSocket clients; broadcast channel has no receivers"
                            );
                            last_no_receivers_warn = Some(Instant::now());
                        }
                    }
                }
                changed = live_rx.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Live switch dropped; worker shutting down");
                        break;
                    }
                    let now_live = *live_rx.borrow_and_update();
                    if now_live && !live {
                        tick.reset();
                        tracing::info!("Simulation resumed");
                    } else if !now_live && live {
                        tracing::info!("Simulation paused");
                    }
                    live = now_live;
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        ws_telemetry_clients = ws_telemetry_connections.load(Ordering::Relaxed),
                        ticks_total = ticks_total.load(Ordering::Relaxed),
                        live,
                        "app stats"
                    );
                }
            }
        }
    };
    tokio::spawn(task.instrument(worker_span))
}
