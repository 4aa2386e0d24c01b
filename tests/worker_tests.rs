// Worker tests on paused tokio time: ticks while live, nothing while paused,
// no replay of missed ticks after resume.

mod common;

use common::seeded_simulator;
use leakwatch::models::TelemetrySnapshot;
use leakwatch::worker::{LiveSwitch, SharedSimulator, WorkerConfig, WorkerDeps, spawn};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tokio::time::{Duration, sleep};

struct Harness {
    simulator: SharedSimulator,
    live: LiveSwitch,
    ticks_total: Arc<AtomicU64>,
    rx: broadcast::Receiver<TelemetrySnapshot>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

fn start(live: bool) -> Harness {
    let (sim, _clock) = seeded_simulator(21);
    let simulator = Arc::new(Mutex::new(sim));
    let live = LiveSwitch::new(live);
    let ticks_total = Arc::new(AtomicU64::new(0));
    let (tx, rx) = broadcast::channel(64);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = spawn(
        WorkerDeps {
            simulator: simulator.clone(),
            tx,
            live_rx: live.subscribe(),
            ws_telemetry_connections: Arc::new(AtomicUsize::new(0)),
            ticks_total: ticks_total.clone(),
            shutdown_rx,
        },
        WorkerConfig {
            tick_interval_ms: 2000,
            stats_log_interval_secs: 3600,
        },
    );
    Harness {
        simulator,
        live,
        ticks_total,
        rx,
        shutdown_tx,
        handle,
    }
}

fn history_len(sim: &SharedSimulator) -> usize {
    sim.lock().unwrap().history_len()
}

#[tokio::test(start_paused = true)]
async fn test_worker_ticks_on_interval_and_broadcasts() {
    let mut h = start(true);
    // Ticks at t = 0, 2000, 4000.
    sleep(Duration::from_millis(5000)).await;
    assert_eq!(h.ticks_total.load(Ordering::Relaxed), 3);
    assert_eq!(history_len(&h.simulator), 1 + 3);

    let mut received = 0;
    while let Ok(snapshot) = h.rx.try_recv() {
        assert_eq!(snapshot.sensors.len(), 5);
        received += 1;
    }
    assert_eq!(received, 3);

    let _ = h.shutdown_tx.send(());
    h.handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_paused_worker_appends_nothing_and_resume_does_not_replay() {
    let h = start(true);
    sleep(Duration::from_millis(5000)).await;
    let before_pause = history_len(&h.simulator);

    h.live.pause();
    sleep(Duration::from_millis(1)).await;
    let at_pause = history_len(&h.simulator);
    assert_eq!(at_pause, before_pause);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(history_len(&h.simulator), at_pause);

    // Resume restarts the timer: nothing immediately, one tick a full interval later.
    h.live.resume();
    sleep(Duration::from_millis(1000)).await;
    assert_eq!(history_len(&h.simulator), at_pause);
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(history_len(&h.simulator), at_pause + 1);

    let _ = h.shutdown_tx.send(());
    h.handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_worker_started_paused_waits_for_resume() {
    let h = start(false);
    sleep(Duration::from_secs(10)).await;
    assert_eq!(h.ticks_total.load(Ordering::Relaxed), 0);
    assert_eq!(history_len(&h.simulator), 1);

    h.live.resume();
    sleep(Duration::from_millis(2100)).await;
    assert_eq!(h.ticks_total.load(Ordering::Relaxed), 1);

    let _ = h.shutdown_tx.send(());
    h.handle.await.unwrap();
}

#[tokio::test]
async fn test_live_switch_reports_previous_value() {
    let live = LiveSwitch::new(true);
    assert!(live.is_live());
    assert!(live.set(false));
    assert!(!live.is_live());
    assert!(!live.set(false));
    live.resume();
    assert!(live.is_live());
}

#[tokio::test(start_paused = true)]
async fn test_worker_stops_when_simulator_lock_is_poisoned() {
    let h = start(true);
    let sim = h.simulator.clone();
    let _ = std::thread::spawn(move || {
        let _guard = sim.lock().unwrap();
        panic!("poison the simulator lock");
    })
    .join();
    assert!(h.simulator.is_poisoned());

    let finished = tokio::time::timeout(Duration::from_secs(10), h.handle).await;
    assert!(finished.is_ok(), "worker should exit after a failed tick");
    assert_eq!(h.ticks_total.load(Ordering::Relaxed), 0);
}
