//! Per-core CPU sampling for the oscilloscope scene.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::System;

/// Interval between CPU samples.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Samples older than this are shown as empty bars.
const STALE_AFTER: Duration = Duration::from_secs(2);

/// Snapshot of per-core CPU usage.
#[derive(Debug, Clone)]
pub struct CpuLoad {
    /// Usage per logical core (0.0 - 1.0).
    pub per_core: Vec<f32>,
    /// Last update timestamp.
    pub last_update: Instant,
}

impl CpuLoad {
    /// Whether the sample is too old to display.
    pub fn is_stale(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_update) > STALE_AFTER
    }
}

impl Default for CpuLoad {
    fn default() -> Self {
        Self {
            per_core: Vec::new(),
            last_update: Instant::now(),
        }
    }
}

/// CPU monitor that samples usage in a background thread.
#[derive(Debug)]
pub struct CpuMonitor {
    /// Shared load updated by the background thread.
    load: Arc<RwLock<CpuLoad>>,
    /// Flag to signal thread termination.
    running: Arc<RwLock<bool>>,
    /// Bumped on every start; a thread exits once it no longer owns the
    /// current generation.
    generation: Arc<AtomicU64>,
}

impl CpuMonitor {
    /// Create a new, stopped monitor.
    pub fn new() -> Self {
        Self {
            load: Arc::new(RwLock::new(CpuLoad::default())),
            running: Arc::new(RwLock::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start the sampling thread. Calling it again while running is a no-op.
    pub fn start(&self) {
        if let Ok(mut running) = self.running.write() {
            if *running {
                return;
            }
            *running = true;
        }

        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let load = self.load.clone();
        let running = self.running.clone();
        let generation = self.generation.clone();

        thread::spawn(move || {
            let mut sys = System::new();
            // Usage is a delta between two refreshes
            sys.refresh_cpu_usage();
            thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

            while owns_sampling(&running, &generation, mine) {
                sys.refresh_cpu_usage();
                let per_core = sys
                    .cpus()
                    .iter()
                    .map(|cpu| (cpu.cpu_usage() / 100.0).clamp(0.0, 1.0))
                    .collect();

                if let Ok(mut l) = load.write() {
                    *l = CpuLoad {
                        per_core,
                        last_update: Instant::now(),
                    };
                }

                thread::sleep(SAMPLE_INTERVAL);
            }
            log::debug!("cpu sampling stopped");
        });
        log::debug!("cpu sampling started");
    }

    /// Stop the sampling thread.
    pub fn stop(&self) {
        if let Ok(mut running) = self.running.write() {
            *running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.read().map(|r| *r).unwrap_or(false)
    }

    /// Latest per-core usage without blocking; empty while unavailable or
    /// stale.
    pub fn per_core(&self) -> Vec<f32> {
        match self.load.try_read() {
            Ok(load) if !load.is_stale(Instant::now()) => load.per_core.clone(),
            _ => Vec::new(),
        }
    }
}

/// Whether the thread started as generation `mine` should keep sampling.
fn owns_sampling(running: &RwLock<bool>, generation: &AtomicU64, mine: u64) -> bool {
    let running = running.read().map(|r| *r).unwrap_or(false);
    running && generation.load(Ordering::SeqCst) == mine
}

impl Default for CpuMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CpuMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default() {
        let load = CpuLoad::default();
        assert!(load.per_core.is_empty());
    }

    #[test]
    fn test_monitor_starts_stopped() {
        let monitor = CpuMonitor::new();
        assert!(!monitor.is_running());
        assert!(monitor.per_core().is_empty());
    }

    #[test]
    fn test_old_sample_is_stale() {
        let load = CpuLoad {
            per_core: vec![0.5],
            last_update: Instant::now(),
        };
        assert!(!load.is_stale(load.last_update));
        assert!(load.is_stale(load.last_update + STALE_AFTER + Duration::from_millis(1)));
    }

    #[test]
    fn test_restart_retires_previous_thread() {
        let monitor = CpuMonitor::new();
        monitor.start();
        assert!(owns_sampling(&monitor.running, &monitor.generation, 1));

        monitor.stop();
        monitor.start();
        assert!(monitor.is_running());
        assert!(!owns_sampling(&monitor.running, &monitor.generation, 1));
        assert!(owns_sampling(&monitor.running, &monitor.generation, 2));

        monitor.stop();
        assert!(!owns_sampling(&monitor.running, &monitor.generation, 2));
    }

    #[test]
    fn test_start_and_stop() {
        let monitor = CpuMonitor::new();
        monitor.start();
        assert!(monitor.is_running());
        monitor.start();
        monitor.stop();
        assert!(!monitor.is_running());
    }
}
