/// Snapshot collector for the text monitor and detail views.
///
/// Designed to be called every loop iteration but only performs the
/// expensive sysinfo queries when the configured interval has elapsed.
use std::time::{Duration, Instant};

use crate::sensors::{pick_cpu_temperature, CoreReading, DiskUsage, Sensors, SysinfoSensors, TempReading};

/// A point-in-time snapshot of host metrics.
#[derive(Debug, Clone)]
pub struct SystemSnapshot {
    pub host_name: String,
    pub ip_address: String,
    pub process_count: usize,
    pub uptime_secs: u64,
    pub processor: String,
    /// Global CPU usage as a percentage (0.0–100.0).
    pub cpu_global: f64,
    pub cores: Vec<CoreReading>,
    pub cpu_temp: Option<f32>,
    pub temperatures: Vec<TempReading>,
    pub mem_total: u64,
    pub mem_used: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub disks: Vec<DiskUsage>,
}

impl Default for SystemSnapshot {
    fn default() -> Self {
        Self {
            host_name: String::new(),
            ip_address: String::new(),
            process_count: 0,
            uptime_secs: 0,
            processor: String::new(),
            cpu_global: f64::NAN,
            cores: Vec::new(),
            cpu_temp: None,
            temperatures: Vec::new(),
            mem_total: 0,
            mem_used: 0,
            swap_total: 0,
            swap_used: 0,
            disks: Vec::new(),
        }
    }
}

impl SystemSnapshot {
    pub fn mem_percent(&self) -> f64 {
        crate::format::percent_of(self.mem_used, self.mem_total)
    }

    pub fn swap_percent(&self) -> f64 {
        crate::format::percent_of(self.swap_used, self.swap_total)
    }
}

/// Interval-gated snapshot collector.
///
/// Call [`maybe_refresh`](Self::maybe_refresh) on every tick; it returns
/// `true` when a refresh actually occurred.
pub struct TelemetryCollector {
    sensors: SysinfoSensors,
    interval: Duration,
    last_refresh: Option<Instant>,
    snapshot: SystemSnapshot,
}

impl TelemetryCollector {
    /// Create a new collector with a 1-second refresh interval.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            sensors: SysinfoSensors::new(),
            interval,
            last_refresh: None,
            snapshot: SystemSnapshot::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Refresh metrics if the interval has elapsed since the last refresh.
    ///
    /// Returns `true` if a refresh was performed.
    pub fn maybe_refresh(&mut self, now: Instant) -> bool {
        let should_refresh = match self.last_refresh {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed >= self.interval),
        };

        if !should_refresh {
            return false;
        }

        self.last_refresh = Some(now);
        self.refresh();
        true
    }

    /// Unconditionally rebuild the snapshot.
    pub fn refresh(&mut self) {
        let s = &mut self.sensors;
        let snap = &mut self.snapshot;

        snap.cores = s.cores();
        snap.cpu_global = s.cpu_percent().unwrap_or(f64::NAN);
        snap.processor = s.processor_name();
        snap.temperatures = s.temperatures();
        snap.cpu_temp = pick_cpu_temperature(&snap.temperatures);
        (snap.mem_used, snap.mem_total) = s.memory();
        (snap.swap_used, snap.swap_total) = s.swap();
        snap.disks = s.disks();
        snap.host_name = s.host_name();
        snap.ip_address = s.ip_address();
        snap.process_count = s.process_count();
        snap.uptime_secs = s.uptime_secs();
        tracing::debug!(
            cores = snap.cores.len(),
            disks = snap.disks.len(),
            sensors = snap.temperatures.len(),
            "telemetry refreshed"
        );
    }

    /// Return the most recent snapshot.
    pub fn snapshot(&self) -> &SystemSnapshot {
        &self.snapshot
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces a fresh snapshot on demand. Views hold one of these so they can
/// be driven by a fake in tests.
pub trait SnapshotSource {
    fn sample(&mut self) -> SystemSnapshot;
}

impl SnapshotSource for TelemetryCollector {
    fn sample(&mut self) -> SystemSnapshot {
        self.last_refresh = Some(Instant::now());
        self.refresh();
        self.snapshot.clone()
    }
}
