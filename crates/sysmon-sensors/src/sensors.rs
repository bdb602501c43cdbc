//! Host metric queries.
//!
//! [`Sensors`] is the narrow surface the gauges poll. [`SysinfoSensors`]
//! implements it on top of `sysinfo` and also exposes the detail readings
//! the text monitor and detail views show.

use std::net::IpAddr;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use sysinfo::{Components, Disks, Networks, ProcessesToUpdate, System};

/// Value providers for the four dashboard gauges.
pub trait Sensors {
    /// Global CPU usage, 0 to 100.
    fn cpu_percent(&mut self) -> Result<f64>;

    /// CPU temperature in °C.
    fn cpu_temperature(&mut self) -> Result<f64>;

    /// Physical memory usage, 0 to 100.
    fn memory_percent(&mut self) -> Result<f64>;

    /// Usage of the filesystem mounted at `mount`, 0 to 100.
    fn disk_percent(&mut self, mount: &str) -> Result<f64>;

    fn logical_cores(&self) -> usize;
}

/// One temperature sensor reading.
#[derive(Debug, Clone, PartialEq)]
pub struct TempReading {
    pub label: String,
    pub current: f32,
    pub critical: Option<f32>,
}

/// Space on one mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskUsage {
    pub mount: String,
    pub total: u64,
    pub used: u64,
}

impl DiskUsage {
    pub fn percent(&self) -> f64 {
        crate::format::percent_of(self.used, self.total)
    }
}

/// Per-core usage and clock speed.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreReading {
    pub usage: f32,
    pub frequency_mhz: u64,
}

/// Labels that identify a CPU package sensor, matched case-insensitively.
const CPU_SENSOR_HINTS: [&str; 5] = ["coretemp", "package", "tctl", "cpu", "k10temp"];

/// The reading that best represents CPU temperature: the first CPU-looking
/// sensor, else the first reading at all.
pub fn pick_cpu_temperature(readings: &[TempReading]) -> Option<f32> {
    readings
        .iter()
        .find(|r| {
            let label = r.label.to_lowercase();
            CPU_SENSOR_HINTS.iter().any(|hint| label.contains(hint))
        })
        .or_else(|| readings.first())
        .map(|r| r.current)
}

/// First IPv4 address on an interface that is not loopback.
pub fn first_ipv4<'a, I>(interfaces: I) -> Option<IpAddr>
where
    I: IntoIterator<Item = (&'a str, Vec<IpAddr>)>,
{
    interfaces
        .into_iter()
        .filter(|(name, _)| *name != "lo")
        .flat_map(|(_, addrs)| addrs)
        .find(|addr| addr.is_ipv4() && !addr.is_loopback())
}

/// `sysinfo`-backed [`Sensors`].
pub struct SysinfoSensors {
    sys: System,
}

impl Default for SysinfoSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSensors {
    /// The first CPU usage reading is always 0, so take a baseline now.
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();
        Self { sys }
    }

    pub fn host_name(&self) -> String {
        System::host_name().unwrap_or_default()
    }

    /// First non-loopback IPv4 address, or an empty string.
    pub fn ip_address(&self) -> String {
        let networks = Networks::new_with_refreshed_list();
        let interfaces = networks.list().iter().map(|(name, data)| {
            let addrs = data.ip_networks().iter().map(|n| n.addr).collect();
            (name.as_str(), addrs)
        });
        first_ipv4(interfaces)
            .map(|a| a.to_string())
            .unwrap_or_default()
    }

    pub fn process_count(&mut self) -> usize {
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
        self.sys.processes().len()
    }

    pub fn uptime_secs(&self) -> u64 {
        System::uptime()
    }

    pub fn processor_name(&self) -> String {
        self.sys
            .cpus()
            .first()
            .map(|c| c.brand().trim().to_string())
            .unwrap_or_default()
    }

    pub fn cores(&mut self) -> Vec<CoreReading> {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_cpu_frequency();
        self.sys
            .cpus()
            .iter()
            .map(|c| CoreReading {
                usage: c.cpu_usage(),
                frequency_mhz: c.frequency(),
            })
            .collect()
    }

    pub fn temperatures(&self) -> Vec<TempReading> {
        Components::new_with_refreshed_list()
            .list()
            .iter()
            .filter_map(|c| {
                Some(TempReading {
                    label: c.label().to_string(),
                    current: c.temperature()?,
                    critical: c.critical(),
                })
            })
            .collect()
    }

    pub fn disks(&self) -> Vec<DiskUsage> {
        Disks::new_with_refreshed_list()
            .list()
            .iter()
            .map(|d| DiskUsage {
                mount: d.mount_point().display().to_string(),
                total: d.total_space(),
                used: d.total_space().saturating_sub(d.available_space()),
            })
            .collect()
    }

    /// `(used, total)` physical memory in bytes.
    pub fn memory(&mut self) -> (u64, u64) {
        self.sys.refresh_memory();
        (self.sys.used_memory(), self.sys.total_memory())
    }

    /// `(used, total)` swap in bytes. Call [`memory`](Self::memory) first to refresh.
    pub fn swap(&self) -> (u64, u64) {
        (self.sys.used_swap(), self.sys.total_swap())
    }
}

impl Sensors for SysinfoSensors {
    fn cpu_percent(&mut self) -> Result<f64> {
        self.sys.refresh_cpu_usage();
        Ok(self.sys.global_cpu_usage() as f64)
    }

    fn cpu_temperature(&mut self) -> Result<f64> {
        pick_cpu_temperature(&self.temperatures())
            .map(f64::from)
            .ok_or_else(|| anyhow!("no temperature sensors found"))
    }

    fn memory_percent(&mut self) -> Result<f64> {
        let (used, total) = self.memory();
        if total == 0 {
            bail!("total memory reported as zero");
        }
        Ok(crate::format::percent_of(used, total))
    }

    fn disk_percent(&mut self, mount: &str) -> Result<f64> {
        self.disks()
            .into_iter()
            .find(|d| Path::new(&d.mount) == Path::new(mount))
            .map(|d| d.percent())
            .ok_or_else(|| anyhow!("no filesystem mounted at {mount}"))
    }

    fn logical_cores(&self) -> usize {
        self.sys.cpus().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn reading(label: &str, current: f32) -> TempReading {
        TempReading {
            label: label.into(),
            current,
            critical: None,
        }
    }

    #[test]
    fn cpu_sensor_preferred_over_first() {
        let readings = vec![
            reading("nvme Composite", 38.0),
            reading("coretemp Package id 0", 52.0),
            reading("coretemp Core 0", 50.0),
        ];
        assert_eq!(pick_cpu_temperature(&readings), Some(52.0));
    }

    #[test]
    fn falls_back_to_first_reading() {
        let readings = vec![reading("acpitz", 41.0), reading("nvme", 38.0)];
        assert_eq!(pick_cpu_temperature(&readings), Some(41.0));
        assert_eq!(pick_cpu_temperature(&[]), None);
    }

    #[test]
    fn first_ipv4_skips_loopback_and_v6() {
        let lo: IpAddr = Ipv4Addr::LOCALHOST.into();
        let v6: IpAddr = Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1).into();
        let eth: IpAddr = Ipv4Addr::new(192, 168, 1, 20).into();
        let found = first_ipv4(vec![
            ("lo", vec![lo]),
            ("eth0", vec![v6, eth]),
        ]);
        assert_eq!(found, Some(eth));
    }

    #[test]
    fn first_ipv4_none_when_only_loopback() {
        let lo: IpAddr = Ipv4Addr::LOCALHOST.into();
        assert_eq!(first_ipv4(vec![("lo", vec![lo])]), None);
    }

    #[test]
    fn disk_usage_percent() {
        let d = DiskUsage {
            mount: "/".into(),
            total: 200,
            used: 50,
        };
        assert_eq!(d.percent(), 25.0);
    }

    #[test]
    fn live_memory_percent_in_range() {
        let mut s = SysinfoSensors::new();
        let pct = s.memory_percent().unwrap();
        assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn live_logical_cores_nonzero() {
        let s = SysinfoSensors::new();
        assert!(s.logical_cores() > 0);
    }

    #[test]
    fn unknown_mount_is_an_error() {
        let mut s = SysinfoSensors::new();
        let err = s.disk_percent("/definitely/not/mounted").unwrap_err();
        assert!(err.to_string().contains("no filesystem mounted"));
    }
}
