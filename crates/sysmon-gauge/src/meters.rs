//! The four dashboard meters and their sensor bindings.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sysmon_core::event::Event;
use sysmon_core::scheduler::SchedulerHandle;
use sysmon_core::theme::ThemeProvider;
use sysmon_sensors::format::{ALERT_PERCENT, WARN_PERCENT};
use sysmon_sensors::Sensors;

use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::polling::{GaugeSource, PollingGauge};

/// Sensors shared between the meters on the UI thread.
pub type SharedSensors = Rc<RefCell<dyn Sensors>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeterKind {
    Cpu,
    Temperature,
    Ram,
    Disk,
}

/// Static parameters of a meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterSpec {
    pub unit: &'static str,
    pub blue_pct: f64,
    pub yellow_pct: f64,
    pub red_pct: f64,
    pub tooltip: &'static str,
    /// View opened when the meter is clicked.
    pub view_id: &'static str,
}

impl MeterKind {
    pub const ALL: [MeterKind; 4] = [
        MeterKind::Cpu,
        MeterKind::Temperature,
        MeterKind::Ram,
        MeterKind::Disk,
    ];

    pub fn spec(self) -> MeterSpec {
        match self {
            MeterKind::Cpu => MeterSpec {
                unit: "%",
                blue_pct: 0.0,
                yellow_pct: 15.0,
                red_pct: 15.0,
                tooltip: "Click for per-CPU usage",
                view_id: "cpu",
            },
            MeterKind::Temperature => MeterSpec {
                unit: "°C",
                blue_pct: 15.0,
                yellow_pct: 15.0,
                red_pct: 15.0,
                tooltip: "Click for detailed temperature readings",
                view_id: "temperature",
            },
            MeterKind::Ram => MeterSpec {
                unit: "%",
                blue_pct: 0.0,
                yellow_pct: 15.0,
                red_pct: 15.0,
                tooltip: "Click for detailed memory statistics",
                view_id: "memory",
            },
            MeterKind::Disk => MeterSpec {
                unit: "%",
                blue_pct: 0.0,
                yellow_pct: ALERT_PERCENT - WARN_PERCENT,
                red_pct: 100.0 - ALERT_PERCENT,
                tooltip: "Click for usage details of each mount point",
                view_id: "disk",
            },
        }
    }

    pub fn label(self, disk_mount: &str) -> String {
        match self {
            MeterKind::Cpu => "CPU Usage".into(),
            MeterKind::Temperature => "Temperature".into(),
            MeterKind::Ram => "RAM Usage".into(),
            MeterKind::Disk => format!("Disk Usage: {disk_mount}"),
        }
    }
}

/// Reads one metric from the shared sensors.
pub struct SensorSource {
    kind: MeterKind,
    sensors: SharedSensors,
    disk_mount: String,
}

impl SensorSource {
    pub fn new(kind: MeterKind, sensors: SharedSensors, disk_mount: impl Into<String>) -> Self {
        Self {
            kind,
            sensors,
            disk_mount: disk_mount.into(),
        }
    }
}

impl GaugeSource for SensorSource {
    fn value(&mut self) -> anyhow::Result<f64> {
        let mut sensors = self.sensors.borrow_mut();
        match self.kind {
            MeterKind::Cpu => sensors.cpu_percent(),
            MeterKind::Temperature => sensors.cpu_temperature(),
            MeterKind::Ram => sensors.memory_percent(),
            MeterKind::Disk => sensors.disk_percent(&self.disk_mount),
        }
    }

    /// Per-core detail is only worth opening with more than one core.
    fn is_clickable(&self) -> bool {
        match self.kind {
            MeterKind::Cpu => self.sensors.borrow().logical_cores() > 1,
            _ => true,
        }
    }

    fn tooltip(&self) -> Option<String> {
        Some(self.kind.spec().tooltip.to_string())
    }
}

/// Sizing and polling options shared by all meters.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterOptions {
    pub width: u32,
    pub height: u32,
    pub interval: Duration,
    pub clamp_needle: bool,
    pub disk_mount: String,
}

impl Default for MeterOptions {
    fn default() -> Self {
        Self {
            width: 300,
            height: 225,
            interval: crate::polling::DEFAULT_REFRESH_INTERVAL,
            clamp_needle: false,
            disk_mount: "/".into(),
        }
    }
}

pub fn meter_config(kind: MeterKind, opts: &MeterOptions) -> Result<GaugeConfig, GaugeError> {
    let spec = kind.spec();
    GaugeConfig::builder()
        .size(opts.width, opts.height)
        .range(0.0, 100.0)
        .label(kind.label(&opts.disk_mount))
        .unit(spec.unit)
        .divisions(10)
        .zones(spec.blue_pct, spec.yellow_pct, spec.red_pct)
        .clamp_needle(opts.clamp_needle)
        .build()
}

/// Build a polling meter whose click asks the app to open its detail view.
pub fn build_meter(
    kind: MeterKind,
    sensors: SharedSensors,
    opts: &MeterOptions,
    theme: &dyn ThemeProvider,
    scheduler: SchedulerHandle,
) -> Result<PollingGauge, GaugeError> {
    let source = SensorSource::new(kind, sensors, opts.disk_mount.clone());
    let view_id = kind.spec().view_id;
    PollingGauge::builder(meter_config(kind, opts)?, Box::new(source))
        .interval(opts.interval)
        .on_click(move || Some(Event::OpenView { id: view_id.to_string() }))
        .build(theme, scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use sysmon_core::scheduler::ManualClock;
    use sysmon_core::theme::StaticTheme;

    use crate::palette::NeedleTone;

    struct FakeSensors {
        cores: usize,
        cpu: f64,
        temp: Option<f64>,
        mem: f64,
        disk: f64,
    }

    impl Sensors for FakeSensors {
        fn cpu_percent(&mut self) -> anyhow::Result<f64> {
            Ok(self.cpu)
        }
        fn cpu_temperature(&mut self) -> anyhow::Result<f64> {
            self.temp.ok_or_else(|| anyhow!("no temperature sensors found"))
        }
        fn memory_percent(&mut self) -> anyhow::Result<f64> {
            Ok(self.mem)
        }
        fn disk_percent(&mut self, mount: &str) -> anyhow::Result<f64> {
            if mount == "/" {
                Ok(self.disk)
            } else {
                Err(anyhow!("no filesystem mounted at {mount}"))
            }
        }
        fn logical_cores(&self) -> usize {
            self.cores
        }
    }

    fn fake(cores: usize) -> SharedSensors {
        Rc::new(RefCell::new(FakeSensors {
            cores,
            cpu: 12.5,
            temp: Some(48.0),
            mem: 63.0,
            disk: 85.0,
        }))
    }

    fn scheduler() -> SchedulerHandle {
        SchedulerHandle::new(Rc::new(ManualClock::new()))
    }

    fn build(kind: MeterKind, sensors: SharedSensors) -> PollingGauge {
        build_meter(
            kind,
            sensors,
            &MeterOptions::default(),
            &StaticTheme::light(),
            scheduler(),
        )
        .unwrap()
    }

    #[test]
    fn specs_match_meter_table() {
        let disk = MeterKind::Disk.spec();
        assert_eq!((disk.blue_pct, disk.yellow_pct, disk.red_pct), (0.0, 20.0, 20.0));
        let temp = MeterKind::Temperature.spec();
        assert_eq!((temp.blue_pct, temp.yellow_pct, temp.red_pct), (15.0, 15.0, 15.0));
        assert_eq!(temp.unit, "°C");
        assert_eq!(MeterKind::Disk.label("/home"), "Disk Usage: /home");
    }

    #[test]
    fn each_meter_reads_its_metric() {
        let sensors = fake(4);
        assert_eq!(build(MeterKind::Cpu, sensors.clone()).renderer().current_value(), 12.5);
        assert_eq!(build(MeterKind::Temperature, sensors.clone()).renderer().current_value(), 48.0);
        assert_eq!(build(MeterKind::Ram, sensors.clone()).renderer().current_value(), 63.0);
        assert_eq!(build(MeterKind::Disk, sensors).renderer().current_value(), 85.0);
    }

    #[test]
    fn disk_needle_turns_red_past_alert_level() {
        let g = build(MeterKind::Disk, fake(4));
        assert_eq!(g.renderer().needle_tone(), NeedleTone::Red);
    }

    #[test]
    fn single_core_cpu_is_not_clickable() {
        let mut single = build(MeterKind::Cpu, fake(1));
        assert!(!single.is_clickable());
        assert!(single.click().is_none());

        let mut multi = build(MeterKind::Cpu, fake(8));
        assert_eq!(multi.tooltip(), Some("Click for per-CPU usage"));
        assert!(matches!(multi.click(), Some(Event::OpenView { id }) if id == "cpu"));
    }

    #[test]
    fn click_opens_matching_view() {
        let sensors = fake(2);
        for kind in MeterKind::ALL {
            let mut g = build(kind, sensors.clone());
            let expected = kind.spec().view_id;
            assert!(matches!(g.click(), Some(Event::OpenView { id }) if id == expected));
        }
    }

    #[test]
    fn missing_sensor_leaves_needle_at_min() {
        let sensors: SharedSensors = Rc::new(RefCell::new(FakeSensors {
            cores: 2,
            cpu: 0.0,
            temp: None,
            mem: 0.0,
            disk: 0.0,
        }));
        let g = build(MeterKind::Temperature, sensors);
        assert_eq!(g.renderer().current_value(), 0.0);
        assert!(g.pending_timer().is_some());
    }
}
