//! Host metric collection for sysmon.

pub mod format;
pub mod sensors;
pub mod telemetry;

pub use sensors::{Sensors, SysinfoSensors};
pub use telemetry::{SnapshotSource, SystemSnapshot, TelemetryCollector};
