//! Radial gauge widgets for sysmon.
//!
//! [`GaugeRenderer`] turns a value, a range and zone bands into a retained
//! [`scene::Scene`] of arcs and labels. [`PollingGauge`] keeps one current by
//! polling a [`GaugeSource`] on the cooperative scheduler, and [`meters`]
//! wires the four dashboard meters to the host sensors.

pub mod config;
pub mod error;
pub mod geometry;
pub mod meters;
pub mod palette;
pub mod polling;
pub mod renderer;
pub mod scene;

pub use config::{GaugeConfig, ZoneBands};
pub use error::GaugeError;
pub use polling::{GaugeSource, PollingGauge};
pub use renderer::GaugeRenderer;
