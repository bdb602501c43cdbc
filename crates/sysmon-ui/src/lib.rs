//! TUI rendering layer for sysmon.
//!
//! Provides the shell chrome, dashboard layout, the radial gauge widget and
//! the text monitor. All rendering uses [`ratatui`]; this crate owns the
//! visual presentation while [`sysmon_core`] and [`sysmon_gauge`] own the
//! state.

pub mod gauge_widget;
pub mod layout;
pub mod pixels;
pub mod raster;
pub mod renderer;
pub mod shell;
pub mod text_monitor;
