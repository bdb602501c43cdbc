//! Core infrastructure for the sysmon runtime.
//!
//! Shared by the application shell, the gauge widgets and every view: the
//! event bus, a cooperative timer scheduler, theme colors, the view
//! registry, application lifecycle state and the logging subsystem.

pub mod bus;
pub mod event;
pub mod logging;
pub mod registry;
pub mod scheduler;
pub mod state;
pub mod theme;
pub mod view;
