//! Configuration types and loaders for sysmon.
//!
//! This crate owns the on-disk settings schema so the app and its views
//! share a single source of truth.

pub mod settings;

pub use settings::{settings_path, DetailMode, GaugeSettings, GeneralSettings, Settings, TextSettings, ThemeMode};
