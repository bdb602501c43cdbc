use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// User settings loaded from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub general: GeneralSettings,
    pub gauge: GaugeSettings,
    pub text: TextSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the terminal's background.
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralSettings {
    pub theme: ThemeMode,
    pub refresh_interval_ms: u64,
    /// Mount point watched by the disk gauge.
    pub disk_mount: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            refresh_interval_ms: 750,
            disk_mount: "/".into(),
        }
    }
}

/// Gauge surface size in pixels. Each terminal cell holds two pixels
/// stacked vertically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GaugeSettings {
    pub width: u32,
    pub height: u32,
    pub clamp_needle: bool,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            width: 44,
            height: 34,
            clamp_needle: false,
        }
    }
}

/// Which section the text monitor shows under the summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailMode {
    #[default]
    Disk,
    Temperature,
    Both,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextSettings {
    pub refresh_secs: f64,
    pub details: DetailMode,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 1.0,
            details: DetailMode::Disk,
        }
    }
}

impl TextSettings {
    /// `refresh_secs` as a non-zero `Duration`.
    pub fn refresh_interval(&self) -> Result<Duration> {
        let secs = self.refresh_secs;
        match Duration::try_from_secs_f64(secs) {
            Ok(interval) if !interval.is_zero() => Ok(interval),
            _ => bail!("text.refresh_secs must be a positive number of seconds, got {secs}"),
        }
    }
}

impl Settings {
    /// Parse and validate settings TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let settings: Self = toml::from_str(input).context("failed to parse settings TOML")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from disk. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid settings at {}", path.display()))
    }

    /// Write settings to disk, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, raw).with_context(|| format!("failed to write settings to {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.refresh_interval_ms == 0 {
            bail!("general.refresh_interval_ms must be positive");
        }
        if self.general.disk_mount.trim().is_empty() {
            bail!("general.disk_mount must not be empty");
        }
        if self.gauge.width == 0 || self.gauge.height == 0 {
            bail!(
                "gauge size must be positive, got {}x{}",
                self.gauge.width,
                self.gauge.height
            );
        }
        self.text.refresh_interval()?;
        Ok(())
    }
}

/// Location of the settings file.
///
/// Precedence: `SYSMON_CONFIG` env var > `<config dir>/sysmon/settings.toml`.
pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var("SYSMON_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .map(|d| d.join("sysmon"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("settings.toml")
}
