use std::time::{Duration, Instant};

use anyhow::{bail, Result};

/// Where the app is in the "apply new settings" cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    /// Views have been torn down and are being rebuilt from fresh settings.
    Rebuilding,
}

pub struct AppState {
    pub started_at: Instant,
    pub dark: bool,
    pub status_line: String,
    lifecycle: Lifecycle,
    rebuilds: u32,
}

impl AppState {
    pub fn new(dark: bool) -> Self {
        Self {
            started_at: Instant::now(),
            dark,
            status_line: String::new(),
            lifecycle: Lifecycle::Active,
            rebuilds: 0,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of completed rebuilds since startup.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    /// `Active -> Rebuilding`. Fails if a rebuild is already in progress.
    pub fn begin_rebuild(&mut self) -> Result<()> {
        if self.lifecycle == Lifecycle::Rebuilding {
            bail!("rebuild already in progress");
        }
        self.lifecycle = Lifecycle::Rebuilding;
        Ok(())
    }

    /// `Rebuilding -> Active`.
    pub fn finish_rebuild(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Rebuilding {
            bail!("no rebuild in progress");
        }
        self.lifecycle = Lifecycle::Active;
        self.rebuilds += 1;
        Ok(())
    }
}
