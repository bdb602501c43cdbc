//! Self-refreshing gauges driven by the cooperative scheduler.

use std::time::Duration;

use sysmon_core::event::Event;
use sysmon_core::scheduler::{SchedulerHandle, TimerId};
use sysmon_core::theme::ThemeProvider;

use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::renderer::GaugeRenderer;

/// Default time between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(750);

/// Where a polling gauge gets its readings.
pub trait GaugeSource {
    /// Produce the current reading. Called on the UI thread.
    fn value(&mut self) -> anyhow::Result<f64>;

    /// Evaluated once, when the gauge is built.
    fn is_clickable(&self) -> bool {
        true
    }

    fn tooltip(&self) -> Option<String> {
        None
    }
}

/// Called when a clickable gauge is clicked; may ask the app to do something.
pub type ClickHandler = Box<dyn FnMut() -> Option<Event>>;

/// Pointer shape to show over the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
}

pub struct PollingGaugeBuilder {
    config: GaugeConfig,
    source: Box<dyn GaugeSource>,
    interval: Duration,
    on_click: Option<ClickHandler>,
}

impl PollingGaugeBuilder {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn on_click(mut self, handler: impl FnMut() -> Option<Event> + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Build the renderer, take the first reading and schedule the next.
    pub fn build(
        self,
        theme: &dyn ThemeProvider,
        scheduler: SchedulerHandle,
    ) -> Result<PollingGauge, GaugeError> {
        let renderer = GaugeRenderer::new(self.config, theme)?;
        let clickable = self.source.is_clickable();
        let tooltip = if clickable { self.source.tooltip() } else { None };
        let click_handler = if clickable { self.on_click } else { None };

        let mut gauge = PollingGauge {
            renderer,
            source: self.source,
            scheduler,
            interval: self.interval,
            pending: None,
            clickable,
            tooltip,
            click_handler,
            disposed: false,
        };
        gauge.refresh();
        Ok(gauge)
    }
}

/// A [`GaugeRenderer`] that re-reads its [`GaugeSource`] every interval.
///
/// The owner forwards [`Event::Timer`] ids to [`fire`](Self::fire). Each
/// refresh schedules the next one an interval after it finished, so a slow
/// provider delays later refreshes instead of causing a burst of catch-up
/// reads.
pub struct PollingGauge {
    renderer: GaugeRenderer,
    source: Box<dyn GaugeSource>,
    scheduler: SchedulerHandle,
    interval: Duration,
    pending: Option<TimerId>,
    clickable: bool,
    tooltip: Option<String>,
    click_handler: Option<ClickHandler>,
    disposed: bool,
}

impl PollingGauge {
    pub fn builder(config: GaugeConfig, source: Box<dyn GaugeSource>) -> PollingGaugeBuilder {
        PollingGaugeBuilder {
            config,
            source,
            interval: DEFAULT_REFRESH_INTERVAL,
            on_click: None,
        }
    }

    /// React to a due timer. Returns `true` if it was this gauge's.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.disposed || self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        match self.source.value() {
            Ok(v) => self.renderer.set_value(v),
            Err(e) => tracing::warn!(
                gauge = self.renderer.config().label(),
                error = %e,
                "gauge refresh failed"
            ),
        }
        // Provider time counts toward the delay; the clock is read after it.
        self.pending = Some(self.scheduler.schedule_after(self.interval));
    }

    /// Push a value without polling.
    pub fn set_value(&mut self, value: f64) -> Result<(), GaugeError> {
        if self.disposed {
            return Err(GaugeError::Disposed);
        }
        self.renderer.set_value(value);
        Ok(())
    }

    /// Recolor for a new theme. The schedule is left alone.
    pub fn theme_changed(&mut self, theme: &dyn ThemeProvider) -> Result<(), GaugeError> {
        if self.disposed {
            return Err(GaugeError::Disposed);
        }
        self.renderer.update_for_dark_mode(theme);
        Ok(())
    }

    /// Run the click handler, if the gauge is clickable.
    pub fn click(&mut self) -> Option<Event> {
        if self.disposed {
            return None;
        }
        self.click_handler.as_mut().and_then(|handler| handler())
    }

    /// Cancel the pending refresh. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn cursor(&self) -> CursorHint {
        if self.clickable {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        }
    }

    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn renderer(&self) -> &GaugeRenderer {
        &self.renderer
    }
}

impl Drop for PollingGauge {
    fn drop(&mut self) {
        self.dispose();
    }
}
