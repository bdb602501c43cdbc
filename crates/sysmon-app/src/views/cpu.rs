use std::any::Any;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::theme::StaticTheme;
use sysmon_core::view::View;
use sysmon_gauge::{GaugeConfig, GaugeError, GaugeRenderer};
use sysmon_sensors::sensors::CoreReading;
use sysmon_ui::gauge_widget::GaugeWidget;
use sysmon_ui::layout::gauge_grid;
use sysmon_ui::renderer::ViewRenderer;

use super::{
    back_to_dashboard, detail_action, detail_hints, DetailAction, RefreshTimer, SharedSnapshots,
};

/// Per-core usage as plain gauges, refreshed by the view's own timer.
pub struct CpuView {
    snapshots: SharedSnapshots,
    timer: RefreshTimer,
    size: (u32, u32),
    theme: StaticTheme,
    processor: String,
    cores: Vec<CoreReading>,
    gauges: Vec<GaugeRenderer>,
}

impl CpuView {
    pub const ID: &'static str = "cpu";

    pub fn new(snapshots: SharedSnapshots, timer: RefreshTimer, size: (u32, u32), dark: bool) -> Self {
        Self {
            snapshots,
            timer,
            size,
            theme: StaticTheme::for_mode(dark),
            processor: String::new(),
            cores: Vec::new(),
            gauges: Vec::new(),
        }
    }

    fn core_gauge(&self, idx: usize) -> Result<GaugeRenderer, GaugeError> {
        let config = GaugeConfig::builder()
            .size(self.size.0, self.size.1)
            .range(0.0, 100.0)
            .label(format!("CPU {}", idx + 1))
            .unit("%")
            .zones(0.0, 15.0, 15.0)
            .build()?;
        GaugeRenderer::new(config, &self.theme)
    }

    fn refresh(&mut self) {
        let snap = self.snapshots.borrow_mut().sample();
        self.processor = snap.processor;
        self.cores = snap.cores;

        if self.gauges.len() != self.cores.len() {
            let built: Result<Vec<_>, _> = (0..self.cores.len()).map(|i| self.core_gauge(i)).collect();
            match built {
                Ok(gauges) => self.gauges = gauges,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to build per-core gauges");
                    self.gauges.clear();
                }
            }
        }
        for (gauge, core) in self.gauges.iter_mut().zip(&self.cores) {
            gauge.set_value(core.usage as f64);
        }
    }

    pub fn gauges(&self) -> &[GaugeRenderer] {
        &self.gauges
    }
}

impl View for CpuView {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &'static str {
        "CPU Usage"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        if let Event::ThemeChanged { dark } = ev {
            self.theme = StaticTheme::for_mode(*dark);
            for gauge in &mut self.gauges {
                gauge.update_for_dark_mode(&self.theme);
            }
            return Vec::new();
        }
        match detail_action(Self::ID, &mut self.timer, ev) {
            DetailAction::Refresh => {
                self.refresh();
                Vec::new()
            }
            DetailAction::Back => back_to_dashboard(),
            DetailAction::Ignore => Vec::new(),
        }
    }

    fn hints(&self) -> Vec<String> {
        detail_hints()
    }

    fn teardown(&mut self) {
        self.timer.stop();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ViewRenderer for CpuView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let [header, grid] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
        f.render_widget(
            Paragraph::new(Line::from(format!("Processor: {}", self.processor))),
            header,
        );

        let aspect = self.size.0 as f64 / (self.size.1 as f64 / 2.0);
        let slots = gauge_grid(grid, self.gauges.len(), aspect);
        for ((gauge, core), slot) in self.gauges.iter().zip(&self.cores).zip(slots) {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} MHz ", core.frequency_mhz));
            let inner = block.inner(slot);
            f.render_widget(block, slot);
            f.render_widget(GaugeWidget::new(gauge), inner);
        }
    }
}
