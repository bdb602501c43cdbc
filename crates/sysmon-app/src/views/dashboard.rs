use std::any::Any;
use std::cell::RefCell;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::scheduler::SchedulerHandle;
use sysmon_core::theme::StaticTheme;
use sysmon_core::view::View;
use sysmon_gauge::meters::{build_meter, MeterKind, MeterOptions, SharedSensors};
use sysmon_gauge::{GaugeError, PollingGauge};
use sysmon_sensors::format::format_uptime;
use sysmon_sensors::SystemSnapshot;
use sysmon_ui::gauge_widget::GaugeWidget;
use sysmon_ui::layout::{gauge_grid, hit_test};
use sysmon_ui::renderer::ViewRenderer;

use super::{RefreshTimer, SharedSnapshots, DASHBOARD_ID};

/// Host summary line plus the four polling meters.
pub struct DashboardView {
    meters: Vec<(MeterKind, PollingGauge)>,
    snapshots: SharedSnapshots,
    header: SystemSnapshot,
    header_timer: RefreshTimer,
    /// Gauge width over height, in cells.
    aspect: f64,
    slots: RefCell<Vec<Rect>>,
    hovered: Option<usize>,
}

impl DashboardView {
    pub fn new(
        sensors: SharedSensors,
        snapshots: SharedSnapshots,
        opts: &MeterOptions,
        dark: bool,
        scheduler: SchedulerHandle,
    ) -> Result<Self, GaugeError> {
        let theme = StaticTheme::for_mode(dark);
        let meters = MeterKind::ALL
            .iter()
            .map(|&kind| {
                build_meter(kind, sensors.clone(), opts, &theme, scheduler.clone())
                    .map(|gauge| (kind, gauge))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let header = snapshots.borrow_mut().sample();
        let mut header_timer = RefreshTimer::new(scheduler, opts.interval);
        header_timer.start();

        Ok(Self {
            meters,
            snapshots,
            header,
            header_timer,
            aspect: opts.width as f64 / (opts.height as f64 / 2.0),
            slots: RefCell::new(Vec::new()),
            hovered: None,
        })
    }

    pub fn meter(&self, kind: MeterKind) -> Option<&PollingGauge> {
        self.meters.iter().find(|(k, _)| *k == kind).map(|(_, g)| g)
    }

    pub fn header(&self) -> &SystemSnapshot {
        &self.header
    }

    fn click_slot(&mut self, idx: usize) -> Vec<Event> {
        match self.meters.get_mut(idx) {
            Some((kind, gauge)) => {
                tracing::debug!(meter = ?kind, "meter clicked");
                gauge.click().into_iter().collect()
            }
            None => Vec::new(),
        }
    }

    fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        hit_test(&self.slots.borrow(), column, row)
    }

    fn header_line(&self) -> String {
        let h = &self.header;
        format!(
            "Hostname: {}   IP Address: {}   Processes: {}   Uptime: {}",
            h.host_name,
            h.ip_address,
            h.process_count,
            format_uptime(h.uptime_secs)
        )
    }
}

impl View for DashboardView {
    fn id(&self) -> &'static str {
        DASHBOARD_ID
    }

    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        match ev {
            Event::Timer { id } => {
                if self.header_timer.fired(*id) {
                    self.header = self.snapshots.borrow_mut().sample();
                } else {
                    for (_, gauge) in &mut self.meters {
                        if gauge.fire(*id) {
                            break;
                        }
                    }
                }
                Vec::new()
            }
            Event::Click { column, row } => match self.slot_at(*column, *row) {
                Some(idx) => self.click_slot(idx),
                None => Vec::new(),
            },
            Event::Hover { column, row } => {
                self.hovered = self.slot_at(*column, *row);
                Vec::new()
            }
            Event::Key(KeyEvent {
                code: KeyCode::Char(c @ '1'..='4'),
                ..
            }) => {
                let idx = (*c as usize) - ('1' as usize);
                self.hovered = Some(idx);
                self.click_slot(idx)
            }
            Event::ThemeChanged { dark } => {
                let theme = StaticTheme::for_mode(*dark);
                for (kind, gauge) in &mut self.meters {
                    if let Err(err) = gauge.theme_changed(&theme) {
                        tracing::warn!(meter = ?kind, error = %err, "theme change skipped");
                    }
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "1-4/click details".into(),
            "Tab next".into(),
            "t theme".into(),
            "r reload".into(),
            "a about".into(),
            "q quit".into(),
        ]
    }

    fn tooltip(&self) -> Option<String> {
        let (_, gauge) = self.meters.get(self.hovered?)?;
        gauge.tooltip().map(str::to_string)
    }

    fn teardown(&mut self) {
        self.header_timer.stop();
        for (_, gauge) in &mut self.meters {
            gauge.dispose();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ViewRenderer for DashboardView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let [header_area, grid_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
        f.render_widget(Paragraph::new(Line::from(self.header_line())), header_area);

        let slots = gauge_grid(grid_area, self.meters.len(), self.aspect);
        for (idx, ((_, gauge), slot)) in self.meters.iter().zip(&slots).enumerate() {
            let hovered = self.hovered == Some(idx);
            let border = if hovered {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", idx + 1));
            let inner = block.inner(*slot);
            f.render_widget(block, *slot);
            f.render_widget(GaugeWidget::polling(gauge).hovered(hovered), inner);
        }
        *self.slots.borrow_mut() = slots;
    }
}
