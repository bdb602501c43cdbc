use std::any::Any;

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::view::View;
use sysmon_sensors::format::{usage_level, UsageLevel};
use sysmon_sensors::sensors::TempReading;
use sysmon_ui::renderer::ViewRenderer;

use super::{
    back_to_dashboard, detail_action, detail_hints, DetailAction, RefreshTimer, SharedSnapshots,
};

/// Every temperature sensor with its critical threshold.
pub struct TemperatureView {
    snapshots: SharedSnapshots,
    timer: RefreshTimer,
    readings: Vec<TempReading>,
}

impl TemperatureView {
    pub const ID: &'static str = "temperature";

    pub fn new(snapshots: SharedSnapshots, timer: RefreshTimer) -> Self {
        Self {
            snapshots,
            timer,
            readings: Vec::new(),
        }
    }
}

fn temp_color(celsius: f32) -> Color {
    match usage_level(celsius as f64) {
        UsageLevel::Alert => Color::Red,
        UsageLevel::Warn => Color::Yellow,
        UsageLevel::Normal => Color::Green,
    }
}

fn celsius(value: Option<f32>) -> String {
    value.map(|v| format!("{v:.1}°C")).unwrap_or_else(|| "--".into())
}

impl View for TemperatureView {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &'static str {
        "Temperatures"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        match detail_action(Self::ID, &mut self.timer, ev) {
            DetailAction::Refresh => {
                self.readings = self.snapshots.borrow_mut().sample().temperatures;
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

impl ViewRenderer for TemperatureView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("TEMPERATURE SENSORS");
        if self.readings.is_empty() {
            let empty = Paragraph::new(Line::from("no temperature sensors found".dark_gray())).block(block);
            f.render_widget(empty, area);
            return;
        }

        let rows = self.readings.iter().map(|r| {
            Row::new(vec![
                r.label.clone().into(),
                Line::from(celsius(Some(r.current))).style(Style::default().fg(temp_color(r.current))),
                Line::from(celsius(r.critical)),
            ])
        });
        let table = Table::new(
            rows,
            [Constraint::Min(20), Constraint::Length(10), Constraint::Length(10)],
        )
        .header(Row::new(vec!["Sensor", "Current", "Critical"]).bold())
        .block(block);
        f.render_widget(table, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::views::testing::*;

    fn view() -> (TemperatureView, sysmon_core::scheduler::SchedulerHandle) {
        let (_clock, scheduler) = manual_scheduler();
        let timer = RefreshTimer::new(scheduler.clone(), Duration::from_secs(1));
        (TemperatureView::new(fake_snapshots(), timer), scheduler)
    }

    #[test]
    fn lists_every_sensor_after_activation() {
        let (mut view, scheduler) = view();
        view.handle_event(&Event::ViewActivated { id: "temperature".into() });
        assert_eq!(scheduler.len(), 1);

        let text = buffer_text(&draw(80, 10, |f| view.render_view(f, f.area())));
        assert!(text.contains("coretemp Package id 0"));
        assert!(text.contains("52.0°C"));
        assert!(text.contains("100.0°C"));
        assert!(text.contains("nvme Composite"));
        assert!(text.contains("38.5°C"));
    }

    #[test]
    fn empty_view_says_no_sensors() {
        let (view, _) = view();
        let text = buffer_text(&draw(60, 5, |f| view.render_view(f, f.area())));
        assert!(text.contains("no temperature sensors found"));
    }

    #[test]
    fn deactivation_stops_refreshing() {
        let (mut view, scheduler) = view();
        view.handle_event(&Event::ViewActivated { id: "temperature".into() });
        view.handle_event(&Event::ViewDeactivated { id: "temperature".into() });
        assert!(scheduler.is_empty());
    }

    #[test]
    fn colors_follow_usage_levels() {
        assert_eq!(temp_color(45.0), Color::Green);
        assert_eq!(temp_color(70.0), Color::Yellow);
        assert_eq!(temp_color(95.0), Color::Red);
    }
}
