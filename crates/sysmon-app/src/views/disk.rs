use std::any::Any;

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::view::View;
use sysmon_sensors::format::{format_disk_usage, usage_level, UsageLevel};
use sysmon_sensors::sensors::DiskUsage;
use sysmon_ui::renderer::ViewRenderer;
use sysmon_ui::text_monitor::usage_bar;

use super::{
    back_to_dashboard, detail_action, detail_hints, DetailAction, RefreshTimer, SharedSnapshots,
};

/// Usage bar and totals for every mount point.
pub struct DiskView {
    snapshots: SharedSnapshots,
    timer: RefreshTimer,
    disks: Vec<DiskUsage>,
}

impl DiskView {
    pub const ID: &'static str = "disk";

    pub fn new(snapshots: SharedSnapshots, timer: RefreshTimer) -> Self {
        Self {
            snapshots,
            timer,
            disks: Vec::new(),
        }
    }
}

impl View for DiskView {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &'static str {
        "Disk Usage"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        match detail_action(Self::ID, &mut self.timer, ev) {
            DetailAction::Refresh => {
                self.disks = self.snapshots.borrow_mut().sample().disks;
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

impl ViewRenderer for DiskView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::with_capacity(self.disks.len() * 2);
        for disk in &self.disks {
            let pct = disk.percent();
            let color = match usage_level(pct) {
                UsageLevel::Alert => Color::LightRed,
                UsageLevel::Warn => Color::LightYellow,
                UsageLevel::Normal => Color::LightGreen,
            };
            lines.push(Line::from(disk.mount.as_str().bold()));
            lines.push(Line::from(vec![
                Span::styled(usage_bar(pct), Style::default().fg(color)),
                Span::raw("  "),
                Span::styled(format_disk_usage(disk.used, disk.total), Style::default().fg(color)),
            ]));
        }
        let block = Block::default().borders(Borders::ALL).title("DISK USAGE");
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
