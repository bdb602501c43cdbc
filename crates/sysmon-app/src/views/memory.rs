use std::any::Any;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::view::View;
use sysmon_sensors::format::{format_bytes, percent_of, usage_level, UsageLevel};
use sysmon_ui::renderer::ViewRenderer;

use super::{
    back_to_dashboard, detail_action, detail_hints, DetailAction, RefreshTimer, SharedSnapshots,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Usage {
    used: u64,
    total: u64,
}

impl Usage {
    fn percent(self) -> f64 {
        percent_of(self.used, self.total)
    }
}

/// RAM and swap statistics with usage bars.
pub struct MemoryView {
    snapshots: SharedSnapshots,
    timer: RefreshTimer,
    ram: Usage,
    swap: Usage,
}

impl MemoryView {
    pub const ID: &'static str = "memory";

    pub fn new(snapshots: SharedSnapshots, timer: RefreshTimer) -> Self {
        Self {
            snapshots,
            timer,
            ram: Usage::default(),
            swap: Usage::default(),
        }
    }
}

fn level_color(pct: f64) -> Color {
    match usage_level(pct) {
        UsageLevel::Alert => Color::Red,
        UsageLevel::Warn => Color::Yellow,
        UsageLevel::Normal => Color::Green,
    }
}

/// Draw one labelled usage section: a text line and a bar.
fn render_usage(f: &mut Frame, area: Rect, title: &str, usage: Usage) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);
    if usage.total == 0 {
        f.render_widget(Paragraph::new("N/A"), inner);
        return;
    }

    let [text_area, bar_area] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);
    let pct = usage.percent();
    let line = format!(
        "Used: {}   Free: {}   Total: {}   {:.1}%",
        format_bytes(usage.used, 1),
        format_bytes(usage.total.saturating_sub(usage.used), 1),
        format_bytes(usage.total, 1),
        pct
    );
    f.render_widget(Paragraph::new(Line::from(line)), text_area);

    let gauge = LineGauge::default()
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .filled_style(Style::default().fg(level_color(pct)))
        .unfilled_style(Style::default().fg(Color::DarkGray));
    f.render_widget(gauge, bar_area);
}

impl View for MemoryView {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &'static str {
        "Memory"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        match detail_action(Self::ID, &mut self.timer, ev) {
            DetailAction::Refresh => {
                let snap = self.snapshots.borrow_mut().sample();
                self.ram = Usage {
                    used: snap.mem_used,
                    total: snap.mem_total,
                };
                self.swap = Usage {
                    used: snap.swap_used,
                    total: snap.swap_total,
                };
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

impl ViewRenderer for MemoryView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let [ram, swap] = Layout::vertical([Constraint::Length(4), Constraint::Length(4)]).areas(area);
        render_usage(f, ram, "RAM", self.ram);
        render_usage(f, swap, "SWAP", self.swap);
    }
}
