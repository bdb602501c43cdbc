//! Full-screen text monitor.
//!
//! Draws a host summary, CPU/temperature/RAM/swap readings, and an optional
//! disk or temperature-sensor section below them. Readings are colored by
//! their usage level.
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use sysmon_sensors::format::{
    format_bytes_whole, format_disk_usage, format_percent, format_uptime, percent_of, usage_level,
    UsageLevel,
};
use sysmon_sensors::SystemSnapshot;

/// Blocks in a disk usage bar.
pub const TOTAL_BLOCKS: usize = 50;

/// Column where the right-hand summary starts.
const RIGHT_COLUMN: u16 = 31;
const DETAILS_ROW: u16 = 7;

/// Section shown under the summary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailPane {
    #[default]
    Disk,
    Temperature,
    /// Disks on the left half, sensors on the right.
    Both,
    None,
}

fn level_color(percent: f64) -> Color {
    match usage_level(percent) {
        UsageLevel::Alert => Color::LightRed,
        UsageLevel::Warn => Color::LightYellow,
        UsageLevel::Normal => Color::LightGreen,
    }
}

/// Used blocks then empty blocks, `TOTAL_BLOCKS` wide.
pub fn usage_bar(percent: f64) -> String {
    let used = ((percent * TOTAL_BLOCKS as f64 / 100.0) as usize).min(TOTAL_BLOCKS);
    format!("{}{}", "█".repeat(used), "━".repeat(TOTAL_BLOCKS - used))
}

fn memory_details(used: u64, total: u64) -> String {
    let pct = percent_of(used, total);
    format!(
        "{}/{} {}%",
        format_bytes_whole(used),
        format_bytes_whole(total),
        pct.round() as u64
    )
}

fn heading(text: &str) -> Span<'static> {
    Span::styled(text.to_uppercase(), Style::default().fg(Color::Black).bg(Color::White))
}

fn reading<'a>(label: &'a str, details: String, percent: f64) -> Line<'a> {
    Line::from(vec![
        Span::raw(label),
        Span::raw(": "),
        Span::styled(details, Style::default().fg(level_color(percent))),
    ])
}

/// Draw `line` at `(x, y)` relative to `area`, clipped to the area.
fn put(f: &mut Frame, area: Rect, x: u16, y: u16, line: Line<'_>) {
    if x >= area.width || y >= area.height {
        return;
    }
    let rect = Rect::new(area.x + x, area.y + y, area.width - x, 1);
    f.render_widget(Paragraph::new(line), rect);
}

/// Render the text monitor into `area`.
pub fn render_text_monitor(f: &mut Frame, area: Rect, snap: &SystemSnapshot, pane: DetailPane) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    put(f, area, 1, 0, Line::from(heading("System Monitor")));
    put(f, area, 1, 1, Line::from(format!("Hostname: {}", snap.host_name)));
    put(f, area, RIGHT_COLUMN, 1, Line::from(format!("IP Address: {}", snap.ip_address)));
    put(f, area, 1, 2, Line::from(format!("Processes: {}", snap.process_count)));
    put(
        f,
        area,
        RIGHT_COLUMN,
        2,
        Line::from(format!("Uptime: {}", format_uptime(snap.uptime_secs))),
    );

    let cpu = if snap.cpu_global.is_nan() { 0.0 } else { snap.cpu_global };
    put(f, area, 1, 4, reading("CPU Usage", format_percent(snap.cpu_global), cpu));
    let (temp_text, temp) = match snap.cpu_temp {
        Some(t) => (format!("{:.1}°C", t), t as f64),
        None => ("--°C".to_string(), 0.0),
    };
    put(f, area, 1, 5, reading("Temperature", temp_text, temp));
    put(
        f,
        area,
        RIGHT_COLUMN,
        4,
        reading("RAM Usage", memory_details(snap.mem_used, snap.mem_total), snap.mem_percent()),
    );
    put(
        f,
        area,
        RIGHT_COLUMN,
        5,
        reading(
            "Swap Memory",
            memory_details(snap.swap_used, snap.swap_total),
            snap.swap_percent(),
        ),
    );

    match pane {
        DetailPane::Disk => render_disks(f, area, snap),
        DetailPane::Temperature => render_temperatures(f, area, snap),
        DetailPane::Both => {
            let half = area.width / 2;
            render_disks_half(f, Rect::new(area.x, area.y, half, area.height), snap);
            render_temperatures_half(
                f,
                Rect::new(area.x + half, area.y, area.width - half, area.height),
                snap,
            );
        }
        DetailPane::None => {}
    }

    let msg = "q to quit";
    let x = area.width.saturating_sub(msg.len() as u16 + 1);
    put(f, area, x, area.height - 1, Line::from(msg.cyan()));
}

/// The bottom row is reserved for the quit hint.
fn last_row(area: Rect) -> u16 {
    area.height.saturating_sub(1)
}

fn render_disks(f: &mut Frame, area: Rect, snap: &SystemSnapshot) {
    put(f, area, 1, DETAILS_ROW, Line::from(heading("Disk Usage")));
    for (idx, disk) in snap.disks.iter().enumerate() {
        let row = DETAILS_ROW + 1 + 2 * idx as u16;
        if row + 1 >= last_row(area) {
            break;
        }
        let color = Style::default().fg(level_color(disk.percent()));
        put(f, area, 1, row, Line::from(disk.mount.as_str()));
        put(f, area, 1, row + 1, Line::from(Span::styled(usage_bar(disk.percent()), color)));
        put(
            f,
            area,
            TOTAL_BLOCKS as u16 + 3,
            row + 1,
            Line::from(Span::styled(format_disk_usage(disk.used, disk.total), color)),
        );
    }
}

fn render_temperatures(f: &mut Frame, area: Rect, snap: &SystemSnapshot) {
    put(f, area, 1, DETAILS_ROW, Line::from(heading("Temperature Sensors")));
    if snap.temperatures.is_empty() {
        put(f, area, 1, DETAILS_ROW + 1, Line::from("no temperature sensors found".dark_gray()));
        return;
    }
    for (idx, temp) in snap.temperatures.iter().enumerate() {
        let row = DETAILS_ROW + 1 + idx as u16;
        if row >= last_row(area) {
            break;
        }
        let critical = temp
            .critical
            .map(|c| format!("{c:.1}°C"))
            .unwrap_or_else(|| "--".into());
        let line = Line::from(vec![
            Span::raw(format!("{:<20} ", temp.label)).magenta(),
            Span::raw(format!("{:.1}°C (critical = {critical})", temp.current)),
        ]);
        put(f, area, 5, row, line);
    }
}

fn render_disks_half(f: &mut Frame, area: Rect, snap: &SystemSnapshot) {
    let allowed = area.width.saturating_sub(1) as usize;
    put(f, area, 1, DETAILS_ROW, Line::from(heading("Disk Usage")));
    for (idx, disk) in snap.disks.iter().enumerate() {
        let row = DETAILS_ROW + 1 + 2 * idx as u16;
        if row + 1 >= last_row(area) {
            break;
        }
        let usage = format_disk_usage(disk.used, disk.total);
        put(f, area, 1, row, Line::from(disk.mount.as_str()));
        put(
            f,
            area,
            1,
            row + 1,
            Line::from(Span::styled(
                format!("{usage:>allowed$}"),
                Style::default().fg(level_color(disk.percent())),
            )),
        );
    }
}

fn render_temperatures_half(f: &mut Frame, area: Rect, snap: &SystemSnapshot) {
    put(f, area, 1, DETAILS_ROW, Line::from(heading("Temperature Sensors")));
    let label_width = area.width.saturating_sub(16) as usize;
    for (idx, temp) in snap.temperatures.iter().enumerate() {
        let row = DETAILS_ROW + 1 + idx as u16;
        if row >= last_row(area) {
            break;
        }
        let label: String = temp.label.chars().take(label_width).collect();
        let pad = label_width.saturating_sub(label.width());
        let line = Line::from(vec![
            Span::raw(format!("{label}{}", " ".repeat(pad))),
            Span::raw(format!("{:>10}", format!("{:.1}°C", temp.current))),
        ]);
        put(f, area, 3, row, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use sysmon_sensors::sensors::{DiskUsage, TempReading};

    const GIB: u64 = 1024 * 1024 * 1024;

    /// Helper to render into a test terminal and return the buffer.
    fn render_to_buffer(width: u16, height: u16, snap: &SystemSnapshot, pane: DetailPane) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_text_monitor(f, f.area(), snap, pane);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol().to_string()).collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    fn sample() -> SystemSnapshot {
        SystemSnapshot {
            host_name: "bramble".into(),
            ip_address: "192.168.1.20".into(),
            process_count: 312,
            uptime_secs: 347,
            cpu_global: 12.5,
            cpu_temp: Some(48.0),
            temperatures: vec![TempReading {
                label: "coretemp Package id 0".into(),
                current: 48.0,
                critical: Some(100.0),
            }],
            mem_total: 16 * GIB,
            mem_used: 8 * GIB,
            disks: vec![DiskUsage {
                mount: "/".into(),
                total: 200 * GIB,
                used: 170 * GIB,
            }],
            ..SystemSnapshot::default()
        }
    }

    #[test]
    fn usage_bar_is_fixed_width() {
        assert_eq!(usage_bar(0.0), "━".repeat(50));
        assert_eq!(usage_bar(100.0), "█".repeat(50));
        let half = usage_bar(51.0);
        assert_eq!(half.chars().filter(|&c| c == '█').count(), 25);
        assert_eq!(half.chars().count(), 50);
        assert_eq!(usage_bar(250.0), "█".repeat(50));
    }

    #[test]
    fn summary_lines() {
        let buf = render_to_buffer(100, 20, &sample(), DetailPane::None);
        assert!(row(&buf, 0).contains("SYSTEM MONITOR"));
        assert!(row(&buf, 1).contains("Hostname: bramble"));
        assert!(row(&buf, 1).contains("IP Address: 192.168.1.20"));
        assert!(row(&buf, 2).contains("Processes: 312"));
        assert!(row(&buf, 2).contains("Uptime: 5m 47s"));
        assert!(row(&buf, 4).contains("CPU Usage: 12.5%"));
        assert!(row(&buf, 4).contains("RAM Usage: 8GiB/16GiB 50%"));
        assert!(row(&buf, 5).contains("Temperature: 48.0°C"));
        assert!(row(&buf, 5).contains("Swap Memory: 0B/0B 0%"));
        assert!(row(&buf, 19).contains("q to quit"));
        assert!(!text(&buf).contains("DISK USAGE"));
    }

    #[test]
    fn readings_are_colored_by_level() {
        let buf = render_to_buffer(100, 20, &sample(), DetailPane::None);
        // "CPU Usage: " is 11 wide starting at column 1.
        assert_eq!(buf.cell((12, 4)).unwrap().fg, Color::LightGreen);
    }

    #[test]
    fn disk_pane_draws_bar_and_usage() {
        let buf = render_to_buffer(100, 20, &sample(), DetailPane::Disk);
        assert!(row(&buf, 7).contains("DISK USAGE"));
        assert!(row(&buf, 8).contains('/'));
        let bar_row = row(&buf, 9);
        assert!(bar_row.contains(&"█".repeat(42)));
        assert!(bar_row.contains("170GiB/200GiB 85%"));
        assert_eq!(buf.cell((1, 9)).unwrap().fg, Color::LightRed);
    }

    #[test]
    fn temperature_pane_lists_sensors() {
        let buf = render_to_buffer(100, 20, &sample(), DetailPane::Temperature);
        assert!(row(&buf, 7).contains("TEMPERATURE SENSORS"));
        assert!(row(&buf, 8).contains("coretemp Package id 0"));
        assert!(row(&buf, 8).contains("48.0°C (critical = 100.0°C)"));
    }

    #[test]
    fn temperature_pane_without_sensors() {
        let snap = SystemSnapshot::default();
        let buf = render_to_buffer(80, 12, &snap, DetailPane::Temperature);
        assert!(text(&buf).contains("no temperature sensors found"));
    }

    #[test]
    fn both_panes_share_the_width() {
        let buf = render_to_buffer(100, 20, &sample(), DetailPane::Both);
        let header = row(&buf, 7);
        assert!(header.contains("DISK USAGE"));
        assert!(header.contains("TEMPERATURE SENSORS"));
        assert!(row(&buf, 9).contains("170GiB/200GiB 85%"));
        assert!(row(&buf, 8).contains("48.0°C"));
    }

    #[test]
    fn default_snapshot_shows_placeholders() {
        let buf = render_to_buffer(80, 12, &SystemSnapshot::default(), DetailPane::Disk);
        assert!(row(&buf, 4).contains("CPU Usage: --%"));
        assert!(row(&buf, 5).contains("Temperature: --°C"));
    }

    #[test]
    fn tiny_terminal_no_panic() {
        let _ = render_to_buffer(2, 2, &sample(), DetailPane::Both);
        let _ = render_to_buffer(1, 1, &sample(), DetailPane::Disk);
    }
}
