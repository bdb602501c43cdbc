//! Text-mode monitor loop.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sysmon_config::{DetailMode, TextSettings};
use sysmon_sensors::TelemetryCollector;
use sysmon_ui::text_monitor::{render_text_monitor, DetailPane};

use crate::Tui;

/// Longest the loop blocks on input before checking the refresh gate.
const INPUT_POLL: Duration = Duration::from_millis(100);

pub fn detail_pane(mode: DetailMode) -> DetailPane {
    match mode {
        DetailMode::Disk => DetailPane::Disk,
        DetailMode::Temperature => DetailPane::Temperature,
        DetailMode::Both => DetailPane::Both,
        DetailMode::None => DetailPane::None,
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Redraw the monitor every `refresh_secs` until a quit key arrives.
pub fn run(terminal: &mut Tui, settings: &TextSettings) -> Result<()> {
    let interval = settings.refresh_interval()?;
    let pane = detail_pane(settings.details);
    let mut collector = TelemetryCollector::with_interval(interval);
    tracing::info!(?interval, ?pane, "text monitor started");

    let mut dirty = true;
    loop {
        if collector.maybe_refresh(Instant::now()) {
            dirty = true;
        }
        if dirty {
            terminal.draw(|f| render_text_monitor(f, f.area(), collector.snapshot(), pane))?;
            dirty = false;
        }

        if event::poll(INPUT_POLL.min(interval))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press && is_quit_key(&key) => break,
                CEvent::Resize(..) => dirty = true,
                _ => {}
            }
        }
    }
    tracing::info!("text monitor stopped");
    Ok(())
}
