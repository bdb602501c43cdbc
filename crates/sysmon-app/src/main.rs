use std::cell::RefCell;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sysmon_config::{settings_path, Settings};
use sysmon_core::{event::Event, logging, scheduler::SchedulerHandle};
use sysmon_sensors::{SysinfoSensors, TelemetryCollector};

mod app;
mod cli;
mod text;
mod views;

use app::App;
use cli::{Cli, Command};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const MAX_POLL: Duration = Duration::from_millis(16);

fn setup_terminal(mouse: bool) -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Tui, mouse: bool) -> Result<()> {
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Load settings from `path`, falling back to defaults if the file is bad.
fn load_settings(path: &Path) -> Settings {
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(error = %err, "using default settings");
            Settings::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_buffer = logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sysmon starting up");

    let path = cli.config.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings(&path);
    cli.apply(&mut settings);
    settings.validate().context("invalid command-line options")?;

    match cli.command {
        Some(Command::Text(_)) => {
            let mut terminal = setup_terminal(false)?;
            let res = text::run(&mut terminal, &settings.text);
            restore_terminal(terminal, false)?;
            res
        }
        None => {
            let mut terminal = setup_terminal(true)?;
            let res = run(&mut terminal, settings, path, log_buffer);
            restore_terminal(terminal, true)?;
            res
        }
    }
}

fn run(
    terminal: &mut Tui,
    settings: Settings,
    path: PathBuf,
    log_buffer: logging::LogBuffer,
) -> Result<()> {
    let sensors = Rc::new(RefCell::new(SysinfoSensors::new()));
    let snapshots = Rc::new(RefCell::new(TelemetryCollector::new()));
    let mut app = App::new(
        settings,
        path,
        log_buffer,
        sensors,
        snapshots,
        SchedulerHandle::system(),
    )?;

    loop {
        // ── Render ──
        terminal.draw(|f| app.draw(f))?;

        // ── Poll → Publish ──
        if event::poll(app.poll_timeout(MAX_POLL))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                CEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => app.publish(Event::Click {
                        column: mouse.column,
                        row: mouse.row,
                    }),
                    MouseEventKind::Moved => app.publish(Event::Hover {
                        column: mouse.column,
                        row: mouse.row,
                    }),
                    _ => {}
                },
                CEvent::Resize(cols, rows) => app.publish(Event::Resize { cols, rows }),
                _ => {}
            }
        }

        // ── Drain → Broadcast ──
        if !app.pump()? {
            tracing::info!("sysmon shutting down");
            return Ok(());
        }
    }
}
