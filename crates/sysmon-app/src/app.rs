use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use sysmon_config::{Settings, ThemeMode};
use sysmon_core::{
    bus::EventBus,
    event::Event,
    logging::LogBuffer,
    registry::ViewRegistry,
    scheduler::SchedulerHandle,
    state::AppState,
    theme::detect_terminal_dark,
    view::View,
};
use sysmon_gauge::meters::{MeterOptions, SharedSensors};
use sysmon_ui::{
    layout::shell_layout,
    renderer::ViewRenderer,
    shell::{render_shell, ShellView},
};

use crate::views::{
    AboutMetadata, AboutView, CpuView, DashboardView, DiskView, MemoryView, RefreshTimer,
    SharedSnapshots, TemperatureView,
};

/// A type-erased render function that downcasts a view via `Any` and draws
/// its body.
type RenderFn = Box<dyn Fn(&dyn Any, &mut Frame, Rect)>;

/// Detail views resample at this pace while active.
const DETAIL_REFRESH: Duration = Duration::from_secs(1);

pub fn resolve_dark(mode: ThemeMode) -> bool {
    match mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::System => detect_terminal_dark(),
    }
}

pub struct App {
    pub state: AppState,
    registry: ViewRegistry,
    bus: EventBus,
    scheduler: SchedulerHandle,
    sensors: SharedSensors,
    snapshots: SharedSnapshots,
    settings: Settings,
    settings_path: PathBuf,
    log_buffer: LogBuffer,
    render_map: HashMap<String, RenderFn>,
}

/// Register a view that also implements `ViewRenderer`.
///
/// Inserts the view into the registry and captures a type-aware render
/// closure in `render_map` so the app can call `render_view` without
/// knowing the concrete view type.
fn register_view<V: View + ViewRenderer + 'static>(
    registry: &mut ViewRegistry,
    render_map: &mut HashMap<String, RenderFn>,
    view: V,
) -> Result<()> {
    let id = view.id().to_string();
    render_map.insert(
        id,
        Box::new(|any, f, area| {
            if let Some(v) = any.downcast_ref::<V>() {
                v.render_view(f, area);
            }
        }),
    );
    registry.register(Box::new(view))
}

impl App {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        log_buffer: LogBuffer,
        sensors: SharedSensors,
        snapshots: SharedSnapshots,
        scheduler: SchedulerHandle,
    ) -> Result<Self> {
        let dark = resolve_dark(settings.general.theme);
        let mut app = Self {
            state: AppState::new(dark),
            registry: ViewRegistry::new(),
            bus: EventBus::new(),
            scheduler,
            sensors,
            snapshots,
            settings,
            settings_path,
            log_buffer,
            render_map: HashMap::new(),
        };
        app.build_views()?;
        app.state.status_line = app.theme_status();
        Ok(app)
    }

    fn meter_options(&self) -> MeterOptions {
        let s = &self.settings;
        MeterOptions {
            width: s.gauge.width,
            height: s.gauge.height,
            interval: Duration::from_millis(s.general.refresh_interval_ms),
            clamp_needle: s.gauge.clamp_needle,
            disk_mount: s.general.disk_mount.clone(),
        }
    }

    fn detail_timer(&self) -> RefreshTimer {
        RefreshTimer::new(self.scheduler.clone(), DETAIL_REFRESH)
    }

    fn build_views(&mut self) -> Result<()> {
        let dark = self.state.dark;
        let dashboard = DashboardView::new(
            self.sensors.clone(),
            self.snapshots.clone(),
            &self.meter_options(),
            dark,
            self.scheduler.clone(),
        )
        .context("failed to build dashboard gauges")?;
        let size = (self.settings.gauge.width, self.settings.gauge.height);
        let cpu = CpuView::new(self.snapshots.clone(), self.detail_timer(), size, dark);
        let temperature = TemperatureView::new(self.snapshots.clone(), self.detail_timer());
        let memory = MemoryView::new(self.snapshots.clone(), self.detail_timer());
        let disk = DiskView::new(self.snapshots.clone(), self.detail_timer());

        let (registry, render_map) = (&mut self.registry, &mut self.render_map);
        register_view(registry, render_map, dashboard)?;
        register_view(registry, render_map, cpu)?;
        register_view(registry, render_map, temperature)?;
        register_view(registry, render_map, memory)?;
        register_view(registry, render_map, disk)?;
        register_view(registry, render_map, AboutView::new(AboutMetadata::from_package()))?;
        tracing::info!(views = self.registry.len(), "views built");
        Ok(())
    }

    fn theme_status(&self) -> String {
        format!("{} theme", if self.state.dark { "dark" } else { "light" })
    }

    pub fn active_id(&self) -> Option<&str> {
        self.registry.active_id()
    }

    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.scheduler
    }

    /// Translate a key press into bus events. Global keys are handled here;
    /// everything else goes to the active view.
    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.bus.publish(Event::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.bus.publish(Event::Quit)
            }
            KeyCode::Tab => {
                let lifecycle = self.registry.cycle_next();
                self.bus.publish_all(lifecycle);
            }
            KeyCode::BackTab => {
                let lifecycle = self.registry.cycle_prev();
                self.bus.publish_all(lifecycle);
            }
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('r') => self.bus.publish(Event::SettingsChanged),
            KeyCode::Char('a') => self.bus.publish(Event::OpenView {
                id: AboutView::ID.to_string(),
            }),
            _ => self.bus.publish(Event::Key(key)),
        }
    }

    pub fn publish(&mut self, event: Event) {
        self.bus.publish(event);
    }

    /// Flip light/dark, persist the choice and tell every view.
    fn toggle_theme(&mut self) {
        let dark = !self.state.dark;
        self.state.dark = dark;
        self.settings.general.theme = if dark { ThemeMode::Dark } else { ThemeMode::Light };
        if let Err(err) = self.settings.save(&self.settings_path) {
            tracing::warn!(error = %err, "failed to persist theme");
        }
        self.state.status_line = self.theme_status();
        tracing::info!(dark, "theme toggled");
        self.bus.publish(Event::ThemeChanged { dark });
    }

    /// Reload settings from disk and rebuild every view.
    fn rebuild(&mut self) -> Result<()> {
        self.state.begin_rebuild()?;
        match Settings::load(&self.settings_path) {
            Ok(settings) => self.settings = settings,
            Err(err) => tracing::warn!(error = %err, "keeping previous settings"),
        }
        self.state.dark = resolve_dark(self.settings.general.theme);

        let previous = self.registry.active_id().map(str::to_string);
        self.registry.clear();
        self.render_map.clear();
        self.build_views()?;
        if let Some(id) = previous {
            let lifecycle = self.registry.activate(&id)?;
            self.bus.publish_all(lifecycle);
        }
        self.state.finish_rebuild()?;
        self.state.status_line = format!("settings reloaded, {}", self.theme_status());
        tracing::info!(rebuilds = self.state.rebuilds(), "views rebuilt");
        Ok(())
    }

    /// Publish due timers, then drain the bus and broadcast each event.
    ///
    /// Returns `false` once a quit was requested.
    pub fn pump(&mut self) -> Result<bool> {
        for id in self.scheduler.take_due() {
            self.bus.publish(Event::Timer { id });
        }

        let events = self.bus.drain();
        for ev in &events {
            match ev {
                Event::Quit => return Ok(false),
                Event::OpenView { id } => match self.registry.activate(id) {
                    Ok(lifecycle) => self.bus.publish_all(lifecycle),
                    Err(err) => tracing::warn!(error = %err, "cannot open view"),
                },
                Event::SettingsChanged => self.rebuild()?,
                _ => {
                    let follow_ups = self.registry.broadcast(ev);
                    self.bus.publish_all(follow_ups);
                }
            }
        }
        Ok(true)
    }

    /// How long the loop may block waiting for input.
    pub fn poll_timeout(&self, max: Duration) -> Duration {
        if self.bus.has_pending() {
            return Duration::ZERO;
        }
        match self.scheduler.next_due() {
            Some(due) => due.saturating_duration_since(self.scheduler.now()).min(max),
            None => max,
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let rects = shell_layout(f.area());
        let Some(view) = self.registry.active() else {
            return;
        };
        let warning = self.log_buffer.latest_warning().map(|e| e.message);
        let tooltip = view.tooltip();
        let uptime = self.state.uptime().as_secs();
        let status = format!("{} | up {}s", self.state.status_line, uptime);
        let shell = ShellView {
            view_title: view.title(),
            status_line: &status,
            hints: view.hints(),
            tooltip: tooltip.as_deref(),
            warning: warning.as_deref(),
        };

        let render_map = &self.render_map;
        render_shell(f, rects, shell, |f, body| {
            if let Some(render_fn) = render_map.get(view.id()) {
                render_fn(view.as_any(), f, body);
            }
        });
    }
}
