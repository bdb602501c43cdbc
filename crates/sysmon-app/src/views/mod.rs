//! Views shown in the dashboard shell.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use sysmon_core::event::Event;
use sysmon_core::scheduler::{SchedulerHandle, TimerId};
use sysmon_sensors::SnapshotSource;

pub mod about;
pub mod cpu;
pub mod dashboard;
pub mod disk;
pub mod memory;
pub mod temperature;

pub use about::{AboutMetadata, AboutView};
pub use cpu::CpuView;
pub use dashboard::DashboardView;
pub use disk::DiskView;
pub use memory::MemoryView;
pub use temperature::TemperatureView;

/// Snapshot source shared by every view on the UI thread.
pub type SharedSnapshots = Rc<RefCell<dyn SnapshotSource>>;

pub const DASHBOARD_ID: &str = "dashboard";

/// Repeating refresh timer that only runs while its view is active.
pub struct RefreshTimer {
    scheduler: SchedulerHandle,
    interval: Duration,
    pending: Option<TimerId>,
}

impl RefreshTimer {
    pub fn new(scheduler: SchedulerHandle, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            pending: None,
        }
    }

    pub fn start(&mut self) {
        self.stop();
        self.pending = Some(self.scheduler.schedule_after(self.interval));
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Whether `id` is this timer; if so it is rearmed.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = Some(self.scheduler.schedule_after(self.interval));
        true
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// What a detail view should do with an event.
pub enum DetailAction {
    /// Resample and redraw.
    Refresh,
    Back,
    Ignore,
}

/// Shared event handling for detail views: refresh on activation and on
/// their own timer, stop when deactivated, `Esc` goes back.
pub fn detail_action(id: &str, timer: &mut RefreshTimer, ev: &Event) -> DetailAction {
    match ev {
        Event::ViewActivated { id: target } if target == id => {
            timer.start();
            DetailAction::Refresh
        }
        Event::ViewDeactivated { id: target } if target == id => {
            timer.stop();
            DetailAction::Ignore
        }
        Event::Timer { id: timer_id } if timer.fired(*timer_id) => DetailAction::Refresh,
        Event::Key(KeyEvent {
            code: KeyCode::Esc, ..
        }) => DetailAction::Back,
        _ => DetailAction::Ignore,
    }
}

pub fn back_to_dashboard() -> Vec<Event> {
    vec![Event::OpenView {
        id: DASHBOARD_ID.to_string(),
    }]
}

pub fn detail_hints() -> Vec<String> {
    vec!["Esc back".into(), "Tab next".into(), "t theme".into(), "q quit".into()]
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::time::Duration;

    #[test]
    fn refresh_timer_rearms_only_for_its_id() {
        let (clock, scheduler) = manual_scheduler();
        let mut timer = RefreshTimer::new(scheduler.clone(), Duration::from_secs(1));
        timer.start();
        assert!(timer.is_running());

        let foreign = scheduler.schedule_after(Duration::from_millis(10));
        assert!(!timer.fired(foreign));

        clock.advance(Duration::from_secs(1));
        let due = scheduler.take_due();
        assert_eq!(due.len(), 2);
        assert!(due.iter().any(|&id| timer.fired(id)));
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn stopping_cancels_pending_timer() {
        let (_clock, scheduler) = manual_scheduler();
        let mut timer = RefreshTimer::new(scheduler.clone(), Duration::from_secs(1));
        timer.start();
        timer.stop();
        assert!(!timer.is_running());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn dropping_timer_cancels_it() {
        let (_clock, scheduler) = manual_scheduler();
        {
            let mut timer = RefreshTimer::new(scheduler.clone(), Duration::from_secs(1));
            timer.start();
        }
        assert!(scheduler.is_empty());
    }

    #[test]
    fn detail_lifecycle_starts_and_stops_timer() {
        let (_clock, scheduler) = manual_scheduler();
        let mut timer = RefreshTimer::new(scheduler, Duration::from_secs(1));

        let activated = Event::ViewActivated { id: "disk".into() };
        assert!(matches!(detail_action("disk", &mut timer, &activated), DetailAction::Refresh));
        assert!(timer.is_running());

        let other = Event::ViewActivated { id: "cpu".into() };
        assert!(matches!(detail_action("disk", &mut timer, &other), DetailAction::Ignore));

        let deactivated = Event::ViewDeactivated { id: "disk".into() };
        detail_action("disk", &mut timer, &deactivated);
        assert!(!timer.is_running());

        assert!(matches!(
            detail_action("disk", &mut timer, &key(KeyCode::Esc)),
            DetailAction::Back
        ));
    }
}
