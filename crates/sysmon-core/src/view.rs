use std::any::Any;

use crate::event::Event;

/// A full-screen view in the sysmon shell.
///
/// The dashboard and each detail view implement this trait. Views are
/// registered with [`crate::registry::ViewRegistry`] and receive events via
/// [`handle_event`](View::handle_event).
///
/// Rendering is handled separately via `sysmon_ui::renderer::ViewRenderer`.
pub trait View {
    /// Unique identifier for this view (e.g. `"dashboard"`, `"cpu"`).
    fn id(&self) -> &'static str;

    /// Human-readable name shown in the top bar.
    fn title(&self) -> &'static str;

    /// Handle an incoming event, returning follow-up events for the bus.
    ///
    /// The default implementation ignores the event.
    fn handle_event(&mut self, _ev: &Event) -> Vec<Event> {
        Vec::new()
    }

    /// Footer hints shown while this view is active.
    fn hints(&self) -> Vec<String> {
        Vec::new()
    }

    /// Tooltip for whatever is under the pointer, if anything.
    fn tooltip(&self) -> Option<String> {
        None
    }

    /// Release timers and other resources before the view is dropped.
    fn teardown(&mut self) {}

    /// Return `self` as `&dyn Any` for type-aware rendering in sysmon-ui.
    fn as_any(&self) -> &dyn Any;
}
