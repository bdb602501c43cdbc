use ratatui::{layout::Rect, Frame};

/// Trait for views that draw into the body area of the shell.
///
/// Implement this alongside [`sysmon_core::view::View`] to provide
/// rendering. The app reaches it from the registered view via
/// [`std::any::Any`] downcasting, so no rendering types leak into
/// sysmon-core.
pub trait ViewRenderer {
    /// Draw the view body. Called each frame while the view is active.
    fn render_view(&self, f: &mut Frame, area: Rect);
}
