use crate::scheduler::TimerId;

#[derive(Debug, Clone)]
pub enum Event {
    /// A scheduled timer came due. Only its owner reacts.
    Timer { id: TimerId },
    Key(crossterm::event::KeyEvent),
    /// Left mouse button pressed at a terminal cell.
    Click { column: u16, row: u16 },
    /// Pointer moved over a terminal cell.
    Hover { column: u16, row: u16 },
    Resize { cols: u16, rows: u16 },
    ThemeChanged { dark: bool },
    /// Request that the app switch to another view.
    OpenView { id: String },
    ViewActivated { id: String },
    ViewDeactivated { id: String },
    /// Settings on disk changed; every view gets rebuilt.
    SettingsChanged,
    Quit,
}
