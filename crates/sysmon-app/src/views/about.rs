use std::any::Any;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use sysmon_core::event::Event;
use sysmon_core::view::View;
use sysmon_ui::renderer::ViewRenderer;

use super::back_to_dashboard;

/// Package metadata shown in the about view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutMetadata {
    pub app_name: String,
    pub version: String,
    pub authors: String,
    pub description: String,
    pub url: String,
    pub license: String,
}

impl AboutMetadata {
    /// Metadata baked in from `Cargo.toml`.
    pub fn from_package() -> Self {
        Self {
            app_name: "sysmon".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            // Cargo joins multiple authors with ':'.
            authors: env!("CARGO_PKG_AUTHORS").replace(':', ", "),
            description: env!("CARGO_PKG_DESCRIPTION").into(),
            url: env!("CARGO_PKG_REPOSITORY").into(),
            license: env!("CARGO_PKG_LICENSE").into(),
        }
    }

    /// Text lines in display order; empty fields are left out.
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(self.app_name.clone().bold())];
        if !self.version.is_empty() {
            lines.push(Line::from(format!("Version {}", self.version)));
        }
        if !self.authors.is_empty() {
            lines.push(Line::from(format!("© {}", self.authors)));
        }
        if !self.url.is_empty() {
            let link = Line::from(format!("Source Code: {}", self.url));
            lines.push(link.style(Style::default().fg(Color::Cyan)));
        }
        if !self.description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(self.description.clone()));
        }
        if !self.license.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(format!("License: {}", self.license)).dark_gray());
        }
        lines
    }
}

/// Name, version, authors and license of the application.
pub struct AboutView {
    about: AboutMetadata,
}

impl AboutView {
    pub const ID: &'static str = "about";

    pub fn new(about: AboutMetadata) -> Self {
        Self { about }
    }
}

impl View for AboutView {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn title(&self) -> &'static str {
        "About"
    }

    fn handle_event(&mut self, ev: &Event) -> Vec<Event> {
        match ev {
            Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => back_to_dashboard(),
            _ => Vec::new(),
        }
    }

    fn hints(&self) -> Vec<String> {
        vec!["Esc back".into(), "Tab next".into(), "q quit".into()]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ViewRenderer for AboutView {
    fn render_view(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" About {} ", self.about.app_name));
        let body = Paragraph::new(self.about.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::views::testing::*;

    fn metadata() -> AboutMetadata {
        AboutMetadata {
            app_name: "sysmon".into(),
            version: "1.2.3".into(),
            authors: "Ada, Grace".into(),
            description: "Gauges for your host".into(),
            url: "https://example.invalid/sysmon".into(),
            license: "MIT".into(),
        }
    }

    #[test]
    fn renders_every_field() {
        let view = AboutView::new(metadata());
        let text = buffer_text(&draw(60, 12, |f| view.render_view(f, f.area())));
        assert!(text.contains("About sysmon"));
        assert!(text.contains("Version 1.2.3"));
        assert!(text.contains("© Ada, Grace"));
        assert!(text.contains("Source Code: https://example.invalid/sysmon"));
        assert!(text.contains("Gauges for your host"));
        assert!(text.contains("License: MIT"));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let about = AboutMetadata {
            url: String::new(),
            authors: String::new(),
            ..metadata()
        };
        let view = AboutView::new(about);
        let text = buffer_text(&draw(60, 12, |f| view.render_view(f, f.area())));
        assert!(!text.contains("Source Code"));
        assert!(!text.contains('©'));
        assert!(text.contains("Version 1.2.3"));
    }

    #[test]
    fn package_metadata_comes_from_cargo() {
        let about = AboutMetadata::from_package();
        assert_eq!(about.app_name, "sysmon");
        assert_eq!(about.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(about.license, "MIT");
        assert!(!about.description.is_empty());
    }

    #[test]
    fn escape_returns_to_dashboard() {
        let mut view = AboutView::new(metadata());
        let out = view.handle_event(&key(KeyCode::Esc));
        assert!(matches!(&out[..], [Event::OpenView { id }] if id == "dashboard"));
        assert!(view.handle_event(&key(KeyCode::Char('x'))).is_empty());
    }
}
