use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::layout::ShellRects;

pub struct ShellView<'a> {
    pub view_title: &'a str,
    pub status_line: &'a str,
    pub hints: Vec<String>,
    /// Tooltip of the hovered gauge; replaces the hints while shown.
    pub tooltip: Option<&'a str>,
    /// Most recent warning from the log.
    pub warning: Option<&'a str>,
}

pub fn render_shell(
    f: &mut Frame,
    rects: ShellRects,
    view: ShellView<'_>,
    body: impl FnOnce(&mut Frame, Rect),
) {
    let top = Paragraph::new(Line::from(format!(
        "SYSMON | {} | {}",
        view.view_title, view.status_line
    )))
    .style(Style::default())
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(top, rects.top);

    body(f, rects.body);

    f.render_widget(Paragraph::new(footer_line(&view)), rects.footer);
}

fn footer_line<'a>(view: &ShellView<'a>) -> Line<'a> {
    let mut spans = match view.tooltip {
        Some(tip) => vec![Span::styled(tip, Style::default().fg(Color::Cyan))],
        None => vec![Span::raw(view.hints.join("  ")).dark_gray()],
    };
    if let Some(warning) = view.warning {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("! {warning}"), Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::shell_layout;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(view: ShellView<'_>) -> String {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let rects = shell_layout(f.area());
                render_shell(f, rects, view, |f, area| {
                    f.render_widget(Paragraph::new("BODY"), area);
                });
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol().to_string())
            .collect()
    }

    fn view<'a>() -> ShellView<'a> {
        ShellView {
            view_title: "Dashboard",
            status_line: "up 5m 47s",
            hints: vec!["q quit".into(), "t theme".into()],
            tooltip: None,
            warning: None,
        }
    }

    #[test]
    fn top_bar_shows_title_and_status() {
        let text = render(view());
        assert!(text.contains("SYSMON | Dashboard | up 5m 47s"));
        assert!(text.contains("BODY"));
        assert!(text.contains("q quit  t theme"));
    }

    #[test]
    fn tooltip_replaces_hints() {
        let text = render(ShellView {
            tooltip: Some("Click for per-CPU usage"),
            ..view()
        });
        assert!(text.contains("Click for per-CPU usage"));
        assert!(!text.contains("q quit"));
    }

    #[test]
    fn warning_is_appended() {
        let text = render(ShellView {
            warning: Some("gauge refresh failed"),
            ..view()
        });
        assert!(text.contains("! gauge refresh failed"));
    }
}
