//! Ratatui widget for a radial gauge.
//!
//! The arcs are rasterized and drawn with half-blocks. Labels are written as
//! terminal text at the cell holding their anchor point.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use sysmon_core::theme::Rgb;
use sysmon_gauge::scene::{Anchor, Scene, TextItem};
use sysmon_gauge::polling::CursorHint;
use sysmon_gauge::{GaugeRenderer, PollingGauge};
use unicode_width::UnicodeWidthStr;

use crate::pixels::render_pixmap;
use crate::raster::rasterize;

pub struct GaugeWidget<'a> {
    renderer: &'a GaugeRenderer,
    clickable: bool,
    hovered: bool,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(renderer: &'a GaugeRenderer) -> Self {
        Self {
            renderer,
            clickable: false,
            hovered: false,
        }
    }

    /// Widget for a polling gauge; clickable gauges underline their title.
    pub fn polling(gauge: &'a PollingGauge) -> Self {
        Self {
            renderer: gauge.renderer(),
            clickable: gauge.cursor() == CursorHint::Pointer,
            hovered: false,
        }
    }

    /// The pointer is over the gauge.
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }
}

pub(crate) fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let scene = self.renderer.scene();
        render_pixmap(buf, area, &rasterize(scene));

        let title = self.renderer.config().label();
        for text in scene.texts() {
            let mut style = Style::default()
                .fg(color(text.color))
                .bg(color(scene.background()));
            if text.text == title && self.clickable {
                style = style.add_modifier(Modifier::UNDERLINED);
                if self.hovered {
                    style = style.add_modifier(Modifier::BOLD);
                }
            }
            draw_text(buf, area, scene, text, style);
        }
    }
}

/// Cell column and row of the first character of `text`.
fn text_origin(area: Rect, scene: &Scene, text: &TextItem) -> (i32, i32) {
    let col = (text.x * area.width as f64 / scene.width() as f64).floor() as i32;
    let row = (text.y * area.height as f64 / scene.height() as f64).floor() as i32;
    let width = text.text.width() as i32;
    let col = match text.anchor {
        Anchor::Center | Anchor::North => col - width / 2,
        Anchor::NorthEast => col - width,
        Anchor::NorthWest => col,
    };
    (area.x as i32 + col, area.y as i32 + row)
}

fn draw_text(buf: &mut Buffer, area: Rect, scene: &Scene, text: &TextItem, style: Style) {
    let (col, row) = text_origin(area, scene, text);
    if row < area.top() as i32 || row >= area.bottom() as i32 {
        return;
    }
    let col = col.clamp(area.left() as i32, area.right() as i32);
    let room = (area.right() as i32 - col) as usize;
    buf.set_stringn(col as u16, row as u16, &text.text, room, style);
}
