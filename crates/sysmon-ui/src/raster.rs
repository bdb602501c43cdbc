//! Software rasterizer for gauge scenes.
//!
//! Arcs are painted onto an RGBA [`Pixmap`] sampled at pixel centers.
//! Text items are left to the terminal; see [`crate::gauge_widget`].

use sysmon_core::theme::Rgb;
use sysmon_gauge::geometry::angle_in_sweep;
use sysmon_gauge::scene::{ArcItem, ArcStyle, Item, Scene};

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Opaque pixmap filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut pixmap = Self::new(width, height);
        for px in pixmap.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.0, color.1, color.2, 255]);
        }
        pixmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&[color.0, color.1, color.2, 255]);
        }
    }

    /// Color at `(x, y)`, `None` when out of bounds or transparent.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        let idx = self.index(x, y)?;
        let px = &self.data[idx..idx + 4];
        (px[3] > 0).then(|| Rgb(px[0], px[1], px[2]))
    }
}

/// Paint every arc of `scene` in order onto a pixmap filled with the
/// scene background.
pub fn rasterize(scene: &Scene) -> Pixmap {
    let mut pixmap = Pixmap::filled(scene.width(), scene.height(), scene.background());
    for item in scene.items() {
        if let Item::Arc(arc) = item {
            paint_arc(&mut pixmap, arc);
        }
    }
    pixmap
}

fn paint_arc(pixmap: &mut Pixmap, arc: &ArcItem) {
    let half = (arc.width / 2.0).max(0.5);
    let (cx, cy) = arc.bbox.center();
    let (rx, ry) = arc.bbox.radii();
    if rx == 0.0 || ry == 0.0 {
        return;
    }
    let edge_a = arc.bbox.point_at(arc.start);
    let edge_b = arc.bbox.point_at(arc.start + arc.extent);

    let x0 = (cx - rx - half).floor().max(0.0) as u32;
    let y0 = (cy - ry - half).floor().max(0.0) as u32;
    let x1 = ((cx + rx + half).ceil().max(0.0) as u32).min(pixmap.width());
    let y1 = ((cy + ry + half).ceil().max(0.0) as u32).min(pixmap.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let (x, y) = (px as f64 + 0.5, py as f64 + 0.5);
            let Some((angle, r)) = arc.bbox.polar(x, y) else {
                continue;
            };
            let in_sweep = angle_in_sweep(angle, arc.start, arc.extent);
            let rad = angle.to_radians();
            let local = (rx * rad.cos()).hypot(ry * rad.sin());
            let on_rim = in_sweep && (r - 1.0).abs() * local <= half;

            let color = match arc.style {
                ArcStyle::Arc => on_rim.then_some(arc.outline),
                ArcStyle::Pieslice => {
                    let inside = (r - 1.0) * local <= half;
                    let on_edge = inside
                        && (segment_distance((x, y), (cx, cy), edge_a) <= half
                            || segment_distance((x, y), (cx, cy), edge_b) <= half);
                    if on_rim || on_edge {
                        Some(arc.outline)
                    } else if in_sweep && r <= 1.0 {
                        arc.fill
                    } else {
                        None
                    }
                }
            };
            if let Some(color) = color {
                pixmap.set(px, py, color);
            }
        }
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    (p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
}
