//! Gauge geometry.
//!
//! Angles are in degrees, counter-clockwise from 3 o'clock, measured on the
//! circle that is then stretched to the bounding ellipse. Screen y grows
//! downward.

/// Angle of the high end of the scale.
pub const START_ANGLE: f64 = 36.0;
/// Sweep of the scale; symmetric around 12 o'clock.
pub const EXTENT_ANGLE: f64 = 180.0 - 2.0 * START_ANGLE;
/// Angular width of the needle wedge.
pub const NEEDLE_EXTENT: f64 = 1.0;
pub const NEEDLE_WIDTH: f64 = 3.0;

/// Axis-aligned bounding box of an ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn radii(&self) -> (f64, f64) {
        ((self.x1 - self.x0).abs() / 2.0, (self.y1 - self.y0).abs() / 2.0)
    }

    /// Point on the ellipse at `angle` degrees.
    pub fn point_at(&self, angle: f64) -> (f64, f64) {
        let (cx, cy) = self.center();
        let (rx, ry) = self.radii();
        let rad = angle.to_radians();
        (cx + rx * rad.cos(), cy - ry * rad.sin())
    }

    /// Polar position of `(x, y)` relative to the ellipse: the angle in
    /// `[0, 360)` and the normalized radius (1.0 on the ellipse).
    pub fn polar(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (cx, cy) = self.center();
        let (rx, ry) = self.radii();
        if rx == 0.0 || ry == 0.0 {
            return None;
        }
        let nx = (x - cx) / rx;
        let ny = (cy - y) / ry;
        let angle = ny.atan2(nx).to_degrees().rem_euclid(360.0);
        Some((angle, nx.hypot(ny)))
    }
}

/// Box of the scale ellipse. It extends below the canvas so only the top
/// of the ellipse shows.
pub fn arc_bounds(width: f64, height: f64) -> BBox {
    BBox::new(width / 30.0, height / 4.0, width * 29.0 / 30.0, height * 1.5)
}

/// Box of the center hub.
pub fn inset_bounds(width: f64, height: f64) -> BBox {
    BBox::new(
        width * 23.0 / 60.0,
        height * 23.0 / 32.0,
        width * 37.0 / 60.0,
        height * 33.0 / 32.0,
    )
}

/// Width of the colored zone strokes.
pub fn zone_stroke(width: f64) -> f64 {
    width / 12.0
}

pub fn font_large(height: f64) -> f64 {
    height / 15.0
}

pub fn font_small(height: f64) -> f64 {
    height / 20.0
}

/// Degrees of scale covered by `pct` percent.
pub fn percent_to_degrees(pct: f64) -> f64 {
    EXTENT_ANGLE * pct / 100.0
}

/// Position of `value` in the range as a fraction; not clamped.
pub fn value_fraction(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Start angle of the needle for `value`. The low end sits at
/// `START + EXTENT`, the high end at `START`.
pub fn needle_angle(value: f64, min: f64, max: f64, clamp: bool) -> f64 {
    let mut pct = value_fraction(value, min, max);
    if clamp {
        pct = pct.clamp(0.0, 1.0);
    }
    (1.0 - pct) * EXTENT_ANGLE + START_ANGLE
}

/// Whether `angle` lies on the sweep from `start` over `extent` degrees.
/// A negative extent sweeps clockwise.
pub fn angle_in_sweep(angle: f64, start: f64, extent: f64) -> bool {
    if extent.abs() >= 360.0 {
        return true;
    }
    let (lo, span) = if extent < 0.0 {
        (start + extent, -extent)
    } else {
        (start, extent)
    };
    (angle - lo).rem_euclid(360.0) <= span
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn extent_is_symmetric() {
        assert_eq!(EXTENT_ANGLE, 108.0);
        assert!(close(START_ANGLE + EXTENT_ANGLE / 2.0, 90.0));
    }

    #[test]
    fn needle_angle_reference_points() {
        assert!(close(needle_angle(0.0, 0.0, 100.0, false), 144.0));
        assert!(close(needle_angle(100.0, 0.0, 100.0, false), 36.0));
        assert!(close(needle_angle(50.0, 0.0, 100.0, false), 90.0));
    }

    #[test]
    fn needle_angle_strictly_decreasing() {
        let mut prev = f64::INFINITY;
        for i in 0..=40 {
            let v = -20.0 + i as f64 * 2.5;
            let a = needle_angle(v, -20.0, 80.0, false);
            assert!(a < prev, "angle must drop as value rises");
            prev = a;
        }
    }

    #[test]
    fn needle_passes_through_out_of_range_unless_clamped() {
        assert!(close(needle_angle(150.0, 0.0, 100.0, false), -18.0));
        assert!(close(needle_angle(150.0, 0.0, 100.0, true), 36.0));
        assert!(close(needle_angle(-10.0, 0.0, 100.0, true), 144.0));
    }

    #[test]
    fn bounds_follow_canvas_proportions() {
        let b = arc_bounds(300.0, 225.0);
        assert_eq!(b, BBox::new(10.0, 56.25, 290.0, 337.5));
        let i = inset_bounds(300.0, 240.0);
        assert!(close(i.x0, 115.0) && close(i.x1, 185.0));
        assert!(close(i.y0, 172.5) && close(i.y1, 247.5));
    }

    #[test]
    fn point_at_uses_screen_y_down() {
        let b = BBox::new(0.0, 0.0, 100.0, 50.0);
        let (x, y) = b.point_at(90.0);
        assert!(close(x, 50.0) && close(y, 0.0));
        let (x, y) = b.point_at(0.0);
        assert!(close(x, 100.0) && close(y, 25.0));
    }

    #[test]
    fn polar_inverts_point_at() {
        let b = arc_bounds(300.0, 225.0);
        let (x, y) = b.point_at(120.0);
        let (angle, r) = b.polar(x, y).unwrap();
        assert!((angle - 120.0).abs() < 1e-6);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_membership() {
        assert!(angle_in_sweep(40.0, 36.0, 108.0));
        assert!(!angle_in_sweep(150.0, 36.0, 108.0));
        // blue zone runs backward from the low end
        assert!(angle_in_sweep(140.0, 144.0, -16.2));
        assert!(!angle_in_sweep(120.0, 144.0, -16.2));
        assert!(angle_in_sweep(359.0, 350.0, 20.0));
        assert!(angle_in_sweep(5.0, 350.0, 20.0));
    }
}
