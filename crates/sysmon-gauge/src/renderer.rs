//! Radial gauge drawing.

use sysmon_core::theme::{Rgb, ThemeProvider};

use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::geometry::{self, BBox, EXTENT_ANGLE, NEEDLE_EXTENT, NEEDLE_WIDTH, START_ANGLE};
use crate::palette::{classify, NeedlePalette, NeedleTone, ZonePalette};
use crate::scene::{Anchor, ArcItem, ArcStyle, ItemId, Scene, TextItem};

/// Handles to the scene items that change after construction.
#[derive(Debug, Clone)]
struct Handles {
    title: ItemId,
    min_label: ItemId,
    max_label: ItemId,
    current: ItemId,
    wedges: Vec<ItemId>,
    needle: ItemId,
    hub: ItemId,
    hub_border: ItemId,
}

/// A speedometer-style gauge held as a retained [`Scene`].
///
/// Decorations are laid out once in [`new`](Self::new). [`set_value`]
/// (Self::set_value) only moves and recolors the needle and rewrites the
/// value label; [`update_for_dark_mode`](Self::update_for_dark_mode) only
/// recolors. Zone bands keep the palette chosen at construction.
#[derive(Debug, Clone)]
pub struct GaugeRenderer {
    config: GaugeConfig,
    scene: Scene,
    handles: Handles,
    current_value: f64,
    dark: bool,
    text_color: Rgb,
    needle_palette: NeedlePalette,
    tone: NeedleTone,
    angle: f64,
}

impl GaugeRenderer {
    pub fn new(config: GaugeConfig, theme: &dyn ThemeProvider) -> Result<Self, GaugeError> {
        let (min, max) = (config.min_value(), config.max_value());
        if min >= max {
            return Err(GaugeError::InvalidRange { min, max });
        }

        let dark = theme.is_dark();
        let text_color = theme.foreground();
        let needle_palette = NeedlePalette::for_mode(dark);
        let zone_palette = ZonePalette::for_mode(dark);

        let w = config.width() as f64;
        let h = config.height() as f64;
        let unit = config.unit().to_string();
        let large = geometry::font_large(h);
        let small = geometry::font_small(h);

        let mut scene = Scene::new(config.width(), config.height(), theme.background());

        let text = |x, y, text: String, anchor, font_size| TextItem {
            x,
            y,
            text,
            anchor,
            font_size,
            color: text_color,
        };
        let title = scene.add_text(text(w / 2.0, h / 10.0, config.label().to_string(), Anchor::Center, large));
        let min_label = scene.add_text(text(
            w / 6.0,
            h * 0.55,
            format!("{}{unit}", min.floor() as i64),
            Anchor::NorthEast,
            small,
        ));
        let max_label = scene.add_text(text(
            w * 5.0 / 6.0,
            h * 0.55,
            format!("{}{unit}", max.floor() as i64),
            Anchor::NorthWest,
            small,
        ));
        let current = scene.add_text(text(
            w / 2.0,
            h - 1.75 * large,
            format_value(min, &unit),
            Anchor::North,
            large,
        ));

        let bounds = geometry::arc_bounds(w, h);
        let step = EXTENT_ANGLE / config.divisions() as f64;
        let wedges = (0..config.divisions())
            .map(|i| {
                scene.add_arc(ArcItem {
                    bbox: bounds,
                    start: START_ANGLE + i as f64 * step,
                    extent: step,
                    style: ArcStyle::Pieslice,
                    fill: None,
                    outline: text_color,
                    width: 1.0,
                })
            })
            .collect();

        let zones = config.zones();
        let stroke = geometry::zone_stroke(w);
        let band = |start: f64, extent: f64, color: Rgb| ArcItem {
            bbox: bounds,
            start,
            extent,
            style: ArcStyle::Arc,
            fill: None,
            outline: color,
            width: stroke,
        };
        let red_deg = geometry::percent_to_degrees(zones.red_pct);
        scene.add_arc(band(START_ANGLE, EXTENT_ANGLE, zone_palette.green));
        if zones.red_pct > 0.0 {
            scene.add_arc(band(START_ANGLE, red_deg, zone_palette.red));
        }
        if zones.yellow_pct > 0.0 {
            scene.add_arc(band(
                START_ANGLE + red_deg,
                geometry::percent_to_degrees(zones.yellow_pct),
                zone_palette.yellow,
            ));
        }
        if zones.blue_pct > 0.0 {
            scene.add_arc(band(
                START_ANGLE + EXTENT_ANGLE,
                -geometry::percent_to_degrees(zones.blue_pct),
                zone_palette.blue,
            ));
        }

        let needle = scene.add_arc(ArcItem {
            bbox: bounds,
            start: START_ANGLE + EXTENT_ANGLE,
            extent: NEEDLE_EXTENT,
            style: ArcStyle::Pieslice,
            fill: Some(needle_palette.neutral),
            outline: needle_palette.neutral,
            width: NEEDLE_WIDTH,
        });

        let inset = geometry::inset_bounds(w, h);
        let hub = scene.add_arc(hub_arc(inset, ArcStyle::Pieslice, Some(text_color), text_color, 2.0));
        let hub_border = scene.add_arc(hub_arc(inset, ArcStyle::Arc, None, needle_palette.neutral, 1.0));

        let mut renderer = Self {
            config,
            scene,
            handles: Handles {
                title,
                min_label,
                max_label,
                current,
                wedges,
                needle,
                hub,
                hub_border,
            },
            current_value: min,
            dark,
            text_color,
            needle_palette,
            tone: NeedleTone::Neutral,
            angle: START_ANGLE + EXTENT_ANGLE,
        };
        renderer.set_value(min);
        Ok(renderer)
    }

    /// Move the needle to `value` and rewrite the value label.
    ///
    /// Out-of-range values are drawn off-scale unless the config clamps.
    pub fn set_value(&mut self, value: f64) {
        let cfg = &self.config;
        let (min, max) = (cfg.min_value(), cfg.max_value());
        self.current_value = value;
        self.tone = classify(geometry::value_fraction(value, min, max), &cfg.zones());
        self.angle = geometry::needle_angle(value, min, max, cfg.clamp_needle());

        let color = self.needle_palette.color(self.tone);
        if let Some(needle) = self.scene.arc_mut(self.handles.needle) {
            needle.start = self.angle;
            needle.fill = Some(color);
            needle.outline = color;
        }
        let label = format_value(value, cfg.unit());
        if let Some(current) = self.scene.text_mut(self.handles.current) {
            current.text = label;
        }
    }

    /// Re-read colors from `theme` and apply them to text, ticks, hub and
    /// needle. The needle keeps its tone.
    pub fn update_for_dark_mode(&mut self, theme: &dyn ThemeProvider) {
        self.dark = theme.is_dark();
        self.text_color = theme.foreground();
        self.needle_palette = NeedlePalette::for_mode(self.dark);
        self.scene.set_background(theme.background());

        let text_color = self.text_color;
        let h = &self.handles;
        for id in [h.title, h.min_label, h.max_label, h.current] {
            if let Some(t) = self.scene.text_mut(id) {
                t.color = text_color;
            }
        }
        for &id in &h.wedges {
            if let Some(w) = self.scene.arc_mut(id) {
                w.outline = text_color;
            }
        }
        if let Some(hub) = self.scene.arc_mut(h.hub) {
            hub.fill = Some(text_color);
            hub.outline = text_color;
        }
        let neutral = self.needle_palette.neutral;
        if let Some(border) = self.scene.arc_mut(h.hub_border) {
            border.outline = neutral;
        }
        let color = self.needle_palette.color(self.tone);
        if let Some(needle) = self.scene.arc_mut(h.needle) {
            needle.fill = Some(color);
            needle.outline = color;
        }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn needle_angle(&self) -> f64 {
        self.angle
    }

    pub fn needle_tone(&self) -> NeedleTone {
        self.tone
    }

    pub fn needle_color(&self) -> Rgb {
        self.needle_palette.color(self.tone)
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn text_color(&self) -> Rgb {
        self.text_color
    }

    /// Text of the current-value label.
    pub fn value_label(&self) -> &str {
        self.scene
            .text(self.handles.current)
            .map(|t| t.text.as_str())
            .unwrap_or_default()
    }
}

fn hub_arc(bbox: BBox, style: ArcStyle, fill: Option<Rgb>, outline: Rgb, width: f64) -> ArcItem {
    ArcItem {
        bbox,
        start: START_ANGLE,
        extent: EXTENT_ANGLE,
        style,
        fill,
        outline,
        width,
    }
}

/// Value label text: shortest round-trip float formatting plus unit, so
/// `42.0` reads `42.0%` and `12.345` reads `12.345%`.
fn format_value(value: f64, unit: &str) -> String {
    format!("{value:?}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Item;
    use sysmon_core::theme::StaticTheme;

    fn cfg(blue: f64, yellow: f64, red: f64) -> GaugeConfig {
        GaugeConfig::builder()
            .label("CPU Usage")
            .unit("%")
            .zones(blue, yellow, red)
            .build()
            .unwrap()
    }

    fn zone_arcs(scene: &Scene) -> Vec<&ArcItem> {
        scene
            .items()
            .iter()
            .filter_map(|i| match i {
                Item::Arc(a) if a.style == ArcStyle::Arc && a.width > 2.0 => Some(a),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn needle_tracks_value() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        assert_eq!(g.needle_angle(), 144.0);
        g.set_value(50.0);
        assert_eq!(g.needle_angle(), 90.0);
        g.set_value(100.0);
        assert_eq!(g.needle_angle(), 36.0);
        assert_eq!(g.current_value(), 100.0);
    }

    #[test]
    fn needle_color_by_zone() {
        let mut g = GaugeRenderer::new(cfg(15.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        let cases = [
            (10.0, NeedleTone::Blue),
            (50.0, NeedleTone::Neutral),
            (90.0, NeedleTone::Red),
            (95.0, NeedleTone::Red),
            (85.0, NeedleTone::Yellow),
            (80.0, NeedleTone::Yellow),
            (70.0, NeedleTone::Neutral),
        ];
        for (v, tone) in cases {
            g.set_value(v);
            assert_eq!(g.needle_tone(), tone, "value {v}");
        }
        g.set_value(95.0);
        assert_eq!(g.needle_color(), Rgb(0xcc, 0x00, 0x00));
    }

    #[test]
    fn set_value_is_idempotent() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::dark()).unwrap();
        g.set_value(42.5);
        let once = g.scene().clone();
        let items = once.items().len();
        g.set_value(42.5);
        assert_eq!(g.scene(), &once);
        assert_eq!(g.scene().items().len(), items);
    }

    #[test]
    fn value_label_uses_unrounded_formatting() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        assert_eq!(g.value_label(), "0.0%");
        g.set_value(12.345);
        assert_eq!(g.value_label(), "12.345%");
        g.set_value(42.0);
        assert_eq!(g.value_label(), "42.0%");
    }

    #[test]
    fn bound_labels_are_whole_numbers() {
        let c = GaugeConfig::builder().range(-10.5, 120.7).unit("°C").build().unwrap();
        let g = GaugeRenderer::new(c, &StaticTheme::light()).unwrap();
        let texts: Vec<_> = g.scene().texts().map(|t| t.text.clone()).collect();
        assert!(texts.contains(&"-11°C".to_string()));
        assert!(texts.contains(&"120°C".to_string()));
    }

    #[test]
    fn zone_layers_in_order() {
        let g = GaugeRenderer::new(cfg(15.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        let zones = zone_arcs(g.scene());
        let palette = ZonePalette::for_mode(false);
        assert_eq!(zones.len(), 4);
        assert_eq!((zones[0].start, zones[0].extent), (36.0, 108.0));
        assert_eq!(zones[0].outline, palette.green);
        assert_eq!(zones[1].outline, palette.red);
        assert!((zones[1].extent - 16.2).abs() < 1e-9);
        assert_eq!(zones[2].outline, palette.yellow);
        assert!((zones[2].start - 52.2).abs() < 1e-9);
        assert_eq!(zones[3].outline, palette.blue);
        assert_eq!(zones[3].start, 144.0);
        assert!((zones[3].extent + 16.2).abs() < 1e-9);
    }

    #[test]
    fn empty_zones_are_not_drawn() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        let zones = zone_arcs(g.scene());
        assert_eq!(zones.len(), 3);
        assert!(zones.iter().all(|z| z.outline != ZonePalette::for_mode(false).blue));
        g.set_value(0.0);
        assert_ne!(g.needle_tone(), NeedleTone::Blue);
    }

    #[test]
    fn one_wedge_per_division() {
        let c = GaugeConfig::builder().divisions(4).build().unwrap();
        let g = GaugeRenderer::new(c, &StaticTheme::light()).unwrap();
        let wedges: Vec<_> = g
            .scene()
            .items()
            .iter()
            .filter_map(|i| match i {
                Item::Arc(a) if a.style == ArcStyle::Pieslice && a.fill.is_none() => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(wedges.len(), 4);
        assert_eq!(wedges[1].start, 63.0);
        assert_eq!(wedges[1].extent, 27.0);
    }

    #[test]
    fn theme_change_recolors_but_keeps_zones() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        g.set_value(95.0);
        let zones_before: Vec<ArcItem> = zone_arcs(g.scene()).into_iter().cloned().collect();

        g.update_for_dark_mode(&StaticTheme::dark());
        assert!(g.is_dark());
        assert_eq!(g.text_color(), Rgb::WHITE);
        assert!(g.scene().texts().all(|t| t.color == Rgb::WHITE));
        assert_eq!(g.needle_tone(), NeedleTone::Red);
        assert_eq!(g.needle_color(), Rgb(0xff, 0x22, 0x22));
        let zones_after: Vec<ArcItem> = zone_arcs(g.scene()).into_iter().cloned().collect();
        assert_eq!(zones_before, zones_after);
        assert_eq!(g.scene().background(), Rgb(0x33, 0x33, 0x33));
    }

    #[test]
    fn out_of_range_passes_through_by_default() {
        let mut g = GaugeRenderer::new(cfg(0.0, 15.0, 15.0), &StaticTheme::light()).unwrap();
        g.set_value(150.0);
        assert_eq!(g.needle_angle(), -18.0);
        assert_eq!(g.needle_tone(), NeedleTone::Red);
    }

    #[test]
    fn clamped_needle_pins_to_scale() {
        let c = GaugeConfig::builder().clamp_needle(true).build().unwrap();
        let mut g = GaugeRenderer::new(c, &StaticTheme::light()).unwrap();
        g.set_value(150.0);
        assert_eq!(g.needle_angle(), 36.0);
        assert_eq!(g.value_label(), "150.0");
    }
}
