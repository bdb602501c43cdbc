//! Static gauge configuration.

use crate::error::GaugeError;

/// Percentages of the scale covered by each colored zone.
///
/// Blue is measured from the low end; yellow and red from the high end.
/// `yellow + red <= 100` is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBands {
    pub blue_pct: f64,
    pub yellow_pct: f64,
    pub red_pct: f64,
}

impl Default for ZoneBands {
    fn default() -> Self {
        Self {
            blue_pct: 0.0,
            yellow_pct: 15.0,
            red_pct: 15.0,
        }
    }
}

/// Immutable description of a gauge. Build one with [`GaugeConfig::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeConfig {
    width: u32,
    height: u32,
    min_value: f64,
    max_value: f64,
    unit: String,
    label: String,
    divisions: u32,
    zones: ZoneBands,
    clamp_needle: bool,
}

impl GaugeConfig {
    pub fn builder() -> GaugeConfigBuilder {
        GaugeConfigBuilder::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn zones(&self) -> ZoneBands {
        self.zones
    }

    /// Whether out-of-range values pin the needle to the end of the scale.
    pub fn clamp_needle(&self) -> bool {
        self.clamp_needle
    }
}

#[derive(Debug, Clone)]
pub struct GaugeConfigBuilder {
    width: u32,
    height: u32,
    min_value: f64,
    max_value: f64,
    unit: String,
    label: String,
    divisions: u32,
    zones: ZoneBands,
    clamp_needle: bool,
}

impl Default for GaugeConfigBuilder {
    fn default() -> Self {
        Self {
            width: 300,
            height: 225,
            min_value: 0.0,
            max_value: 100.0,
            unit: String::new(),
            label: String::new(),
            divisions: 10,
            zones: ZoneBands::default(),
            clamp_needle: false,
        }
    }
}

impl GaugeConfigBuilder {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn divisions(mut self, divisions: u32) -> Self {
        self.divisions = divisions;
        self
    }

    pub fn zones(mut self, blue: f64, yellow: f64, red: f64) -> Self {
        self.zones = ZoneBands {
            blue_pct: blue,
            yellow_pct: yellow,
            red_pct: red,
        };
        self
    }

    pub fn clamp_needle(mut self, clamp: bool) -> Self {
        self.clamp_needle = clamp;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<GaugeConfig, GaugeError> {
        if self.width == 0 || self.height == 0 {
            return Err(GaugeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let (min, max) = (self.min_value, self.max_value);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(GaugeError::InvalidRange { min, max });
        }
        if self.divisions == 0 {
            return Err(GaugeError::InvalidDivisions);
        }
        for (zone, pct) in [
            ("blue", self.zones.blue_pct),
            ("yellow", self.zones.yellow_pct),
            ("red", self.zones.red_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(GaugeError::InvalidZone { zone, pct });
            }
        }
        Ok(GaugeConfig {
            width: self.width,
            height: self.height,
            min_value: min,
            max_value: max,
            unit: self.unit,
            label: self.label,
            divisions: self.divisions,
            zones: self.zones,
            clamp_needle: self.clamp_needle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_meter() {
        let cfg = GaugeConfig::builder().build().unwrap();
        assert_eq!((cfg.width(), cfg.height()), (300, 225));
        assert_eq!((cfg.min_value(), cfg.max_value()), (0.0, 100.0));
        assert_eq!(cfg.divisions(), 10);
        assert_eq!(cfg.zones(), ZoneBands::default());
        assert!(!cfg.clamp_needle());
    }

    #[test]
    fn equal_bounds_rejected() {
        let err = GaugeConfig::builder().range(50.0, 50.0).build().unwrap_err();
        assert_eq!(err, GaugeError::InvalidRange { min: 50.0, max: 50.0 });
    }

    #[test]
    fn inverted_and_non_finite_bounds_rejected() {
        assert!(GaugeConfig::builder().range(10.0, 0.0).build().is_err());
        assert!(GaugeConfig::builder().range(f64::NAN, 1.0).build().is_err());
        assert!(GaugeConfig::builder().range(0.0, f64::INFINITY).build().is_err());
    }

    #[test]
    fn zero_size_rejected() {
        let err = GaugeConfig::builder().size(0, 10).build().unwrap_err();
        assert!(matches!(err, GaugeError::InvalidDimensions { width: 0, height: 10 }));
    }

    #[test]
    fn zero_divisions_rejected() {
        let err = GaugeConfig::builder().divisions(0).build().unwrap_err();
        assert_eq!(err, GaugeError::InvalidDivisions);
    }

    #[test]
    fn zone_out_of_bounds_rejected() {
        let err = GaugeConfig::builder().zones(0.0, 120.0, 15.0).build().unwrap_err();
        assert_eq!(err, GaugeError::InvalidZone { zone: "yellow", pct: 120.0 });
        assert!(GaugeConfig::builder().zones(-1.0, 0.0, 0.0).build().is_err());
    }

    #[test]
    fn zone_sum_over_hundred_is_not_validated() {
        assert!(GaugeConfig::builder().zones(0.0, 60.0, 60.0).build().is_ok());
    }
}
