//! Zone and needle colors.

use sysmon_core::theme::Rgb;

use crate::config::ZoneBands;

/// Which palette entry the needle is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedleTone {
    Neutral,
    Blue,
    Yellow,
    Red,
}

/// Pick the needle tone for a value at `fraction` of the range.
///
/// First match wins: below the blue band, into the red band, into the
/// yellow band, otherwise neutral.
pub fn classify(fraction: f64, zones: &ZoneBands) -> NeedleTone {
    let pct = fraction * 100.0;
    if pct < zones.blue_pct {
        NeedleTone::Blue
    } else if pct > 100.0 - zones.red_pct {
        NeedleTone::Red
    } else if pct > 100.0 - zones.red_pct - zones.yellow_pct {
        NeedleTone::Yellow
    } else {
        NeedleTone::Neutral
    }
}

/// Needle and hub-border colors. Lighter on dark backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedlePalette {
    pub neutral: Rgb,
    pub red: Rgb,
    pub yellow: Rgb,
    pub blue: Rgb,
}

impl NeedlePalette {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                neutral: Rgb(0xcc, 0xcc, 0xcc),
                red: Rgb(0xff, 0x22, 0x22),
                yellow: Rgb(0xff, 0xff, 0x22),
                blue: Rgb(0x22, 0x22, 0xff),
            }
        } else {
            Self {
                neutral: Rgb(0x66, 0x66, 0x66),
                red: Rgb(0xcc, 0x00, 0x00),
                yellow: Rgb(0xcc, 0xcc, 0x00),
                blue: Rgb(0x00, 0x00, 0xcc),
            }
        }
    }

    pub fn color(&self, tone: NeedleTone) -> Rgb {
        match tone {
            NeedleTone::Neutral => self.neutral,
            NeedleTone::Red => self.red,
            NeedleTone::Yellow => self.yellow,
            NeedleTone::Blue => self.blue,
        }
    }
}

/// Colors of the scale bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonePalette {
    pub green: Rgb,
    pub yellow: Rgb,
    pub red: Rgb,
    pub blue: Rgb,
}

impl ZonePalette {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                green: Rgb(0x00, 0xcc, 0x00),
                yellow: Rgb(0xee, 0xee, 0x22),
                red: Rgb(0xff, 0x22, 0x22),
                blue: Rgb(0x22, 0x22, 0xff),
            }
        } else {
            Self {
                green: Rgb(0x00, 0xaa, 0x00),
                yellow: Rgb(0xdd, 0xdd, 0x00),
                red: Rgb(0xdd, 0x00, 0x00),
                blue: Rgb(0x00, 0x00, 0xaa),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_BANDS: ZoneBands = ZoneBands {
        blue_pct: 15.0,
        yellow_pct: 15.0,
        red_pct: 15.0,
    };

    #[test]
    fn tie_break_order() {
        assert_eq!(classify(0.10, &ALL_BANDS), NeedleTone::Blue);
        assert_eq!(classify(0.50, &ALL_BANDS), NeedleTone::Neutral);
        assert_eq!(classify(0.90, &ALL_BANDS), NeedleTone::Red);
        assert_eq!(classify(0.95, &ALL_BANDS), NeedleTone::Red);
        assert_eq!(classify(0.85, &ALL_BANDS), NeedleTone::Yellow);
        assert_eq!(classify(0.80, &ALL_BANDS), NeedleTone::Yellow);
        assert_eq!(classify(0.70, &ALL_BANDS), NeedleTone::Neutral);
    }

    #[test]
    fn band_edges_are_exclusive() {
        // exactly 85% is the red boundary, not inside it
        assert_eq!(classify(0.85, &ALL_BANDS), NeedleTone::Yellow);
        assert_eq!(classify(0.70, &ALL_BANDS), NeedleTone::Neutral);
        assert_eq!(classify(0.15, &ALL_BANDS), NeedleTone::Neutral);
    }

    #[test]
    fn no_blue_band_means_no_blue_needle() {
        let zones = ZoneBands::default();
        for i in 0..=100 {
            assert_ne!(classify(i as f64 / 100.0, &zones), NeedleTone::Blue);
        }
    }

    #[test]
    fn out_of_range_values_still_classified() {
        assert_eq!(classify(1.3, &ALL_BANDS), NeedleTone::Red);
        assert_eq!(classify(-0.2, &ALL_BANDS), NeedleTone::Blue);
    }

    #[test]
    fn palettes_brighten_in_dark_mode() {
        let light = NeedlePalette::for_mode(false);
        let dark = NeedlePalette::for_mode(true);
        assert_eq!(light.color(NeedleTone::Neutral), Rgb(0x66, 0x66, 0x66));
        assert_eq!(dark.color(NeedleTone::Neutral), Rgb(0xcc, 0xcc, 0xcc));
        assert!(dark.neutral.0 > light.neutral.0);
        assert_eq!(ZonePalette::for_mode(false).green, Rgb(0x00, 0xaa, 0x00));
    }
}
