//! Colors and light/dark theme lookup.

/// Squared perceived-brightness cutoff (127.5²) below which a color is dark.
const DARK_CUTOFF_SQR: f64 = 127.5 * 127.5;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// `true` when the perceived brightness is below the midpoint.
    ///
    /// Uses the HSP model `0.299r² + 0.587g² + 0.114b²` compared against
    /// the squared cutoff, so no square root is needed.
    pub fn is_dark(self) -> bool {
        let (r, g, b) = (self.0 as f64, self.1 as f64, self.2 as f64);
        let hsp = 0.299 * r * r + 0.587 * g * g + 0.114 * b * b;
        hsp < DARK_CUTOFF_SQR
    }
}

/// Supplies the colors widgets draw with.
pub trait ThemeProvider {
    fn foreground(&self) -> Rgb;
    fn background(&self) -> Rgb;

    fn is_dark(&self) -> bool {
        self.background().is_dark()
    }
}

/// A fixed foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTheme {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl StaticTheme {
    pub fn light() -> Self {
        Self {
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb(0x33, 0x33, 0x33),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl ThemeProvider for StaticTheme {
    fn foreground(&self) -> Rgb {
        self.foreground
    }

    fn background(&self) -> Rgb {
        self.background
    }
}

/// Guess whether the terminal background is dark from a `COLORFGBG` value
/// such as `"15;0"` (foreground;background, ANSI indices).
///
/// Returns `None` when the value is missing or unparseable.
pub fn dark_from_colorfgbg(value: Option<&str>) -> Option<bool> {
    let bg = value?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    // ANSI 7 (light gray) and 9..=15 (bright colors) read as light backgrounds.
    Some(!(bg == 7 || (9..=15).contains(&bg)))
}

/// Terminal dark-mode hint from the environment, defaulting to dark.
pub fn detect_terminal_dark() -> bool {
    let hint = std::env::var("COLORFGBG").ok();
    dark_from_colorfgbg(hint.as_deref()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_classification() {
        assert!(Rgb::BLACK.is_dark());
        assert!(!Rgb::WHITE.is_dark());
        assert!(Rgb(0x12, 0x34, 0x56).is_dark());
        assert!(Rgb(0x33, 0x33, 0x33).is_dark());
        assert!(!Rgb(0x44, 0x9f, 0x55).is_dark());
    }

    #[test]
    fn static_themes_report_mode_from_background() {
        assert!(!StaticTheme::light().is_dark());
        assert!(StaticTheme::dark().is_dark());
        assert_eq!(StaticTheme::for_mode(true), StaticTheme::dark());
    }

    #[test]
    fn colorfgbg_hint() {
        assert_eq!(dark_from_colorfgbg(Some("15;0")), Some(true));
        assert_eq!(dark_from_colorfgbg(Some("0;15")), Some(false));
        assert_eq!(dark_from_colorfgbg(Some("0;default;7")), Some(false));
        assert_eq!(dark_from_colorfgbg(Some("garbage")), None);
        assert_eq!(dark_from_colorfgbg(None), None);
    }
}
