use thiserror::Error;

/// Errors raised by gauge construction and use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaugeError {
    #[error("invalid range: min {min} must be finite and below max {max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("divisions must be positive")]
    InvalidDivisions,

    #[error("{zone} zone percentage {pct} is outside 0..=100")]
    InvalidZone { zone: &'static str, pct: f64 },

    #[error("gauge has been disposed")]
    Disposed,
}
