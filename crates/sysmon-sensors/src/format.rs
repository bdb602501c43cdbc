//! Human-readable formatting utilities for system metrics.
//!
//! All functions are pure and easy to test in isolation.

const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Usage above this percentage is an alert (red).
pub const ALERT_PERCENT: f64 = 80.0;
/// Usage above this percentage is a warning (yellow).
pub const WARN_PERCENT: f64 = 60.0;

/// Format a byte count with binary units and `precision` decimals.
///
/// Returns values like `"9.8KiB"`, `"95.4MiB"`, `"512.0B"`.
pub fn format_bytes(bytes: u64, precision: usize) -> String {
    for (idx, unit) in UNITS.iter().enumerate().skip(1).rev() {
        let scale = 1u64 << (10 * idx);
        if bytes >= scale {
            let value = bytes as f64 / scale as f64;
            return format!("{value:.precision$}{unit}");
        }
    }
    format!("{:.precision$}{}", bytes as f64, UNITS[0])
}

/// [`format_bytes`] with no decimals.
pub fn format_bytes_whole(bytes: u64) -> String {
    format_bytes(bytes, 0)
}

/// Whole units unless the number would be a single digit, then one decimal.
fn format_bytes_compact(bytes: u64) -> String {
    let whole = format_bytes_whole(bytes);
    let leading: String = whole.chars().take_while(|c| c.is_ascii_digit()).collect();
    match leading.parse::<u64>() {
        Ok(n) if n < 10 => format_bytes(bytes, 1),
        _ => whole,
    }
}

/// Percentage of `part` in `total`, `0.0` when `total` is zero.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Format disk usage like `"32GiB/199GiB 17%"`.
pub fn format_disk_usage(used: u64, total: u64) -> String {
    format!(
        "{}/{} {}%",
        format_bytes_compact(used),
        format_bytes_compact(total),
        percent_of(used, total).round() as u64
    )
}

/// Format a percentage value for display.
///
/// Returns `"--%"` for NaN values, otherwise formats as `"45.2%"`.
pub fn format_percent(value: f64) -> String {
    if value.is_nan() {
        "--%".into()
    } else {
        format!("{:.1}%", value)
    }
}

/// Format a duration in seconds as a human-readable uptime string.
///
/// Returns values like `"47 sec"`, `"5m 47s"`, `"2h 5m 47s"`, `"8d 2h 5m"`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let mins = (secs % 3600) / 60;
    let s = secs % 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m {s}s")
    } else if mins > 0 {
        format!("{mins}m {s}s")
    } else {
        format!("{s} sec")
    }
}

/// Severity bucket for a usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Warn,
    Alert,
}

pub fn usage_level(percent: f64) -> UsageLevel {
    if percent > ALERT_PERCENT {
        UsageLevel::Alert
    } else if percent > WARN_PERCENT {
        UsageLevel::Warn
    } else {
        UsageLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1 << 20;
    const GIB: u64 = 1 << 30;

    #[test]
    fn format_bytes_below_kib() {
        assert_eq!(format_bytes(512, 1), "512.0B");
        assert_eq!(format_bytes(0, 0), "0B");
    }

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(10000, 1), "9.8KiB");
        assert_eq!(format_bytes(100_001_221, 1), "95.4MiB");
        assert_eq!(format_bytes(2 << 40, 1), "2.0TiB");
    }

    #[test]
    fn format_bytes_whole_drops_decimals() {
        assert_eq!(format_bytes_whole(384 * MIB), "384MiB");
    }

    #[test]
    fn disk_usage_whole_units() {
        assert_eq!(format_disk_usage(32 * GIB, 199 * GIB), "32GiB/199GiB 16%");
    }

    #[test]
    fn disk_usage_single_digit_gets_decimal() {
        assert_eq!(
            format_disk_usage(GIB + GIB / 5, 64 * GIB),
            "1.2GiB/64GiB 2%"
        );
    }

    #[test]
    fn disk_usage_empty_disk() {
        assert_eq!(format_disk_usage(0, 0), "0.0B/0.0B 0%");
    }

    #[test]
    fn format_percent_values() {
        assert_eq!(format_percent(45.2), "45.2%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(f64::NAN), "--%");
    }

    #[test]
    fn format_uptime_seconds_only() {
        assert_eq!(format_uptime(47), "47 sec");
        assert_eq!(format_uptime(0), "0 sec");
    }

    #[test]
    fn format_uptime_minutes_seconds() {
        assert_eq!(format_uptime(5 * 60 + 47), "5m 47s");
    }

    #[test]
    fn format_uptime_hours() {
        assert_eq!(format_uptime(2 * 3600 + 5 * 60 + 47), "2h 5m 47s");
    }

    #[test]
    fn format_uptime_days() {
        assert_eq!(format_uptime(8 * 86400 + 2 * 3600 + 5 * 60 + 47), "8d 2h 5m");
    }

    #[test]
    fn usage_levels_are_exclusive_at_thresholds() {
        assert_eq!(usage_level(60.0), UsageLevel::Normal);
        assert_eq!(usage_level(60.1), UsageLevel::Warn);
        assert_eq!(usage_level(80.0), UsageLevel::Warn);
        assert_eq!(usage_level(80.5), UsageLevel::Alert);
    }
}
