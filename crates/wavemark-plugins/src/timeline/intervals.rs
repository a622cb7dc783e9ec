//! Notch spacing and label formatting
//!
//! Defaults keep notches at least ~25px apart at any zoom level.

/// Minimum spacing the default intervals aim for (pixels)
const MIN_NOTCH_SPACING: f64 = 25.0;

/// Seconds between notches for a zoom level
pub fn default_time_interval(px_per_sec: f64) -> f64 {
    if px_per_sec >= MIN_NOTCH_SPACING {
        1.0
    } else if px_per_sec * 5.0 >= MIN_NOTCH_SPACING {
        5.0
    } else if px_per_sec * 15.0 >= MIN_NOTCH_SPACING {
        15.0
    } else {
        (0.5 / px_per_sec).ceil() * 60.0
    }
}

/// Every n-th notch carries a primary label
pub fn default_primary_label_interval(px_per_sec: f64) -> u32 {
    if px_per_sec >= MIN_NOTCH_SPACING {
        10
    } else if px_per_sec * 5.0 >= MIN_NOTCH_SPACING {
        6
    } else {
        4
    }
}

/// Every n-th notch carries a secondary label
pub fn default_secondary_label_interval(px_per_sec: f64) -> u32 {
    if px_per_sec >= MIN_NOTCH_SPACING {
        5
    } else {
        2
    }
}

/// Label for a notch: `m:ss` past one minute, otherwise seconds to 3 decimals
pub fn format_time(seconds: f64) -> String {
    if seconds / 60.0 > 1.0 {
        let total = seconds.round() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    } else {
        let rounded = (seconds * 1000.0).round() / 1000.0;
        format!("{}", rounded)
    }
}
