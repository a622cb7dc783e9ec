//! Geometry primitives and time/pixel conversions
//!
//! All rectangles are in wrapper content coordinates: x grows to the right
//! from the start of the waveform, independent of the current scroll offset.

/// A 2D point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The rectangle a detached element measures as
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether the horizontal spans of two rectangles overlap
    ///
    /// Touching edges do not count, and zero-width spans never overlap.
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }
}

/// A CSS-style length as used in inline styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Percentage of the parent's corresponding dimension
    Percent(f64),
    /// Absolute pixels
    Px(f64),
}

impl Length {
    /// Parse `"12.5%"`, `"6px"` or a bare number (treated as pixels)
    ///
    /// Returns `None` for keywords such as `auto` or `none`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(pct) = value.strip_suffix('%') {
            return pct.trim().parse().ok().map(Length::Percent);
        }
        let px = value.strip_suffix("px").unwrap_or(value);
        px.trim().parse().ok().map(Length::Px)
    }

    /// Resolve against the parent's dimension in pixels
    pub fn resolve(&self, parent: f64) -> f64 {
        match self {
            Length::Percent(p) => parent * p / 100.0,
            Length::Px(px) => *px,
        }
    }

    /// Format as a percentage style value
    pub fn percent(value: f64) -> String {
        format!("{}%", value)
    }

    /// Format as a pixel style value
    pub fn px(value: f64) -> String {
        format!("{}px", value)
    }
}

fn usable_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Fraction (0.0 to 1.0 for in-range times) of the total duration
pub fn time_fraction(time: f64, duration: f64) -> f64 {
    usable_duration(duration).map_or(0.0, |d| time / d)
}

/// Convert a time in seconds to a pixel offset within `width`
pub fn time_to_px(time: f64, duration: f64, width: f64) -> f64 {
    time_fraction(time, duration) * width
}

/// Convert a pixel offset within `width` to a time in seconds
pub fn px_to_time(px: f64, width: f64, duration: f64) -> f64 {
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    usable_duration(duration).map_or(0.0, |d| px / width * d)
}

/// Clamp a time into `[0, duration]`
///
/// While the duration is still unknown (zero), only the lower bound applies.
/// NaN maps to 0.
pub fn clamp_time(time: f64, duration: f64) -> f64 {
    if time.is_nan() {
        return 0.0;
    }
    match usable_duration(duration) {
        Some(d) => time.clamp(0.0, d),
        None if time.is_finite() => time.max(0.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("12.5%"), Some(Length::Percent(12.5)));
        assert_eq!(Length::parse("6px"), Some(Length::Px(6.0)));
        assert_eq!(Length::parse("0"), Some(Length::Px(0.0)));
        assert_eq!(Length::parse("auto"), None);
        assert_eq!(Length::Percent(25.0).resolve(800.0), 200.0);
    }

    #[test]
    fn test_time_px_conversions() {
        assert_eq!(time_to_px(2.0, 10.0, 1000.0), 200.0);
        assert_eq!(px_to_time(250.0, 1000.0, 10.0), 2.5);
        // Unknown duration never produces NaN
        assert_eq!(time_to_px(2.0, 0.0, 1000.0), 0.0);
        assert_eq!(px_to_time(250.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_clamp_time() {
        assert_eq!(clamp_time(-1.0, 10.0), 0.0);
        assert_eq!(clamp_time(12.0, 10.0), 10.0);
        assert_eq!(clamp_time(4.0, 10.0), 4.0);
        // Placeholder duration: only the lower bound holds
        assert_eq!(clamp_time(4.0, 0.0), 4.0);
        assert_eq!(clamp_time(-4.0, 0.0), 0.0);
        assert_eq!(clamp_time(f64::NAN, 10.0), 0.0);
        assert_eq!(clamp_time(f64::NAN, 0.0), 0.0);
        assert_eq!(clamp_time(f64::INFINITY, 10.0), 10.0);
        assert_eq!(clamp_time(f64::INFINITY, 0.0), 0.0);
    }

    #[test]
    fn test_overlaps_x() {
        let a = Rect::new(100.0, 0.0, 50.0, 16.0);
        let b = Rect::new(140.0, 0.0, 50.0, 16.0);
        let c = Rect::new(150.0, 0.0, 50.0, 16.0);
        assert!(a.overlaps_x(&b));
        assert!(!a.overlaps_x(&c), "Touching edges are not an overlap");
        assert!(!Rect::ZERO.overlaps_x(&Rect::ZERO));
    }
}
