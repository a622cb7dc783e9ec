//! Geometry decisions for region elements
//!
//! Both checks work from estimates rather than a real layout pass:
//! visibility from the region's proportional position on the scroll
//! surface, label stacking from rendered content boxes.

use wavemark_core::Rect;

/// Estimated `(left, width)` pixel span of a region on a scroll surface
///
/// Positions are rounded to whole pixels and a zero-width result is widened
/// to one pixel, so markers still occupy a column.
pub fn region_span(start: f64, end: f64, duration: f64, scroll_width: f64) -> (f64, f64) {
    if duration <= 0.0 || !duration.is_finite() {
        return (0.0, 1.0);
    }
    let left = (start / duration * scroll_width).round();
    let width = ((end - start) / duration * scroll_width).round();
    (left, if width == 0.0 { 1.0 } else { width })
}

/// Whether a region intersects the visible window `[scroll, scroll + visible_width)`
pub fn is_visible(
    start: f64,
    end: f64,
    duration: f64,
    scroll_width: f64,
    scroll: f64,
    visible_width: f64,
) -> bool {
    let (left, width) = region_span(start, end, duration, scroll_width);
    left + width > scroll && left < scroll + visible_width
}

/// Top margin pushing a label below every other label it overlaps
///
/// Heights of horizontally overlapping boxes are summed, not packed.
pub fn stacking_offset(own: &Rect, others: impl IntoIterator<Item = Rect>) -> f64 {
    others
        .into_iter()
        .filter(|other| own.overlaps_x(other))
        .map(|other| other.height)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_span() {
        assert_eq!(region_span(2.0, 4.0, 10.0, 1000.0), (200.0, 200.0));
        assert_eq!(region_span(5.0, 5.0, 10.0, 1000.0), (500.0, 1.0));
    }

    #[test]
    fn test_visibility_window() {
        // 100s over 10_000px, 1000px visible
        assert!(is_visible(1.0, 2.0, 100.0, 10_000.0, 0.0, 1000.0));
        assert!(!is_visible(50.0, 52.0, 100.0, 10_000.0, 0.0, 1000.0));
        assert!(is_visible(50.0, 52.0, 100.0, 10_000.0, 4500.0, 1000.0));

        // Touching the window edge is not visible
        assert!(!is_visible(10.0, 12.0, 100.0, 10_000.0, 0.0, 1000.0));
        assert!(!is_visible(8.0, 10.0, 100.0, 10_000.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_stacking_offset_sums_overlaps() {
        let own = Rect::new(100.0, 0.0, 50.0, 16.0);
        let others = [
            Rect::new(120.0, 0.0, 50.0, 16.0),
            Rect::new(90.0, 0.0, 20.0, 20.0),
            Rect::new(150.0, 0.0, 50.0, 16.0),
            Rect::ZERO,
        ];
        assert_eq!(stacking_offset(&own, others), 36.0);
    }
}
