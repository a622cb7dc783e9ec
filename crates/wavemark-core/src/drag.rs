//! Pointer drag primitive
//!
//! Converts raw pointer down/move/up into drag callbacks:
//!
//! ```text
//! down ──► (motion < threshold: nothing) ──► Start{x,y} + Move{dx,..} ──► Move.. ──► End
//! ```
//!
//! `Start` carries the press point relative to the dragged element; `Move`
//! carries the delta since the previous emitted position plus the current
//! point relative to the element. A press that never crosses the threshold
//! produces no events at all, so plain clicks stay clicks.

use crate::geometry::Point;
use crate::input::PointerButton;

/// Default minimum motion in pixels before a press becomes a drag
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// A drag callback, in emission order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Drag began; press point relative to the element
    Start { x: f64, y: f64 },
    /// Pointer moved by `(dx, dy)`; `(x, y)` is relative to the element
    Move { dx: f64, dy: f64, x: f64, y: f64 },
    /// Drag finished
    End,
}

/// State machine for a single drag gesture
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f64,
    /// Last pointer position in content coordinates, while pressed
    last: Option<Point>,
    dragging: bool,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            last: None,
            dragging: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether a press is in progress
    pub fn is_pressed(&self) -> bool {
        self.last.is_some()
    }

    /// Whether the press has crossed the threshold
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Arm the tracker; only the primary button starts a gesture
    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.last = Some(Point::new(x, y));
        self.dragging = false;
        true
    }

    /// Feed a pointer move; `origin` is the element's top-left corner
    pub fn pointer_move(&mut self, x: f64, y: f64, origin: Point) -> Vec<DragEvent> {
        let Some(last) = self.last else {
            return Vec::new();
        };
        let dx = x - last.x;
        let dy = y - last.y;

        if !self.dragging && dx.abs() < self.threshold && dy.abs() < self.threshold {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if !self.dragging {
            self.dragging = true;
            events.push(DragEvent::Start {
                x: last.x - origin.x,
                y: last.y - origin.y,
            });
        }
        events.push(DragEvent::Move {
            dx,
            dy,
            x: x - origin.x,
            y: y - origin.y,
        });
        self.last = Some(Point::new(x, y));
        events
    }

    /// Release the pointer; returns `End` only if a drag actually started
    pub fn pointer_up(&mut self) -> Option<DragEvent> {
        self.last = None;
        std::mem::take(&mut self.dragging).then_some(DragEvent::End)
    }

    /// Abandon the gesture without emitting `End`
    pub fn cancel(&mut self) {
        self.last = None;
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_silent() {
        let mut drag = DragTracker::new(3.0);
        assert!(drag.pointer_down(PointerButton::Primary, 100.0, 10.0));
        assert!(drag.pointer_move(102.0, 11.0, Point::default()).is_empty());
        assert_eq!(drag.pointer_up(), None, "A click is not a drag");
    }

    #[test]
    fn test_start_then_moves() {
        let mut drag = DragTracker::new(3.0);
        drag.pointer_down(PointerButton::Primary, 100.0, 10.0);
        let origin = Point::new(50.0, 0.0);

        let events = drag.pointer_move(105.0, 10.0, origin);
        assert_eq!(
            events,
            vec![
                DragEvent::Start { x: 50.0, y: 10.0 },
                DragEvent::Move { dx: 5.0, dy: 0.0, x: 55.0, y: 10.0 },
            ]
        );

        // Once dragging, sub-threshold motion is still reported
        let events = drag.pointer_move(106.0, 10.0, origin);
        assert_eq!(events, vec![DragEvent::Move { dx: 1.0, dy: 0.0, x: 56.0, y: 10.0 }]);

        assert_eq!(drag.pointer_up(), Some(DragEvent::End));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut drag = DragTracker::default();
        assert!(!drag.pointer_down(PointerButton::Secondary, 0.0, 0.0));
        assert!(drag.pointer_move(50.0, 0.0, Point::default()).is_empty());
    }
}
