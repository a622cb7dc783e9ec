//! Pointer and wheel input delivered to plugins
//!
//! Coordinates are wrapper content coordinates: the host has already added
//! the current scroll offset, so `x` maps directly onto the waveform.

use crate::dom::ElementId;

/// Mouse/pen button that produced a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// A single input event targeted at an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        target: ElementId,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    /// Document-level move; delivered to whichever gesture is active
    PointerMove { x: f64, y: f64 },
    /// Document-level release
    PointerUp { x: f64, y: f64 },
    Click { target: ElementId },
    DoubleClick { target: ElementId },
    PointerEnter { target: ElementId },
    PointerLeave { target: ElementId },
    /// Focus left the target element
    Blur { target: ElementId },
    Wheel {
        target: ElementId,
        x: f64,
        delta_x: f64,
        delta_y: f64,
    },
}

impl InputEvent {
    /// The element the event was dispatched to, if it has one
    pub fn target(&self) -> Option<ElementId> {
        match self {
            InputEvent::PointerDown { target, .. }
            | InputEvent::Click { target }
            | InputEvent::DoubleClick { target }
            | InputEvent::PointerEnter { target }
            | InputEvent::PointerLeave { target }
            | InputEvent::Blur { target }
            | InputEvent::Wheel { target, .. } => Some(*target),
            InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. } => None,
        }
    }
}
