//! Input abstraction layer.
//!
//! Normalizes browser events into a unified `InputEvent` enum consumed by
//! the simulation.

use crate::controls::ControlAction;

/// A normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on the canvas, in canvas-local coordinates.
    PointerDown { x: f32, y: f32 },

    /// One of the gravity / spawn-count buttons.
    Control(ControlAction),

    /// The canvas changed size (follows the window).
    Resize { width: f32, height: f32 },
}

impl InputEvent {
    /// Create a PointerDown from client coordinates and the canvas's
    /// bounding rect origin.
    pub fn from_client(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Self {
        Self::PointerDown {
            x: (client_x - rect_left) as f32,
            y: (client_y - rect_top) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_coordinates_become_canvas_local() {
        let event = InputEvent::from_client(150.0, 90.0, 20.0, 40.0);
        assert_eq!(event, InputEvent::PointerDown { x: 130.0, y: 50.0 });
    }
}
