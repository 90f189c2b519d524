//! Pointer events and drop geometry.
//!
//! Positions arriving here are already in client coordinates; nothing in
//! this module measures the host surface itself.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    /// The client position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// Snapshot of the surface geometry and pointer state at the moment of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropContext {
    /// Drop surface bounds in client coordinates.
    pub surface: Rect,
    /// Pointer position at drag start, in client coordinates.
    pub pointer: Point,
    /// Drag delta accumulated since pointer-down.
    pub delta: Vec2,
}

impl DropContext {
    pub fn new(surface: Rect, pointer: Point, delta: Vec2) -> Self {
        Self {
            surface,
            pointer,
            delta,
        }
    }

    /// Drop point relative to the surface origin.
    pub fn local_point(&self) -> Point {
        Point::new(
            self.pointer.x - self.surface.x0 + self.delta.x,
            self.pointer.y - self.surface.y0 + self.delta.y,
        )
    }

    pub fn surface_width(&self) -> f64 {
        self.surface.width()
    }

    pub fn surface_height(&self) -> f64 {
        self.surface.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_point_subtracts_origin_and_adds_delta() {
        let ctx = DropContext::new(
            Rect::new(300.0, 100.0, 1100.0, 700.0),
            Point::new(350.0, 160.0),
            Vec2::new(25.0, -10.0),
        );
        assert_eq!(ctx.local_point(), Point::new(75.0, 50.0));
        assert_eq!(ctx.surface_width(), 800.0);
        assert_eq!(ctx.surface_height(), 600.0);
    }

    #[test]
    fn test_event_position() {
        let event = PointerEvent::Up {
            position: Point::new(4.0, 2.0),
        };
        assert_eq!(event.position(), Point::new(4.0, 2.0));
    }
}
