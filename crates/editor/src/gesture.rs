//! Pointer gestures on a single overlay.
//!
//! A gesture starts on pointer-down, follows the pointer with container
//! clamping, and yields at most one patch when the pointer is released.

use rtspio_core::geometry::{self, Bounds, Point, Rect, ResizeHandle};
use rtspio_core::patch::OverlayPatch;
use rtspio_core::types::OverlayId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    id: OverlayId,
    kind: GestureKind,
    origin: Rect,
    start: Point,
    current: Rect,
}

impl Gesture {
    pub fn new(id: OverlayId, kind: GestureKind, origin: Rect, start: Point) -> Self {
        Self {
            id,
            kind,
            origin,
            start,
            current: origin,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Follow the pointer to `point`, returning the clamped rectangle.
    pub fn update(&mut self, bounds: Bounds, point: Point) -> Rect {
        let dx = point.x - self.start.x;
        let dy = point.y - self.start.y;
        self.current = match self.kind {
            GestureKind::Drag => geometry::drag(bounds, self.origin, dx, dy),
            GestureKind::Resize(handle) => geometry::resize(bounds, self.origin, handle, dx, dy),
        };
        self.current
    }

    /// End the gesture.
    ///
    /// Returns the update to persist, or `None` when the overlay ended where
    /// it started. A drag only ever changes the position.
    pub fn finish(self) -> Option<(OverlayId, OverlayPatch)> {
        if self.current == self.origin {
            return None;
        }
        let patch = match self.kind {
            GestureKind::Drag => OverlayPatch::position(rtspio_core::overlay::Position {
                x: self.current.x,
                y: self.current.y,
            }),
            GestureKind::Resize(_) => OverlayPatch::geometry(self.current),
        };
        Some((self.id, patch))
    }
}
