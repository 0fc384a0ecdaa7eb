//! Overlay geometry inside the video container.
//!
//! Pure functions only: given the container bounds and a proposed
//! rectangle, produce the rectangle that stays inside the frame. Drag and
//! resize gestures in the editor are built on these.

use crate::error::CoreError;

/// Smallest width/height a resize may shrink an overlay to.
pub const MIN_OVERLAY_SIZE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }
}

/// Size of the video container the overlays live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `WIDTHxHEIGHT`, e.g. `1280x720`.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| CoreError::Validation(format!("Invalid container size '{s}'")))?;
        let width: f64 = w
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("Invalid container width '{w}'")))?;
        let height: f64 = h
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("Invalid container height '{h}'")))?;
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(CoreError::Validation(format!(
                "container size must be positive, got {s}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Which edge or corner a resize handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl ResizeHandle {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "top" => Ok(Self::Top),
            "e" | "right" => Ok(Self::Right),
            "s" | "bottom" => Ok(Self::Bottom),
            "w" | "left" => Ok(Self::Left),
            "ne" | "top-right" => Ok(Self::TopRight),
            "se" | "bottom-right" => Ok(Self::BottomRight),
            "sw" | "bottom-left" => Ok(Self::BottomLeft),
            "nw" | "top-left" => Ok(Self::TopLeft),
            _ => Err(CoreError::Validation(format!(
                "Invalid resize handle '{s}'. Must be one of: n, e, s, w, ne, se, sw, nw"
            ))),
        }
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopRight | Self::TopLeft)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomRight | Self::BottomLeft)
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }
}

/// `v` limited to `[lo, hi]`; collapses to `lo` when the range is empty.
fn clamp_between(v: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo {
        lo
    } else {
        v.clamp(lo, hi)
    }
}

/// Fit `proposed` inside `bounds`.
///
/// Size is first limited to the container, then the position is pulled back
/// so the whole rectangle is visible. Negative values become 0.
pub fn clamp_rect(bounds: Bounds, proposed: Rect) -> Rect {
    let w = clamp_between(proposed.w, 0.0, bounds.width);
    let h = clamp_between(proposed.h, 0.0, bounds.height);
    let x = clamp_between(proposed.x, 0.0, bounds.width - w);
    let y = clamp_between(proposed.y, 0.0, bounds.height - h);
    Rect { x, y, w, h }
}

/// Translate `origin` by `(dx, dy)` keeping its size, clamped to `bounds`.
pub fn drag(bounds: Bounds, origin: Rect, dx: f64, dy: f64) -> Rect {
    clamp_rect(
        bounds,
        Rect {
            x: origin.x + dx,
            y: origin.y + dy,
            ..origin
        },
    )
}

/// Move the edges selected by `handle` by `(dx, dy)`.
///
/// Moved edges stay inside `bounds` and never cross the opposite edge
/// closer than [`MIN_OVERLAY_SIZE`]. Unmoved edges stay put.
pub fn resize(bounds: Bounds, origin: Rect, handle: ResizeHandle, dx: f64, dy: f64) -> Rect {
    let origin = clamp_rect(bounds, origin);
    let mut left = origin.x;
    let mut top = origin.y;
    let mut right = origin.right();
    let mut bottom = origin.bottom();

    if handle.moves_top() {
        top = clamp_between(top + dy, 0.0, bottom - MIN_OVERLAY_SIZE);
    }
    if handle.moves_bottom() {
        bottom = clamp_between(bottom + dy, top + MIN_OVERLAY_SIZE, bounds.height);
    }
    if handle.moves_left() {
        left = clamp_between(left + dx, 0.0, right - MIN_OVERLAY_SIZE);
    }
    if handle.moves_right() {
        right = clamp_between(right + dx, left + MIN_OVERLAY_SIZE, bounds.width);
    }

    Rect {
        x: left,
        y: top,
        w: right - left,
        h: bottom - top,
    }
}
