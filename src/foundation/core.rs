//! Coordinates, areas and opacity constants.

use serde::{Deserialize, Serialize};

/// Signed pixel coordinate.
pub type Coord = i32;

/// 8-bit opacity: `0` transparent, `255` fully covering.
pub type Opa = u8;

/// Fully transparent.
pub const OPA_TRANSP: Opa = 0;
/// Half opacity.
pub const OPA_50: Opa = 127;
/// Fully covering.
pub const OPA_COVER: Opa = 255;
/// Opacities below this are treated as fully transparent.
pub const OPA_MIN: Opa = 16;
/// Opacities above this are treated as fully covering.
pub const OPA_MAX: Opa = 251;

/// Capacity of a [`MaskContext`](crate::mask::MaskContext).
pub const MAX_MASKS: usize = 8;

/// Integer point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Coord,
    /// Vertical coordinate.
    pub y: Coord,
}

impl Point {
    /// Create a point.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

/// Inclusive integer rectangle `(x1, y1)..=(x2, y2)`.
///
/// An area with `x1 > x2` or `y1 > y2` is empty; operations on it are no-ops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    /// Left edge (inclusive).
    pub x1: Coord,
    /// Top edge (inclusive).
    pub y1: Coord,
    /// Right edge (inclusive).
    pub x2: Coord,
    /// Bottom edge (inclusive).
    pub y2: Coord,
}

impl Area {
    /// Create an area from inclusive corners.
    pub const fn new(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create an area from a top-left corner and a size.
    pub const fn from_size(x: Coord, y: Coord, w: Coord, h: Coord) -> Self {
        Self::new(x, y, x + w - 1, y + h - 1)
    }

    /// Width in pixels; `0` for empty areas.
    pub fn width(&self) -> Coord {
        (self.x2 - self.x1 + 1).max(0)
    }

    /// Height in pixels; `0` for empty areas.
    pub fn height(&self) -> Coord {
        (self.y2 - self.y1 + 1).max(0)
    }

    /// Number of pixels covered.
    pub fn size(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Return `true` when the area covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Intersection of two areas, `None` when they do not overlap.
    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let out = Area::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (!out.is_empty()).then_some(out)
    }

    /// Return `true` when `p` lies inside the area.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Return `true` when `other` lies completely inside the area.
    pub fn contains_area(&self, other: &Area) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Move the area by `(dx, dy)`.
    pub fn translate(&self, dx: Coord, dy: Coord) -> Area {
        Area::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Grow (or shrink, for negative `d`) every edge by `d`.
    pub fn inflate(&self, d: Coord) -> Area {
        Area::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }

    /// The single row `y` of this area.
    pub fn row(&self, y: Coord) -> Area {
        Area::new(self.x1, y, self.x2, y)
    }

    /// Shorter side length.
    pub fn short_side(&self) -> Coord {
        self.width().min(self.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
