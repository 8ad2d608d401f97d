//! Minimal 2D geometry used by the navigator's range selection and layout hooks.

use serde::Serialize;

/// Tolerance applied to boundary comparisons in projected space.
pub const EPSILON: f32 = 1e-5;

/// A point or size in projected (screen) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x.max(other.x), self.y.max(other.y))
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub location: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(location: Vec2, size: Vec2) -> Self {
        Self { location, size }
    }

    pub fn left(&self) -> f32 {
        self.location.x
    }

    pub fn right(&self) -> f32 {
        self.location.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.location.y
    }

    pub fn bottom(&self) -> f32 {
        self.location.y + self.size.y
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Inclusive containment, tolerant to rounding on every edge.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left() - EPSILON
            && point.x <= self.right() + EPSILON
            && point.y >= self.top() - EPSILON
            && point.y <= self.bottom() + EPSILON
    }

    /// Smallest rectangle covering both `a` and `b`.
    pub fn union(a: Rect, b: Rect) -> Rect {
        let left = a.left().min(b.left());
        let top = a.top().min(b.top());
        let right = a.right().max(b.right());
        let bottom = a.bottom().max(b.bottom());
        Rect::new(Vec2::new(left, top), Vec2::new(right - left, bottom - top))
    }
}
