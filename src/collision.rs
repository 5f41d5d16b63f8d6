//! Bounding-volume collision detection
//!
//! This module provides the simplified convex shapes used for overlap testing
//! and the pure predicates that compare them. Ship-vs-asteroid collision uses
//! circle/circle; the rectangle type and mixed predicate back UI hit-testing.
//!
//! # Architecture
//!
//! - `BoundingCircle` / `BoundingRectangle`: immutable value types, rebuilt by
//!   their owning actor whenever it moves
//! - Free functions: stateless intersection tests with inclusive boundaries
//!   (touching counts as a collision)

use glam::Vec2;

/// Circular bounds: a center point and a radius.
///
/// Degenerate circles (radius 0) are valid inputs and behave per the distance
/// formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl BoundingCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        BoundingCircle { center, radius }
    }

    /// Tests for a collision between this circle and another.
    pub fn intersects(&self, other: &BoundingCircle) -> bool {
        circles_intersect(self, other)
    }

    /// Tests for a collision between this circle and a rectangle.
    #[allow(dead_code)] // Used by menu hit-testing experiments and tests
    pub fn intersects_rect(&self, rect: &BoundingRectangle) -> bool {
        circle_intersects_rect(self, rect)
    }
}

/// Axis-aligned rectangular bounds stored as position + size.
///
/// Zero-area rectangles are valid (they degenerate to a point or segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingRectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        BoundingRectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Tests for a collision between this rectangle and another.
    #[allow(dead_code)] // Counterpart of the circle predicates, kept symmetric
    pub fn intersects(&self, other: &BoundingRectangle) -> bool {
        rects_intersect(self, other)
    }
}

/// Detects a collision between two bounding circles.
///
/// True iff `(ra + rb)^2 >= dx^2 + dy^2`. The squared form avoids the square
/// root, and `>=` makes touching circles collide.
pub fn circles_intersect(a: &BoundingCircle, b: &BoundingCircle) -> bool {
    let delta = a.center - b.center;
    let reach = a.radius + b.radius;
    reach * reach >= delta.length_squared()
}

/// Detects a collision between two bounding rectangles.
///
/// Standard AABB test: the projections must overlap on both axes. Edges that
/// merely touch still count as overlap.
pub fn rects_intersect(a: &BoundingRectangle, b: &BoundingRectangle) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Detects a collision between a circle and a rectangle.
///
/// Clamps the circle's center into the rectangle to find the nearest point,
/// then applies the circle-point distance test.
pub fn circle_intersects_rect(c: &BoundingCircle, r: &BoundingRectangle) -> bool {
    let nearest_x = c.center.x.clamp(r.left(), r.right());
    let nearest_y = c.center.y.clamp(r.top(), r.bottom());
    let delta = c.center - Vec2::new(nearest_x, nearest_y);
    c.radius * c.radius >= delta.length_squared()
}
