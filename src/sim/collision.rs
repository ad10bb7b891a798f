//! Collision detection primitives
//!
//! Circles for hazards and the grabber tip, rotated rectangles (as four ordered
//! vertices) for the ship hull, axis-aligned rectangles for laser beams.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (screen space, `min` is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

/// Check overlap of two circles. Touching circles do not collide.
#[inline]
pub fn circle_circle_collision(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    c1.distance(c2) < r1 + r2
}

/// Intersection point of segments `p1-p2` and `p3-p4`
///
/// Parametric form solved with determinants. Parallel segments (zero
/// determinant) and intersections outside either segment yield `None`.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let a = (p1.x - p3.x) * (p3.y - p4.y) - (p1.y - p3.y) * (p3.x - p4.x);
    let b = (p1.x - p2.x) * (p1.y - p3.y) - (p1.y - p2.y) * (p1.x - p3.x);
    let det = (p1.x - p2.x) * (p3.y - p4.y) - (p1.y - p2.y) * (p3.x - p4.x);

    if det == 0.0 {
        return None;
    }

    let t = a / det;
    let u = -b / det;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(p1 + t * (p2 - p1))
}

/// First point where the segment `from-to` crosses an edge of the polygon
///
/// Edges are walked in vertex order, each paired with its predecessor
/// (so the first edge checked is last-vertex to first-vertex).
pub fn segment_polygon_intersection(vertices: &[Vec2], from: Vec2, to: Vec2) -> Option<Vec2> {
    let n = vertices.len();
    (0..n).find_map(|i| {
        let prev = vertices[(i + n - 1) % n];
        segment_intersection(from, to, vertices[i], prev)
    })
}

/// Check a rotated rectangle against a circle
///
/// A segment from the rectangle center to the circle center is crossed with
/// the rectangle edges; the crossing point stands in for the nearest boundary
/// point. No crossing means the circle center is inside, which is a hit.
pub fn rect_circle_collision(
    rect_center: Vec2,
    vertices: &[Vec2; 4],
    circle_center: Vec2,
    radius: f32,
) -> bool {
    match segment_polygon_intersection(vertices, rect_center, circle_center) {
        Some(point) => point.distance(circle_center) < radius,
        None => true,
    }
}
