//! Procedural hazard placement
//!
//! Hazards enter from just outside the visible field and head toward a random
//! interior point, so every spawn crosses the play area.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bearing_degrees;

/// Visible play field, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// True once `point` is more than `margin` beyond any edge
    pub fn is_beyond(&self, point: Vec2, margin: f32) -> bool {
        point.x < -margin
            || point.x > self.width + margin
            || point.y < -margin
            || point.y > self.height + margin
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Map an arc length on the perimeter of a `width`×`height` rectangle at the
/// origin to a point, walking clockwise from the top-left corner.
fn perimeter_point(width: f32, height: f32, p: f32) -> Vec2 {
    let half = width + height;
    if p < half {
        if p < width {
            Vec2::new(p, 0.0)
        } else {
            Vec2::new(width, p - width)
        }
    } else {
        let p = p - half;
        if p < width {
            Vec2::new(width - p, height)
        } else {
            Vec2::new(0.0, height - (p - width))
        }
    }
}

/// Sample a point on the perimeter of the field expanded by `margin`
///
/// The arc length is uniform over the whole perimeter, then shifted so the
/// expanded rectangle surrounds the field.
pub fn point_outside_field(rng: &mut impl Rng, bounds: Bounds, margin: f32) -> Vec2 {
    let width = bounds.width + margin * 2.0;
    let height = bounds.height + margin * 2.0;
    let p = rng.random_range(0.0..=(width + height) * 2.0);
    perimeter_point(width, height, p) - Vec2::splat(margin)
}

/// Heading (degrees) from `from` toward a random point inside the field
pub fn direction_toward_interior(rng: &mut impl Rng, bounds: Bounds, inset: f32, from: Vec2) -> f32 {
    let x_max = (bounds.width - inset).max(inset);
    let y_max = (bounds.height - inset).max(inset);
    let target = Vec2::new(
        rng.random_range(inset..=x_max),
        rng.random_range(inset..=y_max),
    );
    bearing_degrees(from, target)
}
