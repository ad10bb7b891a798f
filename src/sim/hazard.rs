//! Drifting entities: meteorites (lethal) and debris (collectible)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawn::{Bounds, direction_toward_interior, point_outside_field};
use crate::consts::*;
use crate::{heading_vector, normalize_degrees};

/// A meteorite drifting across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteorite {
    pub id: u32,
    pub pos: Vec2,
    /// Travel heading (degrees)
    pub heading: f32,
    /// Units per tick
    pub speed: f32,
    pub radius: f32,
    /// Visual spin (degrees), not used by collision
    pub rotation: f32,
}

impl Meteorite {
    pub fn new(id: u32, pos: Vec2, heading: f32, speed: f32, radius: f32) -> Self {
        Self {
            id,
            pos,
            heading,
            speed,
            radius,
            rotation: 0.0,
        }
    }

    /// Spawn just outside the field, aimed at a random interior point
    pub fn random(id: u32, rng: &mut impl Rng, bounds: Bounds) -> Self {
        let radius = rng.random_range(METEORITE_MIN_RADIUS..METEORITE_MAX_RADIUS).floor();
        let pos = point_outside_field(rng, bounds, radius);
        let heading = direction_toward_interior(rng, bounds, AIM_INSET, pos);
        let speed = HAZARD_MIN_SPEED + rng.random::<f32>() * HAZARD_SPEED_SPREAD;
        Self::new(id, pos, heading, speed, radius)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        heading_vector(self.heading) * self.speed
    }

    /// Move along the heading and spin
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.velocity() * dt;
        self.rotation = normalize_degrees(self.rotation + HAZARD_SPIN * dt);
    }

    /// Far enough outside the field to be dropped (two radii past the edge)
    pub fn is_out_of_play(&self, bounds: Bounds) -> bool {
        bounds.is_beyond(self.pos, self.radius * 2.0)
    }
}

/// A piece of salvage the grabber can catch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debris {
    pub id: u32,
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// Claimed by a grabber; never reverted
    pub caught: bool,
    pub rotation: f32,
}

impl Debris {
    pub fn new(id: u32, pos: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            id,
            pos,
            heading,
            speed,
            caught: false,
            rotation: 0.0,
        }
    }

    pub fn random(id: u32, rng: &mut impl Rng, bounds: Bounds) -> Self {
        let pos = point_outside_field(rng, bounds, DEBRIS_MARGIN);
        let heading = direction_toward_interior(rng, bounds, AIM_INSET, pos);
        let speed = HAZARD_MIN_SPEED + rng.random::<f32>() * HAZARD_SPEED_SPREAD;
        Self::new(id, pos, heading, speed)
    }

    /// Drift and spin; caught debris is positioned by its grabber instead
    pub fn advance(&mut self, dt: f32) {
        self.rotation = normalize_degrees(self.rotation + HAZARD_SPIN * dt);
        if !self.caught {
            self.pos += heading_vector(self.heading) * self.speed * dt;
        }
    }

    /// Claim this debris. Returns false if it was already claimed.
    pub fn try_catch(&mut self) -> bool {
        if self.caught {
            return false;
        }
        self.caught = true;
        true
    }

    #[inline]
    pub fn snap_to(&mut self, point: Vec2) {
        self.pos = point;
    }

    pub fn is_out_of_play(&self, bounds: Bounds) -> bool {
        !self.caught && bounds.is_beyond(self.pos, DEBRIS_CULL_MARGIN)
    }
}
