//! The player's ship
//!
//! Velocity is integrated per tick and subtracted from the position, so the
//! thrust impulse along `heading_vector(direction)` pushes the ship the
//! opposite way (toward its nose). The hull is a rotated rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_circle_collision, rect_circle_collision};
use super::grabber::Grabber;
use super::hazard::{Debris, Meteorite};
use super::laser::LaserAxis;
use super::spawn::Bounds;
use crate::audio::{AudioManager, SoundCue};
use crate::consts::*;
use crate::upgrade::UpgradeValues;
use crate::{heading_vector, normalize_degrees, rotate_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub start_pos: Vec2,
    pub pos: Vec2,
    /// Facing (degrees, [0, 360))
    pub direction: f32,
    pub velocity: Vec2,
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    pub rotation_speed: f32,
    pub can_slow_down: bool,
    pub half_extents: Vec2,
    pub max_shield: u32,
    pub shield: u32,
    /// Ticks left in the post-hit window
    pub shield_flash: u32,
    pub shield_flash_duration: u32,
    pub dead: bool,
    /// Thrust was applied this tick (for the engine animation)
    pub thrusting: bool,
    /// Cosmetic hull variant
    pub alt_skin: bool,
    /// Center of the meteorite found by the last positive collision check
    pub last_hit: Option<Vec2>,
    pub grabber: Grabber,
}

impl Ship {
    pub fn new(pos: Vec2, direction: f32) -> Self {
        Self {
            start_pos: pos,
            pos,
            direction: normalize_degrees(direction),
            velocity: Vec2::ZERO,
            acceleration: SHIP_ACCELERATION,
            deceleration: SHIP_DECELERATION,
            max_speed: SHIP_MAX_SPEED,
            rotation_speed: SHIP_ROTATION_SPEED,
            can_slow_down: false,
            half_extents: Vec2::new(SHIP_HALF_WIDTH, SHIP_HALF_HEIGHT),
            max_shield: 0,
            shield: 0,
            shield_flash: 0,
            shield_flash_duration: SHIELD_FLASH_TICKS,
            dead: false,
            thrusting: false,
            alt_skin: false,
            last_hit: None,
            grabber: Grabber::new(pos),
        }
    }

    /// Restore a fresh run without rebuilding the ship
    pub fn reset(&mut self) {
        self.pos = self.start_pos;
        self.velocity = Vec2::ZERO;
        self.shield = self.max_shield;
        self.shield_flash = 0;
        self.dead = false;
        self.thrusting = false;
        self.last_hit = None;
        self.grabber.reset(self.pos);
    }

    /// Re-derive tunables from the current upgrade tiers
    pub fn apply_upgrades(&mut self, values: &UpgradeValues) {
        self.max_speed = values.max_velocity;
        self.acceleration = values.acceleration;
        self.rotation_speed = values.rotation_speed;
        self.can_slow_down = values.can_slow_down;
        self.grabber.extension_speed = values.grabber_speed;
        self.grabber.set_max_length(values.grabber_length);
        self.max_shield = values.shield;
        self.shield = self.max_shield;
        self.alt_skin = values.alt_skin;
    }

    pub fn rotate(&mut self, delta: f32) {
        self.direction = normalize_degrees(self.direction + delta * self.rotation_speed);
    }

    /// Thrust toward the nose; locked out during the shield flash
    pub fn accelerate(&mut self) {
        if self.shield_flash > 0 {
            return;
        }
        self.velocity += heading_vector(self.direction) * self.acceleration;
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        self.thrusting = true;
    }

    /// Brake (requires the upgrade)
    pub fn slow_down(&mut self) {
        if self.can_slow_down {
            self.velocity *= 1.0 - self.deceleration;
        }
    }

    /// Heading the nose points along (opposite of the thrust vector)
    pub fn nose_direction(&self) -> f32 {
        normalize_degrees(self.direction + 180.0)
    }

    pub fn advance(&mut self) {
        if self.dead {
            return;
        }
        self.pos -= self.velocity;
    }

    /// Leaving the field is fatal
    pub fn bounds_check(&mut self, bounds: Bounds, audio: &mut AudioManager) {
        if !bounds.contains(self.pos) {
            self.die(audio);
        }
    }

    /// Per-tick update: integrate, bounds check, tick the shield flash and
    /// drive the grabber. Returns debris collected this tick.
    pub fn update(&mut self, bounds: Bounds, debris: &mut Vec<Debris>, audio: &mut AudioManager) -> u32 {
        self.advance();
        self.bounds_check(bounds, audio);
        self.shield_flash = self.shield_flash.saturating_sub(1);
        self.grabber.update(self.pos, debris)
    }

    /// Hull corners in order around the rectangle
    pub fn vertices(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            Vec2::new(h.x, h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(-h.x, -h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|corner| rotate_degrees(corner, -self.direction) + self.pos)
    }

    /// Radius of the circle enclosing the hull
    pub fn bounding_radius(&self) -> f32 {
        self.half_extents.length()
    }

    /// First meteorite overlapping the hull, remembered for the bounce
    pub fn check_collision(&mut self, meteorites: &[Meteorite]) -> bool {
        let vertices = self.vertices();
        let reach = self.bounding_radius();
        for meteorite in meteorites {
            if !circle_circle_collision(self.pos, reach, meteorite.pos, meteorite.radius) {
                continue;
            }
            if rect_circle_collision(self.pos, &vertices, meteorite.pos, meteorite.radius) {
                self.last_hit = Some(meteorite.pos);
                return true;
            }
        }
        false
    }

    /// Take a meteorite hit: shields absorb it with a bounce, otherwise die
    pub fn get_hit(&mut self, audio: &mut AudioManager) {
        if self.shield_flash > 0 || self.dead {
            return;
        }
        if self.shield == 0 {
            self.die(audio);
            return;
        }
        self.bounce_off_last_hit();
        self.shield -= 1;
        self.shield_flash = self.shield_flash_duration;
    }

    /// Send the ship away from the last meteorite it touched
    fn bounce_off_last_hit(&mut self) {
        let Some(center) = self.last_hit else { return };
        // Position moves by -velocity, so velocity points at the meteorite
        let toward = (center - self.pos).normalize_or_zero();
        if toward == Vec2::ZERO {
            return;
        }
        let speed = self.velocity.length().max(self.max_speed / 2.0);
        self.velocity = toward * speed;
        self.pos -= self.velocity;
    }

    /// Any hull corner inside the beam matching `axis`
    pub fn check_kill_collision(&self, horizontal: Rect, vertical: Rect, axis: LaserAxis) -> bool {
        let rect = match axis {
            LaserAxis::Horizontal => horizontal,
            LaserAxis::Vertical => vertical,
        };
        self.vertices().iter().any(|v| rect.contains_point(*v))
    }

    /// Idempotent; only the first call has side effects
    pub fn die(&mut self, audio: &mut AudioManager) {
        if self.dead {
            return;
        }
        self.dead = true;
        audio.play(SoundCue::Explosion);
        log::info!("Ship destroyed at ({:.0}, {:.0})", self.pos.x, self.pos.y);
    }
}
