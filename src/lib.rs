//! Galactic Salvage - top-down salvage arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, hazards, session flow)
//! - `upgrade`: Tiered upgrade catalog and purchase rules
//! - `audio`: Sound cue service handed to the simulation
//! - `persistence`: Save/load of banked points and upgrade tiers
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod upgrade;

pub use audio::{AudioManager, MusicTrack, SoundCue};
pub use persistence::SaveData;
pub use settings::Settings;
pub use tuning::Tuning;
pub use upgrade::{UpgradeKind, UpgradeManager, UpgradeValues};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// Play field dimensions (screen space, y down)
    pub const FIELD_WIDTH: f32 = 1600.0;
    pub const FIELD_HEIGHT: f32 = 900.0;

    /// Ship defaults (per-tick units)
    pub const SHIP_ACCELERATION: f32 = 0.5;
    pub const SHIP_DECELERATION: f32 = 0.02;
    pub const SHIP_MAX_SPEED: f32 = 3.0;
    pub const SHIP_ROTATION_SPEED: f32 = 2.0;
    /// Half of the 72x120 hull sprite
    pub const SHIP_HALF_WIDTH: f32 = 36.0;
    pub const SHIP_HALF_HEIGHT: f32 = 60.0;
    /// Post-hit invulnerability window
    pub const SHIELD_FLASH_TICKS: u32 = 30;

    /// Grabber defaults
    pub const GRABBER_MAX_LENGTH: f32 = 150.0;
    pub const GRABBER_SPEED: f32 = 6.0;
    pub const GRABBER_COLLECT_RADIUS: f32 = 20.0;

    /// Meteorite radius range (inclusive min, exclusive max)
    pub const METEORITE_MIN_RADIUS: f32 = 50.0;
    pub const METEORITE_MAX_RADIUS: f32 = 140.0;
    /// Debris pickup radius and spawn/cull margin
    pub const DEBRIS_RADIUS: f32 = 10.0;
    pub const DEBRIS_MARGIN: f32 = 10.0;
    pub const DEBRIS_CULL_MARGIN: f32 = 20.0;
    /// Hazard speed is `1.0 + rand * 2.0` units per tick
    pub const HAZARD_MIN_SPEED: f32 = 1.0;
    pub const HAZARD_SPEED_SPREAD: f32 = 2.0;
    /// Cosmetic spin per tick (degrees)
    pub const HAZARD_SPIN: f32 = 0.1;
    /// Interior inset used when aiming spawned hazards
    pub const AIM_INSET: f32 = 50.0;

    /// Run points awarded per collected debris
    pub const DEBRIS_POINTS: u64 = 10;
    /// Number of upgrade cards offered in the shop
    pub const SHOP_OFFER_SIZE: usize = 3;
}

/// Convert a millisecond duration to whole ticks (rounded up, at least one)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    let ticks = (u64::from(ms) * u64::from(consts::TICK_HZ)).div_ceil(1000);
    ticks.max(1)
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotate a vector by `degrees` (counter-clockwise in math coordinates)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit vector for a heading: `(0, 1)` rotated by `-heading`
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    rotate_degrees(Vec2::Y, -heading)
}

/// Heading (degrees) from `from` toward `to`, using the atan2(dx, dy) convention
#[inline]
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.x.atan2(delta.y).to_degrees()
}
