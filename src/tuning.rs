//! Data-driven game balance
//!
//! Defaults mirror `consts`. A JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ms_to_ticks;
use crate::settings::{ConfigError, read_json};
use crate::sim::laser::TWO_LASER_THRESHOLD;
use crate::sim::spawn::Bounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,
    /// Meteorites per second (0 disables)
    pub meteorite_spawn_rate: f32,
    /// Debris per second (0 disables)
    pub debris_spawn_rate: f32,
    pub lasers_enabled: bool,
    /// Time between laser warnings
    pub laser_interval_ms: u32,
    /// Telegraph length before the beam goes live
    pub laser_warning_ms: u32,
    /// Lethal window
    pub laser_active_ms: u32,
    /// Completed laser shots before both axes fire together
    pub two_laser_threshold: u32,
    /// Run points per collected debris
    pub debris_points: u64,
    pub grabber_collect_radius: f32,
    /// Invulnerability after a shielded hit
    pub shield_flash_ticks: u32,
    pub ship_half_width: f32,
    pub ship_half_height: f32,
    pub shop_offer_size: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            meteorite_spawn_rate: 0.5,
            debris_spawn_rate: 0.2,
            lasers_enabled: true,
            laser_interval_ms: 6000,
            laser_warning_ms: 2000,
            laser_active_ms: 700,
            two_laser_threshold: TWO_LASER_THRESHOLD,
            debris_points: DEBRIS_POINTS,
            grabber_collect_radius: GRABBER_COLLECT_RADIUS,
            shield_flash_ticks: SHIELD_FLASH_TICKS,
            ship_half_width: SHIP_HALF_WIDTH,
            ship_half_height: SHIP_HALF_HEIGHT,
            shop_offer_size: SHOP_OFFER_SIZE,
        }
    }
}

/// Ticks between spawns for a per-second rate
fn rate_to_ticks(rate: f32) -> Option<u64> {
    if rate <= 0.0 || !rate.is_finite() {
        return None;
    }
    Some(ms_to_ticks((1000.0 / rate).round() as u32))
}

impl Tuning {
    /// Load overrides from a JSON file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let tuning = read_json(path)?.unwrap_or_default();
        log::info!("Tuning: {:?}", tuning);
        Ok(tuning)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.field_width, self.field_height)
    }

    pub fn meteorite_interval(&self) -> Option<u64> {
        rate_to_ticks(self.meteorite_spawn_rate)
    }

    pub fn debris_interval(&self) -> Option<u64> {
        rate_to_ticks(self.debris_spawn_rate)
    }

    pub fn laser_interval(&self) -> u64 {
        ms_to_ticks(self.laser_interval_ms)
    }

    pub fn laser_warning(&self) -> u64 {
        ms_to_ticks(self.laser_warning_ms)
    }

    pub fn laser_active(&self) -> u64 {
        ms_to_ticks(self.laser_active_ms)
    }
}
