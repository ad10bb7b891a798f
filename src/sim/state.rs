//! Session state
//!
//! `GameState` owns everything a session needs: the ship, the live hazard
//! collections, the laser, the timer queue, the upgrade tiers and the score.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::{Debris, Meteorite};
use super::laser::Laser;
use super::schedule::{Scheduler, TimerEvent};
use super::ship::Ship;
use super::spawn::Bounds;
use crate::audio::MusicTrack;
use crate::persistence::SaveData;
use crate::tuning::Tuning;
use crate::upgrade::{UpgradeKind, UpgradeManager};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    MainMenu,
    Playing,
    UpgradeShop,
}

impl SessionPhase {
    pub fn music(self) -> MusicTrack {
        match self {
            SessionPhase::Playing => MusicTrack::Game,
            SessionPhase::MainMenu | SessionPhase::UpgradeShop => MusicTrack::Menu,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub bounds: Bounds,
    pub phase: SessionPhase,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    pub ship: Ship,
    pub meteorites: Vec<Meteorite>,
    pub debris: Vec<Debris>,
    pub laser: Laser,
    pub scheduler: Scheduler,
    pub upgrades: UpgradeManager,
    /// Upgrades currently on offer in the shop
    pub offer: Vec<UpgradeKind>,
    /// Banked points (persisted)
    pub points: u64,
    /// Points collected in the current run
    pub run_points: u64,
    /// Points banked at the end of the previous run (after the multiplier)
    pub last_run_points: u64,
    /// Ship losses this session
    pub deaths: u32,
    /// Debris hauled home this session
    pub debris_collected: u64,
    save_requested: bool,
    next_id: u32,
}

impl GameState {
    /// Create a session from saved progress
    pub fn new(seed: u64, tuning: Tuning, save: &SaveData) -> Self {
        let bounds = tuning.bounds();
        let upgrades = UpgradeManager::from_tiers(&save.upgrades);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: SessionPhase::MainMenu,
            time_ticks: 0,
            ship: Ship::new(bounds.center(), 0.0),
            meteorites: Vec::new(),
            debris: Vec::new(),
            laser: Laser::new(bounds),
            scheduler: Scheduler::new(),
            upgrades,
            offer: Vec::new(),
            points: save.points,
            run_points: 0,
            last_run_points: 0,
            deaths: 0,
            debris_collected: 0,
            save_requested: false,
            next_id: 1,
            tuning,
        };
        state.apply_tuning();
        state.apply_upgrades();
        state.refresh_offer();
        state
    }

    /// Push balance knobs that live on entities
    fn apply_tuning(&mut self) {
        let t = &self.tuning;
        self.ship.half_extents = Vec2::new(t.ship_half_width, t.ship_half_height);
        self.ship.shield_flash_duration = t.shield_flash_ticks;
        self.ship.grabber.collect_radius = t.grabber_collect_radius;
        self.laser.two_laser_threshold = t.two_laser_threshold;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_meteorite(&mut self) {
        let id = self.next_entity_id();
        let meteorite = Meteorite::random(id, &mut self.rng, self.bounds);
        log::debug!(
            "Spawned meteorite {} r={} at ({:.0}, {:.0})",
            id,
            meteorite.radius,
            meteorite.pos.x,
            meteorite.pos.y
        );
        self.meteorites.push(meteorite);
    }

    pub fn spawn_debris(&mut self) {
        let id = self.next_entity_id();
        let debris = Debris::random(id, &mut self.rng, self.bounds);
        log::debug!("Spawned debris {} at ({:.0}, {:.0})", id, debris.pos.x, debris.pos.y);
        self.debris.push(debris);
    }

    /// Push current upgrade effects into the ship
    pub fn apply_upgrades(&mut self) {
        let values = self.upgrades.values();
        self.ship.apply_upgrades(&values);
    }

    /// Draw a fresh set of shop cards
    pub fn refresh_offer(&mut self) {
        self.offer = self
            .upgrades
            .random_offer(self.tuning.shop_offer_size, &mut self.rng);
    }

    /// Begin a new run: fresh ship, empty field, timers re-armed
    pub fn start_run(&mut self) {
        self.ship.reset();
        self.meteorites.clear();
        self.debris.clear();
        self.laser.reset();
        self.scheduler.clear();
        self.run_points = 0;

        self.spawn_meteorite();
        self.spawn_debris();

        let now = self.time_ticks;
        if let Some(interval) = self.tuning.meteorite_interval() {
            self.scheduler.schedule_in(now, interval, TimerEvent::SpawnMeteorite);
        }
        if let Some(interval) = self.tuning.debris_interval() {
            self.scheduler.schedule_in(now, interval, TimerEvent::SpawnDebris);
        }
        if self.tuning.lasers_enabled {
            self.scheduler
                .schedule_in(now, self.tuning.laser_interval(), TimerEvent::LaserWarning);
        }
        log::info!("Run started (banked points: {})", self.points);
    }

    /// Leave the field: cancel session timers and clear hazards
    pub fn end_run(&mut self) {
        self.scheduler.clear();
        self.meteorites.clear();
        self.debris.clear();
        self.laser.reset();
        self.ship.grabber.reset(self.ship.pos);
    }

    /// Move run points into the bank, applying the multiplier upgrade
    pub fn bank_run(&mut self) -> u64 {
        let multiplier = self.upgrades.values().point_multiplier;
        let banked = (self.run_points as f64 * f64::from(multiplier)).round() as u64;
        self.points += banked;
        self.last_run_points = banked;
        self.run_points = 0;
        self.request_save();
        log::info!("Banked {} points (total {})", banked, self.points);
        banked
    }

    pub fn request_save(&mut self) {
        self.save_requested = true;
    }

    /// Progress to persist, if anything changed since the last call
    pub fn take_save_request(&mut self) -> Option<SaveData> {
        if !std::mem::take(&mut self.save_requested) {
            return None;
        }
        Some(self.save_data())
    }

    pub fn save_data(&self) -> SaveData {
        SaveData {
            points: self.points,
            upgrades: self.upgrades.to_tiers(),
        }
    }
}
