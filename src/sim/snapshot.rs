//! Read-only frame view for renderers
//!
//! A snapshot is a plain serializable copy of what a frame needs to draw.
//! Renderers never see `GameState` itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::grabber::GrabberState;
use super::laser::{LaserAxis, LaserPhase, LaserTheme};
use super::state::{GameState, SessionPhase};
use crate::upgrade::OfferEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub direction: f32,
    pub alive: bool,
    pub shield: u32,
    pub max_shield: u32,
    /// Ticks of hit flash remaining
    pub shield_flash: u32,
    pub thrusting: bool,
    pub alt_skin: bool,
    pub hull: [Vec2; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrabberView {
    pub state: GrabberState,
    pub direction: f32,
    pub aim: f32,
    pub length: f32,
    pub max_length: f32,
    pub tip: Vec2,
    pub caught_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub id: u32,
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
    /// Sprite spin in degrees
    pub rotation: f32,
    pub caught: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserView {
    pub phase: LaserPhase,
    pub show_warning: bool,
    pub two_laser: bool,
    pub theme: LaserTheme,
    /// Marker anchors while the warning is up
    pub warning_markers: Vec<Vec2>,
    /// Lethal bands while the beam is live
    pub kill_rects: Vec<(LaserAxis, Rect)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: SessionPhase,
    pub time_ticks: u64,
    pub ship: ShipView,
    pub grabber: GrabberView,
    pub meteorites: Vec<HazardView>,
    pub debris: Vec<HazardView>,
    pub laser: LaserView,
    pub run_points: u64,
    pub last_run_points: u64,
    pub points: u64,
    /// Shop cards, empty outside the shop
    pub offer: Vec<OfferEntry>,
}

impl GameState {
    /// Copy out everything a renderer draws this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let ship = &self.ship;
        let grabber = &ship.grabber;
        let laser = &self.laser;

        let warning_markers = if laser.show_warning() {
            laser.warning_markers()
        } else {
            Vec::new()
        };

        FrameSnapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            ship: ShipView {
                pos: ship.pos,
                direction: ship.direction,
                alive: !ship.dead,
                shield: ship.shield,
                max_shield: ship.max_shield,
                shield_flash: ship.shield_flash,
                thrusting: ship.thrusting,
                alt_skin: ship.alt_skin,
                hull: ship.vertices(),
            },
            grabber: GrabberView {
                state: grabber.state,
                direction: grabber.direction,
                aim: grabber.aim,
                length: grabber.length,
                max_length: grabber.max_length,
                tip: grabber.tip_position(),
                caught_count: grabber.caught().len(),
            },
            meteorites: self
                .meteorites
                .iter()
                .map(|m| HazardView {
                    id: m.id,
                    pos: m.pos,
                    heading: m.heading,
                    radius: m.radius,
                    rotation: m.rotation,
                    caught: false,
                })
                .collect(),
            debris: self
                .debris
                .iter()
                .map(|d| HazardView {
                    id: d.id,
                    pos: d.pos,
                    heading: d.heading,
                    radius: crate::consts::DEBRIS_RADIUS,
                    rotation: d.rotation,
                    caught: d.caught,
                })
                .collect(),
            laser: LaserView {
                phase: laser.phase,
                show_warning: laser.show_warning(),
                two_laser: laser.two_laser,
                theme: laser.theme,
                warning_markers,
                kill_rects: laser.active_kill_rects(),
            },
            run_points: self.run_points,
            last_run_points: self.last_run_points,
            points: self.points,
            offer: if self.phase == SessionPhase::UpgradeShop {
                self.upgrades.offer_entries(&self.offer)
            } else {
                Vec::new()
            },
        }
    }
}
