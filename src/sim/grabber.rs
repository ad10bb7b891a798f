//! The ship's extendable capture arm
//!
//! One `extend()` runs a full cycle: the arm grows to its maximum reach,
//! retracts on its own, and banks whatever it dragged home once the length is
//! back to zero. The aim is committed at launch and is not steered mid-cycle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::Debris;
use crate::consts::*;
use crate::{bearing_degrees, heading_vector};

/// Extension state of the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GrabberState {
    #[default]
    Stopped,
    Extending,
    Retracting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grabber {
    /// Anchor, mirrors the owning ship
    pub pos: Vec2,
    /// Heading the arm was launched along (degrees)
    pub direction: f32,
    /// Heading toward the pointer, sampled every tick, committed on extend
    pub aim: f32,
    pub state: GrabberState,
    pub length: f32,
    pub max_length: f32,
    /// Reach gained or lost per tick
    pub extension_speed: f32,
    pub collect_radius: f32,
    /// IDs of debris claimed during the current cycle, in capture order
    caught: Vec<u32>,
}

impl Grabber {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            direction: 0.0,
            aim: 0.0,
            state: GrabberState::Stopped,
            length: 0.0,
            max_length: GRABBER_MAX_LENGTH,
            extension_speed: GRABBER_SPEED,
            collect_radius: GRABBER_COLLECT_RADIUS,
            caught: Vec::new(),
        }
    }

    pub fn caught(&self) -> &[u32] {
        &self.caught
    }

    pub fn is_stopped(&self) -> bool {
        self.state == GrabberState::Stopped
    }

    /// Drop any in-flight cycle (new run)
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.state = GrabberState::Stopped;
        self.length = 0.0;
        self.caught.clear();
    }

    /// Apply a new maximum reach, keeping the current length in range
    pub fn set_max_length(&mut self, max_length: f32) {
        self.max_length = max_length.max(0.0);
        self.length = self.length.min(self.max_length);
    }

    /// Track the pointer; only affects the next launch
    pub fn aim_at(&mut self, target: Vec2) {
        if target != self.pos {
            self.aim = bearing_degrees(self.pos, target);
        }
    }

    /// Launch the arm. Ignored unless the arm is stopped.
    pub fn extend(&mut self) -> bool {
        if self.state != GrabberState::Stopped {
            return false;
        }
        self.direction = self.aim;
        self.state = GrabberState::Extending;
        true
    }

    /// Grow or shrink the arm by `speed`
    ///
    /// Returns true when this call brought the arm home (length hit 0).
    pub fn advance_extension(&mut self, speed: f32) -> bool {
        match self.state {
            GrabberState::Stopped => false,
            GrabberState::Extending => {
                self.length += speed;
                if self.length >= self.max_length {
                    self.length = self.max_length;
                    self.state = GrabberState::Retracting;
                }
                false
            }
            GrabberState::Retracting => {
                self.length -= speed;
                if self.length <= 0.0 {
                    self.length = 0.0;
                    self.state = GrabberState::Stopped;
                    return true;
                }
                false
            }
        }
    }

    /// World-space center of the collection hitbox
    pub fn tip_position(&self) -> Vec2 {
        self.pos + heading_vector(self.direction) * self.length
    }

    /// Claim free debris under the tip. Returns how many were claimed.
    pub fn check_collect(&mut self, debris: &mut [Debris]) -> usize {
        if self.is_stopped() {
            return 0;
        }
        let tip = self.tip_position();
        let mut claimed = 0;
        for item in debris.iter_mut() {
            if item.caught || item.pos.distance(tip) >= self.collect_radius {
                continue;
            }
            if item.try_catch() {
                self.caught.push(item.id);
                claimed += 1;
            }
        }
        claimed
    }

    /// Pull every caught item along with the tip
    pub fn drag_caught(&self, debris: &mut [Debris]) {
        let tip = self.tip_position();
        for item in debris.iter_mut().filter(|d| self.caught.contains(&d.id)) {
            item.snap_to(tip);
        }
    }

    /// Destroy the caught debris and return how many were removed
    pub fn collect_all(&mut self, debris: &mut Vec<Debris>) -> u32 {
        if self.caught.is_empty() {
            return 0;
        }
        let before = debris.len();
        debris.retain(|d| !self.caught.contains(&d.id));
        self.caught.clear();
        (before - debris.len()) as u32
    }

    /// Destroy the catch without scoring it and stop the arm. Returns the
    /// number of debris lost.
    pub fn drop_catch(&mut self, debris: &mut Vec<Debris>) -> u32 {
        let lost = self.collect_all(debris);
        let pos = self.pos;
        self.reset(pos);
        lost
    }

    /// Per-tick update: follow the ship, move the arm, drag the catch and
    /// bank it when the arm is home. Returns the number of debris collected.
    pub fn update(&mut self, pos: Vec2, debris: &mut Vec<Debris>) -> u32 {
        self.pos = pos;
        let returned = self.advance_extension(self.extension_speed);
        self.drag_caught(debris);
        if returned {
            return self.collect_all(debris);
        }
        0
    }
}
