//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or audio backend dependencies; sound goes out as cues

pub mod collision;
pub mod grabber;
pub mod hazard;
pub mod laser;
pub mod schedule;
pub mod ship;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_circle_collision, rect_circle_collision, segment_intersection};
pub use grabber::{Grabber, GrabberState};
pub use hazard::{Debris, Meteorite};
pub use laser::{Laser, LaserAxis, LaserPhase, LaserTheme};
pub use schedule::{Scheduler, TimerEvent};
pub use ship::Ship;
pub use snapshot::FrameSnapshot;
pub use spawn::Bounds;
pub use state::{GameState, SessionPhase};
pub use tick::{Command, TickInput, apply_command, autopilot_input, tick};
