//! Sweeping laser hazard
//!
//! Phases are advanced by scheduler events owned by the session, not by the
//! laser itself: warning (telegraph, harmless) -> active (lethal) -> idle.
//! After enough completed shots a second, perpendicular beam joins in.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawn::Bounds;

/// Completed activations before the second beam joins
pub const TWO_LASER_THRESHOLD: u32 = 10;

/// Thickness of the lethal band
pub const KILL_THICKNESS: f32 = 70.0;
/// The lethal band starts this far before the beam origin
pub const KILL_OFFSET: f32 = 10.0;
/// Distance of the warning markers from the field edge
pub const WARNING_EDGE_OFFSET: f32 = 25.0;
/// Warning marker sprite extent, used to mirror markers onto the far edge
pub const WARNING_MARKER_SIZE: f32 = 100.0;

/// Beam orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserAxis {
    /// Spans the field left to right at a fixed y
    Horizontal = 1,
    /// Spans the field top to bottom at a fixed x
    Vertical = 2,
}

impl LaserAxis {
    pub fn perpendicular(self) -> Self {
        match self {
            LaserAxis::Horizontal => LaserAxis::Vertical,
            LaserAxis::Vertical => LaserAxis::Horizontal,
        }
    }
}

/// Beam palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaserTheme {
    #[default]
    Violet,
    Crimson,
    Emerald,
    Azure,
}

impl LaserTheme {
    pub const ALL: [LaserTheme; 4] = [
        LaserTheme::Violet,
        LaserTheme::Crimson,
        LaserTheme::Emerald,
        LaserTheme::Azure,
    ];

    /// Glow layers, outermost first
    pub fn colors(self) -> [u32; 4] {
        match self {
            LaserTheme::Violet => [0xFFFFFF, 0xF0DAFF, 0xD9A2FF, 0xB74FFF],
            LaserTheme::Crimson => [0xFFFFFF, 0xFFD6D6, 0xFF8A8A, 0xE02424],
            LaserTheme::Emerald => [0xFFFFFF, 0xD6FFE4, 0x8AF0AE, 0x1FB45A],
            LaserTheme::Azure => [0xFFFFFF, 0xD6ECFF, 0x8AC4FF, 0x2475E0],
        }
    }
}

/// Where the beams currently sit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamPlacement {
    /// y of the horizontal beam
    pub row: f32,
    /// x of the vertical beam
    pub column: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaserPhase {
    #[default]
    Idle,
    Warning,
    Active,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub phase: LaserPhase,
    /// Axis selected for the current cycle
    pub axis: LaserAxis,
    /// Both axes fire together
    pub two_laser: bool,
    pub placement: BeamPlacement,
    pub theme: LaserTheme,
    /// Completed activations this session
    pub all_laser: u32,
    /// `all_laser` count at which cycles fire both axes
    pub two_laser_threshold: u32,
    bounds: Bounds,
}

impl Laser {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            phase: LaserPhase::Idle,
            axis: LaserAxis::Horizontal,
            two_laser: false,
            placement: BeamPlacement {
                row: bounds.height / 2.0,
                column: bounds.width / 2.0,
            },
            theme: LaserTheme::default(),
            all_laser: 0,
            two_laser_threshold: TWO_LASER_THRESHOLD,
            bounds,
        }
    }

    /// Back to a fresh session: idle, counter cleared
    pub fn reset(&mut self) {
        self.phase = LaserPhase::Idle;
        self.two_laser = false;
        self.all_laser = 0;
    }

    pub fn show_warning(&self) -> bool {
        self.phase == LaserPhase::Warning
    }

    pub fn is_active(&self) -> bool {
        self.phase == LaserPhase::Active
    }

    /// Begin a telegraph: new placement, axis and theme
    pub fn warning_fire(&mut self, rng: &mut impl Rng) {
        self.two_laser = self.all_laser >= self.two_laser_threshold;
        self.axis = if rng.random_bool(0.5) {
            LaserAxis::Horizontal
        } else {
            LaserAxis::Vertical
        };
        let row_max = (self.bounds.height - 100.0).max(100.0);
        let column_max = (self.bounds.width - 100.0).max(100.0);
        self.placement = BeamPlacement {
            row: rng.random_range(100.0..=row_max),
            column: rng.random_range(100.0..=column_max),
        };
        self.theme = LaserTheme::ALL[rng.random_range(0..LaserTheme::ALL.len())];
        self.phase = LaserPhase::Warning;
        log::debug!(
            "Laser warning: axis={:?} two_laser={} placement={:?}",
            self.axis,
            self.two_laser,
            self.placement
        );
    }

    /// Warning elapsed: the beam becomes lethal
    pub fn warning_timer(&mut self) {
        if self.phase == LaserPhase::Warning {
            self.phase = LaserPhase::Active;
        }
    }

    /// Lethal window elapsed: count the shot
    pub fn active_timer(&mut self) {
        if self.phase == LaserPhase::Active {
            self.phase = LaserPhase::Idle;
            self.all_laser += 1;
        }
    }

    /// Axes taking part in the current cycle
    pub fn axes(&self) -> Vec<LaserAxis> {
        if self.two_laser {
            vec![self.axis, self.axis.perpendicular()]
        } else {
            vec![self.axis]
        }
    }

    /// Band covered by the horizontal beam
    pub fn horizontal_kill_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.placement.row - KILL_OFFSET,
            self.bounds.width,
            KILL_THICKNESS,
        )
    }

    /// Band covered by the vertical beam
    pub fn vertical_kill_rect(&self) -> Rect {
        Rect::new(
            self.placement.column - KILL_OFFSET,
            0.0,
            KILL_THICKNESS,
            self.bounds.height,
        )
    }

    pub fn kill_rect(&self, axis: LaserAxis) -> Rect {
        match axis {
            LaserAxis::Horizontal => self.horizontal_kill_rect(),
            LaserAxis::Vertical => self.vertical_kill_rect(),
        }
    }

    /// Lethal rectangles right now (empty unless active)
    pub fn active_kill_rects(&self) -> Vec<(LaserAxis, Rect)> {
        if !self.is_active() {
            return Vec::new();
        }
        self.axes()
            .into_iter()
            .map(|axis| (axis, self.kill_rect(axis)))
            .collect()
    }

    /// Warning marker anchors, one pair per participating axis
    pub fn warning_markers(&self) -> Vec<Vec2> {
        let far_x = self.bounds.width - WARNING_EDGE_OFFSET - WARNING_MARKER_SIZE;
        let far_y = self.bounds.height - WARNING_EDGE_OFFSET - WARNING_MARKER_SIZE;
        self.axes()
            .into_iter()
            .flat_map(|axis| match axis {
                LaserAxis::Horizontal => [
                    Vec2::new(far_x, self.placement.row),
                    Vec2::new(WARNING_EDGE_OFFSET, self.placement.row),
                ],
                LaserAxis::Vertical => [
                    Vec2::new(self.placement.column, far_y),
                    Vec2::new(self.placement.column, WARNING_EDGE_OFFSET),
                ],
            })
            .collect()
    }
}
