//! Audio cue service
//!
//! The simulation never plays sound itself. It queues fire-and-forget cues on
//! an `AudioManager` it is handed, and the playback layer drains them once per
//! frame.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Grabber launched
    ArmExtend,
    /// Grabber claimed a piece of debris
    DebrisCaught,
    /// Grabber brought debris home
    DebrisCollected,
    /// Ship destroyed
    Explosion,
    /// Laser telegraph started
    LaserWarning,
    /// Laser beam went live
    LaserFire,
    /// Upgrade bought
    PurchaseSuccess,
    /// Upgrade rejected (maxed or too expensive)
    PurchaseFailure,
    /// Menu navigation
    Button,
}

impl SoundCue {
    /// Asset name for the playback layer
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::ArmExtend => "extend_arm",
            SoundCue::DebrisCaught => "catch",
            SoundCue::DebrisCollected => "collect",
            SoundCue::Explosion => "explosion",
            SoundCue::LaserWarning => "warning",
            SoundCue::LaserFire => "laser",
            SoundCue::PurchaseSuccess => "button",
            SoundCue::PurchaseFailure => "wrong_button",
            SoundCue::Button => "button",
        }
    }
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Menu,
    Game,
}

impl MusicTrack {
    pub fn name(self) -> &'static str {
        match self {
            MusicTrack::Menu => "menu_music",
            MusicTrack::Game => "game_music",
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    music_enabled: bool,
    muted: bool,
    track: Option<MusicTrack>,
    pending: Vec<SoundCue>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_enabled: true,
            muted: false,
            track: None,
            pending: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_music_enabled(settings.music_enabled);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted || !self.music_enabled {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Queue a cue; dropped when effects are silent
    pub fn play(&mut self, cue: SoundCue) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.pending.push(cue);
    }

    /// Take every cue queued since the last drain
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.pending)
    }

    /// Select the background track (no-op when unchanged)
    pub fn set_track(&mut self, track: MusicTrack) {
        if self.track != Some(track) {
            log::debug!("Music track -> {}", track.name());
            self.track = Some(track);
        }
    }

    /// Track that should be audible right now
    pub fn current_track(&self) -> Option<MusicTrack> {
        if self.music_enabled { self.track } else { None }
    }
}
