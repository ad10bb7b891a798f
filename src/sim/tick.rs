//! Fixed timestep simulation tick
//!
//! Advances the session by one 60 Hz frame. Screen transitions arrive as
//! discrete `Command`s; held controls arrive as `TickInput`.

use glam::Vec2;

use super::schedule::TimerEvent;
use super::state::{GameState, SessionPhase};
use crate::audio::{AudioManager, SoundCue};
use crate::upgrade::UpgradeKind;
use crate::{bearing_degrees, normalize_degrees};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held rotation in [-1, 1], scaled by the ship's rotation speed
    pub rotate: f32,
    /// Thrust held
    pub thrust: bool,
    /// Brake held (needs the brake upgrade)
    pub brake: bool,
    /// Launch the grabber (edge-triggered on press)
    pub extend: bool,
    /// Pointer position for grabber aim; `None` aims along the nose
    pub pointer: Option<Vec2>,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

/// Screen-level requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    OpenShop,
    CloseShop,
    /// Buy the next tier of an upgrade on the current offer
    Buy(UpgradeKind),
    RerollOffer,
    /// New run after the ship was destroyed
    Restart,
    ReturnToMenu,
}

/// Apply a screen-level request. Returns false when the request does not
/// fit the current phase or a purchase is refused.
pub fn apply_command(state: &mut GameState, command: Command, audio: &mut AudioManager) -> bool {
    let accepted = match (state.phase, command) {
        (SessionPhase::MainMenu, Command::StartGame) => {
            state.phase = SessionPhase::Playing;
            state.start_run();
            audio.play(SoundCue::Button);
            true
        }
        (SessionPhase::MainMenu, Command::OpenShop) => {
            state.phase = SessionPhase::UpgradeShop;
            state.refresh_offer();
            audio.play(SoundCue::Button);
            true
        }
        (SessionPhase::UpgradeShop, Command::CloseShop) => {
            state.phase = SessionPhase::MainMenu;
            audio.play(SoundCue::Button);
            true
        }
        (SessionPhase::UpgradeShop, Command::Buy(kind)) => buy(state, kind, audio),
        (SessionPhase::UpgradeShop, Command::RerollOffer) => {
            state.refresh_offer();
            audio.play(SoundCue::Button);
            true
        }
        (SessionPhase::Playing, Command::Restart) if state.ship.dead => {
            state.start_run();
            state.request_save();
            log::info!("Restarted after death");
            true
        }
        (SessionPhase::Playing, Command::ReturnToMenu) => {
            // Abandoning a live run still banks what was collected
            if !state.ship.dead {
                state.bank_run();
            }
            state.end_run();
            state.phase = SessionPhase::MainMenu;
            audio.play(SoundCue::Button);
            true
        }
        (phase, command) => {
            log::debug!("Ignoring {:?} in {:?}", command, phase);
            false
        }
    };
    audio.set_track(state.phase.music());
    accepted
}

fn buy(state: &mut GameState, kind: UpgradeKind, audio: &mut AudioManager) -> bool {
    if !state.offer.contains(&kind) {
        audio.play(SoundCue::PurchaseFailure);
        return false;
    }
    let cost = state.upgrades.try_buy(kind, state.points);
    if cost == 0 {
        audio.play(SoundCue::PurchaseFailure);
        return false;
    }
    state.points -= cost;
    state.apply_upgrades();
    state.refresh_offer();
    state.request_save();
    audio.play(SoundCue::PurchaseSuccess);
    log::info!(
        "Bought {} tier {} for {} ({} points left)",
        kind.label(),
        state.upgrades.tier(kind),
        cost,
        state.points
    );
    true
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut AudioManager) {
    audio.set_track(state.phase.music());
    if state.phase != SessionPhase::Playing {
        return;
    }

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    run_timers(state, audio);

    let was_alive = !state.ship.dead;
    let bounds = state.bounds;

    if was_alive {
        let ship = &mut state.ship;
        ship.thrusting = false;
        if input.rotate != 0.0 {
            ship.rotate(input.rotate.clamp(-1.0, 1.0));
        }
        if input.thrust {
            ship.accelerate();
        }
        if input.brake {
            ship.slow_down();
        }

        match input.pointer {
            Some(target) => ship.grabber.aim_at(target),
            None => ship.grabber.aim = ship.nose_direction(),
        }
        if input.extend && ship.grabber.extend() {
            audio.play(SoundCue::ArmExtend);
        }

        let collected = ship.update(bounds, &mut state.debris, audio);
        if collected > 0 {
            state.debris_collected += u64::from(collected);
            state.run_points += u64::from(collected) * state.tuning.debris_points;
            audio.play(SoundCue::DebrisCollected);
        }
    }

    for meteorite in &mut state.meteorites {
        meteorite.advance(1.0);
    }
    state.meteorites.retain(|m| !m.is_out_of_play(bounds));
    for debris in &mut state.debris {
        debris.advance(1.0);
    }
    state.debris.retain(|d| !d.is_out_of_play(bounds));

    if !state.ship.dead {
        if state.ship.grabber.check_collect(&mut state.debris) > 0 {
            audio.play(SoundCue::DebrisCaught);
        }
        if state.ship.check_collision(&state.meteorites) {
            state.ship.get_hit(audio);
        }
    }

    if !state.ship.dead && state.laser.is_active() {
        let horizontal = state.laser.horizontal_kill_rect();
        let vertical = state.laser.vertical_kill_rect();
        let hit = state
            .laser
            .axes()
            .into_iter()
            .any(|axis| state.ship.check_kill_collision(horizontal, vertical, axis));
        if hit {
            state.ship.die(audio);
        }
    }

    if was_alive && state.ship.dead {
        state.deaths += 1;
        state.ship.grabber.drop_catch(&mut state.debris);
        state.bank_run();
    }
}

/// Fire every timer due this tick and re-arm the repeating ones
fn run_timers(state: &mut GameState, audio: &mut AudioManager) {
    let now = state.time_ticks;
    while let Some(event) = state.scheduler.pop_due(now) {
        match event {
            TimerEvent::SpawnMeteorite => {
                state.spawn_meteorite();
                if let Some(interval) = state.tuning.meteorite_interval() {
                    state.scheduler.schedule_in(now, interval, event);
                }
            }
            TimerEvent::SpawnDebris => {
                state.spawn_debris();
                if let Some(interval) = state.tuning.debris_interval() {
                    state.scheduler.schedule_in(now, interval, event);
                }
            }
            TimerEvent::LaserWarning => {
                if !state.tuning.lasers_enabled {
                    continue;
                }
                state.laser.warning_fire(&mut state.rng);
                audio.play(SoundCue::LaserWarning);
                let warning = state.tuning.laser_warning();
                let active = state.tuning.laser_active();
                // The next telegraph starts after this cycle has finished
                let cycle = state.tuning.laser_interval().max(warning + active + 1);
                state.scheduler.schedule_in(now, warning, TimerEvent::LaserFire);
                state.scheduler.schedule_in(now, cycle, TimerEvent::LaserWarning);
            }
            TimerEvent::LaserFire => {
                state.laser.warning_timer();
                audio.play(SoundCue::LaserFire);
                log::debug!("Laser live: {:?}", state.laser.axes());
                state
                    .scheduler
                    .schedule_in(now, state.tuning.laser_active(), TimerEvent::LaserCooldown);
            }
            TimerEvent::LaserCooldown => {
                state.laser.active_timer();
                log::debug!("Laser idle after {} shots", state.laser.all_laser);
            }
        }
    }
}

/// Demo pilot: hold near the middle of the field and fish for the closest
/// free debris
pub fn autopilot_input(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let mut input = TickInput::default();
    if ship.dead {
        return input;
    }

    let center = state.bounds.center();
    let to_center = ship.pos.distance(center);
    let wanted = if to_center > 150.0 {
        bearing_degrees(ship.pos, center)
    } else {
        // Facing along the velocity lets thrust cancel it
        bearing_degrees(Vec2::ZERO, ship.velocity)
    };
    let error = normalize_degrees(wanted - ship.nose_direction() + 180.0) - 180.0;
    let step = ship.rotation_speed.max(f32::EPSILON);
    input.rotate = (error / step).clamp(-1.0, 1.0);
    let facing = error.abs() < 20.0;
    if to_center > 150.0 {
        input.thrust = facing;
    } else if ship.can_slow_down {
        input.brake = true;
    } else {
        input.thrust = facing && ship.velocity.length() > 0.5;
    }

    let reach = ship.grabber.max_length + ship.grabber.collect_radius;
    let target = state
        .debris
        .iter()
        .filter(|d| !d.caught && state.bounds.contains(d.pos))
        .min_by(|a, b| {
            a.pos
                .distance_squared(ship.pos)
                .partial_cmp(&b.pos.distance_squared(ship.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(debris) = target {
        input.pointer = Some(debris.pos);
        input.extend = ship.grabber.is_stopped() && debris.pos.distance(ship.pos) < reach;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MusicTrack;
    use crate::persistence::SaveData;
    use crate::sim::hazard::{Debris, Meteorite};
    use crate::sim::laser::{LaserAxis, LaserPhase};
    use crate::tuning::Tuning;

    /// No spawn timers; the laser only when asked for
    fn quiet_tuning(lasers: bool) -> Tuning {
        Tuning {
            meteorite_spawn_rate: 0.0,
            debris_spawn_rate: 0.0,
            lasers_enabled: lasers,
            ..Tuning::default()
        }
    }

    /// A started run with the opening hazards cleared away
    fn playing(tuning: Tuning, audio: &mut AudioManager) -> GameState {
        let mut state = GameState::new(12345, tuning, &SaveData::default());
        assert!(apply_command(&mut state, Command::StartGame, audio));
        state.meteorites.clear();
        state.debris.clear();
        audio.drain_cues();
        state
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut audio = AudioManager::new();
        let mut state = GameState::new(1, Tuning::default(), &SaveData::default());
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.phase, SessionPhase::MainMenu);
        assert_eq!(state.time_ticks, 0);

        assert!(apply_command(&mut state, Command::StartGame, &mut audio));
        assert_eq!(state.phase, SessionPhase::Playing);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.time_ticks, 1);
        assert_eq!(audio.current_track(), Some(MusicTrack::Game));
    }

    #[test]
    fn test_invalid_commands_are_ignored() {
        let mut audio = AudioManager::new();
        let mut state = GameState::new(1, Tuning::default(), &SaveData::default());
        assert!(!apply_command(&mut state, Command::Restart, &mut audio));
        assert!(!apply_command(&mut state, Command::CloseShop, &mut audio));
        assert_eq!(state.phase, SessionPhase::MainMenu);

        apply_command(&mut state, Command::StartGame, &mut audio);
        // Restart only after death
        assert!(!apply_command(&mut state, Command::Restart, &mut audio));
    }

    #[test]
    fn test_grabber_collects_debris_for_points() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        // Ship sits at the field center nose-up; debris hangs 100 units above
        let ship_pos = state.ship.pos;
        let id = state.next_entity_id();
        state
            .debris
            .push(Debris::new(id, ship_pos - Vec2::new(0.0, 100.0), 0.0, 0.0));

        let launch = TickInput {
            extend: true,
            ..Default::default()
        };
        tick(&mut state, &launch, &mut audio);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), &mut audio);
        }

        assert!(state.ship.grabber.is_stopped());
        assert!(state.debris.is_empty());
        assert_eq!(state.run_points, 10);
        assert_eq!(state.debris_collected, 1);
        let cues = audio.drain_cues();
        assert!(cues.contains(&SoundCue::ArmExtend));
        assert!(cues.contains(&SoundCue::DebrisCaught));
        assert!(cues.contains(&SoundCue::DebrisCollected));
    }

    #[test]
    fn test_meteorite_kill_banks_run() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        state.run_points = 20;
        let id = state.next_entity_id();
        state
            .meteorites
            .push(Meteorite::new(id, state.ship.pos, 0.0, 0.0, 50.0));

        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(state.ship.dead);
        assert_eq!(state.points, 20);
        assert_eq!(state.last_run_points, 20);
        assert_eq!(state.run_points, 0);
        assert_eq!(state.take_save_request().map(|s| s.points), Some(20));
        assert!(audio.drain_cues().contains(&SoundCue::Explosion));

        // Staying dead does not bank twice
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.points, 20);
    }

    #[test]
    fn test_shield_absorbs_meteorite() {
        let mut audio = AudioManager::new();
        let mut state = GameState::new(7, quiet_tuning(false), &SaveData::default());
        state.upgrades.set_tier(UpgradeKind::Shield, 1);
        state.apply_upgrades();
        apply_command(&mut state, Command::StartGame, &mut audio);
        state.meteorites.clear();
        state.debris.clear();

        let id = state.next_entity_id();
        let below = state.ship.pos + Vec2::new(0.0, 100.0);
        state.meteorites.push(Meteorite::new(id, below, 0.0, 0.0, 50.0));

        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(!state.ship.dead);
        assert_eq!(state.ship.shield, 0);
        assert!(state.ship.shield_flash > 0);
    }

    #[test]
    fn test_leaving_field_is_fatal() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        state.ship.pos = Vec2::new(-5.0, 450.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(state.ship.dead);
    }

    #[test]
    fn test_laser_cycle_from_timers() {
        let mut audio = AudioManager::new();
        let tuning = quiet_tuning(true);
        let interval = tuning.laser_interval();
        let warning = tuning.laser_warning();
        let active = tuning.laser_active();
        let mut state = playing(tuning, &mut audio);

        for _ in 0..interval - 1 {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert_eq!(state.laser.phase, LaserPhase::Idle);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(state.laser.show_warning());
        assert!(audio.drain_cues().contains(&SoundCue::LaserWarning));

        for _ in 0..warning {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert!(state.laser.is_active());
        assert!(audio.drain_cues().contains(&SoundCue::LaserFire));

        for _ in 0..active {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert_eq!(state.laser.phase, LaserPhase::Idle);
        assert_eq!(state.laser.all_laser, 1);
    }

    /// Park a beam of the given phase with the ship at its start pose
    /// (heading 0, hull corners at y = 390 / 510 and x = 764 / 836)
    fn beam_over_ship(
        state: &mut GameState,
        phase: LaserPhase,
        axis: LaserAxis,
        two_laser: bool,
        row: f32,
        column: f32,
    ) {
        state.laser.phase = phase;
        state.laser.axis = axis;
        state.laser.two_laser = two_laser;
        state.laser.placement.row = row;
        state.laser.placement.column = column;
    }

    #[test]
    fn test_laser_warning_is_harmless() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        beam_over_ship(&mut state, LaserPhase::Warning, LaserAxis::Horizontal, true, 390.0, 764.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(!state.ship.dead);
        assert_eq!(state.deaths, 0);
    }

    #[test]
    fn test_active_beam_kills_and_banks() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        state.run_points = 10;
        // Band y in [380, 450] covers the two top corners
        beam_over_ship(&mut state, LaserPhase::Active, LaserAxis::Horizontal, false, 390.0, 100.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(state.ship.dead);
        assert_eq!(state.deaths, 1);
        assert_eq!(state.points, 10);
        assert_eq!(state.run_points, 0);
        assert!(audio.drain_cues().contains(&SoundCue::Explosion));
    }

    #[test]
    fn test_session_counters_ignore_mute() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        let mut state = playing(quiet_tuning(false), &mut audio);
        beam_over_ship(&mut state, LaserPhase::Active, LaserAxis::Horizontal, false, 390.0, 100.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(audio.drain_cues().is_empty());
        assert_eq!(state.deaths, 1);

        assert!(apply_command(&mut state, Command::Restart, &mut audio));
        beam_over_ship(&mut state, LaserPhase::Active, LaserAxis::Horizontal, false, 390.0, 100.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert_eq!(state.deaths, 2);
    }

    #[test]
    fn test_beam_between_corners_misses() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        // Band y in [420, 490] crosses the hull but holds no corner
        beam_over_ship(&mut state, LaserPhase::Active, LaserAxis::Horizontal, false, 430.0, 100.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(!state.ship.dead);
    }

    #[test]
    fn test_second_beam_kills() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        // Primary horizontal band is far above; the vertical band x in [754, 824]
        // covers the left corners
        beam_over_ship(&mut state, LaserPhase::Active, LaserAxis::Horizontal, false, 100.0, 764.0);
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(!state.ship.dead);

        state.laser.two_laser = true;
        tick(&mut state, &TickInput::default(), &mut audio);
        assert!(state.ship.dead);
    }

    #[test]
    fn test_death_discards_caught_debris() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        let id = state.next_entity_id();
        let above = state.ship.pos - Vec2::new(0.0, 100.0);
        state.debris.push(Debris::new(id, above, 0.0, 0.0));

        let launch = TickInput {
            extend: true,
            ..Default::default()
        };
        tick(&mut state, &launch, &mut audio);
        for _ in 0..30 {
            if !state.ship.grabber.caught().is_empty() {
                break;
            }
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert_eq!(state.ship.grabber.caught(), &[id]);

        let id = state.next_entity_id();
        state
            .meteorites
            .push(Meteorite::new(id, state.ship.pos, 0.0, 0.0, 50.0));
        tick(&mut state, &TickInput::default(), &mut audio);

        assert!(state.ship.dead);
        assert!(state.ship.grabber.is_stopped());
        assert!(state.ship.grabber.caught().is_empty());
        assert!(state.debris.is_empty());
        assert_eq!(state.debris_collected, 0);
        assert_eq!(state.points, 0);
        assert!(state.snapshot().debris.is_empty());
    }

    #[test]
    fn test_second_beam_joins_after_threshold() {
        let mut audio = AudioManager::new();
        let tuning = Tuning {
            two_laser_threshold: 1,
            ..quiet_tuning(true)
        };
        let interval = tuning.laser_interval();
        let mut state = playing(tuning, &mut audio);

        for _ in 0..interval {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert!(state.laser.show_warning());
        assert!(!state.laser.two_laser);

        for _ in 0..interval {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert!(state.laser.show_warning());
        assert!(state.laser.two_laser);
        assert_eq!(state.laser.axes().len(), 2);
    }

    #[test]
    fn test_timers_spawn_hazards() {
        let mut audio = AudioManager::new();
        let tuning = Tuning {
            lasers_enabled: false,
            ..Tuning::default()
        };
        let meteorite_every = tuning.meteorite_interval().unwrap_or(0);
        let mut state = playing(tuning, &mut audio);
        for _ in 0..meteorite_every {
            tick(&mut state, &TickInput::default(), &mut audio);
        }
        assert_eq!(state.meteorites.len(), 1);
        assert!(state.scheduler.is_pending(TimerEvent::SpawnMeteorite));
    }

    #[test]
    fn test_purchase_flow() {
        let mut audio = AudioManager::new();
        let save = SaveData {
            points: 1000,
            ..SaveData::default()
        };
        let mut state = GameState::new(3, Tuning::default(), &save);
        assert!(apply_command(&mut state, Command::OpenShop, &mut audio));
        assert_eq!(state.offer.len(), 3);
        audio.drain_cues();

        let kind = state.offer[0];
        let cost = state.upgrades.next_cost(kind).unwrap_or(0);
        assert!(apply_command(&mut state, Command::Buy(kind), &mut audio));
        assert_eq!(state.points, 1000 - cost);
        assert_eq!(state.upgrades.tier(kind), 1);
        assert_eq!(audio.drain_cues(), vec![SoundCue::PurchaseSuccess]);
        let saved = state.take_save_request().expect("purchase requests a save");
        assert_eq!(saved.upgrades.get(kind.key()), Some(&1));
    }

    #[test]
    fn test_purchase_refused() {
        let mut audio = AudioManager::new();
        let mut state = GameState::new(3, Tuning::default(), &SaveData::default());
        apply_command(&mut state, Command::OpenShop, &mut audio);
        audio.drain_cues();

        let kind = state.offer[0];
        assert!(!apply_command(&mut state, Command::Buy(kind), &mut audio));
        assert_eq!(state.upgrades.tier(kind), 0);
        assert_eq!(audio.drain_cues(), vec![SoundCue::PurchaseFailure]);
        assert!(state.take_save_request().is_none());

        let off_offer = UpgradeKind::ALL
            .into_iter()
            .find(|k| !state.offer.contains(k))
            .expect("more kinds than offer slots");
        state.points = 10_000;
        assert!(!apply_command(&mut state, Command::Buy(off_offer), &mut audio));
    }

    #[test]
    fn test_restart_resets_run() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(true), &mut audio);
        state.laser.all_laser = 12;
        state.ship.die(&mut audio);
        state.take_save_request();

        assert!(apply_command(&mut state, Command::Restart, &mut audio));
        assert!(!state.ship.dead);
        assert_eq!(state.ship.pos, state.ship.start_pos);
        assert_eq!(state.laser.all_laser, 0);
        assert_eq!(state.run_points, 0);
        assert_eq!(state.meteorites.len(), 1);
        assert!(state.take_save_request().is_some());
    }

    #[test]
    fn test_return_to_menu_banks_live_run() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(true), &mut audio);
        state.run_points = 30;
        assert!(apply_command(&mut state, Command::ReturnToMenu, &mut audio));
        assert_eq!(state.phase, SessionPhase::MainMenu);
        assert_eq!(state.points, 30);
        assert!(state.scheduler.is_empty());
        assert_eq!(audio.current_track(), Some(MusicTrack::Menu));
    }

    #[test]
    fn test_pointer_aim_commits_on_extend() {
        let mut audio = AudioManager::new();
        let mut state = playing(quiet_tuning(false), &mut audio);
        let right = state.ship.pos + Vec2::new(200.0, 0.0);
        let input = TickInput {
            pointer: Some(right),
            extend: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut audio);
        assert!((state.ship.grabber.direction - 90.0).abs() < 1e-3);

        // Moving the pointer mid-cycle does not steer the arm
        let input = TickInput {
            pointer: Some(state.ship.pos + Vec2::new(0.0, 200.0)),
            ..Default::default()
        };
        tick(&mut state, &input, &mut audio);
        assert!((state.ship.grabber.direction - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut audio1 = AudioManager::new();
        let mut audio2 = AudioManager::new();
        let mut state1 = GameState::new(99999, Tuning::default(), &SaveData::default());
        let mut state2 = GameState::new(99999, Tuning::default(), &SaveData::default());
        apply_command(&mut state1, Command::StartGame, &mut audio1);
        apply_command(&mut state2, Command::StartGame, &mut audio2);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..900 {
            tick(&mut state1, &input, &mut audio1);
            tick(&mut state2, &input, &mut audio2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ship.pos, state2.ship.pos);
        assert_eq!(state1.ship.dead, state2.ship.dead);
        assert_eq!(state1.meteorites.len(), state2.meteorites.len());
        assert_eq!(state1.debris.len(), state2.debris.len());
        assert_eq!(state1.run_points, state2.run_points);
        assert_eq!(state1.points, state2.points);
        assert_eq!(audio1.drain_cues(), audio2.drain_cues());
    }
}
