//! Galactic Salvage headless runner
//!
//! Plays the simulation with the autopilot for soak runs: after each death it
//! returns to the menu, spends banked points in the shop and starts again.
//! Progress is written to the save file whenever the session asks for it.
//!
//! Usage:
//!   RUST_LOG=info galactic-salvage --seed 7 --frames 36000

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use galactic_salvage::sim::{Command, GameState, SessionPhase, TickInput, apply_command, tick};
use galactic_salvage::{AudioManager, SaveData, Settings, Tuning};

#[derive(Parser)]
#[command(name = "galactic-salvage")]
#[command(about = "Run Galactic Salvage headless under the autopilot")]
struct Args {
    /// Session seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Frames to simulate at 60 Hz
    #[arg(long, default_value_t = 36_000)]
    frames: u64,
    /// Save file holding banked points and upgrade tiers
    #[arg(long, default_value = "galactic_salvage_save.json")]
    save: PathBuf,
    /// JSON balance overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON player preferences
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// Menu-side choices the autopilot makes between runs
#[derive(Default)]
struct MenuPilot {
    shopped: bool,
    runs: u32,
    purchases: u32,
}

impl MenuPilot {
    fn next_command(&mut self, state: &GameState) -> Option<Command> {
        match state.phase {
            SessionPhase::MainMenu if !self.shopped => {
                self.shopped = true;
                Some(Command::OpenShop)
            }
            SessionPhase::MainMenu => {
                self.shopped = false;
                self.runs += 1;
                Some(Command::StartGame)
            }
            SessionPhase::UpgradeShop => {
                let cheapest = state
                    .upgrades
                    .offer_entries(&state.offer)
                    .into_iter()
                    .filter_map(|card| card.next_cost.map(|cost| (cost, card.kind)))
                    .filter(|&(cost, _)| cost <= state.points)
                    .min();
                match cheapest {
                    Some((_, kind)) => {
                        self.purchases += 1;
                        Some(Command::Buy(kind))
                    }
                    None => Some(Command::CloseShop),
                }
            }
            SessionPhase::Playing if state.ship.dead => Some(Command::ReturnToMenu),
            SessionPhase::Playing => None,
        }
    }
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    match path {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display())),
        None => Ok(Tuning::default()),
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!("Galactic Salvage (headless) starting with seed {}", seed);

    let save = SaveData::load_or_default(&args.save);
    let mut tuning = load_tuning(args.tuning.as_deref())?;
    let settings = load_settings(args.settings.as_deref())?;
    tuning.lasers_enabled &= settings.lasers_enabled;

    let mut audio = AudioManager::from_settings(&settings);
    let mut state = GameState::new(seed, tuning, &save);
    let mut pilot = MenuPilot::default();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..args.frames {
        if let Some(command) = pilot.next_command(&state) {
            apply_command(&mut state, command, &mut audio);
        }
        tick(&mut state, &input, &mut audio);

        // No playback backend here; drop the frame's cues
        audio.drain_cues();
        if let Some(data) = state.take_save_request() {
            data.save(&args.save)
                .with_context(|| format!("failed to write save {}", args.save.display()))?;
        }
    }

    // Bank whatever the last run collected before exiting
    if state.phase == SessionPhase::Playing {
        apply_command(&mut state, Command::ReturnToMenu, &mut audio);
    }
    if let Some(data) = state.take_save_request() {
        data.save(&args.save)
            .with_context(|| format!("failed to write save {}", args.save.display()))?;
    }

    println!("=== SESSION SUMMARY ===");
    println!("  Seed:        {}", seed);
    println!("  Frames:      {}", args.frames);
    println!("  Runs:        {}", pilot.runs);
    println!("  Deaths:      {}", state.deaths);
    println!("  Collections: {}", state.debris_collected);
    println!("  Purchases:   {}", pilot.purchases);
    println!("  Points:      {}", state.points);
    for (key, tier) in state.upgrades.to_tiers() {
        println!("  {:<16} tier {}", key, tier);
    }
    Ok(())
}
