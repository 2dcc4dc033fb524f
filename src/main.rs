//! The Looker headless driver
//!
//! Plays the built-in levels at the fixed tick rate with a wandering,
//! seeded pointer standing in for the mouse, then prints a JSON summary.
//!
//! Usage: `looker [seed]`. Set `LOOKER_SETTINGS` to a JSON file to override
//! tuning, and `RUST_LOG` to control log output.

use std::error::Error;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use looker::Settings;
use looker::audio::{LogSink, drain_events};
use looker::sim::{Campaign, CampaignStats, Frame, GameEvent, LevelLayout, LevelState, TickInput};

const DEFAULT_SEED: u64 = 1987;
/// Give up after this many simulated seconds
const MAX_SECONDS: u32 = 180;
/// How far the pointer strays from where it is heading
const POINTER_JITTER: f32 = 60.0;

#[derive(Serialize)]
struct Summary {
    seed: u64,
    finished: bool,
    level: String,
    level_index: usize,
    elapsed_secs: f32,
    stats: CampaignStats,
    avatar: Vec2,
    dragons: Vec<Vec2>,
    doors_locked: Vec<(u32, bool)>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_SEED,
    };
    let settings = match std::env::var("LOOKER_SETTINGS") {
        Ok(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
        Err(_) => Settings::default(),
    };
    log::info!("The Looker (headless) starting with seed {seed}");

    let frame = Frame::new(40.0, 40.0, 1200.0, 640.0);
    let mut campaign = Campaign::new(builtin_levels(), frame, settings.clone())?;
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut audio = LogSink::new();

    let max_ticks = u64::from(MAX_SECONDS) * u64::from(settings.tick_rate);
    while !campaign.is_finished() && campaign.stats.ticks < max_ticks {
        let goal = next_goal(campaign.level());
        let jitter = Vec2::new(
            rng.random_range(-POINTER_JITTER..POINTER_JITTER),
            rng.random_range(-POINTER_JITTER..POINTER_JITTER),
        );
        let events = campaign.tick(&TickInput::pointer(goal + jitter));

        for event in &events {
            match event {
                GameEvent::LevelAdvanced { index } => log::info!(
                    "Entering level {} of {}: {}",
                    index + 1,
                    campaign.level_count(),
                    campaign.level().name()
                ),
                other => log::debug!("{other:?}"),
            }
        }
        drain_events(&events, &mut audio);
    }

    if !campaign.is_finished() {
        log::warn!("Gave up after {MAX_SECONDS}s in '{}'", campaign.level().name());
    }

    let level = campaign.level();
    let summary = Summary {
        seed,
        finished: campaign.is_finished(),
        level: level.name().to_owned(),
        level_index: campaign.level_index(),
        elapsed_secs: campaign.elapsed_secs(),
        stats: campaign.stats,
        avatar: level.avatar.pos,
        dragons: level.dragons.iter().map(|d| d.pos).collect(),
        doors_locked: level.doors.iter().map(|d| (d.id, d.locked)).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Head for the nearest key that still opens something, otherwise the exit
fn next_goal(level: &LevelState) -> Vec2 {
    let avatar = level.avatar.pos;
    level
        .keys
        .iter()
        .filter(|k| !k.collected && level.doors.iter().any(|d| d.id == k.id && d.locked))
        .map(|k| k.pos)
        .min_by(|a, b| avatar.distance(*a).total_cmp(&avatar.distance(*b)))
        .unwrap_or(level.exit)
}

fn builtin_levels() -> Vec<LevelLayout> {
    vec![
        LevelLayout::new("The Entrance", 40.0, [0.1, 0.5], [0.9, 0.5])
            .with_wall([0.5, 0.0, 0.5, 0.35])
            .with_wall([0.5, 0.65, 0.5, 1.0]),
        LevelLayout::new("The Locked Gate", 40.0, [0.1, 0.2], [0.9, 0.8])
            .with_wall([0.6, 0.0, 0.6, 0.6])
            .with_wall([0.6, 0.6, 1.0, 0.6])
            .with_key(1, [0.3, 0.8])
            .with_door(1, [0.6, 0.6, 0.6, 1.0]),
        LevelLayout::new("The Dragon's Den", 40.0, [0.05, 0.5], [0.95, 0.5])
            .with_wall([0.35, 0.2, 0.35, 0.8])
            .with_wall([0.65, 0.0, 0.65, 0.3])
            .with_wall([0.65, 0.7, 0.65, 1.0])
            .with_key(7, [0.5, 0.9])
            .with_door(7, [0.8, 0.0, 0.8, 1.0])
            .with_dragon([0.9, 0.1]),
    ]
}
