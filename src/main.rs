//! Wabbit Jump headless runner
//!
//! Drives the simulation at 60 Hz timestamps with an autopilot tapping for
//! the player, feeds contacts from the built-in tracker, restarts once after
//! the first game over and reports the scores.
//!
//! Usage: `wabbit-jump [tuning.json]`, with `WABBIT_SEED` and
//! `WABBIT_FRAMES` read from the environment.

use anyhow::{Context, Result};

use wabbit_jump::game::LogSink;
use wabbit_jump::sim::{ContactOutcome, ContactTracker, GamePhase, SceneGraph, Simulation};
use wabbit_jump::{Game, Tuning};

const DEFAULT_FRAMES: u64 = 60 * 60;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} must be a number, got `{value}`")),
        Err(_) => Ok(default),
    }
}

/// Tap when the hero sinks below the centre of the next gap
fn autopilot_wants_tap(sim: &Simulation) -> bool {
    let hero = &sim.hero;
    let next_gap = sim
        .obstacles
        .obstacles()
        .iter()
        .map(|o| sim.obstacles.scene_pos(o))
        .filter(|p| p.x + sim.obstacles.template.half_width() >= hero.pos.x - hero.radius)
        .min_by(|a, b| a.x.total_cmp(&b.x));

    let target_y = match next_gap {
        Some(gap) => gap.y - sim.obstacles.template.gap / 4.0,
        None => sim.hero.pos.y.max(300.0),
    };
    hero.pos.y < target_y && hero.vel.y <= 0.0
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Wabbit Jump (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).with_context(|| format!("loading tuning from {path}"))?,
        None => Tuning::default(),
    };
    let seed = env_or("WABBIT_SEED", 0x5eed_u64)?;
    let frames = env_or("WABBIT_FRAMES", DEFAULT_FRAMES)?;

    let graph = SceneGraph::standard(&tuning);
    let mut game = Game::new(&graph, tuning, seed, LogSink).context("building scene")?;
    let mut tracker = ContactTracker::new();
    let frame_time = game.tuning().fixed_delta;
    let mut scores = Vec::new();

    for frame in 0..frames {
        let timestamp = frame as f64 * frame_time;

        if game.phase() == GamePhase::Active && autopilot_wants_tap(game.simulation()) {
            game.on_tap();
        }
        game.update(timestamp);

        for contact in tracker.detect(game.simulation()) {
            if game.on_contact(&contact.a, &contact.b) == ContactOutcome::GameOver {
                scores.push(game.score());
                for effect in game.drain_effects() {
                    log::debug!("Effect: {:?}", effect);
                }
            }
        }

        if game.phase() == GamePhase::Ended && game.restarts() == 0 {
            game.on_restart_selected();
            tracker.reset();
        }
    }

    if game.phase() == GamePhase::Active {
        scores.push(game.score());
    }

    println!(
        "Ran {} frames over {} run(s); scores: {:?}",
        frames,
        game.restarts() + 1,
        scores
    );
    Ok(())
}
