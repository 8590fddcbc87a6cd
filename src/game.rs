//! Session driver
//!
//! Sits between the host and the simulation: queues input, runs the frame
//! pipeline, pushes score changes to the display and rebuilds the whole
//! simulation when the player restarts.

use std::collections::VecDeque;

use crate::settings::Tuning;
use crate::sim::{
    Body, ContactOutcome, GameEvent, GamePhase, RestartControl, SceneEffect, SceneError,
    SceneGraph, SceneHandles, Simulation, apply_tap, resolve_contact, tick,
};

/// Write-only score display
pub trait ScoreSink {
    fn show(&mut self, text: &str);
}

/// Score display that keeps the last text it was given
#[derive(Debug, Clone, Default)]
pub struct LabelSink {
    pub text: String,
    pub updates: u32,
}

impl ScoreSink for LabelSink {
    fn show(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.updates += 1;
    }
}

/// Score display that writes to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn show(&mut self, text: &str) {
        log::info!("Score: {}", text);
    }
}

/// A play session
pub struct Game<S: ScoreSink> {
    handles: SceneHandles,
    tuning: Tuning,
    seed: u64,
    restarts: u32,
    sim: Simulation,
    events: VecDeque<GameEvent>,
    sink: S,
}

impl<S: ScoreSink> Game<S> {
    /// Resolve the scene and start the first run.
    ///
    /// Fails if any required scene node is missing.
    pub fn new(
        graph: &SceneGraph,
        tuning: Tuning,
        seed: u64,
        mut sink: S,
    ) -> Result<Self, SceneError> {
        let handles = SceneHandles::resolve(graph)?;
        let sim = Simulation::new(&handles, &tuning, seed);
        sink.show(&sim.score.to_string());
        Ok(Self {
            handles,
            tuning,
            seed,
            restarts: 0,
            sim,
            events: VecDeque::new(),
            sink,
        })
    }

    /// Host input: screen tapped
    pub fn on_tap(&mut self) {
        self.events.push_back(GameEvent::Tap);
    }

    /// Host input: restart control selected
    pub fn on_restart_selected(&mut self) {
        self.events.push_back(GameEvent::RestartRequested);
    }

    /// Host frame callback: drain queued input, then advance one frame
    pub fn update(&mut self, timestamp: f64) {
        while let Some(event) = self.events.pop_front() {
            self.handle_event(event);
        }
        tick(&mut self.sim, timestamp);
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Tap => {
                apply_tap(&mut self.sim);
            }
            GameEvent::RestartRequested => {
                if self.sim.restart == RestartControl::Active {
                    self.restart();
                } else {
                    log::debug!("Restart requested while control hidden, ignoring");
                }
            }
        }
    }

    /// Discard the current run and build a fresh one
    fn restart(&mut self) {
        self.restarts += 1;
        let seed = self.seed.wrapping_add(self.restarts as u64);
        log::info!(
            "Restarting (run {}, previous score {})",
            self.restarts + 1,
            self.sim.score
        );
        self.sim = Simulation::new(&self.handles, &self.tuning, seed);
        self.sink.show(&self.sim.score.to_string());
    }

    /// Physics engine callback: two bodies began touching
    pub fn on_contact(&mut self, a: &Body, b: &Body) -> ContactOutcome {
        let outcome = resolve_contact(&mut self.sim, a, b);
        if let ContactOutcome::Scored(score) = outcome {
            self.sink.show(&score.to_string());
        }
        outcome
    }

    pub fn drain_effects(&mut self) -> Vec<SceneEffect> {
        self.sim.drain_effects()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn phase(&self) -> GamePhase {
        self.sim.phase
    }

    pub fn score(&self) -> u32 {
        self.sim.score
    }

    /// Restarts performed this session
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
