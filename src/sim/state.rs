//! Game state and the simulation context
//!
//! Everything that changes frame to frame lives in one [`Simulation`]
//! value. Restart builds a new one rather than resetting this one.

use super::clock::SimulationClock;
use super::hero::HeroBody;
use super::obstacles::ObstacleField;
use super::scene::SceneHandles;
use super::scroll::Scroller;
use crate::settings::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Playing: input accepted, per-frame pipeline runs
    #[default]
    Active,
    /// Run over (terminal): only restart is possible
    Ended,
}

/// Host input delivered through the event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Tap,
    RestartRequested,
}

/// One-shot effects for the host to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEffect {
    /// Hero snapped face-down (radians)
    DeathPose { rotation: f32 },
    /// Shake the whole scene
    Shake,
}

/// Visibility of the restart control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartControl {
    #[default]
    Hidden,
    Active,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct Simulation {
    pub clock: SimulationClock,
    pub hero: HeroBody,
    pub ground: Scroller,
    pub ground_height: f32,
    pub obstacles: ObstacleField,
    pub phase: GamePhase,
    pub score: u32,
    pub restart: RestartControl,
    /// Time since the last accepted tap (s)
    pub since_touch: f64,
    /// Simulated time, advanced by the fixed step (s)
    pub sim_time: f64,
    /// Fixed steps taken
    pub steps: u64,
    pub death_rotation: f32,
    effects: Vec<SceneEffect>,
}

impl Simulation {
    pub fn new(handles: &SceneHandles, tuning: &Tuning, seed: u64) -> Self {
        let mut hero = HeroBody::new(handles.hero.start, tuning);
        hero.radius = handles.hero.radius;

        let mut obstacles = ObstacleField::new(handles.obstacle_template, tuning, seed);
        obstacles.offset = handles.obstacle_origin;

        Self {
            clock: SimulationClock::new(tuning.fixed_delta),
            hero,
            ground: Scroller::new(handles.ground_tiles.clone(), tuning.scroll_speed),
            ground_height: handles.ground_height,
            obstacles,
            phase: GamePhase::Active,
            score: 0,
            restart: RestartControl::Hidden,
            since_touch: 0.0,
            sim_time: 0.0,
            steps: 0,
            death_rotation: tuning.death_rotation_deg.to_radians(),
            effects: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub(crate) fn push_effect(&mut self, effect: SceneEffect) {
        self.effects.push(effect);
    }

    /// Take pending effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<SceneEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Top of the ground strip in scene space
    pub fn ground_top(&self) -> f32 {
        self.ground.offset.y + self.ground_height
    }
}
