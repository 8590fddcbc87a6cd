//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (the raw frame delta is bookkeeping)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod hero;
pub mod obstacles;
pub mod scene;
pub mod scroll;
pub mod state;
pub mod tick;

pub use clock::SimulationClock;
pub use collision::{
    Body, BodyTag, Contact, ContactOutcome, ContactTracker, GOAL_NAME, resolve_contact,
};
pub use hero::{HeroAction, HeroBody};
pub use obstacles::{Obstacle, ObstacleField, ObstacleTemplate, Rect};
pub use scene::{HeroSpec, SceneError, SceneGraph, SceneHandles, SceneNode};
pub use scroll::{ScrollTile, Scroller};
pub use state::{GameEvent, GamePhase, RestartControl, SceneEffect, Simulation};
pub use tick::{apply_tap, tick};
