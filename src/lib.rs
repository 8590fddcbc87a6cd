//! Wabbit Jump - a side-scrolling obstacle dodging game
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (hero physics, scrolling, obstacles, contacts)
//! - `game`: Session driver (event queue, score display, restart)
//! - `settings`: Data-driven game tuning

pub mod game;
pub mod settings;
pub mod sim;

pub use game::{Game, LabelSink, ScoreSink};
pub use settings::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const FIXED_DELTA: f64 = 1.0 / 60.0;
    /// Slack when comparing accumulated fixed steps against a threshold
    pub const TIME_EPSILON: f64 = 1e-6;

    /// Viewport dimensions (scene units, origin bottom-left)
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 568.0;

    /// Horizontal scroll speed of ground and obstacles (units/s)
    pub const SCROLL_SPEED: f32 = 100.0;

    /// Hero defaults
    pub const HERO_START_X: f32 = 80.0;
    pub const HERO_START_Y: f32 = 320.0;
    pub const HERO_RADIUS: f32 = 14.0;
    pub const HERO_MASS: f32 = 1.0;
    pub const HERO_INERTIA: f32 = 1.0;
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 600.0;
    /// Upward linear impulse applied on tap
    pub const JUMP_IMPULSE: f32 = 300.0;
    /// Angular impulse applied on tap (nose up)
    pub const JUMP_ANGULAR_IMPULSE: f32 = 1.0;
    /// Time without input before the hero starts nose-diving (s)
    pub const FREEFALL_DELAY: f64 = 0.2;
    /// Per-second angular impulse while nose-diving, scaled by the fixed delta
    pub const FREEFALL_ANGULAR_IMPULSE: f32 = -20000.0;
    pub const ROTATION_MIN_DEG: f32 = -35.0;
    pub const ROTATION_MAX_DEG: f32 = 30.0;
    pub const ANGULAR_VELOCITY_MIN: f32 = -2.0;
    pub const ANGULAR_VELOCITY_MAX: f32 = 3.0;
    pub const MAX_FALL_SPEED: f32 = 400.0;
    /// Face-down rotation applied once on death
    pub const DEATH_ROTATION_DEG: f32 = -90.0;
    /// Duration of the wing flap action started by a jump (s)
    pub const FLAP_DURATION: f64 = 0.3;

    /// Ground strip
    pub const GROUND_TILE_WIDTH: f32 = 320.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
    pub const GROUND_TILE_COUNT: usize = 2;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_GAP: f32 = 120.0;
    pub const OBSTACLE_COLUMN_HEIGHT: f32 = 600.0;
    pub const SPAWN_INTERVAL: f64 = 1.5;
    pub const SPAWN_X: f32 = 352.0;
    pub const SPAWN_Y_MIN: f32 = 234.0;
    pub const SPAWN_Y_MAX: f32 = 382.0;
}

