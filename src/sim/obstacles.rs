//! Obstacle spawner and pool
//!
//! Obstacles are copies of a template column pair with a goal sensor in the
//! gap. They ride a layer that scrolls with the ground, are removed once
//! fully off the left edge, and a new one is spawned every spawn interval at
//! a random height.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::TIME_EPSILON;
use crate::settings::Tuning;

/// Axis-aligned rectangle in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_size: size / 2.0,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_size
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_size
    }
}

/// Shape every spawned obstacle is copied from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleTemplate {
    pub width: f32,
    /// Vertical opening between the columns
    pub gap: f32,
    pub column_height: f32,
}

impl ObstacleTemplate {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.obstacle_width,
            gap: tuning.obstacle_gap,
            column_height: tuning.obstacle_column_height,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Upper column for an obstacle whose gap is centred at `center`
    pub fn upper_column(&self, center: Vec2) -> Rect {
        let y = center.y + self.gap / 2.0 + self.column_height / 2.0;
        Rect::new(
            Vec2::new(center.x, y),
            Vec2::new(self.width, self.column_height),
        )
    }

    pub fn lower_column(&self, center: Vec2) -> Rect {
        let y = center.y - self.gap / 2.0 - self.column_height / 2.0;
        Rect::new(
            Vec2::new(center.x, y),
            Vec2::new(self.width, self.column_height),
        )
    }

    /// Thin sensor filling the gap, slightly behind the columns' centre line
    pub fn goal_sensor(&self, center: Vec2) -> Rect {
        Rect::new(
            Vec2::new(center.x + self.half_width(), center.y),
            Vec2::new(4.0, self.gap),
        )
    }
}

/// A live obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Gap centre in layer space
    pub pos: Vec2,
    /// Simulation time (s) at spawn
    pub created_at: f64,
}

/// Owns the obstacle layer, the live set and the spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleField {
    /// Layer offset in scene space
    pub offset: Vec2,
    pub speed: f32,
    pub template: ObstacleTemplate,
    obstacles: Vec<Obstacle>,
    spawn_timer: f64,
    spawn_interval: f64,
    spawn_x: f32,
    spawn_y_range: (f32, f32),
    rng: Pcg32,
    next_id: u32,
    spawned: u64,
}

impl ObstacleField {
    pub fn new(template: ObstacleTemplate, tuning: &Tuning, seed: u64) -> Self {
        Self {
            offset: Vec2::ZERO,
            speed: tuning.scroll_speed,
            template,
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: tuning.spawn_interval,
            spawn_x: tuning.spawn_x,
            spawn_y_range: tuning.spawn_y_range,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            spawned: 0,
        }
    }

    pub fn scene_pos(&self, obstacle: &Obstacle) -> Vec2 {
        self.offset + obstacle.pos
    }

    /// Scroll, retire off-screen obstacles, then spawn if the timer is due.
    ///
    /// `now` stamps newly spawned obstacles.
    pub fn tick(&mut self, dt: f64, now: f64) {
        self.offset.x -= self.speed * dt as f32;

        let offset = self.offset;
        let threshold = -self.template.half_width();
        self.obstacles.retain(|o| {
            let keep = (offset + o.pos).x > threshold;
            if !keep {
                log::debug!("Retired obstacle {}", o.id);
            }
            keep
        });

        self.spawn_timer += dt;
        if self.spawn_timer + TIME_EPSILON >= self.spawn_interval {
            self.spawn(now);
            self.spawn_timer = 0.0;
        }
    }

    fn spawn(&mut self, now: f64) {
        let (min_y, max_y) = self.spawn_y_range;
        let y = if min_y < max_y {
            self.rng.random_range(min_y..=max_y)
        } else {
            min_y
        };
        let scene = Vec2::new(self.spawn_x, y);
        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;
        self.obstacles.push(Obstacle {
            id,
            pos: scene - self.offset,
            created_at: now,
        });
        log::debug!("Spawned obstacle {} at y={:.1}", id, y);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    /// Total spawned since construction, including retired ones
    pub fn spawned(&self) -> u64 {
        self.spawned
    }
}
