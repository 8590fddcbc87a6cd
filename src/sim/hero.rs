//! Hero physics body
//!
//! Gravity and impulse integration, the nose-dive correction, and the
//! post-impulse clamps that keep rotation and fall speed bounded.

use glam::Vec2;

use crate::settings::Tuning;

/// One-shot actions running on the hero
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeroAction {
    /// Wing flap started by a jump
    Flap { remaining: f64 },
}

/// The player-controlled body
#[derive(Debug, Clone)]
pub struct HeroBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    /// Rotation in radians (positive = nose up)
    pub rotation: f32,
    pub radius: f32,
    /// Cleared permanently on death
    pub allows_rotation: bool,
    /// Rotation limits in radians
    pub rotation_limits: (f32, f32),
    pub angular_vel_limits: (f32, f32),
    pub max_fall_speed: f32,
    mass: f32,
    inertia: f32,
    gravity: f32,
    jump_impulse: f32,
    jump_angular_impulse: f32,
    freefall_delay: f64,
    freefall_angular_impulse: f32,
    flap_duration: f64,
    actions: Vec<HeroAction>,
}

impl HeroBody {
    pub fn new(start: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            rotation: 0.0,
            radius: tuning.hero_radius,
            allows_rotation: true,
            rotation_limits: tuning.rotation_limits(),
            angular_vel_limits: tuning.angular_velocity_limits,
            max_fall_speed: tuning.max_fall_speed,
            mass: tuning.hero_mass,
            inertia: tuning.hero_inertia,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            jump_angular_impulse: tuning.jump_angular_impulse,
            freefall_delay: tuning.freefall_delay,
            freefall_angular_impulse: tuning.freefall_angular_impulse,
            flap_duration: tuning.flap_duration,
            actions: Vec::new(),
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.vel += impulse / self.mass;
    }

    /// Angular impulses are dropped once rotation is locked
    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.allows_rotation {
            self.angular_vel += impulse / self.inertia;
        }
    }

    /// Tap response: kill the fall, then kick up and nose up.
    ///
    /// The caller gates this on the game being active and resets its
    /// time-since-input counter.
    pub fn apply_jump(&mut self) {
        self.vel.y = 0.0;
        self.apply_impulse(Vec2::new(0.0, self.jump_impulse));
        self.apply_angular_impulse(self.jump_angular_impulse);
        self.actions.retain(|a| !matches!(a, HeroAction::Flap { .. }));
        self.actions.push(HeroAction::Flap {
            remaining: self.flap_duration,
        });
    }

    /// Gravity and velocity integration over one fixed step
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y -= self.gravity * dt;
        self.pos += self.vel * dt;
        if self.allows_rotation {
            self.rotation += self.angular_vel * dt;
        }
    }

    /// Nose-dive once the player stops tapping.
    ///
    /// Magnitude is scaled by the fixed step, not the raw frame delta.
    pub fn step_freefall_rotation(&mut self, time_since_input: f64, fixed_delta: f64) {
        if time_since_input > self.freefall_delay {
            let impulse = self.freefall_angular_impulse as f64 * fixed_delta;
            self.apply_angular_impulse(impulse as f32);
        }
    }

    /// Post-impulse clamps; run after every impulse of the frame
    pub fn clamp(&mut self) {
        let (min_rot, max_rot) = self.rotation_limits;
        self.rotation = self.rotation.clamp(min_rot, max_rot);
        let (min_av, max_av) = self.angular_vel_limits;
        self.angular_vel = self.angular_vel.clamp(min_av, max_av);
        self.vel.y = self.vel.y.clamp(-self.max_fall_speed, self.max_fall_speed);
    }

    /// Advance running actions and drop finished ones
    pub fn step_actions(&mut self, dt: f64) {
        for action in &mut self.actions {
            match action {
                HeroAction::Flap { remaining } => *remaining -= dt,
            }
        }
        self.actions
            .retain(|a| !matches!(a, HeroAction::Flap { remaining } if *remaining <= 0.0));
    }

    pub fn actions(&self) -> &[HeroAction] {
        &self.actions
    }

    pub fn cancel_actions(&mut self) {
        self.actions.clear();
    }

    /// Lock rotation for good; angular velocity is zeroed
    pub fn freeze_rotation(&mut self) {
        self.allows_rotation = false;
        self.angular_vel = 0.0;
    }

    /// Face-down death pose. Not subject to the rotation clamp.
    pub fn strike_death_pose(&mut self, rotation: f32) {
        self.rotation = rotation;
    }
}
