//! Fixed timestep simulation tick
//!
//! One host frame: clock, phase gate, hero physics and clamps, ground
//! scroll, obstacle scroll/retire/spawn. Contacts are resolved separately,
//! between frames.

use super::state::{GamePhase, Simulation};

/// Apply a tap. Ignored unless the game is active.
///
/// Returns whether the tap was accepted.
pub fn apply_tap(sim: &mut Simulation) -> bool {
    if sim.phase != GamePhase::Active {
        return false;
    }
    sim.hero.apply_jump();
    sim.since_touch = 0.0;
    true
}

/// Advance the simulation for a host frame stamped `timestamp` (seconds).
///
/// The raw frame delta only feeds the clock; the world always moves by a
/// single fixed step, however long the host stalled. The baseline frame
/// moves nothing.
pub fn tick(sim: &mut Simulation, timestamp: f64) {
    if sim.phase != GamePhase::Active {
        return;
    }

    let baseline = sim.clock.awaiting_baseline();
    sim.clock.advance(timestamp);
    if baseline {
        return;
    }

    let fixed = sim.clock.fixed_delta();
    let dt = fixed as f32;
    sim.steps += 1;
    sim.sim_time += fixed;

    // Hero: integrate, nose-dive, then clamp after every impulse
    sim.hero.integrate(dt);
    sim.hero.step_freefall_rotation(sim.since_touch, fixed);
    sim.hero.clamp();
    sim.hero.step_actions(fixed);
    sim.since_touch += fixed;

    sim.ground.tick(dt);
    sim.obstacles.tick(fixed, sim.sim_time);
}
