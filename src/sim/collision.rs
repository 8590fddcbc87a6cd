//! Contact detection and resolution
//!
//! The host physics engine reports contacts between bodies; only the hero
//! collides with anything. A contact involving a `goal` sensor scores, any
//! other contact while active ends the run. [`ContactTracker`] is a small
//! stand-in engine for headless hosts: circle hero against axis-aligned
//! rectangles, reporting each touching pair once when the touch begins.

use std::collections::HashSet;

use glam::Vec2;

use super::obstacles::Rect;
use super::state::{GamePhase, RestartControl, SceneEffect, Simulation};

/// Name carried by scoring sensors
pub const GOAL_NAME: &str = "goal";

/// What a body is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    Hero,
    /// Scoring sensor between obstacle columns
    Goal,
    /// Obstacle column
    Obstacle,
    Ground,
}

/// A body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Body {
    pub tag: BodyTag,
    /// Owning obstacle, if any
    pub owner: Option<u32>,
    /// Distinguishes parts of one owner (upper/lower column)
    pub part: u8,
}

impl Body {
    pub fn hero() -> Self {
        Self::new(BodyTag::Hero, None)
    }

    pub fn ground() -> Self {
        Self::new(BodyTag::Ground, None)
    }

    pub fn new(tag: BodyTag, owner: Option<u32>) -> Self {
        Self {
            tag,
            owner,
            part: 0,
        }
    }

    /// Build a body from an engine node name; unnamed or unknown nodes are
    /// treated as obstacles
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(GOAL_NAME) => Self::new(BodyTag::Goal, None),
            Some("hero") => Self::hero(),
            Some("ground") => Self::ground(),
            _ => Self::new(BodyTag::Obstacle, None),
        }
    }

    /// Node name as the engine would report it
    pub fn name(&self) -> Option<&'static str> {
        match self.tag {
            BodyTag::Goal => Some(GOAL_NAME),
            BodyTag::Hero => Some("hero"),
            BodyTag::Ground | BodyTag::Obstacle => None,
        }
    }

    pub fn is_goal(&self) -> bool {
        self.name() == Some(GOAL_NAME)
    }
}

/// A begin-contact report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

/// What a contact did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Goal passed; carries the new score
    Scored(u32),
    /// First fatal contact: the run is over
    GameOver,
    /// Fatal contact after the run already ended
    Ignored,
}

/// Resolve a contact between two bodies.
///
/// Goal contacts always score, even after game over. Any other contact ends
/// an active run; repeats after that are no-ops.
pub fn resolve_contact(sim: &mut Simulation, a: &Body, b: &Body) -> ContactOutcome {
    if a.is_goal() || b.is_goal() {
        sim.score += 1;
        return ContactOutcome::Scored(sim.score);
    }

    if sim.phase != GamePhase::Active {
        return ContactOutcome::Ignored;
    }

    sim.phase = GamePhase::Ended;
    sim.hero.freeze_rotation();
    sim.hero.cancel_actions();
    sim.hero.strike_death_pose(sim.death_rotation);
    sim.push_effect(SceneEffect::DeathPose {
        rotation: sim.death_rotation,
    });
    sim.push_effect(SceneEffect::Shake);
    sim.restart = RestartControl::Active;

    log::info!(
        "Game over after {:.2}s with score {} ({:?} vs {:?})",
        sim.sim_time,
        sim.score,
        a.tag,
        b.tag
    );
    ContactOutcome::GameOver
}

/// Whether a circle overlaps a rectangle
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = center.clamp(rect.min(), rect.max());
    center.distance_squared(closest) <= radius * radius
}

/// Reports hero contacts once, when they begin
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: HashSet<Body>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every body the hero currently overlaps, in obstacle order then ground
    fn overlapping(sim: &Simulation) -> Vec<Body> {
        let hero = &sim.hero;
        let template = sim.obstacles.template;
        let mut hits = Vec::new();

        for obstacle in sim.obstacles.obstacles() {
            let center = sim.obstacles.scene_pos(obstacle);
            let parts = [
                (BodyTag::Obstacle, 0, template.upper_column(center)),
                (BodyTag::Obstacle, 1, template.lower_column(center)),
                (BodyTag::Goal, 2, template.goal_sensor(center)),
            ];
            for (tag, part, rect) in parts {
                if circle_rect_overlap(hero.pos, hero.radius, &rect) {
                    hits.push(Body {
                        tag,
                        owner: Some(obstacle.id),
                        part,
                    });
                }
            }
        }

        let on_ground = sim.ground.tiles().iter().any(|tile| {
            let center = sim.ground.scene_pos(tile);
            let rect = Rect::new(center, Vec2::new(tile.width, sim.ground_height));
            circle_rect_overlap(hero.pos, hero.radius, &rect)
        });
        if on_ground {
            hits.push(Body::ground());
        }

        hits
    }

    /// Contacts that began since the previous call
    pub fn detect(&mut self, sim: &Simulation) -> Vec<Contact> {
        let current = Self::overlapping(sim);
        let began = current
            .iter()
            .filter(|body| !self.touching.contains(*body))
            .map(|&b| Contact { a: Body::hero(), b })
            .collect();
        self.touching = current.into_iter().collect();
        began
    }

    /// Forget all touching pairs (new simulation)
    pub fn reset(&mut self) {
        self.touching.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Tuning;
    use crate::sim::scene::{SceneGraph, SceneHandles};
    use crate::sim::tick::{apply_tap, tick};

    fn new_sim() -> Simulation {
        let tuning = Tuning::default();
        let handles = SceneHandles::resolve(&SceneGraph::standard(&tuning)).unwrap();
        Simulation::new(&handles, &tuning, 12345)
    }

    fn goal() -> Body {
        Body::from_name(Some(GOAL_NAME))
    }

    fn wall() -> Body {
        Body::from_name(None)
    }

    #[test]
    fn test_goal_contact_scores_once() {
        let mut sim = new_sim();
        let outcome = resolve_contact(&mut sim, &Body::hero(), &goal());
        assert_eq!(outcome, ContactOutcome::Scored(1));
        assert_eq!(sim.score, 1);
        assert_eq!(sim.phase, GamePhase::Active);

        // Either side may carry the tag
        resolve_contact(&mut sim, &goal(), &Body::hero());
        assert_eq!(sim.score, 2);
    }

    #[test]
    fn test_goal_contact_scores_after_game_over() {
        let mut sim = new_sim();
        resolve_contact(&mut sim, &Body::hero(), &wall());
        assert_eq!(
            resolve_contact(&mut sim, &Body::hero(), &goal()),
            ContactOutcome::Scored(1)
        );
        assert_eq!(sim.phase, GamePhase::Ended);
    }

    #[test]
    fn test_fatal_contact_ends_game() {
        let mut sim = new_sim();
        tick(&mut sim, 0.0);
        apply_tap(&mut sim);
        tick(&mut sim, FIXED_DELTA);
        assert!(!sim.hero.actions().is_empty());

        let outcome = resolve_contact(&mut sim, &Body::hero(), &wall());
        assert_eq!(outcome, ContactOutcome::GameOver);
        assert_eq!(sim.phase, GamePhase::Ended);
        assert!(!sim.hero.allows_rotation);
        assert_eq!(sim.hero.angular_vel, 0.0);
        assert!(sim.hero.actions().is_empty());
        assert!((sim.hero.rotation - DEATH_ROTATION_DEG.to_radians()).abs() < 1e-6);
        assert_eq!(sim.restart, RestartControl::Active);
        assert_eq!(
            sim.drain_effects(),
            vec![
                SceneEffect::DeathPose {
                    rotation: DEATH_ROTATION_DEG.to_radians()
                },
                SceneEffect::Shake
            ]
        );
    }

    #[test]
    fn test_simultaneous_fatal_contacts_end_once() {
        let mut sim = new_sim();
        let outcomes: Vec<_> = [wall(), Body::ground(), wall()]
            .iter()
            .map(|b| resolve_contact(&mut sim, &Body::hero(), b))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ContactOutcome::GameOver,
                ContactOutcome::Ignored,
                ContactOutcome::Ignored
            ]
        );
        assert_eq!(sim.drain_effects().len(), 2);
    }

    #[test]
    fn test_goal_and_fatal_in_same_frame() {
        let mut sim = new_sim();
        resolve_contact(&mut sim, &Body::hero(), &goal());
        resolve_contact(&mut sim, &Body::hero(), &wall());
        resolve_contact(&mut sim, &Body::hero(), &goal());
        assert_eq!(sim.score, 2);
        assert_eq!(sim.phase, GamePhase::Ended);
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(circle_rect_overlap(Vec2::new(0.0, 0.0), 1.0, &rect));
        assert!(circle_rect_overlap(Vec2::new(7.0, 0.0), 2.5, &rect));
        assert!(!circle_rect_overlap(Vec2::new(7.0, 7.0), 2.5, &rect));
    }

    #[test]
    fn test_tracker_reports_ground_once() {
        let mut sim = new_sim();
        let mut tracker = ContactTracker::new();
        assert!(tracker.detect(&sim).is_empty());

        sim.hero.pos.y = sim.ground_top();
        let contacts = tracker.detect(&sim);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b.tag, BodyTag::Ground);

        // Still touching: no new report
        assert!(tracker.detect(&sim).is_empty());
    }

    #[test]
    fn test_tracker_reports_goal_in_gap() {
        let mut sim = new_sim();
        let mut tracker = ContactTracker::new();
        // Force a spawn, then park the hero inside the gap on the sensor
        sim.obstacles.tick(SPAWN_INTERVAL, 0.0);
        let obstacle = sim.obstacles.obstacles()[0].clone();
        let center = sim.obstacles.scene_pos(&obstacle);
        sim.hero.pos = center + Vec2::new(OBSTACLE_WIDTH / 2.0, 0.0);

        let contacts = tracker.detect(&sim);
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].b.is_goal());
        assert_eq!(contacts[0].b.owner, Some(obstacle.id));
    }

    #[test]
    fn test_tracker_reports_column_hit() {
        let mut sim = new_sim();
        let mut tracker = ContactTracker::new();
        sim.obstacles.tick(SPAWN_INTERVAL, 0.0);
        let center = sim.obstacles.scene_pos(&sim.obstacles.obstacles()[0]);
        sim.hero.pos = center + Vec2::new(0.0, OBSTACLE_GAP / 2.0 + 20.0);

        let contacts = tracker.detect(&sim);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].b.tag, BodyTag::Obstacle);
        assert_eq!(contacts[0].b.part, 0);
    }

    #[test]
    fn test_body_names() {
        assert_eq!(goal().name(), Some(GOAL_NAME));
        assert_eq!(wall().name(), None);
        assert_eq!(Body::from_name(Some("ground")).tag, BodyTag::Ground);
        assert!(!Body::hero().is_goal());
    }
}
