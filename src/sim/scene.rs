//! Scene wiring
//!
//! The host exposes its scene as named nodes. They are resolved into typed
//! handles once, when a simulation is built; nothing is looked up by name
//! afterwards. A missing or mistyped node is fatal.

use glam::Vec2;
use thiserror::Error;

use super::obstacles::ObstacleTemplate;
use super::scroll::ScrollTile;
use crate::settings::Tuning;

pub const HERO: &str = "hero";
pub const SCROLL_LAYER: &str = "scroll_layer";
pub const OBSTACLE_TEMPLATE: &str = "obstacle";
pub const OBSTACLE_LAYER: &str = "obstacle_layer";
pub const SCORE_LABEL: &str = "score_label";
pub const RESTART_BUTTON: &str = "restart_button";

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("scene node `{0}` not found")]
    Missing(&'static str),
    #[error("scene node `{name}` is a {found}, expected a {expected}")]
    WrongKind {
        name: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("scroll layer has no tiles")]
    EmptyScrollLayer,
    #[error("tile {index} has non-positive width {width}")]
    DegenerateTile { index: usize, width: f32 },
}

/// Hero placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroSpec {
    pub start: Vec2,
    pub radius: f32,
}

/// Nodes a host scene may contain
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Hero(HeroSpec),
    ScrollLayer { tiles: Vec<ScrollTile>, height: f32 },
    ObstacleTemplate(ObstacleTemplate),
    ObstacleLayer { origin: Vec2 },
    ScoreLabel,
    RestartButton,
}

impl SceneNode {
    fn kind(&self) -> &'static str {
        match self {
            SceneNode::Hero(_) => "hero",
            SceneNode::ScrollLayer { .. } => "scroll layer",
            SceneNode::ObstacleTemplate(_) => "obstacle template",
            SceneNode::ObstacleLayer { .. } => "obstacle layer",
            SceneNode::ScoreLabel => "score label",
            SceneNode::RestartButton => "restart button",
        }
    }
}

/// Named nodes as provided by the host
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<(String, SceneNode)>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, node: SceneNode) -> Self {
        self.insert(name, node);
        self
    }

    /// Add or replace a node
    pub fn insert(&mut self, name: &str, node: SceneNode) {
        match self.nodes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = node,
            None => self.nodes.push((name.to_string(), node)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<SceneNode> {
        let idx = self.nodes.iter().position(|(n, _)| n == name)?;
        Some(self.nodes.remove(idx).1)
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    /// The standard layout: hero on the left, a ground strip along the
    /// bottom, and the obstacle template
    pub fn standard(tuning: &Tuning) -> Self {
        let tiles = ScrollTile::strip(
            tuning.ground_tile_count,
            tuning.ground_tile_width,
            tuning.ground_height / 2.0,
        );

        Self::new()
            .with(
                HERO,
                SceneNode::Hero(HeroSpec {
                    start: tuning.hero_start,
                    radius: tuning.hero_radius,
                }),
            )
            .with(
                SCROLL_LAYER,
                SceneNode::ScrollLayer {
                    tiles,
                    height: tuning.ground_height,
                },
            )
            .with(
                OBSTACLE_TEMPLATE,
                SceneNode::ObstacleTemplate(ObstacleTemplate::from_tuning(tuning)),
            )
            .with(OBSTACLE_LAYER, SceneNode::ObstacleLayer { origin: Vec2::ZERO })
            .with(SCORE_LABEL, SceneNode::ScoreLabel)
            .with(RESTART_BUTTON, SceneNode::RestartButton)
    }
}

/// Typed handles resolved from a [`SceneGraph`]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub hero: HeroSpec,
    pub ground_tiles: Vec<ScrollTile>,
    pub ground_height: f32,
    pub obstacle_template: ObstacleTemplate,
    pub obstacle_origin: Vec2,
}

impl SceneHandles {
    /// Resolve every required node, failing on the first problem
    pub fn resolve(graph: &SceneGraph) -> Result<Self, SceneError> {
        let hero = match lookup(graph, HERO)? {
            SceneNode::Hero(spec) => *spec,
            other => return Err(wrong_kind(HERO, "hero", other)),
        };

        let (ground_tiles, ground_height) = match lookup(graph, SCROLL_LAYER)? {
            SceneNode::ScrollLayer { tiles, height } => (tiles.clone(), *height),
            other => return Err(wrong_kind(SCROLL_LAYER, "scroll layer", other)),
        };
        if ground_tiles.is_empty() {
            return Err(SceneError::EmptyScrollLayer);
        }
        if let Some((index, tile)) = ground_tiles
            .iter()
            .enumerate()
            .find(|(_, t)| !(t.width > 0.0))
        {
            return Err(SceneError::DegenerateTile {
                index,
                width: tile.width,
            });
        }

        let obstacle_template = match lookup(graph, OBSTACLE_TEMPLATE)? {
            SceneNode::ObstacleTemplate(template) => *template,
            other => return Err(wrong_kind(OBSTACLE_TEMPLATE, "obstacle template", other)),
        };

        let obstacle_origin = match lookup(graph, OBSTACLE_LAYER)? {
            SceneNode::ObstacleLayer { origin } => *origin,
            other => return Err(wrong_kind(OBSTACLE_LAYER, "obstacle layer", other)),
        };

        match lookup(graph, SCORE_LABEL)? {
            SceneNode::ScoreLabel => {}
            other => return Err(wrong_kind(SCORE_LABEL, "score label", other)),
        }
        match lookup(graph, RESTART_BUTTON)? {
            SceneNode::RestartButton => {}
            other => return Err(wrong_kind(RESTART_BUTTON, "restart button", other)),
        }

        log::info!(
            "Resolved scene: {} ground tiles, obstacle width {}",
            ground_tiles.len(),
            obstacle_template.width
        );

        Ok(Self {
            hero,
            ground_tiles,
            ground_height,
            obstacle_template,
            obstacle_origin,
        })
    }
}

fn lookup<'a>(graph: &'a SceneGraph, name: &'static str) -> Result<&'a SceneNode, SceneError> {
    graph.find(name).ok_or(SceneError::Missing(name))
}

fn wrong_kind(name: &'static str, expected: &'static str, found: &SceneNode) -> SceneError {
    SceneError::WrongKind {
        name,
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scene_resolves() {
        let tuning = Tuning::default();
        let handles = SceneHandles::resolve(&SceneGraph::standard(&tuning)).unwrap();
        assert_eq!(handles.hero.start, tuning.hero_start);
        assert_eq!(handles.ground_tiles.len(), tuning.ground_tile_count);
        assert_eq!(handles.obstacle_template.width, tuning.obstacle_width);
    }

    #[test]
    fn test_standard_ground_follows_tuning() {
        let tuning = Tuning::from_json(
            r#"{ "ground_tile_count": 4, "ground_tile_width": 100.0, "ground_height": 60.0 }"#,
        )
        .unwrap();
        let handles = SceneHandles::resolve(&SceneGraph::standard(&tuning)).unwrap();
        assert_eq!(handles.ground_tiles, ScrollTile::strip(4, 100.0, 30.0));
        assert_eq!(handles.ground_height, 60.0);
    }

    #[test]
    fn test_missing_node_is_fatal() {
        for name in [
            HERO,
            SCROLL_LAYER,
            OBSTACLE_TEMPLATE,
            OBSTACLE_LAYER,
            SCORE_LABEL,
            RESTART_BUTTON,
        ] {
            let mut graph = SceneGraph::standard(&Tuning::default());
            graph.remove(name);
            assert_eq!(
                SceneHandles::resolve(&graph),
                Err(SceneError::Missing(name))
            );
        }
    }

    #[test]
    fn test_wrong_kind_is_fatal() {
        let graph = SceneGraph::standard(&Tuning::default()).with(HERO, SceneNode::ScoreLabel);
        let err = SceneHandles::resolve(&graph).unwrap_err();
        assert_eq!(
            err,
            SceneError::WrongKind {
                name: HERO,
                expected: "hero",
                found: "score label",
            }
        );
        assert!(err.to_string().contains("`hero`"));
    }

    #[test]
    fn test_empty_scroll_layer_rejected() {
        let graph = SceneGraph::standard(&Tuning::default()).with(
            SCROLL_LAYER,
            SceneNode::ScrollLayer {
                tiles: Vec::new(),
                height: 80.0,
            },
        );
        assert_eq!(
            SceneHandles::resolve(&graph),
            Err(SceneError::EmptyScrollLayer)
        );
    }

    #[test]
    fn test_zero_width_tile_rejected() {
        let graph = SceneGraph::standard(&Tuning::default()).with(
            SCROLL_LAYER,
            SceneNode::ScrollLayer {
                tiles: vec![ScrollTile {
                    pos: Vec2::ZERO,
                    width: 0.0,
                }],
                height: 80.0,
            },
        );
        assert!(matches!(
            SceneHandles::resolve(&graph),
            Err(SceneError::DegenerateTile { index: 0, .. })
        ));
    }
}
