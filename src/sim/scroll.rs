//! Ground scroller
//!
//! A fixed set of tiles rides on a layer whose offset moves left at a
//! constant speed. Tiles that leave the view are teleported behind the
//! furthest tile instead of being reallocated.

use glam::Vec2;

/// A background tile, positioned relative to the scroll layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTile {
    /// Centre in layer space
    pub pos: Vec2,
    pub width: f32,
}

impl ScrollTile {
    /// Lay `count` tiles edge to edge starting at layer x = 0
    pub fn strip(count: usize, width: f32, center_y: f32) -> Vec<ScrollTile> {
        (0..count)
            .map(|i| ScrollTile {
                pos: Vec2::new(width * (i as f32 + 0.5), center_y),
                width,
            })
            .collect()
    }
}

/// Owns the scroll layer offset and its tiles
#[derive(Debug, Clone)]
pub struct Scroller {
    /// Layer offset in scene space
    pub offset: Vec2,
    pub speed: f32,
    tiles: Vec<ScrollTile>,
    recycled: u64,
}

impl Scroller {
    pub fn new(tiles: Vec<ScrollTile>, speed: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            speed,
            tiles,
            recycled: 0,
        }
    }

    /// Tile centre converted to scene space
    pub fn scene_pos(&self, tile: &ScrollTile) -> Vec2 {
        self.offset + tile.pos
    }

    /// Scroll the layer and recycle tiles that left the view
    pub fn tick(&mut self, dt: f32) {
        self.offset.x -= self.speed * dt;

        // Trailing edge measured before any recycling this frame
        let mut trailing_edge = self
            .tiles
            .iter()
            .map(|t| self.offset.x + t.pos.x + t.width / 2.0)
            .fold(f32::NEG_INFINITY, f32::max);

        // Tiles recycled in the same frame stack in index order, each one
        // landing past the tile recycled before it
        let offset = self.offset;
        for tile in &mut self.tiles {
            let scene = offset + tile.pos;
            if scene.x <= -tile.width / 2.0 {
                let new_scene = Vec2::new(trailing_edge + tile.width / 2.0, scene.y);
                tile.pos = new_scene - offset;
                trailing_edge += tile.width;
                self.recycled += 1;
                log::trace!("Recycled ground tile to x={:.1}", new_scene.x);
            }
        }
    }

    pub fn tiles(&self) -> &[ScrollTile] {
        &self.tiles
    }

    /// Total number of recycles since construction
    pub fn recycled(&self) -> u64 {
        self.recycled
    }
}
