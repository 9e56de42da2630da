//! Tile occlusion data and the lookup contract used by light placement.
//!
//! The map itself lives outside this crate; placement only needs to know,
//! per world position, whether a tile exists and how it occludes light.
//! `TileGrid` is a dense in-memory implementation for tools and tests.

use crate::api::types::{Position, MAX_Z};

/// Occlusion-relevant facts about one map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileState {
    /// Fully hidden under geometry drawn above it.
    pub covered: bool,
    /// Ground of an elevated floor, drawn on top of the floors below.
    pub top_ground: bool,
    /// Has a visible bottom face (its lower edge is drawn).
    pub bottom_to_draw: bool,
    /// Contains something that blocks light (walls, closed doors).
    pub block_light: bool,
}

impl TileState {
    /// An open ground tile: not covered, visible bottom, passes light.
    pub fn open() -> Self {
        Self {
            bottom_to_draw: true,
            ..Default::default()
        }
    }

    pub fn with_covered(mut self, covered: bool) -> Self {
        self.covered = covered;
        self
    }

    pub fn with_top_ground(mut self, top_ground: bool) -> Self {
        self.top_ground = top_ground;
        self
    }

    pub fn with_bottom_to_draw(mut self, bottom_to_draw: bool) -> Self {
        self.bottom_to_draw = bottom_to_draw;
        self
    }

    pub fn with_block_light(mut self, block_light: bool) -> Self {
        self.block_light = block_light;
        self
    }

    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub fn is_top_ground(&self) -> bool {
        self.top_ground
    }

    pub fn has_bottom_to_draw(&self) -> bool {
        self.bottom_to_draw
    }

    pub fn is_block_light(&self) -> bool {
        self.block_light
    }
}

/// Map collaborator: tile lookup by world position.
///
/// `None` means no tile is known there; placement treats it as unable to
/// receive light.
pub trait TileLookup {
    fn tile(&self, pos: Position) -> Option<TileState>;
}

/// Dense tile storage for a rectangular area across all floors.
///
/// Tiles are stored floor-major, then row-major:
/// index = (z * height + (y - origin.y)) * width + (x - origin.x)
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Width of the area in tiles.
    pub width: u32,
    /// Height of the area in tiles.
    pub height: u32,
    /// World x/y of the area's top-left tile.
    origin: (i32, i32),
    tiles: Vec<Option<TileState>>,
}

const FLOORS: usize = MAX_Z as usize + 1;

impl TileGrid {
    /// Create an empty area of `width x height` tiles starting at `(x, y)`.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        let count = width as usize * height as usize * FLOORS;
        Self {
            width,
            height,
            origin: (x, y),
            tiles: vec![None; count],
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !pos.is_valid() {
            return None;
        }
        let lx = pos.x - self.origin.0;
        let ly = pos.y - self.origin.1;
        if lx < 0 || ly < 0 || lx as u32 >= self.width || ly as u32 >= self.height {
            return None;
        }
        let floor = pos.z as usize * self.width as usize * self.height as usize;
        Some(floor + ly as usize * self.width as usize + lx as usize)
    }

    pub fn get(&self, pos: Position) -> Option<&TileState> {
        self.index(pos).and_then(|i| self.tiles[i].as_ref())
    }

    /// Set or clear a tile. Positions outside the area are ignored.
    pub fn set(&mut self, pos: Position, tile: Option<TileState>) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    /// Fill a rectangle of one floor with a tile.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, z: u8, tile: Option<TileState>) {
        for ty in y..y + h {
            for tx in x..x + w {
                self.set(Position::new(tx, ty, z), tile);
            }
        }
    }

    pub fn clear(&mut self) {
        self.tiles.fill(None);
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

impl TileLookup for TileGrid {
    fn tile(&self, pos: Position) -> Option<TileState> {
        self.get(pos).copied()
    }
}
