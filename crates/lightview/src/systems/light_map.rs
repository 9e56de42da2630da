//! Per-frame light storage.
//!
//! `LightMap` is the dense one-slot-per-visible-cell grid used by the
//! footprint versions. `LightSequence` is the ordered list of patches used by
//! the legacy append-only version. Both are filled during map traversal and
//! emptied by the compositor after drawing.

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::api::types::{Position, Size};
use crate::components::color::Color;
use crate::renderer::camera::Viewport;

/// One resolved light stamp.
///
/// A slot whose `pos` is invalid is empty, whatever the other fields hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSource {
    /// World tile that claimed the slot.
    pub pos: Position,
    /// Screen-space pixel center of the stamp.
    pub center: IVec2,
    /// Tint after brightness scaling.
    pub color: Color,
    /// Stamp radius in pixels.
    pub radius: i32,
    /// Clamped intensity, only used to resolve overlaps.
    pub intensity: u8,
}

impl LightSource {
    pub const EMPTY: Self = Self {
        pos: Position::INVALID,
        center: IVec2::ZERO,
        color: Color::BLACK,
        radius: 0,
        intensity: 0,
    };

    pub fn is_occupied(&self) -> bool {
        self.pos.is_valid()
    }

    /// Packed form for GPU backends.
    pub fn vertex(&self) -> LightVertex {
        let [r, g, b, a] = self.color.to_array();
        LightVertex {
            x: self.center.x as f32,
            y: self.center.y as f32,
            radius: self.radius as f32,
            r,
            g,
            b,
            a,
            intensity: self.intensity as f32,
        }
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Wire format of a light stamp (8 floats / 32 bytes):
/// `[x, y, radius, r, g, b, a, intensity]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightVertex {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub intensity: f32,
}

impl LightVertex {
    pub const FLOATS: usize = 8;
}

/// Outcome of offering a source to a light-map slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// The slot was empty and now holds the source.
    Inserted,
    /// The slot held a weaker source; color, center and intensity replaced.
    Upgraded,
    /// The slot held an equal or stronger source; nothing changed.
    Dropped,
}

/// Dense grid of light slots covering the visible tiles.
///
/// Slots are row-major: index = row * width + col.
#[derive(Debug, Clone, Default)]
pub struct LightMap {
    dimension: Size,
    sources: Vec<LightSource>,
}

impl LightMap {
    pub fn new(dimension: Size) -> Self {
        Self {
            dimension,
            sources: vec![LightSource::EMPTY; dimension.area()],
        }
    }

    /// Reallocate for a new grid. Previous contents are discarded.
    pub fn resize(&mut self, dimension: Size) {
        self.dimension = dimension;
        self.sources.clear();
        self.sources.resize(dimension.area(), LightSource::EMPTY);
    }

    /// Mark every slot empty.
    pub fn reset(&mut self) {
        for source in &mut self.sources {
            source.pos = Position::INVALID;
        }
    }

    pub fn dimension(&self) -> Size {
        self.dimension
    }

    /// Number of slots (occupied or not).
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Slot index of the cell containing screen `point`, or `None` when the
    /// point falls outside the grid.
    pub fn index_of_point(&self, point: IVec2, tile_pixels: i32) -> Option<usize> {
        if point.x < 0 || point.y < 0 || tile_pixels <= 0 {
            return None;
        }
        let col = point.x / tile_pixels;
        let row = point.y / tile_pixels;
        if col >= self.dimension.width || row >= self.dimension.height {
            return None;
        }
        let index = row as usize * self.dimension.width as usize + col as usize;
        (index < self.sources.len()).then_some(index)
    }

    /// Slot index of a world position as seen from the viewport's camera.
    pub fn index_of(&self, pos: Position, viewport: &dyn Viewport) -> Option<usize> {
        if !pos.is_valid() {
            return None;
        }
        let point = viewport.transform_position_to_2d(pos, viewport.camera_position());
        self.index_of_point(point, viewport.tile_pixels())
    }

    pub fn get(&self, index: usize) -> Option<&LightSource> {
        self.sources.get(index)
    }

    /// Offer `source` to slot `index`.
    ///
    /// An empty slot takes the whole source. An occupied slot only changes
    /// when the new intensity is strictly greater. Out-of-range indices are
    /// dropped.
    pub fn claim(&mut self, index: usize, source: LightSource) -> Claim {
        let Some(slot) = self.sources.get_mut(index) else {
            return Claim::Dropped;
        };
        if !slot.is_occupied() {
            *slot = source;
            return Claim::Inserted;
        }
        if source.intensity > slot.intensity {
            slot.color = source.color;
            slot.center = source.center;
            slot.intensity = source.intensity;
            return Claim::Upgraded;
        }
        Claim::Dropped
    }

    pub fn occupied_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = &LightSource> {
        self.sources.iter().filter(|s| s.is_occupied())
    }

    /// Yield each occupied slot in index order, emptying it as it is yielded.
    ///
    /// Slots not reached (if the iterator is dropped early) stay occupied.
    pub fn drain(&mut self) -> impl Iterator<Item = LightSource> + '_ {
        self.sources.iter_mut().filter_map(|slot| {
            if !slot.is_occupied() {
                return None;
            }
            let source = *slot;
            slot.pos = Position::INVALID;
            Some(source)
        })
    }
}

/// Ordered light patches for the append-only version.
#[derive(Debug, Clone, Default)]
pub struct LightSequence {
    patches: Vec<LightSource>,
}

impl LightSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a patch unless it repeats the previous one (same center, color
    /// and radius). Returns whether it was appended.
    pub fn push(&mut self, source: LightSource) -> bool {
        if let Some(prev) = self.patches.last() {
            if prev.center == source.center
                && prev.color == source.color
                && prev.radius == source.radius
            {
                return false;
            }
        }
        self.patches.push(source);
        true
    }

    pub fn clear(&mut self) {
        self.patches.clear();
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.patches.iter()
    }

    /// Yield all patches in insertion order, leaving the sequence empty.
    pub fn drain(&mut self) -> impl Iterator<Item = LightSource> + '_ {
        self.patches.drain(..)
    }
}
