use glam::IVec2;
use crate::api::types::{Position, Size};

/// Tiles visible around the camera in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwareRange {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl AwareRange {
    /// Range derived from a draw grid: the camera sits one tile up-left of
    /// the grid center.
    pub fn from_dimension(dimension: Size) -> Self {
        let left = dimension.width / 2 - 1;
        let top = dimension.height / 2 - 1;
        Self {
            left,
            top,
            right: dimension.width - left - 1,
            bottom: dimension.height - top - 1,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right + 1
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom + 1
    }
}

/// Camera/viewport collaborator used by light placement.
///
/// Screen points are in light-buffer pixels (one tile = `tile_pixels`).
pub trait Viewport {
    fn camera_position(&self) -> Position;

    /// Project a world position to the top-left pixel of its cell, relative
    /// to `camera`. Floors above the camera shift up-left by one tile each.
    fn transform_position_to_2d(&self, pos: Position, camera: Position) -> IVec2;

    /// Inverse projection on the camera's floor.
    fn position_at(&self, point: IVec2) -> Position;

    /// Visible grid dimensions in tiles.
    fn draw_dimension(&self) -> Size;

    fn tile_pixels(&self) -> i32;

    fn aware_range(&self) -> AwareRange {
        AwareRange::from_dimension(self.draw_dimension())
    }
}

/// Tile-grid camera centered on a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCamera {
    /// World position the view is centered on.
    pub position: Position,
    /// Visible grid in tiles (including the off-screen margin).
    draw_dimension: Size,
    /// Grid cell the camera position maps to.
    virtual_center_offset: IVec2,
    tile_pixels: i32,
}

impl MapCamera {
    pub fn new(draw_dimension: Size, tile_pixels: i32) -> Self {
        Self {
            position: Position::INVALID,
            draw_dimension,
            virtual_center_offset: Self::center_offset(draw_dimension),
            tile_pixels,
        }
    }

    fn center_offset(dimension: Size) -> IVec2 {
        IVec2::new(dimension.width / 2 - 1, dimension.height / 2 - 1)
    }

    /// Change the visible grid (e.g. on window resize or zoom).
    pub fn resize(&mut self, draw_dimension: Size) {
        self.draw_dimension = draw_dimension;
        self.virtual_center_offset = Self::center_offset(draw_dimension);
    }

    /// Center the view on `pos`.
    pub fn look_at(&mut self, pos: Position) {
        self.position = pos;
    }

    pub fn with_position(mut self, pos: Position) -> Self {
        self.look_at(pos);
        self
    }

    pub fn virtual_center_offset(&self) -> IVec2 {
        self.virtual_center_offset
    }

    /// Pixel size of the whole grid.
    pub fn pixel_size(&self) -> Size {
        Size::new(
            self.draw_dimension.width * self.tile_pixels,
            self.draw_dimension.height * self.tile_pixels,
        )
    }

    /// Screen pixel at the center of `pos`'s cell.
    pub fn tile_center(&self, pos: Position) -> IVec2 {
        self.transform_position_to_2d(pos, self.position) + IVec2::splat(self.tile_pixels / 2)
    }

    /// Whether `pos` falls inside the aware range on the camera's floor.
    pub fn is_in_range(&self, pos: Position) -> bool {
        if !pos.is_valid() || !self.position.is_valid() || pos.z != self.position.z {
            return false;
        }
        let range = self.aware_range();
        let dx = pos.x - self.position.x;
        let dy = pos.y - self.position.y;
        dx >= -range.left && dx <= range.right && dy >= -range.top && dy <= range.bottom
    }
}

impl Viewport for MapCamera {
    fn camera_position(&self) -> Position {
        self.position
    }

    fn transform_position_to_2d(&self, pos: Position, camera: Position) -> IVec2 {
        let dz = camera.z as i32 - pos.z as i32;
        IVec2::new(
            (self.virtual_center_offset.x + (pos.x - camera.x) - dz) * self.tile_pixels,
            (self.virtual_center_offset.y + (pos.y - camera.y) - dz) * self.tile_pixels,
        )
    }

    fn position_at(&self, point: IVec2) -> Position {
        if !self.position.is_valid() {
            return Position::INVALID;
        }
        let tile = IVec2::new(
            point.x.div_euclid(self.tile_pixels),
            point.y.div_euclid(self.tile_pixels),
        );
        Position::new(
            self.position.x - self.virtual_center_offset.x + tile.x,
            self.position.y - self.virtual_center_offset.y + tile.y,
            self.position.z,
        )
    }

    fn draw_dimension(&self) -> Size {
        self.draw_dimension
    }

    fn tile_pixels(&self) -> i32 {
        self.tile_pixels
    }
}
