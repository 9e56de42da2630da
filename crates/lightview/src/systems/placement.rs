//! Light source placement strategies.
//!
//! A strategy turns one light emission into light-map entries and later
//! hands those entries to the compositor. The version picks the strategy
//! once, when the view is built:
//!
//! - `Legacy`: one patch per emission appended to a `LightSequence`.
//! - `Basic` / `Extended`: the emission spreads over a rounded footprint of
//!   cells, each cell claiming its light-map slot; the stronger claim wins.

use glam::IVec2;

use crate::api::config::{LightVersion, LightingConfig};
use crate::api::types::{Light, Position, Size};
use crate::components::color::Color;
use crate::components::creature::CreatureMotion;
use crate::components::tile::TileLookup;
use crate::renderer::camera::Viewport;
use crate::systems::bubble::BubbleStyle;
use crate::systems::light_map::{LightMap, LightSequence, LightSource};

/// Highest intensity a light source is clamped to.
pub const MAX_LIGHT_INTENSITY: u8 = 8;

/// Brightness base for lights of intensity 0 or 1.
const DIM_BRIGHTNESS: f32 = 0.2;

/// Map and camera collaborators for one placement call.
#[derive(Clone, Copy)]
pub struct PlacementContext<'a> {
    pub tiles: &'a dyn TileLookup,
    pub viewport: &'a dyn Viewport,
}

impl<'a> PlacementContext<'a> {
    pub fn new(tiles: &'a dyn TileLookup, viewport: &'a dyn Viewport) -> Self {
        Self { tiles, viewport }
    }
}

/// One light emission to place.
#[derive(Debug, Clone, Copy)]
pub struct LightRequest<'a> {
    /// World tile of the emitter.
    pub pos: Position,
    /// Screen pixel where the emitter is drawn.
    pub center: IVec2,
    /// Current map zoom; scales the stamp radius.
    pub scale_factor: f32,
    pub light: Light,
    /// Set when the emitter is a creature.
    pub motion: Option<&'a CreatureMotion>,
}

/// Placement, storage and drain behavior of one version.
pub trait LightStrategy {
    fn version(&self) -> LightVersion;

    /// Bubble channel scaling that matches this version's brightness.
    fn bubble_style(&self) -> BubbleStyle;

    /// Adapt storage to a new visible grid, discarding stored lights.
    fn resize(&mut self, dimension: Size);

    /// Discard stored lights.
    fn reset(&mut self);

    fn add_light_source(&mut self, request: &LightRequest, ctx: &PlacementContext);

    /// Number of lights that the next drain would yield.
    fn light_count(&self) -> usize;

    /// Visit each stored light without removing it.
    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource));

    /// Pass each stored light to `draw`, leaving the store empty.
    fn drain_lights(&mut self, draw: &mut dyn FnMut(&LightSource));
}

/// Build the strategy for a validated config.
pub fn strategy_for(config: &LightingConfig) -> Box<dyn LightStrategy> {
    match config.version {
        LightVersion::Legacy => Box::new(AppendPlacement::new(config.tile_pixels)),
        LightVersion::Basic => Box::new(FootprintPlacement::new(Stencil::BASIC, config.tile_pixels)),
        LightVersion::Extended => {
            Box::new(FootprintPlacement::new(Stencil::EXTENDED, config.tile_pixels))
        }
    }
}

/// Palette color scaled by `base + (intensity / 8) * base`, where `base`
/// depends on whether the raw intensity exceeds 1.
fn light_color(light: Light, intensity: u8, strong_base: f32) -> Color {
    let base = if light.intensity > 1 {
        strong_base
    } else {
        DIM_BRIGHTNESS
    };
    let brightness = base + (intensity as f32 / MAX_LIGHT_INTENSITY as f32) * base;
    Color::from_8bit(light.color).scaled(brightness)
}

/// Footprint shape and tuning of a footprint version.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    /// Half-width is `floor(intensity / divisor)`.
    pub divisor: f32,
    /// Stamp radius in tiles (times the zoom).
    pub radius_tiles: f32,
    /// Brightness base for intensities above 1.
    pub brightness: f32,
    /// Drop the whole edge beyond each axis tip, not just its neighbors.
    pub wide_tips: bool,
    /// Check floors above and bottom faces, not only coverage.
    pub full_occlusion: bool,
    /// Shift creature lights by their walk offset.
    pub follow_walk: bool,
    pub style: BubbleStyle,
}

impl Stencil {
    pub const BASIC: Self = Self {
        divisor: 2.0,
        radius_tiles: 2.0,
        brightness: 0.7,
        wide_tips: false,
        full_occlusion: false,
        follow_walk: false,
        style: BubbleStyle::LEGACY,
    };

    pub const EXTENDED: Self = Self {
        divisor: 1.3,
        radius_tiles: 2.4,
        brightness: 0.5,
        wide_tips: true,
        full_occlusion: true,
        follow_walk: true,
        style: BubbleStyle::SOFT,
    };

    pub fn half_width(&self, intensity: u8) -> i32 {
        (intensity as f32 / self.divisor).floor() as i32
    }

    /// Whether cell `(x, y)` of a footprint with half-width `s` is lit.
    pub fn includes(&self, x: i32, y: i32, s: i32) -> bool {
        let ax = x.abs();
        let ay = y.abs();

        let tip = if self.wide_tips {
            (ax == s && ay >= 1) || (ay == s && ax >= 1)
        } else {
            (ax == s && ay == 1) || (ay == s && ax == 1)
        };
        if tip {
            return false;
        }

        let diff = s / 2;
        if ay > diff
            && ax > diff
            && (ay == ax || ax - diff == ay || ax == ay - diff || ax - diff == ay - diff)
        {
            return false;
        }
        true
    }

    /// Offsets of all lit cells for an intensity, row by row.
    pub fn cells(&self, intensity: u8) -> impl Iterator<Item = IVec2> + '_ {
        let s = self.half_width(intensity.min(MAX_LIGHT_INTENSITY));
        (-s..=s)
            .flat_map(move |x| (-s..=s).map(move |y| IVec2::new(x, y)))
            .filter(move |cell| self.includes(cell.x, cell.y, s))
    }
}

/// Per-cell footprint placement into a dense `LightMap`.
pub struct FootprintPlacement {
    stencil: Stencil,
    tile_pixels: i32,
    map: LightMap,
}

impl FootprintPlacement {
    pub fn new(stencil: Stencil, tile_pixels: i32) -> Self {
        Self {
            stencil,
            tile_pixels,
            map: LightMap::default(),
        }
    }

    pub fn light_map(&self) -> &LightMap {
        &self.map
    }

    /// Whether the tile at `pos` can be lit.
    fn receives_light(&self, pos: Position, tiles: &dyn TileLookup) -> bool {
        let Some(tile) = tiles.tile(pos) else {
            return false;
        };
        if tile.is_covered() {
            return false;
        }
        if !self.stencil.full_occlusion {
            return true;
        }
        if tile.is_top_ground() && !tile.has_bottom_to_draw() {
            return false;
        }
        // The tile one floor up drawn over this cell sits one step down-right.
        let above = pos.translated_z(1, 1, -1);
        !tiles.tile(above).is_some_and(|t| t.is_block_light())
    }

    /// Walk offset to apply to a creature's light, or zero when either
    /// neighbor along the step blocks light.
    fn walk_offset(&self, pos: Position, motion: Option<&CreatureMotion>, tiles: &dyn TileLookup) -> IVec2 {
        let Some(motion) = motion.filter(|m| self.stencil.follow_walk && m.is_walking()) else {
            return IVec2::ZERO;
        };
        let passable = |p: Position| tiles.tile(p).is_some_and(|t| !t.is_block_light());
        let forward = pos.translated_to_direction(motion.direction);
        let reverse = pos.translated_to_direction(motion.direction.inverse());
        if passable(forward) && passable(reverse) {
            motion.walk_offset
        } else {
            IVec2::ZERO
        }
    }
}

impl LightStrategy for FootprintPlacement {
    fn version(&self) -> LightVersion {
        if self.stencil == Stencil::EXTENDED {
            LightVersion::Extended
        } else {
            LightVersion::Basic
        }
    }

    fn bubble_style(&self) -> BubbleStyle {
        self.stencil.style
    }

    fn resize(&mut self, dimension: Size) {
        self.map.resize(dimension);
    }

    fn reset(&mut self) {
        self.map.reset();
    }

    fn add_light_source(&mut self, request: &LightRequest, ctx: &PlacementContext) {
        if request.light.intensity == 0 || !request.pos.is_valid() {
            return;
        }
        let intensity = request.light.intensity.min(MAX_LIGHT_INTENSITY);
        let radius =
            (self.tile_pixels as f32 * request.scale_factor * self.stencil.radius_tiles) as i32;
        let color = light_color(request.light, intensity, self.stencil.brightness);
        let center = request.center + self.walk_offset(request.pos, request.motion, ctx.tiles);
        let spacing = self.tile_pixels - 4;

        for cell in self.stencil.cells(intensity) {
            let pos = request.pos.translated(cell.x, cell.y);
            let Some(index) = self.map.index_of(pos, ctx.viewport) else {
                continue;
            };
            if !self.receives_light(pos, ctx.tiles) {
                continue;
            }
            self.map.claim(
                index,
                LightSource {
                    pos,
                    center: center + cell * spacing,
                    color,
                    radius,
                    intensity,
                },
            );
        }
    }

    fn light_count(&self) -> usize {
        self.map.occupied_count()
    }

    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource)) {
        self.map.iter_occupied().for_each(visit);
    }

    fn drain_lights(&mut self, draw: &mut dyn FnMut(&LightSource)) {
        for source in self.map.drain() {
            draw(&source);
        }
    }
}

/// Legacy placement: one patch per emission, no occlusion, no overlap
/// resolution.
pub struct AppendPlacement {
    tile_pixels: i32,
    sequence: LightSequence,
}

impl AppendPlacement {
    pub fn new(tile_pixels: i32) -> Self {
        Self {
            tile_pixels,
            sequence: LightSequence::new(),
        }
    }

    pub fn sequence(&self) -> &LightSequence {
        &self.sequence
    }
}

impl LightStrategy for AppendPlacement {
    fn version(&self) -> LightVersion {
        LightVersion::Legacy
    }

    fn bubble_style(&self) -> BubbleStyle {
        BubbleStyle::LEGACY
    }

    fn resize(&mut self, _dimension: Size) {
        self.sequence.clear();
    }

    fn reset(&mut self) {
        self.sequence.clear();
    }

    fn add_light_source(&mut self, request: &LightRequest, _ctx: &PlacementContext) {
        if request.light.intensity == 0 {
            return;
        }
        let intensity = request.light.intensity.min(MAX_LIGHT_INTENSITY);
        let radius =
            (intensity as f32 * self.tile_pixels as f32 * request.scale_factor) as i32;
        let brightness = 0.5 + (intensity as f32 / MAX_LIGHT_INTENSITY as f32) * 0.5;

        self.sequence.push(LightSource {
            pos: request.pos,
            center: request.center,
            color: Color::from_8bit(request.light.color).scaled(brightness),
            radius,
            intensity,
        });
    }

    fn light_count(&self) -> usize {
        self.sequence.len()
    }

    fn for_each_light(&self, visit: &mut dyn FnMut(&LightSource)) {
        self.sequence.iter().for_each(visit);
    }

    fn drain_lights(&mut self, draw: &mut dyn FnMut(&LightSource)) {
        for source in self.sequence.drain() {
            draw(&source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tile::{TileGrid, TileState};
    use crate::api::types::Direction;
    use crate::renderer::camera::MapCamera;

    const CAM: Position = Position { x: 100, y: 100, z: 7 };

    fn open_world() -> TileGrid {
        let mut grid = TileGrid::new(80, 80, 40, 40);
        grid.fill_rect(80, 80, 40, 40, 7, Some(TileState::open()));
        grid
    }

    fn camera() -> MapCamera {
        MapCamera::new(Size::new(18, 14), 32).with_position(CAM)
    }

    fn footprint(stencil: Stencil, cam: &MapCamera) -> FootprintPlacement {
        let mut placement = FootprintPlacement::new(stencil, 32);
        placement.resize(cam.draw_dimension());
        placement
    }

    fn request<'a>(pos: Position, cam: &MapCamera, light: Light) -> LightRequest<'a> {
        LightRequest {
            pos,
            center: cam.tile_center(pos),
            scale_factor: 1.0,
            light,
            motion: None,
        }
    }

    #[test]
    fn basic_footprint_shape_for_max_intensity() {
        let cells: Vec<_> = Stencil::BASIC.cells(8).collect();
        // 9x9 square minus 8 tip neighbors and 8 diagonal cells.
        assert_eq!(cells.len(), 65);
        assert!(cells.contains(&IVec2::new(4, 0)));
        assert!(!cells.contains(&IVec2::new(4, 1)));
        assert!(!cells.contains(&IVec2::new(3, 3)));
        assert!(!cells.contains(&IVec2::new(-4, -4)));
        assert!(cells.contains(&IVec2::new(4, 3)));
    }

    #[test]
    fn extended_tips_drop_whole_edge() {
        let s = Stencil::EXTENDED.half_width(8);
        assert_eq!(s, 6);
        assert!(Stencil::EXTENDED.includes(6, 0, s));
        assert!(!Stencil::EXTENDED.includes(6, 2, s));
        // Basic keeps the same cell with the same half-width.
        assert!(Stencil::BASIC.includes(6, 2, s));
    }

    #[test]
    fn single_cell_for_low_intensity() {
        assert_eq!(Stencil::BASIC.cells(1).count(), 1);
        assert_eq!(Stencil::EXTENDED.cells(1).count(), 1);
    }

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(
            Stencil::BASIC.cells(200).count(),
            Stencil::BASIC.cells(8).count()
        );
    }

    #[test]
    fn basic_fills_footprint_on_open_ground() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut placement = footprint(Stencil::BASIC, &cam);

        placement.add_light_source(&request(CAM.translated(1, 0), &cam, Light::new(8, 215)), &ctx);
        assert_eq!(placement.light_count(), 65);

        let source = placement.light_map().iter_occupied().next().unwrap();
        assert_eq!(source.radius, 64);
        assert_eq!(source.intensity, 8);
        // 0.7 + 0.7 saturates white.
        assert_eq!(source.color, Color::WHITE);
    }

    #[test]
    fn brightness_bases() {
        assert_eq!(light_color(Light::new(1, 215), 1, 0.7), Color::WHITE.scaled(0.225));
        assert_eq!(light_color(Light::new(4, 215), 4, 0.5), Color::WHITE.scaled(0.75));
    }

    #[test]
    fn missing_and_covered_tiles_are_skipped() {
        let cam = camera();
        let mut tiles = open_world();
        tiles.set(CAM.translated(1, 0), None);
        tiles.set(CAM.translated(0, 1), Some(TileState::open().with_covered(true)));
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut placement = footprint(Stencil::BASIC, &cam);

        placement.add_light_source(&request(CAM, &cam, Light::new(2, 215)), &ctx);
        // s = 1: plus-shaped 5 cells minus the two blocked ones.
        assert_eq!(placement.light_count(), 3);
    }

    #[test]
    fn cells_outside_grid_are_skipped() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut placement = footprint(Stencil::BASIC, &cam);

        // Camera is at grid cell (8, 6); x - 8 is grid column 0.
        let edge = CAM.translated(-8, 0);
        placement.add_light_source(&request(edge, &cam, Light::new(2, 215)), &ctx);
        assert_eq!(placement.light_count(), 4);
    }

    #[test]
    fn stronger_light_wins_overlap() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let red = Light::new(3, 180);
        let blue = Light::new(6, 5);

        for order in [[red, blue], [blue, red]] {
            let mut placement = footprint(Stencil::BASIC, &cam);
            for light in order {
                placement.add_light_source(&request(CAM, &cam, light), &ctx);
            }
            let index = placement.light_map().index_of(CAM, &cam).unwrap();
            let slot = placement.light_map().get(index).unwrap();
            assert_eq!(slot.intensity, 6);
            assert_eq!(slot.color, light_color(blue, 6, 0.7));
        }
    }

    #[test]
    fn extended_blocks_under_light_blocking_floor() {
        let cam = camera();
        let mut tiles = open_world();
        let target = CAM.translated(1, 1);
        let roof = target.translated_z(1, 1, -1);
        // The roof is drawn exactly over the target cell.
        assert_eq!(
            cam.transform_position_to_2d(roof, CAM),
            cam.transform_position_to_2d(target, CAM)
        );
        tiles.set(roof, Some(TileState::open().with_block_light(true)));
        let ctx = PlacementContext::new(&tiles, &cam);

        let mut extended = footprint(Stencil::EXTENDED, &cam);
        extended.add_light_source(&request(target, &cam, Light::new(1, 215)), &ctx);
        assert_eq!(extended.light_count(), 0);

        let mut basic = footprint(Stencil::BASIC, &cam);
        basic.add_light_source(&request(target, &cam, Light::new(1, 215)), &ctx);
        assert_eq!(basic.light_count(), 1);
    }

    #[test]
    fn blocking_floor_elsewhere_does_not_shade() {
        let cam = camera();
        let mut tiles = open_world();
        let target = CAM.translated(1, 1);
        tiles.set(
            target.translated_z(-1, -1, -1),
            Some(TileState::open().with_block_light(true)),
        );
        let ctx = PlacementContext::new(&tiles, &cam);

        let mut extended = footprint(Stencil::EXTENDED, &cam);
        extended.add_light_source(&request(target, &cam, Light::new(1, 215)), &ctx);
        assert_eq!(extended.light_count(), 1);
    }

    #[test]
    fn extended_blocks_top_ground_without_bottom() {
        let cam = camera();
        let mut tiles = open_world();
        tiles.set(
            CAM,
            Some(TileState::default().with_top_ground(true).with_bottom_to_draw(false)),
        );
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut placement = footprint(Stencil::EXTENDED, &cam);
        placement.add_light_source(&request(CAM, &cam, Light::new(1, 215)), &ctx);
        assert_eq!(placement.light_count(), 0);
    }

    #[test]
    fn walk_offset_follows_creature_in_open_space() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let motion = CreatureMotion::new(IVec2::new(-12, 0), Direction::East);
        let mut placement = footprint(Stencil::EXTENDED, &cam);

        let mut req = request(CAM, &cam, Light::new(1, 215));
        req.motion = Some(&motion);
        placement.add_light_source(&req, &ctx);

        let source = placement.light_map().iter_occupied().next().unwrap();
        assert_eq!(source.center, cam.tile_center(CAM) + IVec2::new(-12, 0));
    }

    #[test]
    fn walk_offset_suppressed_next_to_wall() {
        let cam = camera();
        let mut tiles = open_world();
        tiles.set(CAM.translated(1, 0), Some(TileState::open().with_block_light(true)));
        let ctx = PlacementContext::new(&tiles, &cam);
        let motion = CreatureMotion::new(IVec2::new(-12, 0), Direction::East);
        let mut placement = footprint(Stencil::EXTENDED, &cam);

        let mut req = request(CAM, &cam, Light::new(1, 215));
        req.motion = Some(&motion);
        placement.add_light_source(&req, &ctx);

        let source = placement.light_map().iter_occupied().next().unwrap();
        assert_eq!(source.center, cam.tile_center(CAM));
    }

    #[test]
    fn basic_ignores_walk_offset() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let motion = CreatureMotion::new(IVec2::new(0, 8), Direction::South);
        let mut placement = footprint(Stencil::BASIC, &cam);

        let mut req = request(CAM, &cam, Light::new(1, 215));
        req.motion = Some(&motion);
        placement.add_light_source(&req, &ctx);

        let source = placement.light_map().iter_occupied().next().unwrap();
        assert_eq!(source.center, cam.tile_center(CAM));
    }

    #[test]
    fn zero_intensity_places_nothing() {
        let cam = camera();
        let tiles = open_world();
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut placement = footprint(Stencil::BASIC, &cam);
        placement.add_light_source(&request(CAM, &cam, Light::new(0, 215)), &ctx);
        assert_eq!(placement.light_count(), 0);

        let mut append = AppendPlacement::new(32);
        append.add_light_source(&request(CAM, &cam, Light::new(0, 215)), &ctx);
        assert_eq!(append.light_count(), 0);
    }

    #[test]
    fn append_dedups_stationary_source() {
        let cam = camera();
        let tiles = TileGrid::new(0, 0, 1, 1);
        let ctx = PlacementContext::new(&tiles, &cam);
        let mut append = AppendPlacement::new(32);

        let req = request(CAM, &cam, Light::new(4, 215));
        append.add_light_source(&req, &ctx);
        append.add_light_source(&req, &ctx);
        assert_eq!(append.light_count(), 1);

        let patch = append.sequence().iter().next().unwrap();
        assert_eq!(patch.radius, 128);
        assert_eq!(patch.color, Color::WHITE.scaled(0.75));

        let mut drawn = 0;
        append.drain_lights(&mut |_: &LightSource| drawn += 1);
        assert_eq!(drawn, 1);
        assert_eq!(append.light_count(), 0);
    }

    #[test]
    fn strategy_for_matches_version() {
        for version in [LightVersion::Legacy, LightVersion::Basic, LightVersion::Extended] {
            let strategy = strategy_for(&LightingConfig::new(version));
            assert_eq!(strategy.version(), version);
        }
    }
}
