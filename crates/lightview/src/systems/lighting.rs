//! Light view: owns the light buffer, the bubble texture and the per-frame
//! light store, and composites accumulated light over the rendered map.
//!
//! Each frame has two strictly ordered phases:
//! 1. map traversal calls `add_light_source` once per light emitter;
//! 2. `draw` fills the buffer with ambient light, stamps every stored light
//!    additively, empties the store and blends the buffer onto the scene.

use glam::IVec2;

use crate::api::config::{ConfigError, LightVersion, LightingConfig};
use crate::api::types::{Light, Position, Rect, Size};
use crate::components::color::Color;
use crate::components::creature::CreatureMotion;
use crate::renderer::texture::Texture;
use crate::renderer::traits::{
    BlendEquation, BoundFramebuffer, CompositionMode, Framebuffer, Painter, PainterScope,
};
use crate::systems::bubble::generate_light_bubble;
use crate::systems::light_map::{LightSource, LightVertex};
use crate::systems::placement::{strategy_for, LightRequest, LightStrategy, PlacementContext};

/// Ambient intensity that maps to a full-brightness fill.
pub const MAX_AMBIENT_LIGHT_INTENSITY: u8 = 255;

pub struct LightView<F: Framebuffer> {
    config: LightingConfig,
    buffer: F,
    bubble: Texture,
    strategy: Box<dyn LightStrategy>,
    global_light: Light,
    blend_equation: BlendEquation,
}

impl<F: Framebuffer> LightView<F> {
    /// Build a view around an off-screen `buffer`. The config is validated
    /// and fixes the placement version for the view's lifetime.
    pub fn new(config: LightingConfig, buffer: F) -> Result<Self, ConfigError> {
        config.validate()?;
        let strategy = strategy_for(&config);
        let bubble = generate_light_bubble(config.center_factor(), strategy.bubble_style());
        log::debug!(
            "light view created: version {:?}, {} px tiles",
            config.version,
            config.tile_pixels
        );
        Ok(Self {
            config,
            buffer,
            bubble,
            strategy,
            global_light: Light::default(),
            blend_equation: BlendEquation::Add,
        })
    }

    pub fn version(&self) -> LightVersion {
        self.strategy.version()
    }

    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    pub fn bubble_texture(&self) -> &Texture {
        &self.bubble
    }

    pub fn framebuffer(&self) -> &F {
        &self.buffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut F {
        &mut self.buffer
    }

    /// Area-wide base light (day/night, dungeon, ...).
    pub fn set_global_light(&mut self, light: Light) {
        self.global_light = light;
    }

    pub fn global_light(&self) -> Light {
        self.global_light
    }

    /// Whether `draw` will do anything: zero ambient intensity marks a scene
    /// drawn without a light pass.
    pub fn is_enabled(&self) -> bool {
        self.global_light.intensity > 0 && self.buffer.has_texture()
    }

    /// Resize the light buffer (pixels) and the light store (visible tiles).
    /// Stored lights are discarded.
    pub fn resize(&mut self, buffer_size: Size, dimension: Size) {
        self.buffer.resize(buffer_size);
        self.strategy.resize(dimension);
        log::debug!(
            "light view resized: buffer {}x{}, grid {}x{}",
            buffer_size.width,
            buffer_size.height,
            dimension.width,
            dimension.height
        );
    }

    /// Discard stored lights without drawing them.
    pub fn reset(&mut self) {
        self.strategy.reset();
    }

    /// Place a light emitted from `pos`, drawn at screen `center`.
    pub fn add_light_source(
        &mut self,
        pos: Position,
        center: IVec2,
        scale_factor: f32,
        light: Light,
        motion: Option<&CreatureMotion>,
        ctx: &PlacementContext,
    ) {
        let request = LightRequest {
            pos,
            center,
            scale_factor,
            light,
            motion,
        };
        self.strategy.add_light_source(&request, ctx);
    }

    /// Place a light known only by its screen center; the world position is
    /// recovered through the viewport.
    pub fn add_light_source_at(
        &mut self,
        center: IVec2,
        scale_factor: f32,
        light: Light,
        ctx: &PlacementContext,
    ) {
        let pos = ctx.viewport.position_at(center);
        self.add_light_source(pos, center, scale_factor, light, None, ctx);
    }

    /// Lights stored for the next draw.
    pub fn light_count(&self) -> usize {
        self.strategy.light_count()
    }

    /// Packed copy of the stored lights, for backends that batch stamps.
    pub fn light_vertices(&self) -> Vec<LightVertex> {
        let mut vertices = Vec::with_capacity(self.light_count());
        self.strategy
            .for_each_light(&mut |source: &LightSource| vertices.push(source.vertex()));
        vertices
    }

    /// Composite the light buffer over `dest`, sampling `src` of the buffer.
    ///
    /// Skipped entirely when ambient intensity is zero or the buffer has no
    /// texture. Otherwise the light store is empty afterwards.
    pub fn draw<P: Painter + ?Sized>(&mut self, painter: &mut P, dest: Rect, src: Rect) {
        if !self.is_enabled() {
            return;
        }

        let mut painter = PainterScope::new(painter);
        if self.buffer.can_update() {
            let bound = BoundFramebuffer::bind(&mut self.buffer);
            painter.set_composition_mode(CompositionMode::Replace);
            draw_global_light(&mut *painter, self.global_light, bound.size());

            painter.set_blend_equation(self.blend_equation);
            painter.set_composition_mode(CompositionMode::Add);

            let bubble = &self.bubble;
            let mut drawn = 0usize;
            self.strategy.drain_lights(&mut |source: &LightSource| {
                draw_light_source(&mut *painter, bubble, source);
                drawn += 1;
            });
            drop(bound);
            log::trace!("light pass drew {drawn} sources");
        } else {
            // Frame reuses the previous buffer; the store still starts empty.
            self.strategy.reset();
        }

        painter.set_composition_mode(CompositionMode::Light);
        self.buffer.draw(dest, src);
    }
}

/// Fill the whole buffer with the ambient color scaled by intensity / 255.
fn draw_global_light<P: Painter + ?Sized>(painter: &mut P, light: Light, size: Size) {
    let brightness = light.intensity as f32 / MAX_AMBIENT_LIGHT_INTENSITY as f32;
    painter.set_color(Color::from_8bit(light.color).scaled(brightness));
    painter.draw_filled_rect(Rect::new(IVec2::ZERO, size));
}

/// Stamp the bubble centered on the source, tinted by its color.
fn draw_light_source<P: Painter + ?Sized>(painter: &mut P, bubble: &Texture, source: &LightSource) {
    let radius = source.radius;
    let dest = Rect::new(
        source.center - IVec2::splat(radius),
        Size::new(radius * 2, radius * 2),
    );
    painter.set_color(source.color);
    painter.draw_textured_rect(dest, bubble);
}
