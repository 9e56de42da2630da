//! Headless backend that records draw calls instead of rasterizing.
//!
//! Useful for tests and for tools that inspect what a frame would draw.

use crate::api::types::{Rect, Size};
use crate::components::color::Color;
use crate::renderer::texture::Texture;
use crate::renderer::traits::{BlendEquation, CompositionMode, Framebuffer, Painter};

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SaveState,
    RestoreState,
    CompositionMode(CompositionMode),
    BlendEquation(BlendEquation),
    SetColor(Color),
    FilledRect(Rect),
    /// Textured draw; the texture is identified by its size.
    TexturedRect { dest: Rect, texture: Size },
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    saved_depth: usize,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of textured draws (one per light stamp).
    pub fn textured_draws(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::TexturedRect { .. }))
            .count()
    }

    /// Outstanding `save_and_reset_state` calls without a matching restore.
    pub fn saved_depth(&self) -> usize {
        self.saved_depth
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Painter for RecordingPainter {
    fn save_and_reset_state(&mut self) {
        self.saved_depth += 1;
        self.commands.push(DrawCommand::SaveState);
    }

    fn restore_saved_state(&mut self) {
        self.saved_depth = self.saved_depth.saturating_sub(1);
        self.commands.push(DrawCommand::RestoreState);
    }

    fn set_composition_mode(&mut self, mode: CompositionMode) {
        self.commands.push(DrawCommand::CompositionMode(mode));
    }

    fn set_blend_equation(&mut self, equation: BlendEquation) {
        self.commands.push(DrawCommand::BlendEquation(equation));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn draw_filled_rect(&mut self, dest: Rect) {
        self.commands.push(DrawCommand::FilledRect(dest));
    }

    fn draw_textured_rect(&mut self, dest: Rect, texture: &Texture) {
        self.commands.push(DrawCommand::TexturedRect {
            dest,
            texture: texture.size(),
        });
    }
}

/// Framebuffer stand-in that tracks bind/release pairing and composites.
#[derive(Debug)]
pub struct RecordingFramebuffer {
    size: Size,
    has_texture: bool,
    can_update: bool,
    bound: bool,
    binds: usize,
    releases: usize,
    draws: Vec<(Rect, Rect)>,
}

impl RecordingFramebuffer {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            has_texture: size.area() > 0,
            can_update: true,
            bound: false,
            binds: 0,
            releases: 0,
            draws: Vec::new(),
        }
    }

    /// A buffer whose backing texture has not been created yet.
    pub fn without_texture() -> Self {
        Self::new(Size::default())
    }

    pub fn set_can_update(&mut self, can_update: bool) {
        self.can_update = can_update;
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn bind_count(&self) -> usize {
        self.binds
    }

    pub fn release_count(&self) -> usize {
        self.releases
    }

    /// `(dest, src)` of every composite onto the main target.
    pub fn draws(&self) -> &[(Rect, Rect)] {
        &self.draws
    }
}

impl Framebuffer for RecordingFramebuffer {
    fn has_texture(&self) -> bool {
        self.has_texture
    }

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.has_texture = size.area() > 0;
    }

    fn can_update(&self) -> bool {
        self.can_update
    }

    fn bind(&mut self) {
        self.bound = true;
        self.binds += 1;
    }

    fn release(&mut self) {
        self.bound = false;
        self.releases += 1;
    }

    fn draw(&mut self, dest: Rect, src: Rect) {
        self.draws.push((dest, src));
    }
}
