//! Render-backend contracts used by the light compositor.
//!
//! The crate never talks to a GPU directly. A backend (OpenGL, wgpu, a
//! software rasterizer, or the recording backend in `renderer::recording`)
//! implements `Painter` for immediate-mode drawing and `Framebuffer` for the
//! off-screen light buffer.

use std::ops::{Deref, DerefMut};

use crate::api::types::{Rect, Size};
use crate::components::color::Color;
use crate::renderer::texture::Texture;

/// How drawn pixels combine with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionMode {
    /// Standard alpha blending.
    #[default]
    Normal,
    /// Overwrite destination.
    Replace,
    /// Additive: overlapping stamps brighten further.
    Add,
    /// Multiply the destination by the source ("light" mode): darkens where
    /// the source is dark, passes tinted brightness where it is lit.
    Light,
}

/// Blend equation applied while stamping light sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendEquation {
    #[default]
    Add,
    Max,
}

/// Immediate-mode drawing surface.
///
/// # Example Implementation
///
/// ```ignore
/// struct GlPainter {
///     gl: glow::Context,
///     saved: Vec<GlState>,
///     // ...
/// }
///
/// impl Painter for GlPainter {
///     fn set_composition_mode(&mut self, mode: CompositionMode) {
///         match mode {
///             CompositionMode::Add => unsafe { self.gl.blend_func(glow::ONE, glow::ONE) },
///             // ...
///         }
///     }
///     // ...
/// }
/// ```
pub trait Painter {
    /// Push the current state and reset to defaults.
    fn save_and_reset_state(&mut self);

    /// Pop the state pushed by the last `save_and_reset_state`.
    fn restore_saved_state(&mut self);

    fn set_composition_mode(&mut self, mode: CompositionMode);

    fn set_blend_equation(&mut self, equation: BlendEquation);

    /// Color used to fill or tint subsequent draws.
    fn set_color(&mut self, color: Color);

    fn draw_filled_rect(&mut self, dest: Rect);

    /// Draw `texture` stretched over `dest`, tinted by the current color.
    fn draw_textured_rect(&mut self, dest: Rect, texture: &Texture);
}

/// Off-screen render target holding the accumulated light.
pub trait Framebuffer {
    /// Whether a backing texture exists (false before the first resize or
    /// after a lost context).
    fn has_texture(&self) -> bool;

    fn size(&self) -> Size;

    /// Reallocate the backing texture. Contents are undefined afterwards.
    fn resize(&mut self, size: Size);

    /// Whether the buffer may be redrawn this frame. When false the previous
    /// contents are composited as-is.
    fn can_update(&self) -> bool {
        true
    }

    /// Redirect drawing into this buffer.
    fn bind(&mut self);

    /// Restore the previous render target.
    fn release(&mut self);

    /// Draw the buffer's texture `src` region into `dest` on the current target.
    fn draw(&mut self, dest: Rect, src: Rect);
}

/// Saved painter state, restored on drop.
pub struct PainterScope<'a, P: Painter + ?Sized> {
    painter: &'a mut P,
}

impl<'a, P: Painter + ?Sized> PainterScope<'a, P> {
    pub fn new(painter: &'a mut P) -> Self {
        painter.save_and_reset_state();
        Self { painter }
    }
}

impl<P: Painter + ?Sized> Deref for PainterScope<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.painter
    }
}

impl<P: Painter + ?Sized> DerefMut for PainterScope<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.painter
    }
}

impl<P: Painter + ?Sized> Drop for PainterScope<'_, P> {
    fn drop(&mut self) {
        self.painter.restore_saved_state();
    }
}

/// A bound framebuffer, released on drop even if drawing unwinds.
pub struct BoundFramebuffer<'a, F: Framebuffer + ?Sized> {
    buffer: &'a mut F,
}

impl<'a, F: Framebuffer + ?Sized> BoundFramebuffer<'a, F> {
    pub fn bind(buffer: &'a mut F) -> Self {
        buffer.bind();
        Self { buffer }
    }

    pub fn size(&self) -> Size {
        self.buffer.size()
    }
}

impl<F: Framebuffer + ?Sized> Drop for BoundFramebuffer<'_, F> {
    fn drop(&mut self) {
        self.buffer.release();
    }
}
