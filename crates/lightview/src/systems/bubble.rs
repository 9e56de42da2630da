//! Radial falloff texture stamped for every light source.

use image::{Rgba, RgbaImage};
use crate::renderer::texture::Texture;

/// Radius of the generated bubble in pixels.
pub const BUBBLE_RADIUS: i32 = 256;
/// Side length of the generated bubble image.
pub const BUBBLE_DIAMETER: u32 = (BUBBLE_RADIUS * 2) as u32;

/// Channel scaling of the bubble: `byte = min(falloff * scale, cap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleStyle {
    pub scale: u8,
    pub cap: u8,
}

impl BubbleStyle {
    /// Dim, clamped stamp used by the legacy and basic versions.
    pub const LEGACY: Self = Self {
        scale: 0xB4,
        cap: 50,
    };

    /// Full-range stamp used by the extended version.
    pub const SOFT: Self = Self {
        scale: 0xFF,
        cap: 0xFF,
    };

    /// Channel value at the center of the bubble.
    pub fn peak(&self) -> u8 {
        self.scale.min(self.cap)
    }
}

/// Generate the grayscale bubble.
///
/// Pixels within `BUBBLE_RADIUS * center_factor` of the center are at full
/// intensity; beyond that intensity falls linearly to zero at the rim and is
/// then squared. Alpha is always opaque; the per-draw tint supplies color.
pub fn generate_light_bubble(center_factor: f32, style: BubbleStyle) -> Texture {
    let center_radius = (BUBBLE_RADIUS as f32 * center_factor) as i32;
    let span = (BUBBLE_RADIUS - center_radius).max(1) as f32;
    let mut image = RgbaImage::new(BUBBLE_DIAMETER, BUBBLE_DIAMETER);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = BUBBLE_RADIUS - x as i32;
        let dy = BUBBLE_RADIUS - y as i32;
        let radius = ((dx * dx + dy * dy) as f32).sqrt();

        let mut intensity = ((BUBBLE_RADIUS as f32 - radius) / span).clamp(0.0, 1.0);
        intensity *= intensity;

        let byte = ((intensity * style.scale as f32) as u8).min(style.cap);
        *pixel = Rgba([byte, byte, byte, 0xFF]);
    }

    log::debug!(
        "generated light bubble {}x{} (center factor {center_factor}, peak {})",
        BUBBLE_DIAMETER,
        BUBBLE_DIAMETER,
        style.peak()
    );

    Texture::new(image).with_smooth(true)
}
