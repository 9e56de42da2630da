use bytemuck::{Pod, Zeroable};

/// 8-bit RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Decode a palette byte from the 6x6x6 color cube.
    /// Indices past the cube (216..) are black.
    pub fn from_8bit(index: u8) -> Self {
        if index >= 216 {
            return Self::BLACK;
        }
        let r = (index / 36) % 6 * 51;
        let g = (index / 6) % 6 * 51;
        let b = index % 6 * 51;
        Self::rgb(r, g, b)
    }

    pub fn r_f(&self) -> f32 {
        self.r as f32 / 255.0
    }

    pub fn g_f(&self) -> f32 {
        self.g as f32 / 255.0
    }

    pub fn b_f(&self) -> f32 {
        self.b as f32 / 255.0
    }

    pub fn a_f(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Multiply the RGB channels by `factor`, saturating at 255. Alpha is kept.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            r: channel(self.r_f() * factor),
            g: channel(self.g_f() * factor),
            b: channel(self.b_f() * factor),
            a: self.a,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r_f(), self.g_f(), self.b_f(), self.a_f()]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
