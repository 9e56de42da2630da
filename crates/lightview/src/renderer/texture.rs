use image::RgbaImage;
use crate::api::types::Size;

/// CPU-side texture: an RGBA pixel snapshot plus sampling flags.
///
/// Backends upload the pixels once and key their GPU handle on the texture's
/// address; the pixels never change after construction unless
/// `upload_pixels` is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    image: RgbaImage,
    smooth: bool,
}

impl Texture {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image,
            smooth: false,
        }
    }

    /// Enable bilinear filtering when sampled.
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn set_smooth(&mut self, smooth: bool) {
        self.smooth = smooth;
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as i32, self.image.height() as i32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA of one pixel, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    /// Replace the pixels with a copy of `image`.
    pub fn upload_pixels(&mut self, image: &RgbaImage) {
        self.image = image.clone();
    }
}
