pub mod camera;
pub mod recording;
pub mod texture;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{
    BlendEquation, BoundFramebuffer, CompositionMode,
    Framebuffer, Painter, PainterScope,
};
pub use camera::{AwareRange, MapCamera, Viewport};
pub use recording::{DrawCommand, RecordingFramebuffer, RecordingPainter};
pub use texture::Texture;
