pub mod texture_cache;

pub use texture_cache::{Appearance, TileTextureCache};
