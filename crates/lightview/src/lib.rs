pub mod api;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, LightVersion, LightingConfig};
pub use api::types::{Direction, Light, Position, Rect, Size};
pub use components::color::Color;
pub use components::creature::CreatureMotion;
pub use components::tile::{TileGrid, TileLookup, TileState};
pub use renderer::camera::{MapCamera, Viewport};
pub use renderer::texture::Texture;
pub use renderer::traits::{BlendEquation, CompositionMode, Framebuffer, Painter};
pub use systems::bubble::{generate_light_bubble, BubbleStyle};
pub use systems::light_map::{Claim, LightMap, LightSequence, LightSource, LightVertex};
pub use systems::placement::{
    strategy_for, AppendPlacement, FootprintPlacement, LightRequest, LightStrategy,
    PlacementContext, Stencil, MAX_LIGHT_INTENSITY,
};
pub use systems::lighting::{LightView, MAX_AMBIENT_LIGHT_INTENSITY};
pub use assets::texture_cache::{Appearance, TileTextureCache};
