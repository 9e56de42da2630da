pub mod types;
pub mod config;

pub use types::{Direction, Light, Position, Rect, Size, MAX_Z};
pub use config::{ConfigError, LightVersion, LightingConfig};
