use serde::{Deserialize, Serialize};

/// Behavior version of the lighting subsystem.
///
/// Picked once when the view is built and fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightVersion {
    /// Append-only light patches, one per source, no occlusion.
    Legacy,
    /// Per-cell footprint, `floor(i/2)` half-width.
    #[default]
    Basic,
    /// Per-cell footprint, `floor(i/1.3)` half-width, full occlusion and
    /// creature walk offsets.
    Extended,
}

impl LightVersion {
    /// Map a numeric selector to a version.
    pub fn from_u16(value: u16) -> Result<Self, ConfigError> {
        match value {
            0 => Ok(Self::Legacy),
            1 => Ok(Self::Basic),
            2 => Ok(Self::Extended),
            other => Err(ConfigError::UnknownVersion(other)),
        }
    }

    pub fn as_u16(self) -> u16 {
        match self {
            Self::Legacy => 0,
            Self::Basic => 1,
            Self::Extended => 2,
        }
    }

    /// Plateau factor used for the bubble texture unless overridden.
    pub fn default_center_factor(self) -> f32 {
        match self {
            Self::Legacy => 0.1,
            Self::Basic | Self::Extended => 0.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown light version selector: {0}")]
    UnknownVersion(u16),

    #[error("tile pixel size must be positive, got {0}")]
    InvalidTilePixels(i32),

    #[error("bubble center factor must be within [0, 1), got {0}")]
    InvalidCenterFactor(f32),

    #[error("invalid lighting config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lighting configuration, provided by the surrounding view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Placement / compositing variant.
    #[serde(default)]
    pub version: LightVersion,
    /// Pixel size of one tile inside the light buffer (default: 32).
    #[serde(default = "default_tile_pixels")]
    pub tile_pixels: i32,
    /// Overrides the version's bubble plateau factor.
    #[serde(default)]
    pub bubble_center_factor: Option<f32>,
}

fn default_tile_pixels() -> i32 {
    32
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            version: LightVersion::default(),
            tile_pixels: default_tile_pixels(),
            bubble_center_factor: None,
        }
    }
}

impl LightingConfig {
    pub fn new(version: LightVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    /// Build a config from a numeric version selector.
    pub fn from_version_number(value: u16) -> Result<Self, ConfigError> {
        Ok(Self::new(LightVersion::from_u16(value)?))
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_tile_pixels(mut self, tile_pixels: i32) -> Self {
        self.tile_pixels = tile_pixels;
        self
    }

    pub fn with_center_factor(mut self, factor: f32) -> Self {
        self.bubble_center_factor = Some(factor);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_pixels <= 0 {
            return Err(ConfigError::InvalidTilePixels(self.tile_pixels));
        }
        if let Some(factor) = self.bubble_center_factor {
            if !(0.0..1.0).contains(&factor) {
                return Err(ConfigError::InvalidCenterFactor(factor));
            }
        }
        Ok(())
    }

    /// Effective plateau factor for the bubble texture.
    pub fn center_factor(&self) -> f32 {
        self.bubble_center_factor
            .unwrap_or_else(|| self.version.default_center_factor())
    }
}
