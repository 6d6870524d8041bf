//! Project configuration
//!
//! Settings for all three passes, persisted as camelCase JSON. Sections
//! missing from a file fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::erosion::{ErosionParams, ErosionPreset};
use crate::heightmap::TerrainConfig;
use crate::rivers::RiverParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub terrain: TerrainConfig,
    pub erosion: ErosionParams,
    pub rivers: RiverParams,
}

impl GenesisConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Replace the erosion parameters with a preset, keeping the droplet seed.
    pub fn apply_erosion_preset(&mut self, preset: ErosionPreset) {
        let seed = self.erosion.seed;
        self.erosion = ErosionParams {
            seed,
            ..ErosionParams::from_preset(preset)
        };
    }

    /// Reject settings the generators cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if terrain.width == 0 || terrain.depth == 0 {
            return Err(ConfigError::Invalid(format!(
                "terrain size must be non-zero, got {}x{}",
                terrain.width, terrain.depth
            )));
        }
        if terrain.noise_scale.is_nan() || terrain.noise_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "noise scale must be positive, got {}",
                terrain.noise_scale
            )));
        }

        let erosion = &self.erosion;
        for (name, value) in [
            ("inertia", erosion.inertia),
            ("erosionRate", erosion.erosion_rate),
            ("depositionRate", erosion.deposition_rate),
            ("evaporationRate", erosion.evaporation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} must be in [0, 1], got {}", name, value)));
            }
        }
        Ok(())
    }
}
