//! Erosion simulation parameters and configuration

use serde::{Deserialize, Serialize};

/// Erosion intensity preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErosionPreset {
    /// Few droplets - subtle smoothing
    Light,
    /// Balanced erosion
    #[default]
    Normal,
    /// Many aggressive droplets - deep gullies
    Heavy,
}

impl ErosionPreset {
    pub fn all() -> &'static [Self] {
        &[Self::Light, Self::Normal, Self::Heavy]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Light => "Subtle smoothing",
            Self::Normal => "Balanced erosion",
            Self::Heavy => "Deep gullies and fans",
        }
    }
}

impl std::fmt::Display for ErosionPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Normal => write!(f, "normal"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

impl std::str::FromStr for ErosionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "normal" => Ok(Self::Normal),
            "heavy" => Ok(Self::Heavy),
            other => Err(format!("unknown erosion preset '{other}'")),
        }
    }
}

/// Hydraulic erosion parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErosionParams {
    /// Number of water droplets to simulate
    pub iterations: usize,

    /// Fraction of the spare capacity a droplet erodes per step (0.0-1.0)
    pub erosion_rate: f32,

    /// Fraction of the excess sediment a droplet drops per step (0.0-1.0)
    pub deposition_rate: f32,

    /// Acceleration from height change
    pub gravity: f32,

    /// Water lost per step (0.0-1.0)
    pub evaporation_rate: f32,

    /// Reserved. Erosion always uses the 4-cell bilinear footprint.
    pub erosion_radius: usize,

    /// Maximum steps per droplet
    pub max_lifetime: usize,

    /// Momentum conservation factor (0.0 = pure gradient descent, 1.0 = straight line)
    pub inertia: f32,

    /// Initial droplet speed
    pub start_speed: f32,

    /// Initial droplet water volume
    pub start_water: f32,

    /// Floor on the slope term of the capacity, so flat ground still carries a little
    pub min_slope: f32,

    /// Sediment carrying capacity multiplier
    pub capacity_factor: f32,

    /// Droplet RNG seed. `None` draws fresh entropy on every run.
    pub seed: Option<u64>,
}

impl Default for ErosionParams {
    fn default() -> Self {
        Self {
            iterations: 50_000,
            erosion_rate: 0.5,
            deposition_rate: 0.5,
            gravity: 4.0,
            evaporation_rate: 0.05,
            erosion_radius: 3,
            max_lifetime: 30,
            inertia: 0.05,
            start_speed: 1.0,
            start_water: 1.0,
            min_slope: 0.05,
            capacity_factor: 4.0,
            seed: None,
        }
    }
}

impl ErosionParams {
    /// Create a fast configuration for testing (fewer iterations)
    pub fn fast() -> Self {
        Self {
            iterations: 2_000,
            ..Default::default()
        }
    }

    /// Create parameters from a preset
    pub fn from_preset(preset: ErosionPreset) -> Self {
        match preset {
            ErosionPreset::Light => Self {
                iterations: 10_000,
                erosion_rate: 0.3,
                ..Default::default()
            },
            ErosionPreset::Normal => Self::default(),
            ErosionPreset::Heavy => Self {
                iterations: 150_000,
                erosion_rate: 0.7,
                capacity_factor: 6.0,
                max_lifetime: 60,
                ..Default::default()
            },
        }
    }

    /// Same parameters with a fixed droplet seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}
