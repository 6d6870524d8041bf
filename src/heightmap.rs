use noise::{NoiseFn, Perlin, Seedable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tilemap::Tilemap;

// =============================================================================
// TERRAIN PARAMETERS
// =============================================================================

/// Parameters for terrain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TerrainConfig {
    /// Grid cells along x
    pub width: usize,
    /// Grid cells along z
    pub depth: usize,
    /// Noise seed
    pub seed: u64,
    /// Spatial scale of the noise (higher = zoomed in, smoother)
    pub noise_scale: f32,
    /// Vertical scale applied when deriving the mesh
    pub height_multiplier: f32,
    /// Heights below this are water
    pub sea_level: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 100,
            depth: 100,
            seed: 12345,
            noise_scale: 0.1,
            height_multiplier: 10.0,
            sea_level: 0.2,
        }
    }
}

/// Noise periods across the whole map at `noise_scale == 1.0`
const BASE_FREQUENCY: f64 = 0.5;

/// fBm settings for the terrain layer
const OCTAVES: u32 = 6;
const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

// =============================================================================
// HEIGHTMAP
// =============================================================================

/// Sample the coherent noise field into a `width × depth` heightfield in [0, 1].
///
/// Output depends only on (seed, width, depth, noise_scale).
pub fn generate_heightmap(config: &TerrainConfig) -> Tilemap<f32> {
    let width = config.width;
    let depth = config.depth;
    let mut heightmap = Tilemap::new_with(width, depth, 0.0f32);
    if heightmap.is_empty() {
        return heightmap;
    }

    let noise = Perlin::new(0).set_seed(config.seed as u32);
    let frequency = BASE_FREQUENCY / (config.noise_scale.max(f32::EPSILON) as f64);

    heightmap
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(z, row)| {
            let nz = z as f64 / depth as f64 * frequency;
            for (x, cell) in row.iter_mut().enumerate() {
                let nx = x as f64 / width as f64 * frequency;
                let value = fbm(&noise, nx, nz, OCTAVES, PERSISTENCE, LACUNARITY);
                *cell = to_unit_range(value);
            }
        });

    heightmap
}

/// Map a noise sample from [-1, 1] into [0, 1].
pub(crate) fn to_unit_range(value: f64) -> f32 {
    ((value.clamp(-1.0, 1.0) + 1.0) * 0.5) as f32
}

/// Fractal Brownian motion, normalized to roughly [-1, 1]
pub(crate) fn fbm(
    noise: &Perlin,
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> TerrainConfig {
        TerrainConfig {
            width: 64,
            depth: 48,
            seed,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn test_same_inputs_same_heights() {
        let a = generate_heightmap(&config(7));
        let b = generate_heightmap(&config(7));
        let a_bits: Vec<u32> = a.as_slice().iter().map(|h| h.to_bits()).collect();
        let b_bits: Vec<u32> = b.as_slice().iter().map(|h| h.to_bits()).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn test_different_seed_changes_heights() {
        let a = generate_heightmap(&config(7));
        let b = generate_heightmap(&config(8));
        assert_ne!(a, b);
    }

    #[test]
    fn test_heights_normalized() {
        let map = generate_heightmap(&config(99));
        assert_eq!(map.width, 64);
        assert_eq!(map.depth, 48);
        for (_, _, &h) in map.iter() {
            assert!((0.0..=1.0).contains(&h));
        }
        let (min, max) = map.min_max().unwrap();
        assert!(max > min);
    }

    #[test]
    fn test_larger_scale_is_smoother() {
        let roughness = |scale: f32| {
            let map = generate_heightmap(&TerrainConfig {
                noise_scale: scale,
                ..config(3)
            });
            let mut total = 0.0;
            for z in 0..map.depth {
                for x in 1..map.width {
                    total += (*map.get(x, z) - *map.get(x - 1, z)).abs();
                }
            }
            total
        };
        assert!(roughness(1.0) < roughness(0.05));
    }

    #[test]
    fn test_empty_dimensions() {
        let map = generate_heightmap(&TerrainConfig {
            width: 0,
            ..TerrainConfig::default()
        });
        assert!(map.is_empty());
    }
}
