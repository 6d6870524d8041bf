//! Hydraulic erosion simulation using particle-based water droplets.
//!
//! Each droplet follows the terrain gradient, picking up sediment while it
//! runs downhill and dropping it when it slows, overfills, or climbs. Changes
//! land on the four grid corners around the droplet's position before the
//! step, weighted bilinearly.

use crate::erosion::params::ErosionParams;
use crate::erosion::utils::{distribute, gradient_at, height_at};
use crate::erosion::ErosionStats;
use crate::tilemap::Tilemap;
use rand::Rng;

/// Droplets with less water than this evaporate.
pub const MIN_WATER: f32 = 0.01;

/// Keeps spawn positions at least this far from the far edges so the
/// bilinear footprint stays in range.
const SPAWN_MARGIN: f32 = 1.1;

/// A water droplet for hydraulic erosion simulation
#[derive(Clone, Debug)]
struct WaterDroplet {
    /// Position (floating point for interpolation)
    x: f32,
    z: f32,
    /// Movement direction (unit length, or zero before the first step)
    dir_x: f32,
    dir_z: f32,
    speed: f32,
    water: f32,
    sediment: f32,
}

impl WaterDroplet {
    fn new(x: f32, z: f32, params: &ErosionParams) -> Self {
        Self {
            x,
            z,
            dir_x: 0.0,
            dir_z: 0.0,
            speed: params.start_speed,
            water: params.start_water,
            sediment: 0.0,
        }
    }
}

/// Run the droplet simulation on a heightmap in place.
///
/// Per droplet step:
/// 1. Bilinear gradient at the current position
/// 2. Blend previous direction with the downhill direction by `inertia`, renormalize
/// 3. Advance one cell; stop if outside the interior
/// 4. Capacity from slope, speed and water
/// 5. Deposit when over capacity or climbing, otherwise erode (never deeper than the step)
/// 6. Update speed from the height change, evaporate water
pub fn simulate<R: Rng>(
    heightmap: &mut Tilemap<f32>,
    params: &ErosionParams,
    rng: &mut R,
) -> ErosionStats {
    let mut stats = ErosionStats::default();

    let width = heightmap.width;
    let depth = heightmap.depth;
    if width < 2 || depth < 2 {
        return stats;
    }
    let max_x = (width as f32 - SPAWN_MARGIN).max(f32::EPSILON);
    let max_z = (depth as f32 - SPAWN_MARGIN).max(f32::EPSILON);
    let interior_x = (width - 1) as f32;
    let interior_z = (depth - 1) as f32;

    for _ in 0..params.iterations {
        let mut drop = WaterDroplet::new(rng.gen_range(0.0..max_x), rng.gen_range(0.0..max_z), params);
        stats.droplets += 1;

        for _ in 0..params.max_lifetime {
            let node_x = drop.x as usize;
            let node_z = drop.z as usize;
            let offset_x = drop.x - node_x as f32;
            let offset_z = drop.z - node_z as f32;
            let old_x = drop.x;
            let old_z = drop.z;

            let (grad_x, grad_z) = gradient_at(heightmap, drop.x, drop.z);

            drop.dir_x = drop.dir_x * params.inertia - grad_x * (1.0 - params.inertia);
            drop.dir_z = drop.dir_z * params.inertia - grad_z * (1.0 - params.inertia);

            let len = (drop.dir_x * drop.dir_x + drop.dir_z * drop.dir_z).sqrt();
            if len != 0.0 {
                drop.dir_x /= len;
                drop.dir_z /= len;
            }

            drop.x += drop.dir_x;
            drop.z += drop.dir_z;

            if drop.x < 0.0 || drop.x >= interior_x || drop.z < 0.0 || drop.z >= interior_z {
                break;
            }
            stats.steps_taken += 1;

            let height_old = height_at(heightmap, old_x, old_z);
            let height_new = height_at(heightmap, drop.x, drop.z);
            let delta_h = height_new - height_old;

            let capacity = (-delta_h).max(params.min_slope)
                * drop.speed
                * drop.water
                * params.capacity_factor;

            if drop.sediment > capacity || delta_h > 0.0 {
                let amount = if delta_h > 0.0 {
                    // Climbing: fill the pit behind us
                    delta_h.min(drop.sediment)
                } else {
                    (drop.sediment - capacity) * params.deposition_rate
                };
                drop.sediment -= amount;
                distribute(heightmap, node_x, node_z, offset_x, offset_z, amount);

                stats.total_deposited += amount as f64;
                stats.max_deposition = stats.max_deposition.max(amount);
            } else {
                let amount = ((capacity - drop.sediment) * params.erosion_rate).min(-delta_h);
                distribute(heightmap, node_x, node_z, offset_x, offset_z, -amount);
                drop.sediment += amount;

                stats.total_eroded += amount as f64;
                stats.max_erosion = stats.max_erosion.max(amount);
            }

            drop.speed = (drop.speed * drop.speed + delta_h * params.gravity).max(0.0).sqrt();
            drop.water *= 1.0 - params.evaporation_rate;

            if drop.water < MIN_WATER {
                break;
            }
        }
    }

    stats
}
