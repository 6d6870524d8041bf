//! Erosion simulation module
//!
//! Particle-based hydraulic erosion over the terrain heightfield. Passes are
//! idempotent: the first pass after generation (or after a river pass)
//! snapshots the heightfield, and every later pass restores that snapshot
//! before simulating, so tweaking parameters re-simulates from the same
//! surface instead of stacking erosion on erosion.

pub mod hydraulic;
pub mod params;
pub mod utils;

pub use params::{ErosionParams, ErosionPreset};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::terrain::Terrain;

/// Statistics from erosion simulation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErosionStats {
    /// Droplets spawned
    pub droplets: usize,
    /// Droplet steps that stayed inside the interior
    pub steps_taken: u64,
    /// Total material eroded (in height units)
    pub total_eroded: f64,
    /// Total material deposited
    pub total_deposited: f64,
    /// Largest single-step erosion
    pub max_erosion: f32,
    /// Largest single-step deposition
    pub max_deposition: f32,
}

/// Run an erosion pass with droplets drawn from `rng`.
pub fn execute<R: Rng>(terrain: &mut Terrain, params: &ErosionParams, rng: &mut R) -> ErosionStats {
    terrain.begin_erosion();
    let stats = hydraulic::simulate(terrain.heights_mut(), params, rng);
    terrain.bump_revision();

    tracing::info!(
        target: "genesis::erosion",
        droplets = stats.droplets,
        steps = stats.steps_taken,
        eroded = stats.total_eroded,
        deposited = stats.total_deposited,
        "erosion pass complete"
    );
    stats
}

/// Run an erosion pass, seeding the droplet RNG from `params.seed` or from
/// entropy when no seed is set.
pub fn run(terrain: &mut Terrain, params: &ErosionParams) -> ErosionStats {
    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    execute(terrain, params, &mut rng)
}
