//! River generation
//!
//! Rivers are not additive: every pass starts from the baseline heightfield
//! with an empty river map, picks random high sources, and traces each one
//! downhill. Traces that come out too short or get stuck are rolled back.

pub mod pit;
pub mod trace;

pub use trace::{trace_river, TraceEnd, TraceReport};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::Terrain;

/// Source picks allowed per requested river
pub const ATTEMPTS_PER_RIVER: usize = 20;

/// Parameters for river generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiverParams {
    /// Accepted rivers to aim for
    pub river_count: usize,
    /// Minimum cells in a kept river
    pub min_river_length: usize,
    /// Only start rivers at or above this height
    pub min_source_height: f32,
    /// Source placement seed. `None` draws fresh entropy, so layouts differ
    /// between runs on identical terrain.
    pub seed: Option<u64>,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            river_count: 5,
            min_river_length: 10,
            min_source_height: 0.5,
            seed: None,
        }
    }
}

/// Statistics from a river pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RiverStats {
    /// Random source picks made
    pub attempts: usize,
    /// Traces kept
    pub accepted: usize,
    /// Traces rolled back for being shorter than the minimum
    pub rejected_short: usize,
    /// Traces rolled back for getting stuck in a pit
    pub rejected_stuck: usize,
    /// Kept traces that reached the sea
    pub reached_sea: usize,
    /// Cells classified as river after the pass
    pub river_cells: usize,
    /// Height writes kept from pit escapes
    pub carved_cells: usize,
}

/// Source picks allowed for a pass, saturating for absurd river counts.
pub fn max_attempts(river_count: usize) -> usize {
    river_count.saturating_mul(ATTEMPTS_PER_RIVER)
}

/// Run a river pass with sources drawn from `rng`.
pub fn generate<R: Rng>(terrain: &mut Terrain, params: &RiverParams, rng: &mut R) -> RiverStats {
    terrain.begin_rivers();

    let mut stats = RiverStats::default();
    let width = terrain.width();
    let depth = terrain.depth();
    if width == 0 || depth == 0 {
        terrain.bump_revision();
        return stats;
    }

    let budget = max_attempts(params.river_count);
    while stats.accepted < params.river_count && stats.attempts < budget {
        stats.attempts += 1;

        let x = rng.gen_range(0..width);
        let z = rng.gen_range(0..depth);
        if *terrain.heights().get(x, z) < params.min_source_height
            || terrain.river_map().get(x, z).is_river()
        {
            continue;
        }

        let report = trace_river(terrain, (x, z), params.min_river_length);
        if report.accepted {
            stats.accepted += 1;
            stats.carved_cells += report.carved_cells;
            if report.end == TraceEnd::ReachedSea {
                stats.reached_sea += 1;
            }
        } else if report.end == TraceEnd::Stuck {
            stats.rejected_stuck += 1;
        } else {
            stats.rejected_short += 1;
        }
    }

    stats.river_cells = terrain
        .river_map()
        .as_slice()
        .iter()
        .filter(|r| r.is_river())
        .count();
    terrain.bump_revision();

    tracing::info!(
        target: "genesis::rivers",
        attempts = stats.attempts,
        accepted = stats.accepted,
        rejected_short = stats.rejected_short,
        rejected_stuck = stats.rejected_stuck,
        river_cells = stats.river_cells,
        "river pass complete"
    );
    stats
}

/// Run a river pass, seeding source placement from `params.seed` or from
/// entropy when no seed is set.
pub fn run(terrain: &mut Terrain, params: &RiverParams) -> RiverStats {
    let mut rng = match params.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate(terrain, params, &mut rng)
}
