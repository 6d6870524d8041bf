//! Downhill river tracing with transactional rollback.
//!
//! A trace marks every visited cell as river body and may carve the
//! heightfield to escape pits. Every write is logged with the value it
//! replaced, so a rejected trace can be undone exactly.

use crate::rivers::pit::{find_lower_cell, line_points, step_toward, PIT_SEARCH_RADIUS};
use crate::terrain::{RiverType, Terrain};

/// Step budget for a single trace.
pub const MAX_TRACE_STEPS: usize = 1000;

/// How far below the current cell a forced descent lands.
pub const CARVE_EPSILON: f32 = 0.001;

/// Why a trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEnd {
    /// Reached a cell below sea level
    ReachedSea,
    /// Ran out of steps without getting stuck
    StepBudget,
    /// A pit with no lower cell within the search radius
    Stuck,
}

/// Outcome of a single trace attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceReport {
    /// Visited cells in order, starting at the source
    pub path: Vec<(usize, usize)>,
    pub end: TraceEnd,
    /// Whether the trace was kept. Rejected traces leave no trace.
    pub accepted: bool,
    /// Height writes made while escaping pits
    pub carved_cells: usize,
}

impl TraceReport {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Undo log for one trace.
#[derive(Default)]
struct TraceLog {
    heights: Vec<(usize, usize, f32)>,
    marks: Vec<(usize, usize, RiverType)>,
}

impl TraceLog {
    fn set_height(&mut self, terrain: &mut Terrain, x: usize, z: usize, h: f32) {
        self.heights.push((x, z, *terrain.heights().get(x, z)));
        terrain.set_height(x, z, h);
    }

    fn mark(&mut self, terrain: &mut Terrain, x: usize, z: usize) {
        self.marks.push((x, z, *terrain.river_map().get(x, z)));
        terrain.set_river_type(x, z, RiverType::Body);
    }

    /// Restore every logged value, newest first.
    fn rollback(self, terrain: &mut Terrain) {
        for (x, z, previous) in self.marks.into_iter().rev() {
            terrain.set_river_type(x, z, previous);
        }
        for (x, z, previous) in self.heights.into_iter().rev() {
            terrain.set_height(x, z, previous);
        }
    }
}

/// Trace a river downhill from `start`.
///
/// The trace is rejected and rolled back if it visits fewer than
/// `min_river_length` cells or gets stuck in an inescapable pit. A trace that
/// exhausts its step budget without getting stuck is kept even if it never
/// reached the sea.
pub fn trace_river(terrain: &mut Terrain, start: (usize, usize), min_river_length: usize) -> TraceReport {
    let sea_level = terrain.sea_level();
    let mut log = TraceLog::default();
    let mut path = Vec::new();
    let mut end = TraceEnd::StepBudget;
    let (mut cx, mut cz) = start;

    for _ in 0..MAX_TRACE_STEPS {
        log.mark(terrain, cx, cz);
        path.push((cx, cz));

        let current = *terrain.heights().get(cx, cz);
        if current < sea_level {
            end = TraceEnd::ReachedSea;
            break;
        }

        match lowest_neighbor(terrain, cx, cz, current) {
            Some(next) => (cx, cz) = next,
            None => match escape_pit(terrain, &mut log, cx, cz, current) {
                Some(next) => (cx, cz) = next,
                None => {
                    end = TraceEnd::Stuck;
                    break;
                }
            },
        }
    }

    let carved_cells = log.heights.len();
    let accepted = end != TraceEnd::Stuck && path.len() >= min_river_length;
    if !accepted {
        log.rollback(terrain);
    }

    tracing::debug!(
        target: "genesis::rivers",
        start_x = start.0,
        start_z = start.1,
        length = path.len(),
        ?end,
        accepted,
        carved_cells,
        "river trace"
    );

    TraceReport {
        path,
        end,
        accepted,
        carved_cells,
    }
}

/// Strictly lowest 8-neighbor; ties keep the first in scan order.
fn lowest_neighbor(terrain: &Terrain, cx: usize, cz: usize, current: f32) -> Option<(usize, usize)> {
    let heights = terrain.heights();
    let mut lowest = current;
    let mut next = None;
    for (nx, nz) in heights.neighbors_8(cx, cz) {
        let h = *heights.get(nx, nz);
        if h < lowest {
            lowest = h;
            next = Some((nx, nz));
        }
    }
    next
}

/// Carve a trench toward the first lower cell in range and return the next
/// cell to visit, which is guaranteed to be lower than `current`.
fn escape_pit(
    terrain: &mut Terrain,
    log: &mut TraceLog,
    cx: usize,
    cz: usize,
    current: f32,
) -> Option<(usize, usize)> {
    let target = find_lower_cell(terrain.heights(), cx, cz, current, PIT_SEARCH_RADIUS)?;
    let target_h = *terrain.heights().get(target.0, target.1);

    for (px, pz, t) in line_points((cx, cz), target) {
        let h = current + (target_h - current) * t;
        log.set_height(terrain, px, pz, h);
    }

    let next = step_toward((cx, cz), target);
    if *terrain.heights().get(next.0, next.1) >= current {
        log.set_height(terrain, next.0, next.1, current - CARVE_EPSILON);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::TerrainConfig;
    use crate::tilemap::Tilemap;

    fn terrain_from(heights: Tilemap<f32>) -> Terrain {
        Terrain::from_heights(
            TerrainConfig {
                seed: 1,
                sea_level: 0.2,
                ..TerrainConfig::default()
            },
            heights,
        )
    }

    /// 10×10 ramp from (0,0) = 1.0 down to (9,9) = 0.0
    fn ramp() -> Terrain {
        let mut heights = Tilemap::new_with(10, 10, 0.0f32);
        for z in 0..10 {
            for x in 0..10 {
                heights.set(x, z, 1.0 - (x + z) as f32 / 18.0);
            }
        }
        terrain_from(heights)
    }

    fn snapshot(terrain: &Terrain) -> (Vec<u32>, Vec<u8>) {
        (
            terrain.heights().as_slice().iter().map(|h| h.to_bits()).collect(),
            terrain.river_codes(),
        )
    }

    #[test]
    fn test_ramp_reaches_sea() {
        let mut terrain = ramp();
        let report = trace_river(&mut terrain, (0, 0), 5);

        assert_eq!(report.end, TraceEnd::ReachedSea);
        assert!(report.accepted);
        assert!(report.len() <= 10);
        let (lx, lz) = *report.path.last().unwrap();
        assert!(terrain.height(lx as i64, lz as i64) < 0.2);

        // Exactly the visited cells are river body
        for (x, z, river) in terrain.river_map().iter() {
            let visited = report.path.contains(&(x, z));
            assert_eq!(*river == RiverType::Body, visited);
            assert!(*river == RiverType::Body || *river == RiverType::None);
        }
        assert_eq!(report.carved_cells, 0);
    }

    #[test]
    fn test_short_trace_rolls_back() {
        let mut terrain = ramp();
        let before = snapshot(&terrain);
        let report = trace_river(&mut terrain, (0, 0), 50);

        assert_eq!(report.end, TraceEnd::ReachedSea);
        assert!(!report.accepted);
        assert_eq!(snapshot(&terrain), before);
    }

    #[test]
    fn test_start_below_sea_level() {
        let mut terrain = ramp();
        let before = snapshot(&terrain);

        let report = trace_river(&mut terrain, (9, 9), 2);
        assert_eq!(report.len(), 1);
        assert_eq!(report.end, TraceEnd::ReachedSea);
        assert!(!report.accepted);
        assert_eq!(snapshot(&terrain), before);

        let kept = trace_river(&mut terrain, (9, 9), 1);
        assert!(kept.accepted);
        assert_eq!(terrain.river_type(9, 9), RiverType::Body);
    }

    #[test]
    fn test_flat_terrain_is_stuck() {
        let mut terrain = terrain_from(Tilemap::new_with(10, 10, 0.5f32));
        let before = snapshot(&terrain);
        let report = trace_river(&mut terrain, (4, 4), 1);

        assert_eq!(report.end, TraceEnd::Stuck);
        assert!(!report.accepted);
        assert_eq!(snapshot(&terrain), before);
    }

    #[test]
    fn test_pit_escape_carves_descending_path() {
        // Basin at (5,5) walled in at 0.8, sea far to the right
        let mut heights = Tilemap::new_with(20, 11, 0.8f32);
        heights.set(5, 5, 0.6);
        for z in 0..11 {
            heights.set(19, z, 0.1);
        }
        let mut terrain = terrain_from(heights);

        let report = trace_river(&mut terrain, (5, 5), 3);
        assert_eq!(report.end, TraceEnd::ReachedSea);
        assert!(report.accepted);
        assert!(report.carved_cells > 0);

        // Every step went strictly down
        for pair in report.path.windows(2) {
            let a = terrain.height(pair[0].0 as i64, pair[0].1 as i64);
            let b = terrain.height(pair[1].0 as i64, pair[1].1 as i64);
            assert!(b < a, "{:?} -> {:?} not descending", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_step_budget_trace_is_kept() {
        // Gentle slope with no sea anywhere along it
        let mut heights = Tilemap::new_with(1200, 1, 0.0f32);
        for x in 0..1200 {
            heights.set(x, 0, 1.0 - x as f32 / 2000.0);
        }
        let mut terrain = Terrain::from_heights(
            TerrainConfig {
                sea_level: 0.0,
                ..TerrainConfig::default()
            },
            heights,
        );

        let report = trace_river(&mut terrain, (0, 0), 5);
        assert_eq!(report.end, TraceEnd::StepBudget);
        assert!(report.accepted);
        assert_eq!(report.len(), MAX_TRACE_STEPS);
        assert_eq!(*report.path.last().unwrap(), (MAX_TRACE_STEPS - 1, 0));
        assert_eq!(terrain.river_type(999, 0), RiverType::Body);
        assert_eq!(terrain.river_type(1000, 0), RiverType::None);
    }

    #[test]
    fn test_forced_descent_when_trench_rounds_flat() {
        // The escape target sits one ulp below the pit, so the first trench
        // cell interpolates back to the pit height and must be forced down.
        let pit = 0.6f32;
        let mut heights = Tilemap::new_with(12, 11, 0.8f32);
        heights.set(5, 5, pit);
        heights.set(10, 5, f32::from_bits(pit.to_bits() - 1));
        heights.set(11, 5, 0.19);
        let mut terrain = terrain_from(heights);

        let report = trace_river(&mut terrain, (5, 5), 3);
        assert_eq!(report.end, TraceEnd::ReachedSea);
        assert!(report.accepted);
        assert_eq!(report.path[1], (6, 5));
        assert_eq!(terrain.height(6, 5), pit - CARVE_EPSILON);
        assert_eq!(*report.path.last().unwrap(), (11, 5));
        for pair in report.path.windows(2) {
            let a = terrain.height(pair[0].0 as i64, pair[0].1 as i64);
            let b = terrain.height(pair[1].0 as i64, pair[1].1 as i64);
            assert!(b < a, "{:?} -> {:?} not descending", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rejected_carving_is_restored() {
        let mut heights = Tilemap::new_with(20, 11, 0.8f32);
        heights.set(5, 5, 0.6);
        for z in 0..11 {
            heights.set(19, z, 0.1);
        }
        let mut terrain = terrain_from(heights);
        let before = snapshot(&terrain);

        let report = trace_river(&mut terrain, (5, 5), 500);
        assert!(!report.accepted);
        assert!(report.carved_cells > 0);
        assert_eq!(snapshot(&terrain), before);
    }

    #[test]
    fn test_rollback_keeps_earlier_river() {
        let mut terrain = ramp();
        let first = trace_river(&mut terrain, (0, 0), 5);
        assert!(first.accepted);
        let before = snapshot(&terrain);

        // Runs down the first river's bed and is too short to keep
        let report = trace_river(&mut terrain, (3, 3), 50);
        assert!(!report.accepted);
        assert_eq!(snapshot(&terrain), before);
        for &(x, z) in &first.path {
            assert_eq!(terrain.river_type(x as i64, z as i64), RiverType::Body);
        }
    }
}
