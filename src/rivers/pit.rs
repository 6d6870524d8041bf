//! Pit escape for river traces.
//!
//! When a trace sits in a local minimum, it looks for any strictly lower cell
//! in a growing square around it, then cuts a straight trench toward the first
//! one found.

use crate::tilemap::Tilemap;

/// Largest search half-width, in cells.
pub const PIT_SEARCH_RADIUS: i64 = 20;

/// First cell within `radius` of `(cx, cz)` whose height is strictly below
/// `current`. Rings are scanned by increasing radius, then row, then column;
/// the first hit wins even if a closer or lower cell exists later in the ring.
pub fn find_lower_cell(
    heights: &Tilemap<f32>,
    cx: usize,
    cz: usize,
    current: f32,
    radius: i64,
) -> Option<(usize, usize)> {
    for r in 1..=radius {
        for dz in -r..=r {
            for dx in -r..=r {
                // Inner cells were covered by smaller rings
                if dx.abs() != r && dz.abs() != r {
                    continue;
                }
                let nx = cx as i64 + dx;
                let nz = cz as i64 + dz;
                match heights.get_checked(nx, nz) {
                    Some(&h) if h < current => return Some((nx as usize, nz as usize)),
                    _ => {}
                }
            }
        }
    }
    None
}

/// Lattice points strictly between `from` and `to`, one per unit of the
/// dominant axis, each with its interpolation factor in (0, 1).
pub fn line_points(from: (usize, usize), to: (usize, usize)) -> Vec<(usize, usize, f32)> {
    let dx = to.0 as i64 - from.0 as i64;
    let dz = to.1 as i64 - from.1 as i64;
    let steps = dx.abs().max(dz.abs());

    (1..steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let px = from.0 as i64 + (dx as f32 * t).round() as i64;
            let pz = from.1 as i64 + (dz as f32 * t).round() as i64;
            (px as usize, pz as usize, t)
        })
        .collect()
}

/// One cell toward `to`: a unit move along the dominant axis with the minor
/// axis offset in proportion to the slope.
pub fn step_toward(from: (usize, usize), to: (usize, usize)) -> (usize, usize) {
    let dx = to.0 as i64 - from.0 as i64;
    let dz = to.1 as i64 - from.1 as i64;
    let steps = dx.abs().max(dz.abs());
    if steps == 0 {
        return from;
    }
    let nx = from.0 as i64 + (dx as f32 / steps as f32).round() as i64;
    let nz = from.1 as i64 + (dz as f32 / steps as f32).round() as i64;
    (nx as usize, nz as usize)
}
