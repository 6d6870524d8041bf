//! Utility functions for erosion calculations
//!
//! Bilinear height/gradient sampling and the 4-corner bilinear footprint used
//! to spread erosion and deposition. Callers must keep `x < width - 1` and
//! `z < depth - 1` so the four corners exist.

use crate::tilemap::Tilemap;

/// The four corner heights and fractional offsets around a continuous position.
struct Cell {
    h00: f32,
    h10: f32,
    h01: f32,
    h11: f32,
    u: f32,
    v: f32,
}

fn cell_at(heightmap: &Tilemap<f32>, x: f32, z: f32) -> Cell {
    let node_x = x as usize;
    let node_z = z as usize;
    Cell {
        h00: *heightmap.get(node_x, node_z),
        h10: *heightmap.get(node_x + 1, node_z),
        h01: *heightmap.get(node_x, node_z + 1),
        h11: *heightmap.get(node_x + 1, node_z + 1),
        u: x - node_x as f32,
        v: z - node_z as f32,
    }
}

/// Sample height at a continuous position using bilinear interpolation.
pub fn height_at(heightmap: &Tilemap<f32>, x: f32, z: f32) -> f32 {
    let c = cell_at(heightmap, x, z);
    c.h00 * (1.0 - c.u) * (1.0 - c.v)
        + c.h10 * c.u * (1.0 - c.v)
        + c.h01 * (1.0 - c.u) * c.v
        + c.h11 * c.u * c.v
}

/// Gradient at a continuous position, pointing in the direction of steepest ascent.
pub fn gradient_at(heightmap: &Tilemap<f32>, x: f32, z: f32) -> (f32, f32) {
    let c = cell_at(heightmap, x, z);
    let grad_x = (c.h10 - c.h00) * (1.0 - c.v) + (c.h11 - c.h01) * c.v;
    let grad_z = (c.h01 - c.h00) * (1.0 - c.u) + (c.h11 - c.h10) * c.u;
    (grad_x, grad_z)
}

/// Bilinear weights for the corners (x0,z0), (x1,z0), (x0,z1), (x1,z1).
/// They sum to 1 for any offsets in [0, 1].
pub fn bilinear_weights(u: f32, v: f32) -> [f32; 4] {
    [
        (1.0 - u) * (1.0 - v),
        u * (1.0 - v),
        (1.0 - u) * v,
        u * v,
    ]
}

/// Add `amount` (negative to erode) to the four corners of cell
/// `(node_x, node_z)`, weighted by the offsets. Returns the total change applied.
pub fn distribute(
    heightmap: &mut Tilemap<f32>,
    node_x: usize,
    node_z: usize,
    u: f32,
    v: f32,
    amount: f32,
) -> f32 {
    let corners = [
        (node_x, node_z),
        (node_x + 1, node_z),
        (node_x, node_z + 1),
        (node_x + 1, node_z + 1),
    ];
    let mut applied = 0.0;
    for ((x, z), weight) in corners.into_iter().zip(bilinear_weights(u, v)) {
        let delta = amount * weight;
        *heightmap.get_mut(x, z) += delta;
        applied += delta;
    }
    applied
}
