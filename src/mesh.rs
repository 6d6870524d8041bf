//! CPU-side mesh data for the renderer.
//!
//! Turns the heightfield and river map into a flat-shaded-ready triangle list
//! with smooth normals and vertex colors. Uploading it is the renderer's job.

use glam::Vec3;

use crate::terrain::{RiverType, Terrain};

pub type Rgba = [u8; 4];

pub const RIVER_COLOR: Rgba = [0, 121, 241, 255];
pub const SEA_COLOR: Rgba = [0, 105, 148, 255];
pub const SAND_COLOR: Rgba = [211, 176, 131, 255];
pub const GRASS_COLOR: Rgba = [0, 117, 44, 255];
pub const ROCK_COLOR: Rgba = [130, 130, 130, 255];
pub const SNOW_COLOR: Rgba = [255, 255, 255, 255];

/// Height band above sea level that renders as beach
const SAND_BAND: f32 = 0.05;
const GRASS_LIMIT: f32 = 0.6;
const ROCK_LIMIT: f32 = 0.8;

/// Non-indexed triangle list, two triangles (six vertices) per grid cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Rgba>,
    /// Terrain revision this mesh was built from
    pub revision: u64,
}

impl TerrainMesh {
    /// Build the mesh for the current terrain, or `None` if the grid has no
    /// cells to triangulate.
    pub fn build(terrain: &Terrain) -> Option<Self> {
        let width = terrain.width();
        let depth = terrain.depth();
        if width < 2 || depth < 2 {
            return None;
        }

        let multiplier = terrain.config().height_multiplier;
        let sea_level = terrain.sea_level();
        let vertex_count = (width - 1) * (depth - 1) * 6;
        let mut mesh = TerrainMesh {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            colors: Vec::with_capacity(vertex_count),
            revision: terrain.revision(),
        };

        for z in 0..depth as i64 - 1 {
            for x in 0..width as i64 - 1 {
                // Counter-clockwise: (BL, TL, BR) then (TL, TR, BR)
                for (vx, vz) in [(x, z), (x, z + 1), (x + 1, z), (x, z + 1), (x + 1, z + 1), (x + 1, z)] {
                    let h = terrain.height(vx, vz);
                    mesh.positions.push(Vec3::new(vx as f32, h * multiplier, vz as f32));
                    mesh.normals.push(vertex_normal(terrain, vx, vz, multiplier));
                    mesh.colors.push(surface_color(h, sea_level, terrain.river_type(vx, vz)));
                }
            }
        }

        Some(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the terrain changed since this mesh was built.
    pub fn is_stale(&self, terrain: &Terrain) -> bool {
        self.revision != terrain.revision()
    }
}

/// Vertex color for a height and river classification.
pub fn surface_color(h: f32, sea_level: f32, river: RiverType) -> Rgba {
    let h = h.clamp(0.0, 1.0);
    if river.is_river() {
        RIVER_COLOR
    } else if h < sea_level {
        SEA_COLOR
    } else if h < sea_level + SAND_BAND {
        SAND_COLOR
    } else if h < GRASS_LIMIT {
        GRASS_COLOR
    } else if h < ROCK_LIMIT {
        ROCK_COLOR
    } else {
        SNOW_COLOR
    }
}

/// Smooth normal from central differences. Neighbors outside the grid read as 0.
pub fn vertex_normal(terrain: &Terrain, x: i64, z: i64, multiplier: f32) -> Vec3 {
    let h_left = terrain.height(x - 1, z) * multiplier;
    let h_right = terrain.height(x + 1, z) * multiplier;
    let h_down = terrain.height(x, z - 1) * multiplier;
    let h_up = terrain.height(x, z + 1) * multiplier;

    let horizontal = Vec3::new(2.0, h_right - h_left, 0.0);
    let vertical = Vec3::new(0.0, h_up - h_down, 2.0);
    vertical.cross(horizontal).normalize_or_zero()
}
