//! Orientation field for street-grid alignment.
//!
//! One unit vector per cell, derived from a noise pass over the field's own
//! dimensions. It never reads the heightfield.

use std::f32::consts::TAU;

use glam::Vec2;
use noise::{Perlin, Seedable};

use crate::heightmap::{fbm, to_unit_range};

/// Noise periods across the field
const FIELD_FREQUENCY: f64 = 5.0;
const OCTAVES: u32 = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct TensorField {
    width: usize,
    depth: usize,
    grid: Vec<Vec2>,
    /// Seed of the last `generate`, reused on resize
    seed: Option<u64>,
}

impl TensorField {
    /// A field of `width × depth` cells all pointing along +x.
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            grid: vec![Vec2::X; width * depth],
            seed: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Fill the grid from seeded noise: each sample's intensity in [0, 1]
    /// becomes an angle in [0, 2π).
    pub fn generate(&mut self, seed: u64) {
        self.seed = Some(seed);
        let noise = Perlin::new(0).set_seed(seed as u32);

        for z in 0..self.depth {
            for x in 0..self.width {
                let nx = x as f64 / self.width as f64 * FIELD_FREQUENCY;
                let nz = z as f64 / self.depth as f64 * FIELD_FREQUENCY;
                let intensity = to_unit_range(fbm(&noise, nx, nz, OCTAVES, 0.5, 2.0));
                let angle = (intensity * TAU).rem_euclid(TAU);
                self.grid[z * self.width + x] = Vec2::from_angle(angle);
            }
        }
    }

    /// Change dimensions. A generated field is regenerated with its seed;
    /// otherwise every cell is reset to +x.
    pub fn resize(&mut self, width: usize, depth: usize) {
        self.width = width;
        self.depth = depth;
        self.grid = vec![Vec2::X; width * depth];
        if let Some(seed) = self.seed {
            self.generate(seed);
        }
    }

    /// Vector at an integer cell, if it exists.
    pub fn get(&self, x: usize, z: usize) -> Option<Vec2> {
        if x < self.width && z < self.depth {
            Some(self.grid[z * self.width + x])
        } else {
            None
        }
    }

    /// Nearest-cell lookup at a world position, clamped to the grid.
    pub fn sample(&self, x: f32, z: f32) -> Vec2 {
        if self.grid.is_empty() {
            return Vec2::X;
        }
        let gx = (x.floor().max(0.0) as usize).min(self.width - 1);
        let gz = (z.floor().max(0.0) as usize).min(self.depth - 1);
        self.grid[gz * self.width + gx]
    }

    pub fn vectors(&self) -> &[Vec2] {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_field() {
        let mut a = TensorField::new(5, 5);
        let mut b = TensorField::new(5, 5);
        a.generate(42);
        b.generate(42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let mut field = TensorField::new(16, 9);
        field.generate(7);
        for v in field.vectors() {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sample_clamps_to_grid() {
        let mut field = TensorField::new(5, 5);
        field.generate(42);
        assert_eq!(field.sample(-1.0, -1.0), field.get(0, 0).unwrap());
        assert_eq!(field.sample(100.0, 100.0), field.get(4, 4).unwrap());
        assert_eq!(field.sample(2.7, 3.2), field.get(2, 3).unwrap());
        assert_eq!(field.sample(f32::NEG_INFINITY, 1.0), field.get(0, 1).unwrap());
    }

    #[test]
    fn test_resize_regenerates_with_seed() {
        let mut field = TensorField::new(5, 5);
        field.generate(3);
        field.resize(8, 6);

        let mut fresh = TensorField::new(8, 6);
        fresh.generate(3);
        assert_eq!(field, fresh);
    }

    #[test]
    fn test_empty_field_samples_default() {
        let field = TensorField::new(0, 0);
        assert_eq!(field.sample(1.0, 1.0), Vec2::X);
        assert!(field.get(0, 0).is_none());
    }

    #[test]
    fn test_ungenerated_resize_points_along_x() {
        let mut field = TensorField::new(2, 2);
        field.resize(3, 3);
        assert!(field.vectors().iter().all(|v| *v == Vec2::X));
        assert_eq!(field.vectors().len(), 9);
    }
}
