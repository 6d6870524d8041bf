//! Seed management for terrain generation
//!
//! Terrain noise is driven by the configured seed directly. The other systems
//! (tensor field, erosion droplets, river sources) get their own seeds derived
//! from it, so a single number can reproduce a whole session when asked to.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for every generation system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSeeds {
    /// Master seed (the terrain config seed)
    pub master: u64,
    /// Tensor field orientation noise
    pub tensor: u64,
    /// Erosion droplet spawning
    pub erosion: u64,
    /// River source placement
    pub rivers: u64,
}

impl WorldSeeds {
    /// Derive all sub-seeds deterministically from a master seed.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            tensor: derive_seed(master, "tensor"),
            erosion: derive_seed(master, "erosion"),
            rivers: derive_seed(master, "rivers"),
        }
    }
}

/// Derive a sub-seed from a master seed and a system name.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for WorldSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WorldSeeds {{ master: {}, tensor: {}, erosion: {}, rivers: {} }}",
            self.master, self.tensor, self.erosion, self.rivers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = WorldSeeds::from_master(12345);
        let seeds2 = WorldSeeds::from_master(12345);
        assert_eq!(seeds1, seeds2);
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = WorldSeeds::from_master(12345);
        assert_ne!(seeds.tensor, seeds.erosion);
        assert_ne!(seeds.erosion, seeds.rivers);
        assert_ne!(seeds.tensor, seeds.rivers);
    }
}
