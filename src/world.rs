//! World state container
//!
//! Holds the active configuration, the terrain, the tensor field and the
//! render mesh. Every operation that changes the terrain rebuilds the mesh.

use crate::config::GenesisConfig;
use crate::erosion::{self, ErosionStats};
use crate::mesh::TerrainMesh;
use crate::rivers::{self, RiverStats};
use crate::seeds::WorldSeeds;
use crate::tensor_field::TensorField;
use crate::terrain::Terrain;

pub struct World {
    config: GenesisConfig,
    seeds: WorldSeeds,
    terrain: Option<Terrain>,
    tensor_field: TensorField,
    mesh: Option<TerrainMesh>,
    /// Erosion and river seeds follow the terrain seed
    pinned: bool,
}

impl World {
    pub fn new(config: GenesisConfig) -> Self {
        let seeds = WorldSeeds::from_master(config.terrain.seed);
        let tensor_field = TensorField::new(config.terrain.width, config.terrain.depth);
        Self {
            config,
            seeds,
            terrain: None,
            tensor_field,
            mesh: None,
            pinned: false,
        }
    }

    pub fn config(&self) -> &GenesisConfig {
        &self.config
    }

    /// Mutable access for editing parameters. Changes take effect on the
    /// next operation that reads them.
    pub fn config_mut(&mut self) -> &mut GenesisConfig {
        &mut self.config
    }

    pub fn seeds(&self) -> &WorldSeeds {
        &self.seeds
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.terrain.as_ref()
    }

    pub fn tensor_field(&self) -> &TensorField {
        &self.tensor_field
    }

    pub fn mesh(&self) -> Option<&TerrainMesh> {
        self.mesh.as_ref()
    }

    /// Fix the erosion and river seeds to ones derived from the terrain seed,
    /// so a whole session replays identically. They are re-derived whenever
    /// the terrain is regenerated.
    pub fn pin_seeds(&mut self) {
        self.pinned = true;
        self.seeds = WorldSeeds::from_master(self.config.terrain.seed);
        self.config.erosion.seed = Some(self.seeds.erosion);
        self.config.rivers.seed = Some(self.seeds.rivers);
    }

    /// Generate a fresh heightfield from the terrain config, discarding any
    /// erosion and rivers.
    pub fn generate_terrain(&mut self) -> &Terrain {
        if self.pinned {
            self.pin_seeds();
        } else {
            self.seeds = WorldSeeds::from_master(self.config.terrain.seed);
        }
        let terrain = Terrain::generate(&self.config.terrain);
        tracing::info!(
            target: "genesis::world",
            width = terrain.width(),
            depth = terrain.depth(),
            seed = self.config.terrain.seed,
            "terrain generated"
        );

        if self.tensor_field.width() != terrain.width() || self.tensor_field.depth() != terrain.depth() {
            self.tensor_field.resize(terrain.width(), terrain.depth());
        }
        self.mesh = TerrainMesh::build(&terrain);
        self.terrain.insert(terrain)
    }

    /// Erode the current terrain. Does nothing without terrain.
    pub fn run_erosion(&mut self) -> ErosionStats {
        let Some(terrain) = self.terrain.as_mut() else {
            tracing::warn!(target: "genesis::world", "erosion requested before terrain generation");
            return ErosionStats::default();
        };
        let stats = erosion::run(terrain, &self.config.erosion);
        self.mesh = TerrainMesh::build(terrain);
        stats
    }

    /// Regenerate rivers on the current terrain. Does nothing without terrain.
    pub fn generate_rivers(&mut self) -> RiverStats {
        let Some(terrain) = self.terrain.as_mut() else {
            tracing::warn!(target: "genesis::world", "rivers requested before terrain generation");
            return RiverStats::default();
        };
        let stats = rivers::run(terrain, &self.config.rivers);
        self.mesh = TerrainMesh::build(terrain);
        stats
    }

    pub fn generate_tensor_field(&mut self, seed: u64) {
        self.tensor_field.generate(seed);
        tracing::info!(target: "genesis::world", seed, "tensor field generated");
    }
}
