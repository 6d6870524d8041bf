//! The terrain entity: sole owner of the heightfield and river map.
//!
//! Erosion and river tracing receive `&mut Terrain` for the duration of a pass
//! and mutate it through the methods here. The snapshot lifecycle is tracked
//! by an explicit [`TerrainState`] tag instead of being inferred from whether
//! a backup buffer happens to be empty.

use crate::heightmap::{generate_heightmap, TerrainConfig};
use crate::tilemap::Tilemap;

/// River classification of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RiverType {
    #[default]
    None = 0,
    /// Reserved; tracing only ever marks `Body`.
    Source = 1,
    Body = 2,
}

impl RiverType {
    /// Integer code used by the mesh boundary (0 = none, 1 = source, 2 = body).
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_river(self) -> bool {
        self != RiverType::None
    }
}

/// Which generation pass last shaped the heightfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerrainState {
    /// Fresh from noise generation
    Clean,
    /// Eroded; the pre-erosion snapshot is held
    Eroded,
    /// Rivers traced from the baseline; no snapshot held
    Rivered,
}

pub struct Terrain {
    config: TerrainConfig,
    heights: Tilemap<f32>,
    /// Copy taken right after generation, never mutated
    baseline: Tilemap<f32>,
    /// Heights as they were before the first erosion pass
    pre_erosion: Option<Tilemap<f32>>,
    rivers: Tilemap<RiverType>,
    state: TerrainState,
    revision: u64,
}

impl Terrain {
    /// Generate a fresh terrain from noise.
    pub fn generate(config: &TerrainConfig) -> Self {
        let heights = generate_heightmap(config);
        Self::from_heights(config.clone(), heights)
    }

    /// Wrap a caller-built heightfield. The config's dimensions are replaced
    /// with the grid's own.
    pub fn from_heights(mut config: TerrainConfig, heights: Tilemap<f32>) -> Self {
        config.width = heights.width;
        config.depth = heights.depth;
        let rivers = Tilemap::new(heights.width, heights.depth);
        Self {
            config,
            baseline: heights.clone(),
            heights,
            pre_erosion: None,
            rivers,
            state: TerrainState::Clean,
            revision: 0,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.heights.width
    }

    pub fn depth(&self) -> usize {
        self.heights.depth
    }

    pub fn sea_level(&self) -> f32 {
        self.config.sea_level
    }

    pub fn state(&self) -> TerrainState {
        self.state
    }

    /// Incremented after every mutating pass.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn heights(&self) -> &Tilemap<f32> {
        &self.heights
    }

    pub fn baseline(&self) -> &Tilemap<f32> {
        &self.baseline
    }

    pub fn river_map(&self) -> &Tilemap<RiverType> {
        &self.rivers
    }

    pub fn has_erosion_snapshot(&self) -> bool {
        self.pre_erosion.is_some()
    }

    /// Height at an integer cell, `0.0` outside the grid.
    pub fn height(&self, x: i64, z: i64) -> f32 {
        self.heights.get_checked(x, z).copied().unwrap_or(0.0)
    }

    /// River classification at an integer cell, `None` outside the grid.
    pub fn river_type(&self, x: i64, z: i64) -> RiverType {
        self.rivers.get_checked(x, z).copied().unwrap_or_default()
    }

    /// Row-major river codes for consumers that want plain integers.
    pub fn river_codes(&self) -> Vec<u8> {
        self.rivers.as_slice().iter().map(|r| r.code()).collect()
    }

    // -------------------------------------------------------------------------
    // Mutation, for the generation passes
    // -------------------------------------------------------------------------

    pub(crate) fn heights_mut(&mut self) -> &mut Tilemap<f32> {
        &mut self.heights
    }

    pub(crate) fn set_height(&mut self, x: usize, z: usize, h: f32) {
        self.heights.set(x, z, h);
    }

    pub(crate) fn set_river_type(&mut self, x: usize, z: usize, river: RiverType) {
        self.rivers.set(x, z, river);
    }

    /// Move into the `Eroded` state before a droplet pass.
    ///
    /// Coming from `Clean` or `Rivered`, the current heights (including any
    /// river carving) become the snapshot. Coming from `Eroded`, the heights
    /// are restored from the snapshot so repeated passes do not compound.
    pub(crate) fn begin_erosion(&mut self) {
        let restore = self.state == TerrainState::Eroded
            && self
                .pre_erosion
                .as_ref()
                .is_some_and(|snapshot| snapshot.same_size(&self.heights));

        if restore {
            if let Some(snapshot) = &self.pre_erosion {
                self.heights.clone_from(snapshot);
            }
        } else {
            self.pre_erosion = Some(self.heights.clone());
        }
        self.state = TerrainState::Eroded;
    }

    /// Move into the `Rivered` state before a river pass: heights go back to
    /// the baseline, the erosion snapshot is dropped and the river map cleared.
    pub(crate) fn begin_rivers(&mut self) {
        if self.baseline.same_size(&self.heights) {
            self.heights.clone_from(&self.baseline);
        }
        self.pre_erosion = None;
        self.rivers = Tilemap::new(self.heights.width, self.heights.depth);
        self.state = TerrainState::Rivered;
    }

    /// Record that a pass finished mutating the terrain.
    pub(crate) fn bump_revision(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_terrain() -> Terrain {
        Terrain::generate(&TerrainConfig {
            width: 16,
            depth: 12,
            seed: 5,
            ..TerrainConfig::default()
        })
    }

    #[test]
    fn test_generate_sets_clean_state() {
        let terrain = small_terrain();
        assert_eq!(terrain.state(), TerrainState::Clean);
        assert_eq!(terrain.heights(), terrain.baseline());
        assert!(!terrain.has_erosion_snapshot());
        assert!(terrain.river_map().as_slice().iter().all(|r| *r == RiverType::None));
        assert!(terrain.river_map().same_size(terrain.heights()));
    }

    #[test]
    fn test_out_of_range_queries_are_neutral() {
        for &size in &[1usize, 2, 100, 500] {
            let heights = Tilemap::new_with(size, size, 0.7f32);
            let terrain = Terrain::from_heights(TerrainConfig::default(), heights);
            let s = size as i64;
            for &(x, z) in &[(-1, 0), (0, -1), (s, 0), (0, s), (s, s), (-5, -5), (i64::MAX, 3)] {
                assert_eq!(terrain.height(x, z), 0.0);
                assert_eq!(terrain.river_type(x, z), RiverType::None);
            }
            assert_eq!(terrain.height(s - 1, s - 1), 0.7);
        }
    }

    #[test]
    fn test_erosion_snapshot_transitions() {
        let mut terrain = small_terrain();
        terrain.begin_erosion();
        assert_eq!(terrain.state(), TerrainState::Eroded);
        assert!(terrain.has_erosion_snapshot());

        let original = *terrain.heights().get(3, 3);
        terrain.set_height(3, 3, original + 1.0);
        terrain.begin_erosion();
        // Restored from snapshot
        assert_eq!(*terrain.heights().get(3, 3), original);
    }

    #[test]
    fn test_rivers_reset_to_baseline() {
        let mut terrain = small_terrain();
        terrain.begin_erosion();
        terrain.set_height(1, 1, 9.0);
        terrain.set_river_type(2, 2, RiverType::Body);

        terrain.begin_rivers();
        assert_eq!(terrain.state(), TerrainState::Rivered);
        assert!(!terrain.has_erosion_snapshot());
        assert_eq!(terrain.heights(), terrain.baseline());
        assert_eq!(terrain.river_type(2, 2), RiverType::None);
    }

    #[test]
    fn test_erosion_after_rivers_snapshots_carved_heights() {
        let mut terrain = small_terrain();
        terrain.begin_rivers();
        terrain.set_height(4, 4, -0.5);

        terrain.begin_erosion();
        terrain.set_height(4, 4, 3.0);
        terrain.begin_erosion();
        assert_eq!(*terrain.heights().get(4, 4), -0.5);
    }

    #[test]
    fn test_river_codes() {
        let mut terrain = small_terrain();
        terrain.set_river_type(0, 0, RiverType::Body);
        let codes = terrain.river_codes();
        assert_eq!(codes[0], 2);
        assert_eq!(codes.len(), 16 * 12);
    }
}
