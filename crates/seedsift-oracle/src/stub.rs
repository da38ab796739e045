//! A table-driven oracle for tests and scenario replays.
//!
//! Everything the filters can ask is answered from explicit tables filled in
//! through builder methods. Unlisted landmarks are absent, unlisted biomes
//! fall back to a per-dimension default, unlisted layer cells read 0, and
//! terrain is described per chunk column. Sample counters let tests assert
//! how much work a filter did.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::biome::{BiomeId, BiomeLayer};
use crate::coords::{BlockPos, ChunkPos, RegionPos};
use crate::oracle::GenerationOracle;
use crate::world::{Block, Dimension, LandmarkKind};

/// Height of the floor surface in a [`Column::Walkable`] chunk: blocks below
/// it are solid, blocks at or above it are air.
pub const STUB_FLOOR_Y: i32 = 40;

/// Terrain profile of one chunk column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    /// Solid below [`STUB_FLOOR_Y`], air above.
    Walkable,
    /// Solid everywhere.
    Wall,
    /// Lava everywhere.
    Lava,
    /// Outside the supported range everywhere.
    Ungenerated,
}

impl Column {
    fn block(self, y: i32) -> Option<Block> {
        match self {
            Column::Walkable if y < STUB_FLOOR_Y => Some(Block::Solid),
            Column::Walkable => Some(Block::Air),
            Column::Wall => Some(Block::Solid),
            Column::Lava => Some(Block::Lava),
            Column::Ungenerated => None,
        }
    }
}

/// Table-driven [`GenerationOracle`].
#[derive(Debug)]
pub struct StubOracle {
    landmarks: FxHashMap<(LandmarkKind, RegionPos), ChunkPos>,
    unspawnable: FxHashSet<(LandmarkKind, ChunkPos)>,
    biomes: FxHashMap<(Dimension, ChunkPos), BiomeId>,
    seeded_biomes: FxHashMap<(u64, Dimension, ChunkPos), BiomeId>,
    default_biomes: FxHashMap<Dimension, BiomeId>,
    spawn_biomes: FxHashMap<LandmarkKind, Vec<BiomeId>>,
    columns: FxHashMap<ChunkPos, Column>,
    default_column: Column,
    layers: FxHashMap<(BiomeLayer, i32, i32), i32>,
    block_samples: AtomicUsize,
    biome_samples: AtomicUsize,
}

impl Default for StubOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl StubOracle {
    /// An empty world: no landmarks, ocean/nether wastes/the end biomes,
    /// walkable terrain everywhere.
    pub fn new() -> Self {
        let mut default_biomes = FxHashMap::default();
        default_biomes.insert(Dimension::Overworld, BiomeId::OCEAN);
        default_biomes.insert(Dimension::Nether, BiomeId::NETHER_WASTES);
        default_biomes.insert(Dimension::End, BiomeId::THE_END);
        Self {
            landmarks: FxHashMap::default(),
            unspawnable: FxHashSet::default(),
            biomes: FxHashMap::default(),
            seeded_biomes: FxHashMap::default(),
            default_biomes,
            spawn_biomes: FxHashMap::default(),
            columns: FxHashMap::default(),
            default_column: Column::Walkable,
            layers: FxHashMap::default(),
            block_samples: AtomicUsize::new(0),
            biome_samples: AtomicUsize::new(0),
        }
    }

    /// Place `kind` at `pos` for `region`.
    pub fn with_landmark(mut self, kind: LandmarkKind, region: RegionPos, pos: ChunkPos) -> Self {
        self.landmarks.insert((kind, region), pos);
        self
    }

    /// Make `can_spawn` fail for the landmark at `pos` regardless of biome.
    pub fn with_unspawnable(mut self, kind: LandmarkKind, pos: ChunkPos) -> Self {
        self.unspawnable.insert((kind, pos));
        self
    }

    /// Biome of every block in `chunk`, for every seed.
    pub fn with_biome(mut self, dimension: Dimension, chunk: ChunkPos, biome: BiomeId) -> Self {
        self.biomes.insert((dimension, chunk), biome);
        self
    }

    /// Biome of every block in `chunk` for one world seed only. Takes
    /// precedence over [`with_biome`](Self::with_biome).
    pub fn with_seeded_biome(
        mut self,
        world_seed: u64,
        dimension: Dimension,
        chunk: ChunkPos,
        biome: BiomeId,
    ) -> Self {
        self.seeded_biomes.insert((world_seed, dimension, chunk), biome);
        self
    }

    /// Biome of every chunk without an explicit entry.
    pub fn with_default_biome(mut self, dimension: Dimension, biome: BiomeId) -> Self {
        self.default_biomes.insert(dimension, biome);
        self
    }

    /// Biomes `kind` may spawn on.
    pub fn with_spawn_biomes(mut self, kind: LandmarkKind, biomes: &[BiomeId]) -> Self {
        self.spawn_biomes.insert(kind, biomes.to_vec());
        self
    }

    /// Terrain of one chunk column.
    pub fn with_column(mut self, chunk: ChunkPos, column: Column) -> Self {
        self.columns.insert(chunk, column);
        self
    }

    /// Terrain of every column without an explicit entry.
    pub fn with_default_column(mut self, column: Column) -> Self {
        self.default_column = column;
        self
    }

    /// Value of one coarse layer cell.
    pub fn with_layer(mut self, layer: BiomeLayer, x: i32, z: i32, value: i32) -> Self {
        self.layers.insert((layer, x, z), value);
        self
    }

    /// Number of `block_at` calls so far.
    pub fn block_samples(&self) -> usize {
        self.block_samples.load(Ordering::Relaxed)
    }

    /// Number of `biome_at` calls so far.
    pub fn biome_samples(&self) -> usize {
        self.biome_samples.load(Ordering::Relaxed)
    }
}

impl GenerationOracle for StubOracle {
    fn landmark_position(
        &self,
        _structure_seed: u64,
        kind: LandmarkKind,
        region: RegionPos,
    ) -> Option<ChunkPos> {
        self.landmarks.get(&(kind, region)).copied()
    }

    fn biome_at(&self, dimension: Dimension, world_seed: u64, pos: BlockPos) -> BiomeId {
        self.biome_samples.fetch_add(1, Ordering::Relaxed);
        let chunk = pos.chunk();
        self.seeded_biomes
            .get(&(world_seed, dimension, chunk))
            .or_else(|| self.biomes.get(&(dimension, chunk)))
            .or_else(|| self.default_biomes.get(&dimension))
            .copied()
            .unwrap_or(BiomeId::OCEAN)
    }

    fn block_at(&self, _dimension: Dimension, _seed: u64, pos: BlockPos) -> Option<Block> {
        self.block_samples.fetch_add(1, Ordering::Relaxed);
        self.columns
            .get(&pos.chunk())
            .copied()
            .unwrap_or(self.default_column)
            .block(pos.y)
    }

    fn is_valid_spawn_biome(&self, kind: LandmarkKind, biome: BiomeId) -> bool {
        self.spawn_biomes
            .get(&kind)
            .is_some_and(|biomes| biomes.contains(&biome))
    }

    fn can_spawn(&self, kind: LandmarkKind, seed: u64, pos: ChunkPos) -> bool {
        if self.unspawnable.contains(&(kind, pos)) {
            return false;
        }
        let biome = self.biome_at(kind.dimension(), seed, pos.to_block());
        self.is_valid_spawn_biome(kind, biome)
    }

    fn layer_sample(&self, _world_seed: u64, layer: BiomeLayer, x: i32, z: i32) -> i32 {
        self.layers.get(&(layer, x, z)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlisted_landmark_is_absent() {
        let oracle = StubOracle::new().with_landmark(
            LandmarkKind::Village,
            RegionPos::ORIGIN,
            ChunkPos::new(3, 4),
        );
        assert_eq!(
            oracle.landmark_position(0, LandmarkKind::Village, RegionPos::ORIGIN),
            Some(ChunkPos::new(3, 4))
        );
        assert_eq!(
            oracle.landmark_position(0, LandmarkKind::Village, RegionPos::new(1, 0)),
            None
        );
    }

    #[test]
    fn test_seeded_biome_takes_precedence() {
        let chunk = ChunkPos::new(1, 1);
        let oracle = StubOracle::new()
            .with_biome(Dimension::Overworld, chunk, BiomeId::PLAINS)
            .with_seeded_biome(7, Dimension::Overworld, chunk, BiomeId::DESERT);
        assert_eq!(
            oracle.biome_at(Dimension::Overworld, 7, chunk.to_block()),
            BiomeId::DESERT
        );
        assert_eq!(
            oracle.biome_at(Dimension::Overworld, 8, chunk.to_block()),
            BiomeId::PLAINS
        );
        assert_eq!(
            oracle.biome_at(Dimension::Overworld, 8, ChunkPos::ORIGIN.to_block()),
            BiomeId::OCEAN
        );
        assert_eq!(oracle.biome_samples(), 3);
    }

    #[test]
    fn test_columns_and_counter() {
        let oracle = StubOracle::new().with_column(ChunkPos::new(2, 0), Column::Lava);
        assert_eq!(
            oracle.block_at(Dimension::Nether, 0, BlockPos::new(0, 10, 0)),
            Some(Block::Solid)
        );
        assert_eq!(
            oracle.block_at(Dimension::Nether, 0, BlockPos::new(0, STUB_FLOOR_Y, 0)),
            Some(Block::Air)
        );
        assert_eq!(
            oracle.block_at(Dimension::Nether, 0, ChunkPos::new(2, 0).center(50)),
            Some(Block::Lava)
        );
        assert_eq!(oracle.block_samples(), 3);
    }
}
