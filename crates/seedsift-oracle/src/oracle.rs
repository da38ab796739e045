//! The generation oracle consumed by the filters.

use std::sync::Arc;

use crate::biome::{BiomeId, BiomeLayer};
use crate::coords::{BlockPos, ChunkPos, RegionPos};
use crate::world::{Block, Dimension, LandmarkKind};

/// Deterministic world-generation queries.
///
/// Every method must be a pure function of its arguments: the filters call
/// them from many threads and rely on re-evaluation giving the same answer.
/// Landmark placement may only look at the low 48 bits of the seed.
pub trait GenerationOracle: Send + Sync {
    /// The landmark candidate of `kind` in `region`, or `None` if it does not
    /// generate there.
    fn landmark_position(
        &self,
        structure_seed: u64,
        kind: LandmarkKind,
        region: RegionPos,
    ) -> Option<ChunkPos>;

    /// The biome at a block position.
    fn biome_at(&self, dimension: Dimension, world_seed: u64, pos: BlockPos) -> BiomeId;

    /// The block at a position, or `None` outside the supported range.
    fn block_at(&self, dimension: Dimension, seed: u64, pos: BlockPos) -> Option<Block>;

    /// Whether `kind` may generate on `biome`.
    fn is_valid_spawn_biome(&self, kind: LandmarkKind, biome: BiomeId) -> bool;

    /// Whether the landmark candidate at `pos` actually generates for `seed`.
    fn can_spawn(&self, kind: LandmarkKind, seed: u64, pos: ChunkPos) -> bool {
        let biome = self.biome_at(kind.dimension(), seed, pos.to_block());
        self.is_valid_spawn_biome(kind, biome)
    }

    /// The value of a coarse biome layer cell.
    fn layer_sample(&self, world_seed: u64, layer: BiomeLayer, x: i32, z: i32) -> i32;
}

impl<T: GenerationOracle + ?Sized> GenerationOracle for &T {
    fn landmark_position(
        &self,
        structure_seed: u64,
        kind: LandmarkKind,
        region: RegionPos,
    ) -> Option<ChunkPos> {
        (**self).landmark_position(structure_seed, kind, region)
    }

    fn biome_at(&self, dimension: Dimension, world_seed: u64, pos: BlockPos) -> BiomeId {
        (**self).biome_at(dimension, world_seed, pos)
    }

    fn block_at(&self, dimension: Dimension, seed: u64, pos: BlockPos) -> Option<Block> {
        (**self).block_at(dimension, seed, pos)
    }

    fn is_valid_spawn_biome(&self, kind: LandmarkKind, biome: BiomeId) -> bool {
        (**self).is_valid_spawn_biome(kind, biome)
    }

    fn can_spawn(&self, kind: LandmarkKind, seed: u64, pos: ChunkPos) -> bool {
        (**self).can_spawn(kind, seed, pos)
    }

    fn layer_sample(&self, world_seed: u64, layer: BiomeLayer, x: i32, z: i32) -> i32 {
        (**self).layer_sample(world_seed, layer, x, z)
    }
}

impl<T: GenerationOracle + ?Sized> GenerationOracle for Arc<T> {
    fn landmark_position(
        &self,
        structure_seed: u64,
        kind: LandmarkKind,
        region: RegionPos,
    ) -> Option<ChunkPos> {
        (**self).landmark_position(structure_seed, kind, region)
    }

    fn biome_at(&self, dimension: Dimension, world_seed: u64, pos: BlockPos) -> BiomeId {
        (**self).biome_at(dimension, world_seed, pos)
    }

    fn block_at(&self, dimension: Dimension, seed: u64, pos: BlockPos) -> Option<Block> {
        (**self).block_at(dimension, seed, pos)
    }

    fn is_valid_spawn_biome(&self, kind: LandmarkKind, biome: BiomeId) -> bool {
        (**self).is_valid_spawn_biome(kind, biome)
    }

    fn can_spawn(&self, kind: LandmarkKind, seed: u64, pos: ChunkPos) -> bool {
        (**self).can_spawn(kind, seed, pos)
    }

    fn layer_sample(&self, world_seed: u64, layer: BiomeLayer, x: i32, z: i32) -> i32 {
        (**self).layer_sample(world_seed, layer, x, z)
    }
}
