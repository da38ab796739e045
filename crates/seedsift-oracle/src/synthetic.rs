//! A deterministic stand-in oracle.
//!
//! Landmark placement uses a per-region ChaCha8 stream derived from the
//! structure seed, biomes come from hashed cells, and terrain from simplex
//! noise density. It does not reproduce any real game's generator; it exists
//! so the search tool runs end to end and so tests have a realistic-looking
//! world to chew on.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use noise::{NoiseFn, Simplex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::biome::{BiomeId, BiomeLayer, salts};
use crate::coords::{BlockPos, ChunkPos, RegionPos};
use crate::oracle::GenerationOracle;
use crate::seed::{first_int, layer_seed, local_seed, one_in, structure_seed};
use crate::world::{Block, Dimension, LandmarkKind};

/// Highest block the nether lava sea reaches (exclusive).
pub const NETHER_LAVA_LEVEL: i32 = 32;

/// Nether roof height (exclusive).
pub const NETHER_HEIGHT: i32 = 128;

/// Overworld and End build height (exclusive).
pub const WORLD_HEIGHT: i32 = 256;

// ---------------------------------------------------------------------------
// Landmark placement
// ---------------------------------------------------------------------------

/// Region grid parameters of one landmark kind.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    /// Region edge length in chunks.
    pub spacing: i32,
    /// Minimum gap to the next region's candidate, in chunks.
    pub separation: i32,
    /// Per-kind salt mixed into the region seed.
    pub salt: u64,
    /// Chance that a region's candidate generates at all.
    pub chance: f64,
}

/// Placement parameters for `kind`.
pub const fn placement(kind: LandmarkKind) -> Placement {
    match kind {
        LandmarkKind::Village => Placement {
            spacing: 32,
            separation: 8,
            salt: 10_387_312,
            chance: 1.0,
        },
        LandmarkKind::DesertPyramid => Placement {
            spacing: 32,
            separation: 8,
            salt: 14_357_617,
            chance: 1.0,
        },
        LandmarkKind::Monument => Placement {
            spacing: 32,
            separation: 5,
            salt: 10_387_313,
            chance: 1.0,
        },
        LandmarkKind::PillagerOutpost => Placement {
            spacing: 32,
            separation: 8,
            salt: 165_745_296,
            chance: 0.2,
        },
        LandmarkKind::BastionRemnant => Placement {
            spacing: 27,
            separation: 4,
            salt: 30_084_232,
            chance: 0.4,
        },
        LandmarkKind::Fortress => Placement {
            spacing: 27,
            separation: 4,
            salt: 30_084_233,
            chance: 0.6,
        },
        LandmarkKind::EndCity => Placement {
            spacing: 20,
            separation: 11,
            salt: 10_387_313,
            chance: 1.0,
        },
    }
}

/// Derive a u64 seed for one placement region.
///
/// Only the low 48 bits of `seed` participate.
pub fn derive_region_seed(seed: u64, salt: u64, region: RegionPos) -> u64 {
    let mut hasher = DefaultHasher::new();
    structure_seed(seed).hash(&mut hasher);
    salt.hash(&mut hasher);
    region.x.hash(&mut hasher);
    region.z.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one placement region.
pub fn region_rng(seed: u64, salt: u64, region: RegionPos) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_region_seed(seed, salt, region))
}

// ---------------------------------------------------------------------------
// Oracle
// ---------------------------------------------------------------------------

const OVERWORLD_PALETTE: [BiomeId; 12] = [
    BiomeId::PLAINS,
    BiomeId::DESERT,
    BiomeId::DESERT,
    BiomeId::FOREST,
    BiomeId::TAIGA,
    BiomeId::SAVANNA,
    BiomeId::SNOWY_TUNDRA,
    BiomeId::JUNGLE,
    BiomeId::DEEP_OCEAN,
    BiomeId::OCEAN,
    BiomeId::MOUNTAINS,
    BiomeId::SWAMP,
];

const NETHER_PALETTE: [BiomeId; 5] = [
    BiomeId::NETHER_WASTES,
    BiomeId::SOUL_SAND_VALLEY,
    BiomeId::CRIMSON_FOREST,
    BiomeId::WARPED_FOREST,
    BiomeId::BASALT_DELTAS,
];

const OUTER_END_PALETTE: [BiomeId; 4] = [
    BiomeId::END_HIGHLANDS,
    BiomeId::END_MIDLANDS,
    BiomeId::END_BARRENS,
    BiomeId::SMALL_END_ISLANDS,
];

const BIOMES_LAYER_PALETTE: [BiomeId; 12] = [
    BiomeId::PLAINS,
    BiomeId::DESERT,
    BiomeId::FOREST,
    BiomeId::TAIGA,
    BiomeId::SNOWY_TAIGA,
    BiomeId::GIANT_TREE_TAIGA,
    BiomeId::WOODED_BADLANDS_PLATEAU,
    BiomeId::BADLANDS_PLATEAU,
    BiomeId::BAMBOO_JUNGLE,
    BiomeId::JUNGLE,
    BiomeId::SAVANNA,
    BiomeId::SNOWY_TUNDRA,
];

const HILLS_LAYER_PALETTE: [BiomeId; 8] = [
    BiomeId::SNOWY_TAIGA_HILLS,
    BiomeId::GIANT_TREE_TAIGA_HILLS,
    BiomeId::BAMBOO_JUNGLE_HILLS,
    BiomeId::DESERT_HILLS,
    BiomeId::PLAINS,
    BiomeId::FOREST,
    BiomeId::TAIGA,
    BiomeId::MOUNTAINS,
];

/// Salt offset separating the synthetic per-layer streams from the
/// arithmetic special/mushroom salts.
const LAYER_SALT_BASE: u64 = 1_000;

/// Radius in blocks of the central end biome.
const CENTRAL_BIOME_RADIUS: f64 = 1_000.0;

/// Radius in blocks of the solid central island.
const CENTRAL_ISLAND_RADIUS: f64 = 100.0;

/// A deterministic, noise-backed [`GenerationOracle`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticOracle;

impl SyntheticOracle {
    pub fn new() -> Self {
        Self
    }

    fn hash_cell(seed: u64, dimension: Dimension, cell_x: i32, cell_z: i32) -> u64 {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        dimension.hash(&mut hasher);
        cell_x.hash(&mut hasher);
        cell_z.hash(&mut hasher);
        hasher.finish()
    }

    fn terrain_noise(seed: u64, dimension: Dimension) -> Simplex {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        dimension.hash(&mut hasher);
        Simplex::new(hasher.finish() as u32)
    }

    fn nether_block(seed: u64, pos: BlockPos) -> Option<Block> {
        if !(0..NETHER_HEIGHT).contains(&pos.y) {
            return None;
        }
        if pos.y == 0 || pos.y == NETHER_HEIGHT - 1 {
            return Some(Block::Solid);
        }
        let noise = Self::terrain_noise(seed, Dimension::Nether);
        let (x, y, z) = (f64::from(pos.x), f64::from(pos.y), f64::from(pos.z));
        // Thicken the floor and the roof so open space sits mid-height.
        let shell = if pos.y < 24 {
            f64::from(24 - pos.y) * 0.05
        } else if pos.y > 100 {
            f64::from(pos.y - 100) * 0.05
        } else {
            0.0
        };
        let density = noise.get([x * 0.015, y * 0.03, z * 0.015]) + shell;
        Some(if density > 0.0 {
            Block::Solid
        } else if pos.y < NETHER_LAVA_LEVEL {
            Block::Lava
        } else {
            Block::Air
        })
    }

    fn overworld_block(seed: u64, pos: BlockPos) -> Option<Block> {
        if !(0..WORLD_HEIGHT).contains(&pos.y) {
            return None;
        }
        let noise = Self::terrain_noise(seed, Dimension::Overworld);
        let height = noise.get([f64::from(pos.x) * 0.01, f64::from(pos.z) * 0.01]);
        let surface = 64 + (height * 12.0) as i32;
        Some(if pos.y <= surface {
            Block::Solid
        } else {
            Block::Air
        })
    }

    fn end_block(seed: u64, pos: BlockPos) -> Option<Block> {
        if !(0..WORLD_HEIGHT).contains(&pos.y) {
            return None;
        }
        let noise = Self::terrain_noise(seed, Dimension::End);
        let (x, z) = (f64::from(pos.x), f64::from(pos.z));
        let island = noise.get([x * 0.005, z * 0.005]);
        let central = (x * x + z * z).sqrt() < CENTRAL_ISLAND_RADIUS;
        let top = 56 + (island * 8.0) as i32;
        Some(if (central || island > 0.3) && (40..=top).contains(&pos.y) {
            Block::Solid
        } else {
            Block::Air
        })
    }
}

impl GenerationOracle for SyntheticOracle {
    fn landmark_position(
        &self,
        structure_seed: u64,
        kind: LandmarkKind,
        region: RegionPos,
    ) -> Option<ChunkPos> {
        let placement = placement(kind);
        let mut rng = region_rng(structure_seed, placement.salt, region);
        if !rng.random_bool(placement.chance) {
            return None;
        }
        let span = placement.spacing - placement.separation;
        let x = region.x * placement.spacing + rng.random_range(0..span);
        let z = region.z * placement.spacing + rng.random_range(0..span);
        Some(ChunkPos::new(x, z))
    }

    fn biome_at(&self, dimension: Dimension, world_seed: u64, pos: BlockPos) -> BiomeId {
        match dimension {
            Dimension::Overworld => {
                let h = Self::hash_cell(world_seed, dimension, pos.x >> 8, pos.z >> 8);
                OVERWORLD_PALETTE[(h % OVERWORLD_PALETTE.len() as u64) as usize]
            }
            Dimension::Nether => {
                let h = Self::hash_cell(world_seed, dimension, pos.x >> 6, pos.z >> 6);
                NETHER_PALETTE[(h % NETHER_PALETTE.len() as u64) as usize]
            }
            Dimension::End => {
                let (x, z) = (f64::from(pos.x), f64::from(pos.z));
                if (x * x + z * z).sqrt() < CENTRAL_BIOME_RADIUS {
                    return BiomeId::THE_END;
                }
                let h = Self::hash_cell(world_seed, dimension, pos.x >> 7, pos.z >> 7);
                OUTER_END_PALETTE[(h % OUTER_END_PALETTE.len() as u64) as usize]
            }
        }
    }

    fn block_at(&self, dimension: Dimension, seed: u64, pos: BlockPos) -> Option<Block> {
        match dimension {
            Dimension::Overworld => Self::overworld_block(seed, pos),
            Dimension::Nether => Self::nether_block(seed, pos),
            Dimension::End => Self::end_block(seed, pos),
        }
    }

    fn is_valid_spawn_biome(&self, kind: LandmarkKind, biome: BiomeId) -> bool {
        match kind {
            LandmarkKind::Village | LandmarkKind::PillagerOutpost => matches!(
                biome,
                BiomeId::PLAINS
                    | BiomeId::DESERT
                    | BiomeId::SAVANNA
                    | BiomeId::TAIGA
                    | BiomeId::SNOWY_TUNDRA
            ),
            LandmarkKind::DesertPyramid => {
                matches!(biome, BiomeId::DESERT | BiomeId::DESERT_HILLS)
            }
            LandmarkKind::Monument => matches!(
                biome,
                BiomeId::DEEP_OCEAN
                    | BiomeId::DEEP_WARM_OCEAN
                    | BiomeId::DEEP_LUKEWARM_OCEAN
                    | BiomeId::DEEP_COLD_OCEAN
                    | BiomeId::DEEP_FROZEN_OCEAN
            ),
            LandmarkKind::BastionRemnant => matches!(
                biome,
                BiomeId::NETHER_WASTES
                    | BiomeId::SOUL_SAND_VALLEY
                    | BiomeId::CRIMSON_FOREST
                    | BiomeId::WARPED_FOREST
            ),
            LandmarkKind::Fortress => NETHER_PALETTE.contains(&biome),
            LandmarkKind::EndCity => {
                matches!(biome, BiomeId::END_HIGHLANDS | BiomeId::END_MIDLANDS)
            }
        }
    }

    fn layer_sample(&self, world_seed: u64, layer: BiomeLayer, x: i32, z: i32) -> i32 {
        let cell = local_seed(
            layer_seed(world_seed, LAYER_SALT_BASE + u64::from(layer.0)),
            x,
            z,
        );
        match layer {
            BiomeLayer::SPECIAL => {
                let special = one_in(
                    layer_seed(world_seed, salts::SPECIAL),
                    x,
                    z,
                    salts::SPECIAL_CHANCE,
                );
                i32::from(special && first_int(cell, 4) != 0)
            }
            BiomeLayer::CATEGORY => first_int(cell, 5) as i32,
            BiomeLayer::MUSHROOM => {
                let candidate = one_in(
                    layer_seed(world_seed, salts::MUSHROOM),
                    x,
                    z,
                    salts::MUSHROOM_CHANCE,
                );
                if candidate && first_int(cell, 2) == 0 {
                    BiomeId::MUSHROOM_FIELDS.layer_value()
                } else {
                    BiomeId::OCEAN.layer_value()
                }
            }
            BiomeLayer::BIOMES => {
                BIOMES_LAYER_PALETTE[first_int(cell, BIOMES_LAYER_PALETTE.len() as i64) as usize]
                    .layer_value()
            }
            BiomeLayer::HILLS => {
                HILLS_LAYER_PALETTE[first_int(cell, HILLS_LAYER_PALETTE.len() as i64) as usize]
                    .layer_value()
            }
            BiomeLayer::SHORE => {
                if first_int(cell, 8) == 0 {
                    BiomeId::MUSHROOM_FIELD_SHORE.layer_value()
                } else {
                    BiomeId::OCEAN.layer_value()
                }
            }
            _ => BiomeId::OCEAN.layer_value(),
        }
    }
}
