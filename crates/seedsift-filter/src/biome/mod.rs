//! World-seed biome filters.
//!
//! Run once per expanded world seed. Landmark positions still come from the
//! low 48 bits; every biome question is asked with the full world seed.

mod confirm;
mod survey;

use seedsift_config::{BiomeFilterConfig, BiomeVariant, StructureConfig};
use seedsift_oracle::{GenerationOracle, LandmarkKind, RegionPos, RegionWindow, TilePos, seed};

pub use confirm::confirm;
pub use survey::{MUSHROOM_WINDOW, SPECIAL_WINDOW, TileSurvey, mushroom_tiles, special_tiles};

use crate::landmarks;

/// Monument and outpost regions checked by the coastal requirement.
pub const COASTAL_WINDOW: RegionWindow = RegionWindow::new(-2, 1, -2, 2);

/// An accepted world seed's auxiliary data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BiomeMatch {
    /// Rare-biome tiles found while filtering; empty for the strict variant.
    pub rare_tiles: Vec<TilePos>,
}

/// Biome checks for one world seed.
pub struct BiomeFilter<'a, O: ?Sized> {
    oracle: &'a O,
    structures: &'a StructureConfig,
    config: &'a BiomeFilterConfig,
}

impl<'a, O: GenerationOracle + ?Sized> BiomeFilter<'a, O> {
    pub fn new(
        oracle: &'a O,
        structures: &'a StructureConfig,
        config: &'a BiomeFilterConfig,
    ) -> Self {
        Self {
            oracle,
            structures,
            config,
        }
    }

    /// Evaluate the configured variant against `world_seed`.
    pub fn evaluate(&self, world_seed: u64) -> Option<BiomeMatch> {
        match self.config.variant {
            BiomeVariant::Strict => self.strict(world_seed).then(BiomeMatch::default),
            BiomeVariant::Extended => self.extended(world_seed),
        }
    }

    /// Landmark biome compatibility around the origin.
    pub fn strict(&self, world_seed: u64) -> bool {
        let structure_seed = seed::structure_seed(world_seed);
        self.origin_compatible(structure_seed, world_seed, LandmarkKind::Village)
            && self.origin_compatible(structure_seed, world_seed, LandmarkKind::DesertPyramid)
            && (!self.config.require_coastal || self.coastal(structure_seed, world_seed))
            && landmarks::has_midgame_temples(
                self.oracle,
                structure_seed,
                world_seed,
                self.structures.midgame_temple_min,
            )
    }

    /// The coarse survey, then the strict checks, then each confirmation.
    pub fn extended(&self, world_seed: u64) -> Option<BiomeMatch> {
        let survey = TileSurvey::run(self.oracle, world_seed, self.config.min_special_tiles)?;
        if !self.strict(world_seed) {
            return None;
        }
        for &confirmation in &self.config.confirmations {
            if !confirm(self.oracle, world_seed, confirmation, &survey) {
                return None;
            }
        }
        Some(BiomeMatch {
            rare_tiles: survey.mushroom,
        })
    }

    fn origin_compatible(&self, structure_seed: u64, world_seed: u64, kind: LandmarkKind) -> bool {
        self.oracle
            .landmark_position(structure_seed, kind, RegionPos::ORIGIN)
            .is_some_and(|pos| landmarks::on_compatible_biome(self.oracle, kind, world_seed, pos))
    }

    fn coastal(&self, structure_seed: u64, world_seed: u64) -> bool {
        landmarks::any_spawnable_in(
            self.oracle,
            structure_seed,
            world_seed,
            LandmarkKind::Monument,
            COASTAL_WINDOW,
            self.structures.monument_distance,
        ) && landmarks::any_spawnable_in(
            self.oracle,
            structure_seed,
            world_seed,
            LandmarkKind::PillagerOutpost,
            COASTAL_WINDOW,
            self.structures.outpost_distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use seedsift_config::Confirmation;
    use seedsift_oracle::{BiomeId, BiomeLayer, ChunkPos, Dimension, StubOracle};

    use super::*;

    const VILLAGE: ChunkPos = ChunkPos::new(1, 2);
    const PYRAMID: ChunkPos = ChunkPos::new(4, 4);

    /// A world whose strict checks pass for every seed. Seeded biome
    /// overrides can then break them for specific world seeds.
    fn strict_world() -> StubOracle {
        let mut oracle = StubOracle::new()
            .with_spawn_biomes(LandmarkKind::Village, &[BiomeId::PLAINS])
            .with_spawn_biomes(LandmarkKind::DesertPyramid, &[BiomeId::DESERT])
            .with_landmark(LandmarkKind::Village, RegionPos::ORIGIN, VILLAGE)
            .with_biome(Dimension::Overworld, VILLAGE, BiomeId::PLAINS);
        for region in landmarks::MIDGAME_TEMPLE_WINDOW.regions() {
            let pos = if region.is_origin() {
                PYRAMID
            } else {
                ChunkPos::new(region.x * 32 + 8, region.z * 32 + 8)
            };
            oracle = oracle
                .with_landmark(LandmarkKind::DesertPyramid, region, pos)
                .with_biome(Dimension::Overworld, pos, BiomeId::DESERT);
        }
        oracle
    }

    fn config(variant: BiomeVariant) -> BiomeFilterConfig {
        BiomeFilterConfig {
            variant,
            ..Default::default()
        }
    }

    #[test]
    fn test_strict_accepts_and_uses_world_seed() {
        let world_seed = seed::compose(0, 3);
        let oracle = strict_world().with_seeded_biome(
            world_seed,
            Dimension::Overworld,
            VILLAGE,
            BiomeId::OCEAN,
        );
        let structures = StructureConfig::default();
        let config = config(BiomeVariant::Strict);
        let filter = BiomeFilter::new(&oracle, &structures, &config);

        assert_eq!(filter.evaluate(seed::compose(0, 2)), Some(BiomeMatch::default()));
        assert_eq!(filter.evaluate(world_seed), None, "village biome differs for this world seed");
    }

    #[test]
    fn test_strict_rejects_absent_village() {
        let oracle = StubOracle::new();
        let structures = StructureConfig::default();
        let config = config(BiomeVariant::Strict);
        assert!(!BiomeFilter::new(&oracle, &structures, &config).strict(0));
    }

    #[test]
    fn test_coastal_requirement() {
        let structures = StructureConfig::default();
        let config = BiomeFilterConfig {
            require_coastal: true,
            ..config(BiomeVariant::Strict)
        };
        let monument = ChunkPos::new(-40, 20);
        let outpost = ChunkPos::new(30, -35);
        let without = strict_world()
            .with_spawn_biomes(LandmarkKind::Monument, &[BiomeId::DEEP_OCEAN])
            .with_spawn_biomes(LandmarkKind::PillagerOutpost, &[BiomeId::PLAINS])
            .with_landmark(LandmarkKind::Monument, RegionPos::new(-2, 1), monument)
            .with_biome(Dimension::Overworld, monument, BiomeId::DEEP_OCEAN);
        assert!(!BiomeFilter::new(&without, &structures, &config).strict(0));

        let with = without
            .with_landmark(LandmarkKind::PillagerOutpost, RegionPos::new(1, -2), outpost)
            .with_biome(Dimension::Overworld, outpost, BiomeId::PLAINS);
        assert!(BiomeFilter::new(&with, &structures, &config).strict(0));
    }

    fn extended_world() -> StubOracle {
        // Seed 0 has special tiles (0,-2), (0,-1), (1,-2), (2,-1).
        [(0, -2, 1), (0, -1, 2), (1, -2, 3)]
            .into_iter()
            .fold(strict_world(), |oracle, (x, z, category)| {
                oracle
                    .with_layer(BiomeLayer::SPECIAL, x, z, 1)
                    .with_layer(BiomeLayer::CATEGORY, x, z, category)
            })
            .with_layer(BiomeLayer::CATEGORY, 2, 2, BiomeLayer::CATEGORY_FREEZING)
            .with_layer(BiomeLayer::BIOMES, 9, 10, 30)
            .with_layer(BiomeLayer::HILLS, 38, 43, 31)
    }

    #[test]
    fn test_extended_accepts_with_mushroom_tiles() {
        let oracle = extended_world();
        let structures = StructureConfig::default();
        let config = config(BiomeVariant::Extended);
        let found = BiomeFilter::new(&oracle, &structures, &config)
            .evaluate(0)
            .expect("seed 0 satisfies every stage");
        assert_eq!(found.rare_tiles, mushroom_tiles(0));
    }

    #[test]
    fn test_extended_rejects_failed_confirmation() {
        let oracle = extended_world();
        let structures = StructureConfig::default();
        let config = BiomeFilterConfig {
            confirmations: vec![Confirmation::Snowy, Confirmation::Jungle],
            ..config(BiomeVariant::Extended)
        };
        assert_eq!(BiomeFilter::new(&oracle, &structures, &config).evaluate(0), None);
    }

    #[test]
    fn test_extended_runs_layers_before_biome_lookups() {
        // Seed 0 has only four special tiles.
        let oracle = strict_world();
        let structures = StructureConfig::default();
        let config = BiomeFilterConfig {
            min_special_tiles: 5,
            ..config(BiomeVariant::Extended)
        };
        assert_eq!(BiomeFilter::new(&oracle, &structures, &config).evaluate(0), None);
        assert_eq!(oracle.biome_samples(), 0);
    }

    #[test]
    fn test_extended_strict_stage_still_applies() {
        let oracle = extended_world().with_biome(Dimension::Overworld, PYRAMID, BiomeId::FOREST);
        let structures = StructureConfig::default();
        let config = config(BiomeVariant::Extended);
        assert_eq!(BiomeFilter::new(&oracle, &structures, &config).evaluate(0), None);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let oracle = extended_world();
        let structures = StructureConfig::default();
        let config = config(BiomeVariant::Extended);
        let filter = BiomeFilter::new(&oracle, &structures, &config);
        for world_seed in [0, seed::compose(0, 1), seed::compose(12_345, 999)] {
            assert_eq!(filter.evaluate(world_seed), filter.evaluate(world_seed));
        }
    }
}
