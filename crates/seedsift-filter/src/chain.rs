//! The configured structure and biome filters bundled with their oracle.

use seedsift_config::{BiomeFilterConfig, Config, ReachConfig, StructureConfig, TargetDimension};
use seedsift_oracle::GenerationOracle;

use crate::biome::{BiomeFilter, BiomeMatch};
use crate::structure::StructureFilter;

/// Everything needed to judge a seed for one target dimension.
///
/// Owns its oracle and a copy of the relevant configuration, so one chain
/// can be shared by reference across worker threads.
#[derive(Debug, Clone)]
pub struct FilterChain<O> {
    oracle: O,
    dimension: TargetDimension,
    structures: StructureConfig,
    reach: ReachConfig,
    biomes: BiomeFilterConfig,
}

impl<O: GenerationOracle> FilterChain<O> {
    pub fn new(oracle: O, config: &Config) -> Self {
        Self {
            oracle,
            dimension: config.search.dimension,
            structures: config.structures.clone(),
            reach: config.reach.clone(),
            biomes: config.biomes.clone(),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn dimension(&self) -> TargetDimension {
        self.dimension
    }

    /// Whether accepted structure seeds go through the biome filter.
    pub fn biome_dependent(&self) -> bool {
        self.dimension.biome_dependent()
    }

    /// Structure stage. Only the low 48 bits of `seed` are used.
    pub fn accepts_structure(&self, seed: u64) -> bool {
        StructureFilter::new(&self.oracle, &self.structures, &self.reach)
            .accepts(self.dimension, seed)
    }

    /// Biome stage for a full world seed.
    pub fn accepts_world(&self, world_seed: u64) -> Option<BiomeMatch> {
        BiomeFilter::new(&self.oracle, &self.structures, &self.biomes).evaluate(world_seed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use seedsift_config::BiomeVariant;
    use seedsift_oracle::{BiomeId, ChunkPos, LandmarkKind, RegionPos, StubOracle, SyntheticOracle};

    use super::*;

    fn config(dimension: TargetDimension) -> Config {
        let mut config = Config::default();
        config.search.dimension = dimension;
        config
    }

    #[test]
    fn test_biome_dependence_follows_dimension() {
        let dependent = |dimension| FilterChain::new(StubOracle::new(), &config(dimension)).biome_dependent();
        assert!(dependent(TargetDimension::Overworld));
        assert!(dependent(TargetDimension::All));
        assert!(!dependent(TargetDimension::Nether));
        assert!(!dependent(TargetDimension::End));
    }

    #[test]
    fn test_all_requires_every_dimension() {
        // Only an end city: End passes, All does not.
        let oracle = Arc::new(
            StubOracle::new()
                .with_spawn_biomes(LandmarkKind::EndCity, &[BiomeId::THE_END])
                .with_landmark(LandmarkKind::EndCity, RegionPos::ORIGIN, ChunkPos::new(2, 2)),
        );
        let end = FilterChain::new(Arc::clone(&oracle), &config(TargetDimension::End));
        let all = FilterChain::new(Arc::clone(&oracle), &config(TargetDimension::All));
        assert!(end.accepts_structure(5));
        assert!(!all.accepts_structure(5));
    }

    #[test]
    fn test_synthetic_verdicts_are_deterministic() {
        let mut strict = config(TargetDimension::Overworld);
        strict.biomes.variant = BiomeVariant::Strict;
        for dimension in [
            TargetDimension::Overworld,
            TargetDimension::Nether,
            TargetDimension::End,
            TargetDimension::All,
        ] {
            let chain = FilterChain::new(SyntheticOracle::new(), &config(dimension));
            for seed in [0, 1, 100_476_778, 0xDEAD_BEEF] {
                assert_eq!(
                    chain.accepts_structure(seed),
                    chain.accepts_structure(seed),
                    "{dimension:?} verdict for {seed} changed"
                );
                assert_eq!(chain.accepts_world(seed), chain.accepts_world(seed));
            }
        }
        let chain = FilterChain::new(SyntheticOracle::new(), &strict);
        assert_eq!(chain.accepts_world(77), chain.accepts_world(77));
    }
}
