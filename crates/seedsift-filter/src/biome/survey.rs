//! Coarse biome-layer survey around the origin.
//!
//! The first two stages are pure layer-seed arithmetic and run without the
//! oracle; the category stages read the coarse layers once per tile.

use seedsift_oracle::seed::{layer_seed, one_in};
use seedsift_oracle::{BiomeLayer, GenerationOracle, RegionWindow, TilePos, salts};

/// 1:1024 tiles examined for special and freezing tiles.
pub const SPECIAL_WINDOW: RegionWindow = RegionWindow::square(-3, 2);
/// 1:256 tiles examined for mushroom island candidates.
pub const MUSHROOM_WINDOW: RegionWindow = RegionWindow::square(-12, 11);

/// Tiles of interest found around the origin of one world seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileSurvey {
    /// Mushroom island candidates on the 1:256 layer.
    pub mushroom: Vec<TilePos>,
    /// Special 1:1024 tiles in the badlands category.
    pub badlands: Vec<TilePos>,
    /// Special 1:1024 tiles in the jungle category.
    pub jungle: Vec<TilePos>,
    /// Special 1:1024 tiles in the giant taiga category.
    pub giant_taiga: Vec<TilePos>,
    /// 1:1024 tiles in the freezing category.
    pub freezing: Vec<TilePos>,
}

/// Special 1:1024 tiles of `world_seed`.
pub fn special_tiles(world_seed: u64) -> Vec<TilePos> {
    let seed = layer_seed(world_seed, salts::SPECIAL);
    SPECIAL_WINDOW
        .tiles()
        .filter(|tile| one_in(seed, tile.x, tile.z, salts::SPECIAL_CHANCE))
        .collect()
}

/// Mushroom island candidate 1:256 tiles of `world_seed`.
pub fn mushroom_tiles(world_seed: u64) -> Vec<TilePos> {
    let seed = layer_seed(world_seed, salts::MUSHROOM);
    MUSHROOM_WINDOW
        .tiles()
        .filter(|tile| one_in(seed, tile.x, tile.z, salts::MUSHROOM_CHANCE))
        .collect()
}

impl TileSurvey {
    /// Run every coarse stage, returning `None` as soon as one fails.
    pub fn run<O: GenerationOracle + ?Sized>(
        oracle: &O,
        world_seed: u64,
        min_special_tiles: usize,
    ) -> Option<Self> {
        let special = special_tiles(world_seed);
        if special.len() < min_special_tiles {
            return None;
        }
        let mushroom = mushroom_tiles(world_seed);
        if mushroom.is_empty() {
            return None;
        }

        let mut survey = TileSurvey {
            mushroom,
            ..Default::default()
        };
        for tile in special {
            if oracle.layer_sample(world_seed, BiomeLayer::SPECIAL, tile.x, tile.z) == 0 {
                continue;
            }
            match oracle.layer_sample(world_seed, BiomeLayer::CATEGORY, tile.x, tile.z) {
                BiomeLayer::CATEGORY_BADLANDS => survey.badlands.push(tile),
                BiomeLayer::CATEGORY_JUNGLE => survey.jungle.push(tile),
                BiomeLayer::CATEGORY_GIANT_TAIGA => survey.giant_taiga.push(tile),
                _ => {}
            }
        }
        if survey.badlands.is_empty() || survey.jungle.is_empty() || survey.giant_taiga.is_empty() {
            return None;
        }

        survey.freezing = SPECIAL_WINDOW
            .tiles()
            .filter(|tile| {
                oracle.layer_sample(world_seed, BiomeLayer::CATEGORY, tile.x, tile.z)
                    == BiomeLayer::CATEGORY_FREEZING
            })
            .collect();
        if survey.freezing.is_empty() {
            return None;
        }

        Some(survey)
    }
}

#[cfg(test)]
mod tests {
    use seedsift_oracle::StubOracle;

    use super::*;

    #[test]
    fn test_special_tiles_of_seed_zero() {
        assert_eq!(
            special_tiles(0),
            vec![
                TilePos::new(0, -2),
                TilePos::new(0, -1),
                TilePos::new(1, -2),
                TilePos::new(2, -1),
            ]
        );
    }

    #[test]
    fn test_mushroom_tiles_of_seed_zero() {
        let tiles = mushroom_tiles(0);
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles.first(), Some(&TilePos::new(-12, -8)));
        assert_eq!(tiles.last(), Some(&TilePos::new(2, -7)));
        assert!(mushroom_tiles(1).contains(&TilePos::new(-2, 7)));
    }

    #[test]
    fn test_tile_arithmetic_is_deterministic() {
        for seed in [0, 1, 0x1234_5678_9ABC_DEF0, u64::MAX] {
            assert_eq!(special_tiles(seed), special_tiles(seed));
            assert_eq!(mushroom_tiles(seed), mushroom_tiles(seed));
        }
    }

    #[test]
    fn test_tiles_stay_inside_windows() {
        let seed = 0x00C0_FFEE;
        assert!(special_tiles(seed).iter().all(|t| (-3..=2).contains(&t.x) && (-3..=2).contains(&t.z)));
        assert!(mushroom_tiles(seed).iter().all(|t| (-12..=11).contains(&t.x) && (-12..=11).contains(&t.z)));
    }

    #[test]
    fn test_too_few_special_tiles_rejects() {
        // Seed 0 has four special tiles.
        let oracle = StubOracle::new();
        assert_eq!(TileSurvey::run(&oracle, 0, 5), None);
    }

    fn categorised(oracle: StubOracle) -> StubOracle {
        [(0, -2, 1), (0, -1, 2), (1, -2, 3)]
            .into_iter()
            .fold(oracle, |oracle, (x, z, category)| {
                oracle
                    .with_layer(BiomeLayer::SPECIAL, x, z, 1)
                    .with_layer(BiomeLayer::CATEGORY, x, z, category)
            })
    }

    #[test]
    fn test_survey_requires_all_three_categories() {
        let complete = categorised(StubOracle::new()).with_layer(BiomeLayer::CATEGORY, -3, 2, 4);
        let survey = TileSurvey::run(&complete, 0, 3).expect("all categories present");
        assert_eq!(survey.badlands, vec![TilePos::new(0, -2)]);
        assert_eq!(survey.jungle, vec![TilePos::new(0, -1)]);
        assert_eq!(survey.giant_taiga, vec![TilePos::new(1, -2)]);
        assert_eq!(survey.freezing, vec![TilePos::new(-3, 2)]);
        assert_eq!(survey.mushroom, mushroom_tiles(0));

        let no_taiga = complete.with_layer(BiomeLayer::SPECIAL, 1, -2, 0);
        assert_eq!(TileSurvey::run(&no_taiga, 0, 3), None);
    }

    #[test]
    fn test_survey_requires_freezing_tile() {
        let oracle = categorised(StubOracle::new());
        assert_eq!(TileSurvey::run(&oracle, 0, 3), None);
    }
}
