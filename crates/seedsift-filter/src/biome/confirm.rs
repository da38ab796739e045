//! Fine-resolution confirmations of surveyed tiles.
//!
//! Each confirmation narrows a coarse tile down the layer stack: a parent
//! biome on a medium layer, then a child biome on one of its finer
//! sub-tiles.

use seedsift_config::Confirmation;
use seedsift_oracle::{BiomeId, BiomeLayer, GenerationOracle, TilePos};

use super::survey::TileSurvey;

/// 1:1024 tiles per side of a 1:256 tile, and 1:256 tiles per side of a
/// 1:64 tile.
const QUARTER: i32 = 4;
/// 1:16 cells per side of a 1:256 tile.
const SIXTEENTH: i32 = 16;

/// Whether `confirmation` holds for the surveyed tiles of `world_seed`.
pub fn confirm<O: GenerationOracle + ?Sized>(
    oracle: &O,
    world_seed: u64,
    confirmation: Confirmation,
    survey: &TileSurvey,
) -> bool {
    let probe = LayerProbe { oracle, world_seed };
    match confirmation {
        Confirmation::Snowy => probe.parent_then_child(
            &survey.freezing,
            BiomeId::SNOWY_TAIGA,
            BiomeId::SNOWY_TAIGA_HILLS,
        ),
        Confirmation::Jungle => probe.parent_then_child(
            &survey.jungle,
            BiomeId::BAMBOO_JUNGLE,
            BiomeId::BAMBOO_JUNGLE_HILLS,
        ),
        Confirmation::GiantTaiga => probe.parent_then_child(
            &survey.giant_taiga,
            BiomeId::GIANT_TREE_TAIGA,
            BiomeId::GIANT_TREE_TAIGA_HILLS,
        ),
        Confirmation::Mushroom => probe.mushroom_shore(&survey.mushroom),
        Confirmation::Badlands => probe.both_plateaus(&survey.badlands),
    }
}

struct LayerProbe<'a, O: ?Sized> {
    oracle: &'a O,
    world_seed: u64,
}

impl<O: GenerationOracle + ?Sized> LayerProbe<'_, O> {
    fn is(&self, layer: BiomeLayer, tile: TilePos, biome: BiomeId) -> bool {
        self.oracle.layer_sample(self.world_seed, layer, tile.x, tile.z) == biome.layer_value()
    }

    /// Some 1:256 sub-tile of a 1:1024 tile is `parent`, and one of that
    /// sub-tile's 1:64 sub-tiles is `child`.
    fn parent_then_child(&self, tiles: &[TilePos], parent: BiomeId, child: BiomeId) -> bool {
        tiles
            .iter()
            .flat_map(|tile| tile.subdivide(QUARTER))
            .filter(|sub| self.is(BiomeLayer::BIOMES, *sub, parent))
            .any(|sub| {
                sub.subdivide(QUARTER)
                    .any(|fine| self.is(BiomeLayer::HILLS, fine, child))
            })
    }

    /// A candidate 1:256 tile really is mushroom fields and grew a shore on
    /// the 1:16 layer.
    fn mushroom_shore(&self, tiles: &[TilePos]) -> bool {
        tiles
            .iter()
            .filter(|tile| self.is(BiomeLayer::MUSHROOM, **tile, BiomeId::MUSHROOM_FIELDS))
            .any(|tile| {
                tile.subdivide(SIXTEENTH)
                    .any(|fine| self.is(BiomeLayer::SHORE, fine, BiomeId::MUSHROOM_FIELD_SHORE))
            })
    }

    /// Both plateau variants appear among the badlands tiles' 1:256 sub-tiles.
    fn both_plateaus(&self, tiles: &[TilePos]) -> bool {
        let mut wooded = false;
        let mut plain = false;
        for sub in tiles.iter().flat_map(|tile| tile.subdivide(QUARTER)) {
            if self.is(BiomeLayer::BIOMES, sub, BiomeId::WOODED_BADLANDS_PLATEAU) {
                wooded = true;
            } else if self.is(BiomeLayer::BIOMES, sub, BiomeId::BADLANDS_PLATEAU) {
                plain = true;
            }
            if wooded && plain {
                return true;
            }
        }
        false
    }
}
