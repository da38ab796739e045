//! Region-window landmark lookups shared by the structure and biome filters.

use seedsift_oracle::{ChunkPos, GenerationOracle, LandmarkKind, RegionPos, RegionWindow};

/// Desert pyramid regions counted by the midgame temple check.
pub const MIDGAME_TEMPLE_WINDOW: RegionWindow = RegionWindow::square(-2, 1);

/// Whether the biome under `pos` accepts `kind` for `world_seed`.
pub(crate) fn on_compatible_biome<O: GenerationOracle + ?Sized>(
    oracle: &O,
    kind: LandmarkKind,
    world_seed: u64,
    pos: ChunkPos,
) -> bool {
    let biome = oracle.biome_at(kind.dimension(), world_seed, pos.to_block());
    oracle.is_valid_spawn_biome(kind, biome)
}

/// The origin-region candidate of `kind`, if it generates and lies within
/// `max_distance` chunks of the origin.
pub(crate) fn near_origin<O: GenerationOracle + ?Sized>(
    oracle: &O,
    structure_seed: u64,
    kind: LandmarkKind,
    max_distance: f64,
) -> Option<ChunkPos> {
    oracle
        .landmark_position(structure_seed, kind, RegionPos::ORIGIN)
        .filter(|pos| pos.magnitude() <= max_distance)
}

/// Whether at least `min_count` desert pyramid regions of the midgame
/// window hold a pyramid on a compatible biome.
///
/// The origin region counts without a lookup: callers have already
/// verified it. Stops as soon as the answer is known.
pub(crate) fn has_midgame_temples<O: GenerationOracle + ?Sized>(
    oracle: &O,
    structure_seed: u64,
    world_seed: u64,
    min_count: usize,
) -> bool {
    let mut count = 0;
    let mut remaining = MIDGAME_TEMPLE_WINDOW.len();
    for region in MIDGAME_TEMPLE_WINDOW.regions() {
        if count >= min_count {
            return true;
        }
        if count + remaining < min_count {
            return false;
        }
        remaining -= 1;

        let compatible = region.is_origin()
            || oracle
                .landmark_position(structure_seed, LandmarkKind::DesertPyramid, region)
                .is_some_and(|pos| {
                    on_compatible_biome(oracle, LandmarkKind::DesertPyramid, world_seed, pos)
                });
        if compatible {
            count += 1;
        }
    }
    count >= min_count
}

/// Whether any region of `window` holds a spawnable `kind` within
/// `max_distance` chunks of the origin.
pub(crate) fn any_spawnable_in<O: GenerationOracle + ?Sized>(
    oracle: &O,
    structure_seed: u64,
    world_seed: u64,
    kind: LandmarkKind,
    window: RegionWindow,
    max_distance: f64,
) -> bool {
    window.regions().any(|region| {
        oracle
            .landmark_position(structure_seed, kind, region)
            .is_some_and(|pos| {
                pos.magnitude() <= max_distance && oracle.can_spawn(kind, world_seed, pos)
            })
    })
}

#[cfg(test)]
mod tests {
    use seedsift_oracle::{BiomeId, Dimension, StubOracle};

    use super::*;

    fn pyramid_world(compatible_regions: &[(i32, i32)]) -> StubOracle {
        let mut oracle = StubOracle::new()
            .with_spawn_biomes(LandmarkKind::DesertPyramid, &[BiomeId::DESERT]);
        for region in MIDGAME_TEMPLE_WINDOW.regions() {
            let pos = ChunkPos::new(region.x * 32 + 3, region.z * 32 + 3);
            oracle = oracle.with_landmark(LandmarkKind::DesertPyramid, region, pos);
            if compatible_regions.contains(&(region.x, region.z)) {
                oracle = oracle.with_biome(Dimension::Overworld, pos, BiomeId::DESERT);
            }
        }
        oracle
    }

    #[test]
    fn test_midgame_counts_origin_without_lookup() {
        let oracle = pyramid_world(&[(-2, -2), (-1, 1), (1, 0), (1, 1)]);
        assert!(has_midgame_temples(&oracle, 0, 0, 5));
        assert!(!has_midgame_temples(&oracle, 0, 0, 6));
    }

    #[test]
    fn test_midgame_stops_once_satisfied() {
        let oracle = pyramid_world(&[(-2, -2), (-2, -1), (-2, 0), (-2, 1)]);
        assert!(has_midgame_temples(&oracle, 0, 0, 4));
        assert_eq!(oracle.biome_samples(), 4, "no lookups after the fourth hit");
    }

    #[test]
    fn test_midgame_gives_up_when_unreachable() {
        let oracle = pyramid_world(&[]);
        assert!(!has_midgame_temples(&oracle, 0, 0, 16));
        assert_eq!(oracle.biome_samples(), 1, "gives up after the first miss");
    }

    #[test]
    fn test_near_origin_applies_distance() {
        let oracle = StubOracle::new().with_landmark(
            LandmarkKind::Village,
            RegionPos::ORIGIN,
            ChunkPos::new(9, 9),
        );
        assert_eq!(near_origin(&oracle, 0, LandmarkKind::Village, 12.0), None);
        assert_eq!(
            near_origin(&oracle, 0, LandmarkKind::Village, 13.0),
            Some(ChunkPos::new(9, 9))
        );
        assert_eq!(near_origin(&oracle, 0, LandmarkKind::Fortress, 100.0), None);
    }
}
