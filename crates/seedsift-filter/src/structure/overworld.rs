use seedsift_oracle::{GenerationOracle, LandmarkKind};

use super::StructureFilter;
use crate::landmarks;

impl<O: GenerationOracle + ?Sized> StructureFilter<'_, O> {
    /// Village and desert pyramid near the origin, plus enough pyramids
    /// around it.
    pub(super) fn overworld(&self, structure_seed: u64) -> bool {
        self.compatible_near_origin(
            structure_seed,
            LandmarkKind::Village,
            self.structures.village_distance,
        ) && self.compatible_near_origin(
            structure_seed,
            LandmarkKind::DesertPyramid,
            self.structures.temple_distance,
        ) && landmarks::has_midgame_temples(
            self.oracle,
            structure_seed,
            structure_seed,
            self.structures.midgame_temple_min,
        )
    }

    fn compatible_near_origin(&self, structure_seed: u64, kind: LandmarkKind, max: f64) -> bool {
        landmarks::near_origin(self.oracle, structure_seed, kind, max)
            .is_some_and(|pos| landmarks::on_compatible_biome(self.oracle, kind, structure_seed, pos))
    }
}
