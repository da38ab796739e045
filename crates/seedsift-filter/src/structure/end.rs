use seedsift_oracle::{GenerationOracle, LandmarkKind, RegionWindow};

use super::StructureFilter;
use crate::landmarks;

const END_CITY_WINDOW: RegionWindow = RegionWindow::square(-1, 0);

impl<O: GenerationOracle + ?Sized> StructureFilter<'_, O> {
    /// A spawnable end city close to the origin.
    pub(super) fn end(&self, structure_seed: u64) -> bool {
        landmarks::any_spawnable_in(
            self.oracle,
            structure_seed,
            structure_seed,
            LandmarkKind::EndCity,
            END_CITY_WINDOW,
            self.structures.end_city_distance,
        )
    }
}
