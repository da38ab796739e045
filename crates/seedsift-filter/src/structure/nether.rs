use seedsift_oracle::{
    BiomeId, BlockPos, ChunkPos, Dimension, GenerationOracle, LandmarkKind, RegionWindow,
};

use super::StructureFilter;
use crate::reach::ReachSearch;

/// Regions searched for bastions and fortresses.
const NETHER_WINDOW: RegionWindow = RegionWindow::square(-1, 0);

/// Chunk offsets from the fortress that must all be soul sand valley.
pub const SOUL_SAND_OFFSETS: [(i32, i32); 5] = [(0, 0), (-4, 0), (4, 0), (0, -4), (0, 4)];

/// Lowest floor height considered for a portal.
pub const PORTAL_SCAN_MIN_Y: i32 = 32;
/// Exclusive upper bound of portal floor heights.
pub const PORTAL_SCAN_MAX_Y: i32 = 120;
/// Air blocks required above a portal floor.
pub const PORTAL_CLEARANCE: i32 = 4;

impl<O: GenerationOracle + ?Sized> StructureFilter<'_, O> {
    /// One nearby spawnable bastion, a fortress inside a soul sand valley,
    /// room for a portal at the origin and a walkable route to the bastion.
    pub(super) fn nether(&self, structure_seed: u64) -> bool {
        let Some(bastion) = self.single_bastion(structure_seed) else {
            return false;
        };
        if !self
            .oracle
            .can_spawn(LandmarkKind::BastionRemnant, structure_seed, bastion)
        {
            return false;
        }
        let Some(fortress) = self.fortress(structure_seed) else {
            return false;
        };
        if !self.in_soul_sand_valley(structure_seed, fortress) {
            return false;
        }
        if !self.has_portal_space(structure_seed) {
            return false;
        }

        let outcome = ReachSearch::new(self.oracle, self.reach).search(
            structure_seed,
            ChunkPos::ORIGIN,
            bastion,
        );
        tracing::trace!(structure_seed, %bastion, ?outcome, "Bastion reachability");
        outcome.is_reachable()
    }

    /// The only bastion of the window within range. Two or more in range
    /// reject just like none.
    fn single_bastion(&self, structure_seed: u64) -> Option<ChunkPos> {
        let mut found = None;
        for region in NETHER_WINDOW.regions() {
            let Some(pos) =
                self.oracle
                    .landmark_position(structure_seed, LandmarkKind::BastionRemnant, region)
            else {
                continue;
            };
            if pos.magnitude() > self.structures.bastion_distance {
                continue;
            }
            if found.is_some() {
                return None;
            }
            found = Some(pos);
        }
        found
    }

    /// The first fortress of the window, x-major, within range.
    fn fortress(&self, structure_seed: u64) -> Option<ChunkPos> {
        NETHER_WINDOW
            .regions()
            .filter_map(|region| {
                self.oracle
                    .landmark_position(structure_seed, LandmarkKind::Fortress, region)
            })
            .find(|pos| pos.magnitude() <= self.structures.fortress_distance)
    }

    fn in_soul_sand_valley(&self, structure_seed: u64, fortress: ChunkPos) -> bool {
        SOUL_SAND_OFFSETS.iter().all(|&(dx, dz)| {
            let pos = fortress.offset(dx, dz).to_block();
            self.oracle.biome_at(Dimension::Nether, structure_seed, pos) == BiomeId::SOUL_SAND_VALLEY
        })
    }

    /// A solid floor in the origin column with [`PORTAL_CLEARANCE`] air
    /// blocks above it. Ungenerated blocks count as obstruction.
    fn has_portal_space(&self, structure_seed: u64) -> bool {
        (PORTAL_SCAN_MIN_Y..PORTAL_SCAN_MAX_Y).any(|y| {
            let floor = BlockPos::new(0, y, 0);
            self.oracle
                .block_at(Dimension::Nether, structure_seed, floor)
                .is_some_and(|block| block.is_floor())
                && (1..=PORTAL_CLEARANCE).all(|dy| {
                    self.oracle
                        .block_at(Dimension::Nether, structure_seed, floor.above(dy))
                        .is_some_and(|block| block.is_air())
                })
        })
    }
}
