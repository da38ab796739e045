//! Structure-seed filters.
//!
//! Each dimension's check is a short-circuiting chain of landmark
//! predicates ordered from cheapest to most expensive. Only the low 48 bits
//! of the seed matter for landmark placement; where a biome has to be
//! consulted at this stage the structure seed doubles as the world seed.

mod end;
mod nether;
mod overworld;

use seedsift_config::{ReachConfig, StructureConfig, TargetDimension};
use seedsift_oracle::GenerationOracle;
use seedsift_oracle::seed;

pub use nether::{PORTAL_CLEARANCE, PORTAL_SCAN_MAX_Y, PORTAL_SCAN_MIN_Y, SOUL_SAND_OFFSETS};

/// Landmark checks for one structure seed.
pub struct StructureFilter<'a, O: ?Sized> {
    oracle: &'a O,
    structures: &'a StructureConfig,
    reach: &'a ReachConfig,
}

impl<'a, O: GenerationOracle + ?Sized> StructureFilter<'a, O> {
    pub fn new(oracle: &'a O, structures: &'a StructureConfig, reach: &'a ReachConfig) -> Self {
        Self {
            oracle,
            structures,
            reach,
        }
    }

    /// Whether `candidate` passes every landmark check of `dimension`.
    /// Bits above the structure seed are ignored.
    pub fn accepts(&self, dimension: TargetDimension, candidate: u64) -> bool {
        let structure_seed = seed::structure_seed(candidate);
        match dimension {
            TargetDimension::Overworld => self.overworld(structure_seed),
            TargetDimension::Nether => self.nether(structure_seed),
            TargetDimension::End => self.end(structure_seed),
            TargetDimension::All => {
                self.nether(structure_seed)
                    && self.end(structure_seed)
                    && self.overworld(structure_seed)
            }
        }
    }
}
