//! Structure, reachability and biome filters for candidate seeds.
//!
//! A candidate first goes through the [`StructureFilter`] for its target
//! dimension, which only looks at the low 48 bits. Biome-dependent targets
//! then run every expanded world seed through the [`BiomeFilter`].
//! [`FilterChain`] bundles both with an oracle and configuration.

mod chain;
mod landmarks;

pub mod biome;
pub mod reach;
pub mod structure;

pub use biome::{BiomeFilter, BiomeMatch, TileSurvey};
pub use chain::FilterChain;
pub use landmarks::MIDGAME_TEMPLE_WINDOW;
pub use reach::{ReachSearch, SearchOutcome};
pub use structure::StructureFilter;
