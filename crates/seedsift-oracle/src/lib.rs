//! World-generation vocabulary and the oracle interface the seed filters consume.
//!
//! The filters never see how a world is generated. They ask a
//! [`GenerationOracle`] for landmark positions, biomes, coarse biome-layer
//! values and blocks, keyed only by seed and coordinate. This crate defines
//! that interface, the coordinate and seed types shared by every stage, a
//! deterministic [`SyntheticOracle`] used by the binary, and a table-driven
//! [`StubOracle`] for tests.

mod biome;
mod coords;
mod oracle;
mod world;

pub mod seed;
pub mod stub;
pub mod synthetic;

pub use biome::{BiomeId, BiomeLayer, salts};
pub use coords::{BlockPos, CHUNK_WIDTH, ChunkPos, RegionPos, RegionWindow, TilePos};
pub use oracle::GenerationOracle;
pub use stub::{Column, StubOracle};
pub use synthetic::SyntheticOracle;
pub use world::{Block, Dimension, LandmarkKind};
