//! Configuration system for seedsift.
//!
//! Provides runtime-configurable search settings that persist to disk as RON
//! files. Supports CLI overrides via clap and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomeFilterConfig, BiomeVariant, CONFIG_FILE_NAME, Config, Confirmation, DebugConfig,
    OutputConfig, ReachConfig, SearchConfig, SourceMode, StructureConfig, TargetDimension,
};
pub use error::ConfigError;
