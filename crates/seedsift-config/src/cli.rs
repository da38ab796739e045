//! Command-line argument parsing for seedsift.

use std::path::PathBuf;

use clap::Parser;

use crate::{BiomeVariant, Config, SourceMode, TargetDimension};

/// seedsift command-line arguments.
///
/// CLI values override settings loaded from `seedsift.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "seedsift", about = "Search world seeds for landmark layouts")]
pub struct CliArgs {
    /// Dimension whose landmarks must match.
    #[arg(long, value_enum)]
    pub dimension: Option<TargetDimension>,

    /// Candidate source.
    #[arg(long, value_enum)]
    pub source: Option<SourceMode>,

    /// First seed for incremental mode.
    #[arg(long)]
    pub start: Option<u64>,

    /// Input file for file mode.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output file for accepted seeds.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Stop after this many matches.
    #[arg(long)]
    pub quota: Option<u64>,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Biome filter variant.
    #[arg(long, value_enum)]
    pub variant: Option<BiomeVariant>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(dimension) = args.dimension {
            self.search.dimension = dimension;
        }
        if let Some(source) = args.source {
            self.search.source = source;
        }
        if let Some(start) = args.start {
            self.search.start_seed = start;
        }
        if let Some(ref input) = args.input {
            self.search.input_file = input.clone();
        }
        if let Some(ref output) = args.output {
            self.output.path = output.clone();
        }
        if let Some(quota) = args.quota {
            self.search.match_quota = quota;
        }
        if let Some(workers) = args.workers {
            self.search.workers = workers;
        }
        if let Some(variant) = args.variant {
            self.biomes.variant = variant;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            dimension: Some(TargetDimension::Nether),
            quota: Some(3),
            output: Some(PathBuf::from("nether.txt")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.search.dimension, TargetDimension::Nether);
        assert_eq!(config.search.match_quota, 3);
        assert_eq!(config.output.path, PathBuf::from("nether.txt"));
        // Non-overridden fields retain defaults
        assert_eq!(config.search.source, SourceMode::Random);
        assert_eq!(config.search.start_seed, 100_476_778);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_value_enums() {
        let args = CliArgs::try_parse_from([
            "seedsift",
            "--dimension",
            "all",
            "--source",
            "incremental",
            "--start",
            "42",
            "--variant",
            "strict",
        ])
        .unwrap();
        assert_eq!(args.dimension, Some(TargetDimension::All));
        assert_eq!(args.source, Some(SourceMode::Incremental));
        assert_eq!(args.start, Some(42));
        assert_eq!(args.variant, Some(BiomeVariant::Strict));
    }
}
