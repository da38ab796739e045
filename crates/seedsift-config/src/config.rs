//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "seedsift.ron";

/// Top-level seed search configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Candidate source, target dimension and stopping rules.
    pub search: SearchConfig,
    /// Landmark distance thresholds.
    pub structures: StructureConfig,
    /// Reachability search limits and costs.
    pub reach: ReachConfig,
    /// Biome filter variant and confirmations.
    pub biomes: BiomeFilterConfig,
    /// Match sink settings.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// The simulated dimension whose landmarks are filtered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum TargetDimension {
    Overworld,
    Nether,
    End,
    /// Nether, End and Overworld together.
    All,
}

impl TargetDimension {
    /// Whether accepted structure seeds must be expanded into world seeds
    /// and re-checked against biomes.
    pub fn biome_dependent(self) -> bool {
        matches!(self, TargetDimension::Overworld | TargetDimension::All)
    }
}

/// Where candidate seeds come from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum SourceMode {
    /// One integer per line from `search.input_file`.
    File,
    /// Sequential increment from `search.start_seed`.
    Incremental,
    /// Uniform draws from the 48-bit structure seed space.
    Random,
}

/// Which biome filter runs on expanded world seeds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum BiomeVariant {
    /// Landmark biome compatibility only.
    Strict,
    /// Strict plus rare large-scale biome co-occurrence.
    Extended,
}

/// Fine-resolution biome confirmations run by the extended variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
pub enum Confirmation {
    Snowy,
    Mushroom,
    Jungle,
    GiantTaiga,
    Badlands,
}

/// Search driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Dimension whose landmarks must match.
    pub dimension: TargetDimension,
    /// Candidate source mode.
    pub source: SourceMode,
    /// First seed for incremental mode.
    pub start_seed: u64,
    /// Input file for file mode.
    pub input_file: PathBuf,
    /// Fixed generator seed for random mode. `None` draws a fresh one.
    pub random_seed: Option<u64>,
    /// Stop after this many accepted matches.
    pub match_quota: u64,
    /// Worker threads (0 = one per CPU).
    pub workers: usize,
    /// Seconds between progress log lines.
    pub log_interval_secs: u64,
}

/// Landmark distance thresholds, in chunks from the origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StructureConfig {
    pub village_distance: f64,
    pub temple_distance: f64,
    pub outpost_distance: f64,
    pub monument_distance: f64,
    pub bastion_distance: f64,
    pub fortress_distance: f64,
    pub end_city_distance: f64,
    /// Minimum compatible desert pyramids in the 4x4 region window.
    pub midgame_temple_min: usize,
}

/// Reachability search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReachConfig {
    /// Maximum number of chunks popped from the frontier; the pop after
    /// the last one allowed ends the search as over budget.
    pub search_budget: usize,
    /// Maximum path length in chunk steps.
    pub max_path_length: u32,
    /// Multiplier on the Manhattan heuristic; must exceed 1.0.
    pub heuristic_weight: f64,
    /// Chunks farther than this (Euclidean) from the target are not expanded.
    pub search_radius: f64,
    /// Cost of entering a hazardous biome chunk.
    pub hazard_cost: f64,
    /// Cost of entering any other chunk.
    pub nominal_cost: f64,
}

/// Biome filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomeFilterConfig {
    /// Filter variant applied to each world seed.
    pub variant: BiomeVariant,
    /// Also require a spawnable monument and outpost in the 4x5 window.
    pub require_coastal: bool,
    /// Minimum special 1:1024 tiles around the origin (extended variant).
    pub min_special_tiles: usize,
    /// Fine-resolution confirmations (extended variant).
    pub confirmations: Vec<Confirmation>,
}

/// Match sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination text file.
    pub path: PathBuf,
    /// Append to an existing file instead of truncating it.
    pub append: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dimension: TargetDimension::Overworld,
            source: SourceMode::Random,
            start_seed: 100_476_778,
            input_file: PathBuf::from("input.txt"),
            random_seed: None,
            match_quota: 100_000,
            workers: 0,
            log_interval_secs: 10,
        }
    }
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            village_distance: 12.0,
            temple_distance: 12.0,
            outpost_distance: 64.0,
            monument_distance: 64.0,
            bastion_distance: 10.0,
            fortress_distance: 10.0,
            end_city_distance: 6.0,
            midgame_temple_min: 5,
        }
    }
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            search_budget: 100,
            max_path_length: 14,
            heuristic_weight: 1.5,
            search_radius: 10.0,
            hazard_cost: 4.0,
            nominal_cost: 1.0,
        }
    }
}

impl Default for BiomeFilterConfig {
    fn default() -> Self {
        Self {
            variant: BiomeVariant::Extended,
            require_coastal: false,
            min_special_tiles: 3,
            confirmations: vec![Confirmation::Snowy],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("seeds.txt"),
            append: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save / Validate ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    /// A loaded file is validated before it is returned.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `seedsift.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Reject values the reachability search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reach = &self.reach;
        if !(reach.heuristic_weight > 1.0 && reach.heuristic_weight.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "reach.heuristic_weight",
                value: reach.heuristic_weight.to_string(),
                reason: "must be a finite number greater than 1.0",
            });
        }
        for (field, cost) in [
            ("reach.nominal_cost", reach.nominal_cost),
            ("reach.hazard_cost", reach.hazard_cost),
        ] {
            if !(cost > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    value: cost.to_string(),
                    reason: "step costs must be positive",
                });
            }
        }
        Ok(())
    }
}
