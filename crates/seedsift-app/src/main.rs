//! The `seedsift` binary: loads the config, builds the filter chain over the
//! synthetic oracle and runs the seed pipeline.
//!
//! Run with: `cargo run -p seedsift-app -- --dimension nether --quota 10`

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use seedsift_config::{CliArgs, Config, ConfigError};
use seedsift_filter::FilterChain;
use seedsift_oracle::SyntheticOracle;
use seedsift_pipeline::{
    CandidateSource, Pipeline, PipelineError, PipelineOptions, SinkError, TextSink,
};
use tracing::{error, info};

const APP_NAME: &str = "seedsift";

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open input {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Output(#[from] SinkError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// `--config` if given, else the platform config directory.
fn resolve_config_dir(args: &CliArgs) -> Result<PathBuf, AppError> {
    match &args.config {
        Some(dir) => Ok(dir.clone()),
        None => dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(AppError::NoConfigDir),
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let chain = FilterChain::new(SyntheticOracle::new(), config);
    let source = CandidateSource::from_config(&config.search).map_err(|source| AppError::Input {
        path: config.search.input_file.clone(),
        source,
    })?;
    let mut sink = TextSink::create(&config.output.path, config.output.append)?;

    info!(
        dimension = ?config.search.dimension,
        source = ?config.search.source,
        output = %config.output.path.display(),
        "Searching seeds"
    );
    let pipeline = Pipeline::new(chain, PipelineOptions::from_config(&config.search));
    let summary = pipeline.run(source, &mut sink)?;
    info!(
        "{} matches from {} candidates in {:.1}s",
        summary.matched,
        summary.checked,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}

fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), AppError> {
    let config_dir = resolve_config_dir(args)?;
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, config_dir))
}

fn log_dir(config: &Config, config_dir: &Path) -> PathBuf {
    config
        .debug
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"))
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            // Logging is not up yet.
            eprintln!("seedsift: {e}");
            return ExitCode::FAILURE;
        }
    };
    seedsift_log::init_logging(
        Some(&log_dir(&config, &config_dir)),
        cfg!(debug_assertions),
        Some(&config),
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
