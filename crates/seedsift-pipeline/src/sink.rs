//! Append-only match output.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use seedsift_oracle::TilePos;

/// One accepted seed and the rare-biome tiles found for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedMatch {
    pub seed: u64,
    pub tiles: Vec<TilePos>,
}

impl SeedMatch {
    pub fn new(seed: u64, tiles: Vec<TilePos>) -> Self {
        Self { seed, tiles }
    }

    /// The record line without its newline: the seed as a signed integer,
    /// then each tile as ` x,z`.
    pub fn to_line(&self) -> String {
        let mut line = (self.seed as i64).to_string();
        for tile in &self.tiles {
            line.push(' ');
            line.push_str(&tile.to_string());
        }
        line
    }
}

/// Errors from writing matches. Always fatal to the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to open match output {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write match {seed}: {source}")]
    Write {
        seed: u64,
        #[source]
        source: io::Error,
    },
    #[error("failed to flush match output: {0}")]
    Flush(#[source] io::Error),
}

/// Destination for accepted matches.
pub trait MatchSink {
    fn record(&mut self, found: &SeedMatch) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}

/// Writes one line per match to any writer.
pub struct TextSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Flush(e.into_error()))
    }
}

impl TextSink<File> {
    /// Open `path`, truncating it unless `append` is set.
    pub fn create(path: &Path, append: bool) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> MatchSink for TextSink<W> {
    fn record(&mut self, found: &SeedMatch) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", found.to_line()).map_err(|source| SinkError::Write {
            seed: found.seed,
            source,
        })
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(SinkError::Flush)
    }
}

/// Collects matches in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub matches: Vec<SeedMatch>,
}

impl MatchSink for MemorySink {
    fn record(&mut self, found: &SeedMatch) -> Result<(), SinkError> {
        self.matches.push(found.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
