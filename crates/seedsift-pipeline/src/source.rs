//! Candidate seed streams.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seedsift_config::{SearchConfig, SourceMode};
use seedsift_oracle::seed::STRUCTURE_SEED_MASK;

/// An endless or file-backed stream of candidate seeds.
pub enum CandidateSource {
    /// `start`, `start + 1`, ... wrapping at `u64::MAX`.
    Incremental { next: u64 },
    /// Uniform draws from the 48-bit structure seed space.
    Random(ChaCha8Rng),
    /// One integer per line.
    File(LineSeeds<Box<dyn BufRead + Send>>),
}

impl CandidateSource {
    pub fn incremental(start: u64) -> Self {
        CandidateSource::Incremental { next: start }
    }

    /// Random draws, reproducible when `seed` is given.
    pub fn random(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        tracing::debug!(seed, "Random candidate generator seeded");
        CandidateSource::Random(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        CandidateSource::File(LineSeeds::new(Box::new(reader)))
    }

    /// Seeds listed in the text file at `path`.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// The source selected by `config.source`.
    pub fn from_config(config: &SearchConfig) -> io::Result<Self> {
        match config.source {
            SourceMode::Incremental => Ok(Self::incremental(config.start_seed)),
            SourceMode::Random => Ok(Self::random(config.random_seed)),
            SourceMode::File => Self::open(&config.input_file),
        }
    }
}

impl Iterator for CandidateSource {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match self {
            CandidateSource::Incremental { next } => {
                let seed = *next;
                *next = next.wrapping_add(1);
                Some(seed)
            }
            CandidateSource::Random(rng) => Some(rng.random::<u64>() & STRUCTURE_SEED_MASK),
            CandidateSource::File(lines) => lines.next(),
        }
    }
}

/// Seeds parsed from a line-oriented reader.
///
/// Blank lines are skipped silently; malformed lines, including ones that
/// are not UTF-8, with a warning. A read error ends the stream.
pub struct LineSeeds<R> {
    reader: R,
    line: Vec<u8>,
    line_number: u64,
}

impl<R: BufRead> LineSeeds<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineSeeds<R> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(line = self.line_number + 1, "Failed to read seed input: {e}");
                    return None;
                }
            }
            self.line_number += 1;

            let Ok(text) = std::str::from_utf8(&self.line) else {
                tracing::warn!(line = self.line_number, "Skipping seed line that is not UTF-8");
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            match parse_seed(text) {
                Some(seed) => return Some(seed),
                None => {
                    tracing::warn!(line = self.line_number, "Skipping malformed seed {text:?}");
                }
            }
        }
    }
}

/// Parse a seed written as a signed or unsigned 64-bit decimal.
pub fn parse_seed(text: &str) -> Option<u64> {
    text.parse::<i64>()
        .map(|seed| seed as u64)
        .or_else(|_| text.parse::<u64>())
        .ok()
}
