//! Drives candidate seeds through the filters and records matches.
//!
//! A [`CandidateSource`] yields seeds, a [`Pipeline`] runs them through a
//! [`SeedFilter`] (expanding biome-dependent targets into all 65536 world
//! seeds per structure seed) and a [`MatchSink`] receives exactly as many
//! matches as the quota allows.

pub mod driver;
pub mod progress;
pub mod sink;
pub mod source;

pub use driver::{Pipeline, PipelineError, PipelineOptions, PipelineSummary, SeedFilter};
pub use progress::{Counters, ProgressReporter};
pub use sink::{MatchSink, MemorySink, SeedMatch, SinkError, TextSink};
pub use source::{CandidateSource, LineSeeds, parse_seed};
