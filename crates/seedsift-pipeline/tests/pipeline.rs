use std::collections::HashSet;
use std::io::{self, Cursor};
use std::sync::atomic::{AtomicU64, Ordering};

use seedsift_config::{BiomeVariant, Config, TargetDimension};
use seedsift_filter::FilterChain;
use seedsift_filter::structure::SOUL_SAND_OFFSETS;
use seedsift_oracle::seed::{compose, structure_seed};
use seedsift_oracle::{BiomeId, ChunkPos, Dimension, LandmarkKind, RegionPos, StubOracle, TilePos};
use seedsift_pipeline::{
    CandidateSource, MatchSink, MemorySink, Pipeline, PipelineError, PipelineOptions, SeedFilter,
    SeedMatch, SinkError, TextSink,
};

/// Accepts everything and counts biome-stage calls.
struct CountingFilter {
    dependent: bool,
    world_calls: AtomicU64,
}

impl CountingFilter {
    fn new(dependent: bool) -> Self {
        Self {
            dependent,
            world_calls: AtomicU64::new(0),
        }
    }
}

impl SeedFilter for CountingFilter {
    fn biome_dependent(&self) -> bool {
        self.dependent
    }

    fn accepts_structure(&self, _seed: u64) -> bool {
        true
    }

    fn accepts_world(&self, _world_seed: u64) -> Option<Vec<TilePos>> {
        self.world_calls.fetch_add(1, Ordering::Relaxed);
        Some(Vec::new())
    }
}

struct FailingSink;

impl MatchSink for FailingSink {
    fn record(&mut self, found: &SeedMatch) -> Result<(), SinkError> {
        Err(SinkError::Write {
            seed: found.seed,
            source: io::Error::other("disk full"),
        })
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

fn options(match_quota: u64, workers: usize) -> PipelineOptions {
    PipelineOptions {
        match_quota,
        workers,
        ..Default::default()
    }
}

#[test]
fn test_quota_is_exact_sequential() {
    let pipeline = Pipeline::new(CountingFilter::new(false), options(25, 1));
    let mut sink = MemorySink::default();
    let summary = pipeline
        .run(CandidateSource::incremental(1_000), &mut sink)
        .unwrap();
    assert_eq!(sink.matches.len(), 25);
    assert_eq!(summary.matched, 25);
    assert_eq!(summary.checked, 25);
    assert_eq!(sink.matches[0].seed, 1_000);
    assert_eq!(sink.matches[24].seed, 1_024);
}

#[test]
fn test_quota_is_exact_parallel() {
    let pipeline = Pipeline::new(CountingFilter::new(true), options(40, 4));
    let mut sink = MemorySink::default();
    let summary = pipeline
        .run(CandidateSource::incremental(0), &mut sink)
        .unwrap();
    assert_eq!(sink.matches.len(), 40, "extra in-flight matches must be discarded");
    assert_eq!(summary.matched, 40);
    let distinct: HashSet<u64> = sink.matches.iter().map(|m| m.seed).collect();
    assert_eq!(distinct.len(), 40, "no match is written twice");
}

#[test]
fn test_parallel_drains_finite_source() {
    let pipeline = Pipeline::new(CountingFilter::new(false), options(1_000, 3));
    let mut sink = MemorySink::default();
    let summary = pipeline.run(0..100, &mut sink).unwrap();
    assert_eq!(summary.checked, 100);
    let mut seeds: Vec<u64> = sink.matches.iter().map(|m| m.seed).collect();
    seeds.sort_unstable();
    assert_eq!(seeds, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_biome_independent_never_runs_biome_stage() {
    let pipeline = Pipeline::new(CountingFilter::new(false), options(50, 1));
    let mut sink = MemorySink::default();
    pipeline.run(0..50, &mut sink).unwrap();
    assert_eq!(pipeline.filter().world_calls.load(Ordering::Relaxed), 0);
    assert!(sink.matches.iter().all(|m| m.tiles.is_empty()));
}

#[test]
fn test_biome_dependent_expands_every_structure_seed() {
    let pipeline = Pipeline::new(CountingFilter::new(true), options(u64::MAX, 1));
    let mut sink = MemorySink::default();
    let summary = pipeline.run([7, 8], &mut sink).unwrap();
    assert_eq!(summary.checked, 2);
    assert_eq!(pipeline.filter().world_calls.load(Ordering::Relaxed), 2 * 65_536);
    let for_seven: HashSet<u64> = sink
        .matches
        .iter()
        .filter(|m| structure_seed(m.seed) == 7)
        .map(|m| m.seed)
        .collect();
    assert_eq!(for_seven.len(), 65_536);
    assert!(for_seven.contains(&compose(7, u16::MAX)));
}

#[test]
fn test_malformed_file_lines_are_skipped() {
    let input = Cursor::new("11\nnot-a-seed\n\n-3\n4.5\n12\n");
    let pipeline = Pipeline::new(CountingFilter::new(false), options(100, 1));
    let mut sink = MemorySink::default();
    let summary = pipeline
        .run(CandidateSource::from_reader(input), &mut sink)
        .unwrap();
    assert_eq!(summary.checked, 3);
    let seeds: Vec<u64> = sink.matches.iter().map(|m| m.seed).collect();
    assert_eq!(seeds, vec![11, (-3i64) as u64, 12]);
}

#[test]
fn test_sink_failure_is_fatal() {
    for workers in [1, 2] {
        let pipeline = Pipeline::new(CountingFilter::new(false), options(10, workers));
        let result = pipeline.run(CandidateSource::incremental(0), &mut FailingSink);
        assert!(
            matches!(result, Err(PipelineError::Sink(SinkError::Write { .. }))),
            "workers = {workers}: sink errors must stop the run"
        );
    }
}

#[test]
fn test_text_sink_receives_signed_lines() {
    let pipeline = Pipeline::new(CountingFilter::new(false), options(2, 1));
    let mut sink = TextSink::new(Vec::new());
    pipeline.run([u64::MAX, 5], &mut sink).unwrap();
    let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(text, "-1\n5\n");
}

fn nether_oracle() -> StubOracle {
    let fortress = ChunkPos::new(2, 6);
    SOUL_SAND_OFFSETS
        .into_iter()
        .fold(StubOracle::new(), |oracle, (dx, dz)| {
            oracle.with_biome(Dimension::Nether, fortress.offset(dx, dz), BiomeId::SOUL_SAND_VALLEY)
        })
        .with_spawn_biomes(LandmarkKind::BastionRemnant, &[BiomeId::NETHER_WASTES])
        .with_landmark(LandmarkKind::BastionRemnant, RegionPos::new(-1, -1), ChunkPos::new(-3, -4))
        .with_landmark(LandmarkKind::Fortress, RegionPos::ORIGIN, fortress)
}

#[test]
fn test_filter_chain_nether_end_to_end() {
    let mut config = Config::default();
    config.search.dimension = TargetDimension::Nether;
    let chain = FilterChain::new(nether_oracle(), &config);
    let pipeline = Pipeline::new(chain, options(10, 1));
    let mut sink = MemorySink::default();
    let summary = pipeline.run([42, 43], &mut sink).unwrap();
    assert_eq!(summary.checked, 2);
    // The stub ignores the seed, so both candidates match as given.
    let seeds: Vec<u64> = sink.matches.iter().map(|m| m.seed).collect();
    assert_eq!(seeds, vec![42, 43]);
}

#[test]
fn test_filter_chain_overworld_expands_world_seeds() {
    let mut oracle = StubOracle::new()
        .with_spawn_biomes(LandmarkKind::Village, &[BiomeId::PLAINS])
        .with_spawn_biomes(LandmarkKind::DesertPyramid, &[BiomeId::DESERT])
        .with_landmark(LandmarkKind::Village, RegionPos::ORIGIN, ChunkPos::new(1, 1))
        .with_biome(Dimension::Overworld, ChunkPos::new(1, 1), BiomeId::PLAINS);
    for x in -2..=1 {
        for z in -2..=1 {
            let pos = ChunkPos::new(x * 32 + 2, z * 32 + 2);
            oracle = oracle
                .with_landmark(LandmarkKind::DesertPyramid, RegionPos::new(x, z), pos)
                .with_biome(Dimension::Overworld, pos, BiomeId::DESERT);
        }
    }
    // Biome seed 1 puts the village on the wrong biome.
    let oracle = oracle.with_seeded_biome(
        compose(9, 1),
        Dimension::Overworld,
        ChunkPos::new(1, 1),
        BiomeId::OCEAN,
    );

    let mut config = Config::default();
    config.search.dimension = TargetDimension::Overworld;
    config.biomes.variant = BiomeVariant::Strict;
    let pipeline = Pipeline::new(FilterChain::new(oracle, &config), options(3, 1));
    let mut sink = MemorySink::default();
    pipeline.run([9], &mut sink).unwrap();
    let seeds: Vec<u64> = sink.matches.iter().map(|m| m.seed).collect();
    assert_eq!(seeds, vec![compose(9, 0), compose(9, 2), compose(9, 3)]);
}
