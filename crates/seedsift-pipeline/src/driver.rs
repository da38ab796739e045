//! The seed pipeline: structure filter, biome expansion, quota.
//!
//! With one worker everything runs on the calling thread. With more, scoped
//! worker threads pull candidates from a bounded channel and send matches
//! back; only the calling thread touches the sink, so exactly
//! `match_quota` matches are written no matter how many are in flight.

use std::convert::Infallible;
use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded, select};
use seedsift_config::SearchConfig;
use seedsift_filter::FilterChain;
use seedsift_oracle::{GenerationOracle, TilePos, seed};

use crate::progress::{Counters, ProgressReporter};
use crate::sink::{MatchSink, SeedMatch, SinkError};

/// Candidates queued per worker.
const TASKS_PER_WORKER: usize = 4;
/// Matches buffered between workers and the sink.
const MATCH_QUEUE: usize = 256;
/// Longest the coordinating thread waits before checking progress.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// The two filter stages as seen by the pipeline.
pub trait SeedFilter: Sync {
    /// Whether accepted structure seeds are expanded into world seeds.
    fn biome_dependent(&self) -> bool;

    /// Structure stage; only the low 48 bits of `seed` matter.
    fn accepts_structure(&self, seed: u64) -> bool;

    /// Biome stage; `Some` carries the tiles to record with the match.
    fn accepts_world(&self, world_seed: u64) -> Option<Vec<TilePos>>;
}

impl<O: GenerationOracle> SeedFilter for FilterChain<O> {
    fn biome_dependent(&self) -> bool {
        FilterChain::biome_dependent(self)
    }

    fn accepts_structure(&self, seed: u64) -> bool {
        FilterChain::accepts_structure(self, seed)
    }

    fn accepts_world(&self, world_seed: u64) -> Option<Vec<TilePos>> {
        FilterChain::accepts_world(self, world_seed).map(|found| found.rare_tiles)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Run-time limits of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Stop after this many matches are written.
    pub match_quota: u64,
    /// Worker threads; 1 runs on the calling thread.
    pub workers: usize,
    /// Time between progress lines.
    pub log_interval: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            match_quota: 100_000,
            workers: 1,
            log_interval: Duration::from_secs(10),
        }
    }
}

impl PipelineOptions {
    /// Options from the search config; zero workers means one per CPU.
    pub fn from_config(config: &SearchConfig) -> Self {
        let workers = match config.workers {
            0 => num_cpus::get(),
            n => n,
        };
        Self {
            match_quota: config.match_quota,
            workers,
            log_interval: Duration::from_secs(config.log_interval_secs),
        }
    }
}

/// Totals of a finished run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineSummary {
    /// Candidates fully evaluated.
    pub checked: u64,
    /// Matches written.
    pub matched: u64,
    pub elapsed: Duration,
}

pub struct Pipeline<F> {
    filter: F,
    options: PipelineOptions,
}

impl<F: SeedFilter> Pipeline<F> {
    pub fn new(filter: F, options: PipelineOptions) -> Self {
        Self { filter, options }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Filter every candidate of `source` until it runs out or the quota
    /// is met. The sink is flushed before returning.
    pub fn run<I, S>(&self, source: I, sink: &mut S) -> Result<PipelineSummary, PipelineError>
    where
        I: IntoIterator<Item = u64>,
        S: MatchSink + ?Sized,
    {
        tracing::info!(
            quota = self.options.match_quota,
            workers = self.options.workers,
            biome_dependent = self.filter.biome_dependent(),
            "Starting seed search"
        );
        let counters = Counters::default();
        let mut reporter = ProgressReporter::new(self.options.log_interval);

        if self.options.workers <= 1 {
            self.run_sequential(source, sink, &counters, &mut reporter)?;
        } else {
            self.run_parallel(source, sink, &counters, &mut reporter)?;
        }
        sink.flush()?;

        reporter.finish(&counters);
        Ok(PipelineSummary {
            checked: counters.checked(),
            matched: counters.matched(),
            elapsed: reporter.elapsed(),
        })
    }

    /// Run both stages for one candidate, handing each match to `emit`.
    /// Breaks when `emit` does or when `stop` is raised mid-expansion.
    fn evaluate<E>(
        &self,
        candidate: u64,
        stop: &AtomicBool,
        mut emit: impl FnMut(SeedMatch) -> Result<ControlFlow<()>, E>,
    ) -> Result<ControlFlow<()>, E> {
        if !self.filter.accepts_structure(candidate) {
            return Ok(ControlFlow::Continue(()));
        }
        if !self.filter.biome_dependent() {
            return emit(SeedMatch::new(candidate, Vec::new()));
        }

        let structure_seed = seed::structure_seed(candidate);
        tracing::debug!(structure_seed, "Structure seed accepted, expanding");
        for world_seed in seed::expansions(structure_seed) {
            if stop.load(Ordering::Relaxed) {
                return Ok(ControlFlow::Break(()));
            }
            if let Some(tiles) = self.filter.accepts_world(world_seed)
                && emit(SeedMatch::new(world_seed, tiles))?.is_break()
            {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn run_sequential<I, S>(
        &self,
        source: I,
        sink: &mut S,
        counters: &Counters,
        reporter: &mut ProgressReporter,
    ) -> Result<(), PipelineError>
    where
        I: IntoIterator<Item = u64>,
        S: MatchSink + ?Sized,
    {
        let quota = self.options.match_quota;
        let never = AtomicBool::new(false);
        let mut written = 0;
        for candidate in source {
            if written >= quota {
                break;
            }
            let flow = self.evaluate(candidate, &never, |found| {
                sink.record(&found)?;
                counters.add_matched();
                written += 1;
                Ok::<_, PipelineError>(if written >= quota {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                })
            })?;
            counters.add_checked();
            reporter.tick(counters);
            if flow.is_break() {
                break;
            }
        }
        Ok(())
    }

    fn run_parallel<I, S>(
        &self,
        source: I,
        sink: &mut S,
        counters: &Counters,
        reporter: &mut ProgressReporter,
    ) -> Result<(), PipelineError>
    where
        I: IntoIterator<Item = u64>,
        S: MatchSink + ?Sized,
    {
        let quota = self.options.match_quota;
        let workers = self.options.workers;
        let stop = AtomicBool::new(false);

        thread::scope(|scope| {
            // Channels live inside the scope so an early return disconnects
            // them and lets every worker exit before the scope joins.
            let (task_tx, task_rx) = bounded::<u64>(workers * TASKS_PER_WORKER);
            let (match_tx, match_rx) = bounded::<SeedMatch>(MATCH_QUEUE);

            for index in 0..workers {
                let task_rx = task_rx.clone();
                let match_tx = match_tx.clone();
                let stop = &stop;
                thread::Builder::new()
                    .name(format!("seedsift-worker-{index}"))
                    .spawn_scoped(scope, move || {
                        while let Ok(candidate) = task_rx.recv() {
                            if stop.load(Ordering::Relaxed) {
                                break;
                            }
                            let flow = self.evaluate(candidate, stop, |found| {
                                Ok::<_, Infallible>(match match_tx.send(found) {
                                    Ok(()) => ControlFlow::Continue(()),
                                    Err(_) => ControlFlow::Break(()),
                                })
                            });
                            counters.add_checked();
                            if matches!(flow, Ok(ControlFlow::Break(()))) {
                                break;
                            }
                        }
                    })
                    .map_err(PipelineError::Spawn)?;
            }
            drop(task_rx);
            drop(match_tx);

            let mut candidates = source.into_iter();
            let mut next = candidates.next();
            let mut task_tx = Some(task_tx);
            let mut written = 0;
            while written < quota {
                if next.is_none() {
                    // Closing the queue lets workers finish what is queued.
                    task_tx = None;
                }
                let mut received = None;
                let mut workers_gone = false;
                match (next, task_tx.as_ref()) {
                    (Some(candidate), Some(tasks)) => select! {
                        send(tasks, candidate) -> sent => {
                            if sent.is_ok() {
                                next = candidates.next();
                            } else {
                                workers_gone = true;
                            }
                        }
                        recv(match_rx) -> found => match found {
                            Ok(found) => received = Some(found),
                            Err(_) => workers_gone = true,
                        },
                        default(POLL_INTERVAL) => {}
                    },
                    _ => match match_rx.recv_timeout(POLL_INTERVAL) {
                        Ok(found) => received = Some(found),
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => workers_gone = true,
                    },
                }

                if let Some(found) = received {
                    if let Err(e) = sink.record(&found) {
                        stop.store(true, Ordering::Relaxed);
                        return Err(e.into());
                    }
                    counters.add_matched();
                    written += 1;
                }
                reporter.tick(counters);
                if workers_gone {
                    break;
                }
            }

            stop.store(true, Ordering::Relaxed);
            tracing::debug!(written, "Stopping workers");
            Ok(())
        })
    }
}
