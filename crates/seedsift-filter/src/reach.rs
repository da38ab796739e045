//! Bounded best-first reachability search over nether chunks.
//!
//! Weighted A* over the 4-connected chunk grid. The heuristic is inflated
//! by [`ReachConfig::heuristic_weight`] so the search runs greedily toward
//! the target; a "not reachable" answer only means no path was found within
//! the budget.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use seedsift_config::ReachConfig;
use seedsift_oracle::{BiomeId, ChunkPos, Dimension, GenerationOracle};

/// Lowest sampled height of the walkability scan.
pub const WALK_SCAN_MIN_Y: i32 = 32;
/// Exclusive upper bound of the walkability scan.
pub const WALK_SCAN_MAX_Y: i32 = 90;
/// Vertical stride of the walkability scan.
pub const WALK_SCAN_STEP: usize = 4;

const NEIGHBOURS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target was popped from the frontier.
    Reached { popped: usize },
    /// The frontier ran dry before the target was found.
    Exhausted { popped: usize },
    /// More nodes were popped than the budget allows.
    BudgetExceeded { popped: usize },
    /// The target is farther than the path cap; nothing was sampled.
    TooFar,
}

impl SearchOutcome {
    pub fn is_reachable(self) -> bool {
        matches!(self, SearchOutcome::Reached { .. })
    }

    /// Nodes popped before the search ended.
    pub fn popped(self) -> usize {
        match self {
            SearchOutcome::Reached { popped }
            | SearchOutcome::Exhausted { popped }
            | SearchOutcome::BudgetExceeded { popped } => popped,
            SearchOutcome::TooFar => 0,
        }
    }
}

/// A frontier entry. Ordered so that [`BinaryHeap`] pops the lowest
/// `g + h` first and, among equal totals, the lowest `h`.
#[derive(Clone, Copy, Debug)]
struct Node {
    pos: ChunkPos,
    g: f64,
    h: f64,
    steps: u32,
}

impl Node {
    fn total(&self) -> f64 {
        self.g + self.h
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total()
            .total_cmp(&self.total())
            .then_with(|| other.h.total_cmp(&self.h))
    }
}

/// Reachability search against one oracle and one set of limits.
pub struct ReachSearch<'a, O: ?Sized> {
    oracle: &'a O,
    config: &'a ReachConfig,
}

impl<'a, O: GenerationOracle + ?Sized> ReachSearch<'a, O> {
    pub fn new(oracle: &'a O, config: &'a ReachConfig) -> Self {
        Self { oracle, config }
    }

    /// Search from `origin` to `target` in the nether of `seed`.
    pub fn search(&self, seed: u64, origin: ChunkPos, target: ChunkPos) -> SearchOutcome {
        if origin.manhattan(target) > self.config.max_path_length {
            return SearchOutcome::TooFar;
        }

        let mut frontier = BinaryHeap::new();
        let mut visited: FxHashMap<ChunkPos, u32> = FxHashMap::default();
        frontier.push(Node {
            pos: origin,
            g: 0.0,
            h: self.heuristic(origin, target),
            steps: 0,
        });
        visited.insert(origin, 0);

        let mut popped = 0;
        while let Some(node) = frontier.pop() {
            popped += 1;
            if popped > self.config.search_budget {
                return SearchOutcome::BudgetExceeded { popped };
            }
            if node.pos == target {
                return SearchOutcome::Reached { popped };
            }
            if node.pos.distance(target) > self.config.search_radius {
                continue;
            }
            // Superseded by a shorter route pushed after this entry.
            if visited.get(&node.pos).is_some_and(|&best| best < node.steps) {
                continue;
            }

            for (dx, dz) in NEIGHBOURS {
                let next = node.pos.offset(dx, dz);
                let steps = node.steps + 1;
                if steps > self.config.max_path_length {
                    continue;
                }
                if visited.get(&next).is_some_and(|&best| best <= steps) {
                    continue;
                }
                if !self.is_walkable(seed, next) {
                    continue;
                }
                visited.insert(next, steps);
                frontier.push(Node {
                    pos: next,
                    g: node.g + self.traversal_cost(seed, next),
                    h: self.heuristic(next, target),
                    steps,
                });
            }
        }

        SearchOutcome::Exhausted { popped }
    }

    fn heuristic(&self, pos: ChunkPos, target: ChunkPos) -> f64 {
        f64::from(pos.manhattan(target)) * self.config.heuristic_weight
    }

    /// A chunk is walkable when the sparse column scan at its center finds
    /// a floor with air somewhere above it, without lava in between.
    pub fn is_walkable(&self, seed: u64, chunk: ChunkPos) -> bool {
        let mut has_floor = false;
        for y in (WALK_SCAN_MIN_Y..WALK_SCAN_MAX_Y).step_by(WALK_SCAN_STEP) {
            match self.oracle.block_at(Dimension::Nether, seed, chunk.center(y)) {
                Some(block) if block.is_air() => {
                    if has_floor {
                        return true;
                    }
                }
                Some(block) if block.is_floor() => has_floor = true,
                Some(_) => has_floor = false,
                None => {}
            }
        }
        false
    }

    fn traversal_cost(&self, seed: u64, chunk: ChunkPos) -> f64 {
        let biome = self
            .oracle
            .biome_at(Dimension::Nether, seed, chunk.to_block());
        if biome == BiomeId::BASALT_DELTAS {
            self.config.hazard_cost
        } else {
            self.config.nominal_cost
        }
    }
}
