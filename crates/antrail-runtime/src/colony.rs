//! Colony: the ant colony optimization engine.
//!
//! The colony owns the graph, the pheromone map and the two strategies,
//! and runs the iteration loop. Each iteration:
//! 1. Every ant builds a start-to-end path against the pheromone map left
//!    by the previous iteration (read-only for the whole iteration)
//! 2. The update strategy turns the iteration's paths into the next map
//! 3. The global best is replaced only on a strictly shorter path
//! 4. A [`StateRecord`] is handed to the state sink
//!
//! Ants build paths with a depth-first search that backtracks out of
//! dead ends, so every ant reaches `end` on a connected graph.

use crate::state_log::{DiscardSink, StateRecorder, StateSink};
use crate::strategies::{BasicPheromoneUpdate, PheromoneBasedMoveSelection};
use antrail_core::error::{AntrailError, GraphError, PathError, Result};
use antrail_core::graph::AntGraph;
use antrail_core::pheromone::PheromoneMap;
use antrail_core::strategy::{MoveSelection, PheromoneUpdate};
use antrail_core::types::{AntPath, NodeId, StateRecord};
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, trace};

/// Configuration for a colony run.
///
/// Missing fields deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Ants walking per iteration (default: 10).
    pub n_ants: usize,
    /// Shortest paths per iteration that reinforce the trail (default: 2).
    pub n_best: usize,
    /// Number of iterations (default: 30).
    pub n_iterations: usize,
    /// Multiplicative evaporation factor, 0.0-1.0 (default: 0.5).
    pub decay: f64,
    /// Weight of the pheromone in move selection (default: 1.0).
    pub alpha: f64,
    /// Weight of the degree heuristic in move selection (default: 1.0).
    pub beta: f64,
    /// RNG seed. `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            n_best: 2,
            n_iterations: 30,
            decay: 0.5,
            alpha: 1.0,
            beta: 1.0,
            seed: None,
        }
    }
}

impl ColonyConfig {
    /// Reject parameters the run loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants == 0 {
            return Err(AntrailError::invalid_config("n_ants", self.n_ants, "must be at least 1"));
        }
        if self.n_iterations == 0 {
            return Err(AntrailError::invalid_config(
                "n_iterations",
                self.n_iterations,
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(AntrailError::out_of_range("decay", 0.0, 1.0, self.decay));
        }
        if !self.alpha.is_finite() {
            return Err(AntrailError::invalid_config("alpha", self.alpha, "must be finite"));
        }
        if !self.beta.is_finite() {
            return Err(AntrailError::invalid_config("beta", self.beta, "must be finite"));
        }
        Ok(())
    }
}

/// The colony. Owns the search state and runs iterations.
pub struct AntColony {
    graph: AntGraph,
    pheromone: PheromoneMap,
    config: ColonyConfig,
    move_selection: Box<dyn MoveSelection>,
    pheromone_update: Box<dyn PheromoneUpdate>,
    rng: ChaCha8Rng,
}

impl AntColony {
    /// Create a colony with the default strategies.
    ///
    /// Every edge of `graph` starts with a pheromone level of 1.0.
    pub fn new(graph: AntGraph, config: ColonyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            pheromone: PheromoneMap::for_graph(&graph),
            graph,
            config,
            move_selection: Box::new(PheromoneBasedMoveSelection),
            pheromone_update: Box::new(BasicPheromoneUpdate),
            rng,
        }
    }

    /// Replace the move-selection strategy.
    pub fn with_move_selection(mut self, strategy: impl MoveSelection + 'static) -> Self {
        self.move_selection = Box::new(strategy);
        self
    }

    /// Replace the pheromone-update strategy.
    pub fn with_pheromone_update(mut self, strategy: impl PheromoneUpdate + 'static) -> Self {
        self.pheromone_update = Box::new(strategy);
        self
    }

    /// Reseed the colony's RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn graph(&self) -> &AntGraph {
        &self.graph
    }

    pub fn pheromone(&self) -> &PheromoneMap {
        &self.pheromone
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Check the configuration and the endpoints before running.
    pub fn validate(&self, start: NodeId, end: NodeId) -> Result<()> {
        self.config.validate()?;
        if self.graph.node_count() == 0 {
            return Err(GraphError::EmptyGraph.into());
        }
        if !self.graph.has_path(start, end)? {
            return Err(AntrailError::invalid_config(
                "end",
                end,
                format!("unreachable from start node {}", start),
            ));
        }
        Ok(())
    }

    /// Run without recording state.
    pub fn run(&mut self, start: NodeId, end: NodeId) -> Result<AntPath> {
        self.run_with_sink(start, end, &mut DiscardSink)
    }

    /// Run and write one state record per iteration to a JSON Lines file.
    ///
    /// The file is truncated before the first iteration.
    pub fn run_logged(&mut self, start: NodeId, end: NodeId, log: impl AsRef<Path>) -> Result<AntPath> {
        self.validate(start, end)?;
        let mut recorder = StateRecorder::create(log)?;
        self.iterate(start, end, &mut recorder)
    }

    /// Run and hand every iteration's state record to `sink`.
    ///
    /// Returns the shortest path found across all iterations.
    pub fn run_with_sink(
        &mut self,
        start: NodeId,
        end: NodeId,
        sink: &mut dyn StateSink,
    ) -> Result<AntPath> {
        self.validate(start, end)?;
        self.iterate(start, end, sink)
    }

    /// The iteration loop. Callers validate first.
    fn iterate(&mut self, start: NodeId, end: NodeId, sink: &mut dyn StateSink) -> Result<AntPath> {
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            ants = self.config.n_ants,
            iterations = self.config.n_iterations,
            move_selection = self.move_selection.name(),
            pheromone_update = self.pheromone_update.name(),
            %start,
            %end,
            "colony run starting"
        );

        let mut best: Option<AntPath> = None;

        for iteration in 0..self.config.n_iterations {
            let paths = self.construct_colony_paths(start, end)?;

            self.pheromone = self.pheromone_update.update_pheromone(
                self.pheromone.clone(),
                &paths,
                self.config.decay,
                self.config.n_best,
            )?;

            let Some(iteration_best) = paths.iter().min_by_key(|p| p.length) else {
                return Err(PathError::Unreachable { start, end }.into());
            };
            let improved = best
                .as_ref()
                .map_or(true, |b| iteration_best.length < b.length);
            if improved {
                best = Some(iteration_best.clone());
            }
            let shortest_path = match &best {
                Some(path) => path.clone(),
                None => return Err(PathError::Unreachable { start, end }.into()),
            };

            debug!(
                iteration,
                iteration_best = iteration_best.length,
                best = shortest_path.length,
                improved,
                "iteration complete"
            );

            sink.record(&StateRecord {
                iteration,
                pheromone: self.pheromone.clone(),
                all_paths: paths,
                shortest_path,
            })?;
        }

        let best = best.ok_or(PathError::Unreachable { start, end })?;
        info!(length = best.length, "colony run finished");
        Ok(best)
    }

    /// One path per ant, all read against the current pheromone map.
    pub fn construct_colony_paths(&mut self, start: NodeId, end: NodeId) -> Result<Vec<AntPath>> {
        (0..self.config.n_ants)
            .map(|_| self.construct_path(start, end))
            .collect()
    }

    /// Build a single ant's path from `start` to `end`.
    pub fn construct_path(&mut self, start: NodeId, end: NodeId) -> Result<AntPath> {
        self.graph.require_node(start)?;
        self.graph.require_node(end)?;
        walk(
            &self.graph,
            &self.pheromone,
            self.move_selection.as_ref(),
            self.config.alpha,
            self.config.beta,
            &mut self.rng,
            start,
            end,
        )
    }
}

/// Strategy answers at one frame that may land on explored nodes while
/// unexplored exits remain, before the walk picks one of those exits itself.
const MAX_EXPLORED_ANSWERS: usize = 32;

/// Depth-first walk with backtracking on an explicit stack.
///
/// `branch` is the current start-to-node route. A node stays explored
/// after the walk backs out of it, so each node is entered at most once.
/// The top frame is popped only once none of its neighbors is unexplored.
/// An explored answer from the strategy while exits remain is asked again;
/// after [`MAX_EXPLORED_ANSWERS`] such answers the walk draws uniformly
/// among the unexplored exits.
#[allow(clippy::too_many_arguments)]
fn walk(
    graph: &AntGraph,
    pheromone: &PheromoneMap,
    strategy: &dyn MoveSelection,
    alpha: f64,
    beta: f64,
    rng: &mut dyn RngCore,
    start: NodeId,
    end: NodeId,
) -> Result<AntPath> {
    if start == end {
        return Ok(AntPath::new(vec![start]));
    }
    if graph.degree(start) == 0 {
        return Err(PathError::DeadEnd(start).into());
    }

    let mut explored: HashSet<NodeId> = HashSet::new();
    explored.insert(start);
    let mut branch = vec![start];
    let mut backtracks = 0usize;
    let mut explored_answers = 0usize;

    while let Some(&node) = branch.last() {
        let answer = strategy.select_move(graph, pheromone, &explored, node, alpha, beta, rng)?;
        let next = match answer {
            Some(next) if !explored.contains(&next) => next,
            _ => {
                let exits: Vec<NodeId> = graph
                    .neighbors(node)
                    .filter(|n| !explored.contains(n))
                    .collect();
                if exits.is_empty() {
                    branch.pop();
                    backtracks += 1;
                    explored_answers = 0;
                    continue;
                }
                explored_answers += 1;
                if explored_answers < MAX_EXPLORED_ANSWERS {
                    continue;
                }
                match exits.choose(rng) {
                    Some(&exit) => exit,
                    None => continue,
                }
            }
        };

        if !graph.contains_edge(node, next) {
            return Err(AntrailError::edge_not_found(node, next));
        }
        explored_answers = 0;
        explored.insert(next);
        branch.push(next);
        if next == end {
            trace!(length = branch.len() - 1, backtracks, "ant reached end");
            return Ok(AntPath::new(branch));
        }
    }

    Err(PathError::Unreachable { start, end }.into())
}
