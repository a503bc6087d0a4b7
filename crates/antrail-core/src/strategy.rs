//! Strategy traits: the two pluggable policies of the colony.
//!
//! Ants never talk to each other. They read the pheromone laid on the
//! graph, pick a move, and at the end of an iteration the best walks are
//! written back into the trail. **The trail is the only shared memory.**
//!
//! The engine depends on these contracts alone, so both policies can be
//! swapped without touching the iteration loop.

use crate::error::Result;
use crate::graph::AntGraph;
use crate::pheromone::PheromoneMap;
use crate::types::{AntPath, NodeId};
use rand::RngCore;
use std::collections::HashSet;

/// Picks the next node for an ant standing on `current`.
pub trait MoveSelection {
    /// Choose a neighbor of `current`.
    ///
    /// `explored` holds the nodes this ant has already entered; a policy
    /// should prefer the rest and only hand back an explored neighbor
    /// when nothing else is left. `alpha` weighs the pheromone, `beta`
    /// the structural heuristic.
    ///
    /// Returns `Ok(None)` when `current` has no neighbors at all.
    #[allow(clippy::too_many_arguments)]
    fn select_move(
        &self,
        graph: &AntGraph,
        pheromone: &PheromoneMap,
        explored: &HashSet<NodeId>,
        current: NodeId,
        alpha: f64,
        beta: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Option<NodeId>>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Writes an iteration's walks back into the trail.
pub trait PheromoneUpdate {
    /// Reinforce edges of good paths and evaporate the whole map.
    ///
    /// `paths` is every ant's walk of the iteration; at most `n_best` of
    /// them reinforce. `decay` is the multiplicative evaporation factor.
    /// The returned map holds exactly the edges of the input map.
    fn update_pheromone(
        &self,
        pheromone: PheromoneMap,
        paths: &[AntPath],
        decay: f64,
        n_best: usize,
    ) -> Result<PheromoneMap>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}
