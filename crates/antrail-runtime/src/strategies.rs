//! Default move-selection and pheromone-update policies.

use antrail_core::error::Result;
use antrail_core::graph::AntGraph;
use antrail_core::pheromone::PheromoneMap;
use antrail_core::strategy::{MoveSelection, PheromoneUpdate};
use antrail_core::types::{AntPath, NodeId};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};
use std::collections::HashSet;

/// Roulette-wheel choice weighted by trail strength and neighbor degree.
///
/// Desirability of moving to `n` over edge `e` is
/// `pheromone(e)^alpha * (1 / degree(n))^beta`: strong trails attract and
/// low-degree neighbors are favored over hubs. Unexplored neighbors are
/// sampled first; only when all of them are explored does the wheel cover
/// every neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PheromoneBasedMoveSelection;

impl PheromoneBasedMoveSelection {
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelection for PheromoneBasedMoveSelection {
    fn select_move(
        &self,
        graph: &AntGraph,
        pheromone: &PheromoneMap,
        explored: &HashSet<NodeId>,
        current: NodeId,
        alpha: f64,
        beta: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Option<NodeId>> {
        let neighbors: Vec<NodeId> = graph.neighbors(current).collect();
        if neighbors.is_empty() {
            return Ok(None);
        }

        let mut desirability = Vec::with_capacity(neighbors.len());
        for &next in &neighbors {
            let trail = pheromone.get(current, next)?.powf(alpha);
            let heuristic = (1.0 / graph.degree(next) as f64).powf(beta);
            desirability.push(trail * heuristic);
        }

        let unexplored: Vec<usize> = (0..neighbors.len())
            .filter(|&i| !explored.contains(&neighbors[i]))
            .collect();
        let candidates = if unexplored.is_empty() {
            (0..neighbors.len()).collect()
        } else {
            unexplored
        };

        let pick = roulette(&candidates, &desirability, rng);
        Ok(Some(neighbors[pick]))
    }

    fn name(&self) -> &str {
        "pheromone-based"
    }
}

/// Sample one of `candidates` proportionally to its weight.
///
/// Infinite weights win outright; if nothing carries weight (all trails
/// evaporated to zero) the draw is uniform.
fn roulette(candidates: &[usize], weights: &[f64], rng: &mut dyn RngCore) -> usize {
    let saturated: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| weights[i].is_infinite())
        .collect();
    if !saturated.is_empty() {
        return saturated[rng.gen_range(0..saturated.len())];
    }

    match WeightedIndex::new(candidates.iter().map(|&i| weights[i])) {
        Ok(wheel) => candidates[wheel.sample(rng)],
        Err(_) => candidates[rng.gen_range(0..candidates.len())],
    }
}

/// Elitist deposit followed by global evaporation.
///
/// The `n_best` shortest paths each add `1 / length` to every edge they
/// traverse, then every edge is multiplied by `decay`. Reinforcement
/// always happens before evaporation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPheromoneUpdate;

impl BasicPheromoneUpdate {
    pub fn new() -> Self {
        Self
    }
}

impl PheromoneUpdate for BasicPheromoneUpdate {
    fn update_pheromone(
        &self,
        mut pheromone: PheromoneMap,
        paths: &[AntPath],
        decay: f64,
        n_best: usize,
    ) -> Result<PheromoneMap> {
        let mut ranked: Vec<&AntPath> = paths.iter().collect();
        ranked.sort_by_key(|p| p.length);

        for path in ranked.into_iter().take(n_best) {
            if path.length == 0 {
                continue;
            }
            let amount = 1.0 / path.length as f64;
            for key in path.edges() {
                pheromone.deposit(key, amount)?;
            }
        }

        pheromone.evaporate(decay);
        Ok(pheromone)
    }

    fn name(&self) -> &str {
        "basic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antrail_core::error::{AntrailError, GraphError};
    use antrail_core::types::EdgeKey;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    /// 0 - 1 - 2 - 3 plus the shortcut 0 - 3, and a leaf 4 on 1.
    fn sample_graph() -> AntGraph {
        AntGraph::from_edges([
            (n(0), n(1)),
            (n(1), n(2)),
            (n(2), n(3)),
            (n(0), n(3)),
            (n(1), n(4)),
        ])
        .unwrap()
    }

    fn select(
        graph: &AntGraph,
        pheromone: &PheromoneMap,
        explored: &HashSet<NodeId>,
        current: NodeId,
        rng: &mut ChaCha8Rng,
    ) -> Option<NodeId> {
        PheromoneBasedMoveSelection
            .select_move(graph, pheromone, explored, current, 1.0, 1.0, rng)
            .unwrap()
    }

    #[test]
    fn isolated_node_has_no_move() {
        let mut graph = sample_graph();
        graph.add_node(n(9));
        let pheromone = PheromoneMap::for_graph(&graph);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select(&graph, &pheromone, &HashSet::new(), n(9), &mut rng), None);
    }

    #[test]
    fn prefers_unexplored_neighbors() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::for_graph(&graph);
        let explored: HashSet<NodeId> = [n(1), n(0), n(4)].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(select(&graph, &pheromone, &explored, n(1), &mut rng), Some(n(2)));
        }
    }

    #[test]
    fn falls_back_to_all_neighbors_at_dead_end() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::for_graph(&graph);
        let explored: HashSet<NodeId> = [n(0), n(1), n(2), n(4)].into_iter().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let next = select(&graph, &pheromone, &explored, n(1), &mut rng).unwrap();
            assert!(graph.contains_edge(n(1), next));
            seen.insert(next);
        }
        assert_eq!(seen.len(), 3, "every neighbor should be reachable in fallback");
    }

    #[test]
    fn strong_trails_dominate() {
        let graph = sample_graph();
        let mut pheromone = PheromoneMap::for_graph(&graph);
        pheromone.set(n(0), n(3), 1000.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hits = (0..500)
            .filter(|_| select(&graph, &pheromone, &HashSet::new(), n(0), &mut rng) == Some(n(3)))
            .count();
        assert!(hits > 450, "expected the reinforced edge to win, got {hits}/500");
    }

    #[test]
    fn zero_pheromone_still_moves() {
        let graph = sample_graph();
        let mut pheromone = PheromoneMap::for_graph(&graph);
        pheromone.evaporate(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let next = select(&graph, &pheromone, &HashSet::new(), n(2), &mut rng).unwrap();
        assert!(next == n(1) || next == n(3));
    }

    #[test]
    fn missing_pheromone_entry_is_reported() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let err = PheromoneBasedMoveSelection
            .select_move(&graph, &pheromone, &HashSet::new(), n(0), 1.0, 1.0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, AntrailError::Graph(GraphError::EdgeNotFound(..))));
    }

    #[test]
    fn reinforce_then_decay() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::for_graph(&graph);
        let paths = vec![
            AntPath::new(vec![n(0), n(1), n(2), n(3)]),
            AntPath::new(vec![n(0), n(3)]),
        ];

        let updated = BasicPheromoneUpdate
            .update_pheromone(pheromone, &paths, 0.5, 1)
            .unwrap();

        // Only the single best path (length 1) reinforces: (1 + 1/1) * 0.5
        assert_eq!(updated.get(n(3), n(0)).unwrap(), 1.0);
        // Everything else only evaporates
        assert_eq!(updated.get(n(0), n(1)).unwrap(), 0.5);
        assert_eq!(updated.get(n(1), n(2)).unwrap(), 0.5);
        assert_eq!(updated.get(n(1), n(4)).unwrap(), 0.5);
    }

    #[test]
    fn n_best_paths_each_deposit() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::for_graph(&graph);
        let paths = vec![
            AntPath::new(vec![n(0), n(3)]),
            AntPath::new(vec![n(0), n(1), n(2), n(3)]),
            AntPath::new(vec![n(0), n(3)]),
        ];

        let updated = BasicPheromoneUpdate
            .update_pheromone(pheromone, &paths, 0.25, 3)
            .unwrap();

        // two length-1 deposits on 0-3
        assert_eq!(updated.get(n(0), n(3)).unwrap(), (1.0 + 2.0) * 0.25);
        // one length-3 deposit on the long route
        let long = (1.0 + 1.0 / 3.0) * 0.25;
        assert!((updated.get(n(1), n(2)).unwrap() - long).abs() < 1e-12);
        assert_eq!(updated.len(), 5);
    }

    #[test]
    fn untouched_edges_decay_exactly() {
        let graph = sample_graph();
        let mut pheromone = PheromoneMap::for_graph(&graph);
        pheromone.set(n(1), n(4), 0.37).unwrap();
        let before = pheromone.clone();
        let paths = vec![AntPath::new(vec![n(0), n(3)])];

        let decay = 0.8;
        let updated = BasicPheromoneUpdate
            .update_pheromone(pheromone, &paths, decay, 2)
            .unwrap();

        let touched = EdgeKey::new(n(0), n(3));
        for (key, old) in before.iter() {
            if key != touched {
                assert_eq!(updated.level(&key).unwrap(), old * decay);
            }
        }
    }

    #[test]
    fn deposit_on_unknown_edge_fails() {
        let graph = sample_graph();
        let pheromone = PheromoneMap::for_graph(&graph);
        let paths = vec![AntPath::new(vec![n(0), n(2)])];
        assert!(BasicPheromoneUpdate
            .update_pheromone(pheromone, &paths, 0.5, 1)
            .is_err());
    }
}
