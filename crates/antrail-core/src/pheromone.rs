//! Pheromone map: per-edge trail strength.
//!
//! Keyed by [`EdgeKey`], so every read and write is canonicalized once and
//! `(u, v)` / `(v, u)` always hit the same entry. The set of edges is fixed
//! when the map is built: updates change values, never the key set.

use crate::error::{AntrailError, Result};
use crate::graph::AntGraph;
use crate::types::{EdgeKey, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Initial trail strength laid on every edge when a colony starts.
pub const INITIAL_PHEROMONE: f64 = 1.0;

/// Mapping from canonical edge to pheromone level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PheromoneMap {
    levels: BTreeMap<EdgeKey, f64>,
}

impl PheromoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same level on every given edge.
    pub fn uniform(edges: impl IntoIterator<Item = EdgeKey>, level: f64) -> Self {
        Self {
            levels: edges.into_iter().map(|key| (key, level)).collect(),
        }
    }

    /// One entry per graph edge, at [`INITIAL_PHEROMONE`].
    pub fn for_graph(graph: &AntGraph) -> Self {
        Self::uniform(graph.edge_keys(), INITIAL_PHEROMONE)
    }

    /// Pheromone on the edge between `u` and `v`, in either orientation.
    pub fn get(&self, u: NodeId, v: NodeId) -> Result<f64> {
        self.level(&EdgeKey::new(u, v))
    }

    pub fn level(&self, key: &EdgeKey) -> Result<f64> {
        self.levels
            .get(key)
            .copied()
            .ok_or_else(|| AntrailError::edge_not_found(key.low(), key.high()))
    }

    /// Overwrite the level of an existing edge.
    pub fn set(&mut self, u: NodeId, v: NodeId, value: f64) -> Result<()> {
        *self.slot(EdgeKey::new(u, v))? = value;
        Ok(())
    }

    /// Add `amount` to an existing edge.
    pub fn deposit(&mut self, key: EdgeKey, amount: f64) -> Result<()> {
        *self.slot(key)? += amount;
        Ok(())
    }

    /// Multiply every edge by `decay` (evaporation).
    pub fn evaporate(&mut self, decay: f64) {
        for level in self.levels.values_mut() {
            *level *= decay;
        }
    }

    pub fn contains(&self, u: NodeId, v: NodeId) -> bool {
        self.levels.contains_key(&EdgeKey::new(u, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.levels.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of all levels.
    pub fn total(&self) -> f64 {
        self.levels.values().sum()
    }

    /// Strongest edge and its level.
    pub fn strongest(&self) -> Option<(EdgeKey, f64)> {
        self.iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    fn slot(&mut self, key: EdgeKey) -> Result<&mut f64> {
        self.levels
            .get_mut(&key)
            .ok_or_else(|| AntrailError::edge_not_found(key.low(), key.high()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    fn triangle() -> PheromoneMap {
        PheromoneMap::uniform(
            [
                EdgeKey::new(n(0), n(1)),
                EdgeKey::new(n(1), n(2)),
                EdgeKey::new(n(2), n(0)),
            ],
            1.0,
        )
    }

    #[test]
    fn reads_and_writes_are_orientation_free() {
        let mut map = triangle();
        map.set(n(1), n(0), 3.5).unwrap();
        assert_eq!(map.get(n(0), n(1)).unwrap(), 3.5);
        assert_eq!(map.get(n(1), n(0)).unwrap(), 3.5);

        map.deposit(EdgeKey::new(n(0), n(2)), 0.25).unwrap();
        assert_eq!(map.get(n(2), n(0)).unwrap(), 1.25);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn unknown_edge_is_a_lookup_error() {
        let mut map = triangle();
        let err = map.get(n(0), n(7)).unwrap_err();
        assert_eq!(err, AntrailError::Graph(GraphError::EdgeNotFound(n(0), n(7))));
        assert!(map.set(n(5), n(6), 1.0).is_err());
        assert_eq!(map.len(), 3, "failed writes must not grow the map");
    }

    #[test]
    fn evaporation_scales_every_edge() {
        let mut map = triangle();
        map.set(n(0), n(1), 4.0).unwrap();
        map.evaporate(0.5);
        assert_eq!(map.get(n(0), n(1)).unwrap(), 2.0);
        assert_eq!(map.get(n(1), n(2)).unwrap(), 0.5);
        assert_eq!(map.total(), 3.0);
        assert_eq!(map.strongest(), Some((EdgeKey::new(n(0), n(1)), 2.0)));
    }

    #[test]
    fn serializes_with_string_keys() {
        let mut map = PheromoneMap::uniform([EdgeKey::new(n(3), n(1))], 0.5);
        map.set(n(1), n(3), 0.75).unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"1-3": 0.75}));

        let back: PheromoneMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
