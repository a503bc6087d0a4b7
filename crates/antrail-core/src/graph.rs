//! The search graph.
//!
//! An undirected, simple graph over [`NodeId`]s backed by petgraph's
//! `UnGraphMap`. Edge weights are kept for callers that need them (the
//! random-graph generator, external comparators); the default colony
//! counts hops and ignores them.

use crate::error::{AntrailError, GraphError, Result};
use crate::types::{EdgeKey, NodeId};
use petgraph::graphmap::{DiGraphMap, UnGraphMap};
use petgraph::visit::Bfs;
use std::collections::HashSet;

/// Weight given to edges added without one.
pub const UNIT_WEIGHT: f64 = 1.0;

/// Undirected graph the colony searches.
#[derive(Debug, Clone, Default)]
pub struct AntGraph {
    inner: UnGraphMap<NodeId, f64>,
}

impl AntGraph {
    pub fn new() -> Self {
        Self {
            inner: UnGraphMap::new(),
        }
    }

    /// Graph with the given nodes and no edges.
    pub fn with_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Build from unweighted edges. `(u, v)` and `(v, u)` collapse to one edge.
    pub fn from_edges(edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<Self> {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn from_weighted_edges(
        edges: impl IntoIterator<Item = (NodeId, NodeId, f64)>,
    ) -> Result<Self> {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            graph.add_weighted_edge(u, v, weight)?;
        }
        Ok(graph)
    }

    /// Coerce a directed graph to an undirected one.
    ///
    /// Opposite arcs merge into one edge; the last weight seen wins.
    pub fn from_directed(directed: &DiGraphMap<NodeId, f64>) -> Result<Self> {
        let mut graph = Self::with_nodes(directed.nodes());
        for (u, v, weight) in directed.all_edges() {
            graph.add_weighted_edge(u, v, *weight)?;
        }
        Ok(graph)
    }

    pub fn add_node(&mut self, node: NodeId) {
        self.inner.add_node(node);
    }

    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        self.add_weighted_edge(u, v, UNIT_WEIGHT)
    }

    /// Add an edge, or replace the weight of an existing one.
    pub fn add_weighted_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<()> {
        if u == v {
            return Err(GraphError::SelfLoop(u).into());
        }
        self.inner.add_edge(u, v, weight);
        Ok(())
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.contains_node(node)
    }

    pub fn contains_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.inner.contains_edge(u, v)
    }

    pub fn edge_weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.inner.edge_weight(u, v).copied()
    }

    /// Neighbors of `node`, in insertion order. Empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.neighbors(node)
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.inner.neighbors(node).count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.nodes()
    }

    /// Canonical keys of every edge.
    pub fn edge_keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.inner.all_edges().map(|(u, v, _)| EdgeKey::new(u, v))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, f64)> + '_ {
        self.inner
            .all_edges()
            .map(|(u, v, weight)| (EdgeKey::new(u, v), *weight))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        let mut seen: HashSet<NodeId> = HashSet::with_capacity(self.node_count());
        let mut components = 0;

        for node in self.inner.nodes() {
            if seen.contains(&node) {
                continue;
            }
            components += 1;
            let mut bfs = Bfs::new(&self.inner, node);
            while let Some(reached) = bfs.next(&self.inner) {
                seen.insert(reached);
            }
        }

        components
    }

    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    /// Whether any cycle exists (more edges than a spanning forest holds).
    pub fn has_cycle(&self) -> bool {
        self.edge_count() + self.component_count() > self.node_count()
    }

    /// Whether `end` can be reached from `start`.
    pub fn has_path(&self, start: NodeId, end: NodeId) -> Result<bool> {
        self.require_node(start)?;
        self.require_node(end)?;
        Ok(petgraph::algo::has_path_connecting(&self.inner, start, end, None))
    }

    pub fn require_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(AntrailError::node_not_found(node))
        }
    }

    /// Read access to the backing petgraph structure, for comparators
    /// such as `petgraph::algo::dijkstra`.
    pub fn as_graphmap(&self) -> &UnGraphMap<NodeId, f64> {
        &self.inner
    }
}
