//! Shared types used across the engine, the generators and the state log.

use crate::error::AntrailError;
use crate::pheromone::PheromoneMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a node in the search graph.
///
/// Grid coordinates are flattened to integers before the engine sees them,
/// so the engine only ever works with these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical key of an undirected edge.
///
/// The smaller endpoint is always stored first, so `(u, v)` and `(v, u)`
/// produce the same key. Serialized as the string `"u-v"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    pub fn low(&self) -> NodeId {
        self.low
    }

    pub fn high(&self) -> NodeId {
        self.high
    }

    /// Endpoints in canonical order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }

    /// The endpoint opposite to `node`, if `node` is on this edge.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.low {
            Some(self.high)
        } else if node == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl From<(NodeId, NodeId)> for EdgeKey {
    fn from((u, v): (NodeId, NodeId)) -> Self {
        Self::new(u, v)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl FromStr for EdgeKey {
    type Err = AntrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AntrailError::Serialization(format!("invalid edge key: {:?}", s));
        let (u, v) = s.split_once('-').ok_or_else(invalid)?;
        let u: u32 = u.trim().parse().map_err(|_| invalid())?;
        let v: u32 = v.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(NodeId(u), NodeId(v)))
    }
}

impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A path walked by one ant, with its hop count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntPath {
    pub path: Vec<NodeId>,
    pub length: usize,
}

impl AntPath {
    /// Build a path; the length is the number of edges traversed.
    pub fn new(path: Vec<NodeId>) -> Self {
        let length = path.len().saturating_sub(1);
        Self { path, length }
    }

    pub fn start(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// Canonical keys of the traversed edges, in walking order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.path.windows(2).map(|w| EdgeKey::new(w[0], w[1]))
    }
}

/// Snapshot of one colony iteration, as written to the state log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    /// 0-based, contiguous iteration index.
    pub iteration: Iteration,
    /// Pheromone levels after this iteration's update.
    pub pheromone: PheromoneMap,
    /// Every ant's path in this iteration.
    pub all_paths: Vec<AntPath>,
    /// Best path found up to and including this iteration.
    pub shortest_path: AntPath,
}

/// Index of a colony iteration.
pub type Iteration = usize;
