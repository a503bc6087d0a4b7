//! Error types for antrail operations.
//!
//! Every fallible operation returns [`Result`]. Nothing is retried
//! internally: errors propagate to the caller as-is.

use crate::types::NodeId;
use thiserror::Error;

/// Result type for antrail operations.
pub type Result<T> = std::result::Result<T, AntrailError>;

/// Errors that can occur during antrail operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AntrailError {
    /// Graph lookups and structural violations.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
    /// Path construction failures.
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// State log lookups.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// Rejected configuration, surfaced before a run starts.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(String),
    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for AntrailError {
    fn from(e: std::io::Error) -> Self {
        AntrailError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AntrailError {
    fn from(e: serde_json::Error) -> Self {
        AntrailError::Serialization(e.to_string())
    }
}

/// Graph-related errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Node not present in the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    /// Edge not present in the graph or the pheromone map.
    #[error("Edge not found: {0}-{1}")]
    EdgeNotFound(NodeId, NodeId),
    /// Self-loops are not allowed.
    #[error("Self-loop on node {0} is not allowed")]
    SelfLoop(NodeId),
    /// Graph has no nodes.
    #[error("Graph is empty")]
    EmptyGraph,
}

/// Path construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The start node has no traversable neighbors.
    #[error("Dead end: node {0} has no neighbors")]
    DeadEnd(NodeId),
    /// Every branch from `start` was exhausted without reaching `end`.
    #[error("Node {end} is unreachable from {start}")]
    Unreachable { start: NodeId, end: NodeId },
}

/// State log errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// No record with this iteration index exists in the log.
    #[error("Iteration {iteration} not found in {path}")]
    IterationNotFound { iteration: usize, path: String },
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Out of range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

// Convenience constructors
impl AntrailError {
    pub fn node_not_found(node: NodeId) -> Self {
        AntrailError::Graph(GraphError::NodeNotFound(node))
    }

    pub fn edge_not_found(u: NodeId, v: NodeId) -> Self {
        AntrailError::Graph(GraphError::EdgeNotFound(u, v))
    }

    pub fn iteration_not_found(iteration: usize, path: impl Into<String>) -> Self {
        AntrailError::State(StateError::IterationNotFound {
            iteration,
            path: path.into(),
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AntrailError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        AntrailError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    /// Whether this is a "record/iteration not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AntrailError::State(StateError::IterationNotFound { .. }))
    }
}
