//! antrail Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use antrail_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{AntPath, EdgeKey, Iteration, NodeId, StateRecord};

pub use crate::graph::AntGraph;
pub use crate::grid::{flatten, grid_to_graph, unflatten, GridCoord};
pub use crate::pheromone::{PheromoneMap, INITIAL_PHEROMONE};

// Re-export the strategy traits
pub use crate::strategy::{MoveSelection, PheromoneUpdate};

// Re-export error types
pub use crate::error::{AntrailError, ConfigError, GraphError, PathError, Result, StateError};
