//! antrail Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use antrail_runtime::prelude::*;
//! ```

// Re-export colony
pub use crate::colony::{AntColony, ColonyConfig};

// Re-export default strategies
pub use crate::strategies::{BasicPheromoneUpdate, PheromoneBasedMoveSelection};

// Re-export generators
pub use crate::generate::{
    default_extra_edges, generate_maze, generate_maze_seeded, generate_random_graph, Maze,
    RandomGraphConfig,
};

// Re-export state log
pub use crate::state_log::{
    filter_states, load_all, load_by_iteration, DiscardSink, StateReader, StateRecorder,
    StateSink,
};

// Re-export from core
pub use antrail_core::prelude::*;
