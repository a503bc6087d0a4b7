//! # antrail
//!
//! Ant colony optimization for shortest paths through mazes and graphs.
//!
//! A colony of ants repeatedly walks from a start node to an end node.
//! Each ant picks its next step by a roulette wheel weighted by the
//! pheromone left on each edge and a degree heuristic, backing out of
//! dead ends as it goes. After every iteration the shortest paths reinforce
//! their edges and all trails evaporate, so later ants converge on short
//! routes. Every iteration can be logged as a JSON line for replay.
//!
//! ## Quick Start
//!
//! ```rust
//! use antrail::prelude::*;
//!
//! // A 5x5 maze with loops, reproducible from its seed
//! let maze = generate_maze_seeded(5, 5, None, Some(7)).unwrap();
//! let graph = maze.to_graph().unwrap();
//!
//! let config = ColonyConfig {
//!     n_ants: 20,
//!     n_iterations: 10,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut colony = AntColony::new(graph, config);
//! let best = colony.run(maze.top_left(), maze.bottom_right()).unwrap();
//!
//! assert_eq!(best.start(), Some(maze.top_left()));
//! assert_eq!(best.end(), Some(maze.bottom_right()));
//! assert!(best.length >= 8);
//! ```
//!
//! ## Architecture
//!
//! - [`antrail_core`] - Graph, pheromone map, path and state types, the
//!   strategy traits and errors
//! - [`antrail_runtime`] - Maze and random-graph generators, the colony
//!   engine, default strategies and the JSON Lines state log
//!
//! ## Pluggable strategies
//!
//! | Trait | Default | Decides |
//! |-------|---------|---------|
//! | `MoveSelection` | `PheromoneBasedMoveSelection` | Next node of an ant |
//! | `PheromoneUpdate` | `BasicPheromoneUpdate` | Trail map after an iteration |
//!
//! Either can be replaced with `AntColony::with_move_selection` or
//! `AntColony::with_pheromone_update`.

// Re-export all subcrates
pub use antrail_core as core;
pub use antrail_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use antrail::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use antrail_core::types::{AntPath, EdgeKey, Iteration, NodeId, StateRecord};
    pub use antrail_core::graph::AntGraph;
    pub use antrail_core::grid::{flatten, grid_to_graph, unflatten, GridCoord};
    pub use antrail_core::pheromone::{PheromoneMap, INITIAL_PHEROMONE};

    // Core traits
    pub use antrail_core::strategy::{MoveSelection, PheromoneUpdate};

    // Error types
    pub use antrail_core::error::{
        AntrailError, ConfigError, GraphError, PathError, Result, StateError,
    };

    // Runtime
    pub use antrail_runtime::colony::{AntColony, ColonyConfig};
    pub use antrail_runtime::strategies::{BasicPheromoneUpdate, PheromoneBasedMoveSelection};
    pub use antrail_runtime::generate::{
        default_extra_edges, generate_maze, generate_maze_seeded, generate_random_graph, Maze,
        RandomGraphConfig,
    };
    pub use antrail_runtime::state_log::{
        filter_states, load_all, load_by_iteration, DiscardSink, StateReader, StateRecorder,
        StateSink,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
