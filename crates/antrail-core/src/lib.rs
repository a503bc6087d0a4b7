//! # antrail Core
//!
//! Core types and contracts for ant colony path search.
//!
//! - [`graph::AntGraph`]: the undirected graph the colony walks
//! - [`pheromone::PheromoneMap`]: trail strength per canonical edge
//! - [`strategy`]: the move-selection and pheromone-update contracts
//! - [`types`]: node ids, edge keys, paths and per-iteration state records
//! - [`grid`]: `(row, col)` flattening for maze graphs
//!
//! ## Quick Start
//!
//! ```rust
//! use antrail_core::prelude::*;
//!
//! let graph = AntGraph::from_edges([
//!     (NodeId(0), NodeId(1)),
//!     (NodeId(1), NodeId(2)),
//! ]).unwrap();
//!
//! let pheromone = PheromoneMap::for_graph(&graph);
//! assert_eq!(pheromone.get(NodeId(2), NodeId(1)).unwrap(), 1.0);
//! ```

pub mod error;
pub mod graph;
pub mod grid;
pub mod pheromone;
pub mod prelude;
pub mod strategy;
pub mod types;
