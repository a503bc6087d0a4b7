//! # antrail Runtime
//!
//! Maze generation, the colony engine and its state log.
//!
//! The runtime owns everything that changes over a run: the generator
//! produces a graph, the [`colony::AntColony`] walks it for a fixed
//! number of iterations, and each iteration is appended to a JSON Lines
//! log that [`state_log`] can read back.

pub mod colony;
pub mod generate;
pub mod prelude;
pub mod state_log;
pub mod strategies;
