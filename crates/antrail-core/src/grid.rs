//! Grid coordinates and their integer flattening.
//!
//! Mazes are built on `(row, col)` cells. Before the colony sees them the
//! cells are flattened with `row * width + col`.

use crate::error::Result;
use crate::graph::AntGraph;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell of a rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Flatten a cell to its node id on a grid `width` columns wide.
pub fn flatten(coord: GridCoord, width: u32) -> NodeId {
    NodeId(coord.row * width + coord.col)
}

/// Inverse of [`flatten`].
pub fn unflatten(node: NodeId, width: u32) -> GridCoord {
    GridCoord::new(node.0 / width, node.0 % width)
}

/// Build an integer graph from grid-cell edges.
///
/// The width is inferred from the largest column seen, so every node
/// keeps its `row * width + col` id.
pub fn grid_to_graph(
    nodes: impl IntoIterator<Item = GridCoord>,
    edges: impl IntoIterator<Item = (GridCoord, GridCoord)>,
) -> Result<AntGraph> {
    let nodes: Vec<GridCoord> = nodes.into_iter().collect();
    let width = nodes.iter().map(|c| c.col).max().map_or(1, |max| max + 1);

    let mut graph = AntGraph::with_nodes(nodes.iter().map(|&c| flatten(c, width)));
    for (u, v) in edges {
        graph.add_edge(flatten(u, width), flatten(v, width))?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_round_trips() {
        let width = 7;
        for row in 0..5 {
            for col in 0..width {
                let coord = GridCoord::new(row, col);
                let node = flatten(coord, width);
                assert_eq!(node, NodeId(row * width + col));
                assert_eq!(unflatten(node, width), coord);
            }
        }
    }

    #[test]
    fn grid_edges_become_integer_edges() {
        let cells = [
            GridCoord::new(0, 0),
            GridCoord::new(0, 1),
            GridCoord::new(1, 0),
            GridCoord::new(1, 1),
        ];
        let graph = grid_to_graph(
            cells,
            [(cells[0], cells[1]), (cells[1], cells[3]), (cells[3], cells[2])],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 4);
        assert!(graph.contains_edge(NodeId(0), NodeId(1)));
        assert!(graph.contains_edge(NodeId(1), NodeId(3)));
        assert!(graph.contains_edge(NodeId(2), NodeId(3)));
        assert!(!graph.contains_edge(NodeId(0), NodeId(2)));
    }
}
