//! Maze and random-graph generators.
//!
//! Mazes start as a full `rows × cols` grid. Every grid edge gets a random
//! weight and Kruskal keeps a minimum spanning tree, which is a perfect
//! maze (exactly one route between any two cells). A few non-tree grid
//! edges are then put back so the maze has loops and the colony has
//! competing routes to choose from.

use antrail_core::error::{AntrailError, Result};
use antrail_core::graph::AntGraph;
use antrail_core::grid::{flatten, GridCoord};
use antrail_core::types::NodeId;
use petgraph::algo::is_cyclic_undirected;
use petgraph::graphmap::UnGraphMap;
use petgraph::unionfind::UnionFind;
use petgraph::visit::Bfs;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fraction of `rows * cols * 4` added back as loop edges by default.
pub const DEFAULT_EXTRA_EDGE_RATIO: f64 = 0.015;

/// A grid maze. Nodes are cells; edges are open passages between
/// orthogonally adjacent cells.
#[derive(Debug, Clone)]
pub struct Maze {
    rows: u32,
    cols: u32,
    passages: UnGraphMap<GridCoord, ()>,
}

impl Maze {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn node_count(&self) -> usize {
        self.passages.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.passages.edge_count()
    }

    /// Open passages as cell pairs.
    pub fn edges(&self) -> impl Iterator<Item = (GridCoord, GridCoord)> + '_ {
        self.passages.all_edges().map(|(a, b, _)| (a, b))
    }

    pub fn contains_edge(&self, a: GridCoord, b: GridCoord) -> bool {
        self.passages.contains_edge(a, b)
    }

    /// Whether every cell can reach every other cell.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.passages.nodes().next() else {
            return false;
        };
        let mut bfs = Bfs::new(&self.passages, first);
        let mut reached = 0;
        while bfs.next(&self.passages).is_some() {
            reached += 1;
        }
        reached == self.node_count()
    }

    /// Whether the maze has at least one loop.
    pub fn has_cycle(&self) -> bool {
        is_cyclic_undirected(&self.passages)
    }

    /// Flattened id of a cell.
    pub fn node(&self, coord: GridCoord) -> NodeId {
        flatten(coord, self.cols)
    }

    pub fn top_left(&self) -> NodeId {
        self.node(GridCoord::new(0, 0))
    }

    pub fn top_right(&self) -> NodeId {
        self.node(GridCoord::new(0, self.cols - 1))
    }

    pub fn bottom_left(&self) -> NodeId {
        self.node(GridCoord::new(self.rows - 1, 0))
    }

    pub fn bottom_right(&self) -> NodeId {
        self.node(GridCoord::new(self.rows - 1, self.cols - 1))
    }

    /// The maze as an integer graph (`row * cols + col`).
    pub fn to_graph(&self) -> Result<AntGraph> {
        let mut graph = AntGraph::with_nodes(self.passages.nodes().map(|c| self.node(c)));
        for (a, b) in self.edges() {
            graph.add_edge(self.node(a), self.node(b))?;
        }
        Ok(graph)
    }
}

/// Default loop-edge count for a grid: `0.015 * rows * cols * 4`, rounded.
pub fn default_extra_edges(rows: u32, cols: u32) -> usize {
    (DEFAULT_EXTRA_EDGE_RATIO * rows as f64 * cols as f64 * 4.0).round() as usize
}

/// Generate a connected maze on a `rows × cols` grid.
///
/// `extra_edges` is the number of non-tree passages added back; `None`
/// uses [`default_extra_edges`]. Unless it is `Some(0)`, the maze is
/// topped up until it contains a cycle. Single-row and single-column grids
/// have no non-tree edges and always come back as trees.
pub fn generate_maze<R: Rng + ?Sized>(
    rows: u32,
    cols: u32,
    extra_edges: Option<usize>,
    rng: &mut R,
) -> Result<Maze> {
    if rows == 0 {
        return Err(AntrailError::invalid_config("rows", rows, "must be at least 1"));
    }
    if cols == 0 {
        return Err(AntrailError::invalid_config("cols", cols, "must be at least 1"));
    }

    let cells: Vec<GridCoord> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| GridCoord::new(row, col)))
        .collect();

    // Kruskal over uniformly random weights
    let mut weighted: Vec<(GridCoord, GridCoord, f64)> = grid_edges(rows, cols)
        .into_iter()
        .map(|(a, b)| (a, b, rng.gen::<f64>()))
        .collect();
    weighted.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut sets = UnionFind::<usize>::new(cells.len());
    let mut passages: UnGraphMap<GridCoord, ()> = UnGraphMap::with_capacity(cells.len(), cells.len());
    for &cell in &cells {
        passages.add_node(cell);
    }

    let mut spare = Vec::new();
    for (a, b, _) in weighted {
        let ia = flatten(a, cols).as_u32() as usize;
        let ib = flatten(b, cols).as_u32() as usize;
        if sets.union(ia, ib) {
            passages.add_edge(a, b, ());
        } else {
            spare.push((a, b));
        }
    }

    let tree_edges = passages.edge_count();
    let requested = extra_edges.unwrap_or_else(|| default_extra_edges(rows, cols));
    spare.shuffle(rng);

    let mut spare = spare.into_iter();
    for (a, b) in spare.by_ref().take(requested) {
        passages.add_edge(a, b, ());
    }

    // Small grids can round the default down to zero loops.
    let mut maze = Maze { rows, cols, passages };
    if requested > 0 || extra_edges.is_none() {
        while maze.edge_count() == tree_edges {
            match spare.next() {
                Some((a, b)) => {
                    maze.passages.add_edge(a, b, ());
                }
                None => break,
            }
        }
    }

    debug!(
        rows,
        cols,
        tree_edges,
        extra = maze.edge_count() - tree_edges,
        "generated maze"
    );
    Ok(maze)
}

/// [`generate_maze`] with its own RNG, seeded when `seed` is given.
pub fn generate_maze_seeded(
    rows: u32,
    cols: u32,
    extra_edges: Option<usize>,
    seed: Option<u64>,
) -> Result<Maze> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    generate_maze(rows, cols, extra_edges, &mut rng)
}

fn grid_edges(rows: u32, cols: u32) -> Vec<(GridCoord, GridCoord)> {
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let here = GridCoord::new(row, col);
            if col + 1 < cols {
                edges.push((here, GridCoord::new(row, col + 1)));
            }
            if row + 1 < rows {
                edges.push((here, GridCoord::new(row + 1, col)));
            }
        }
    }
    edges
}

/// Parameters for an Erdős–Rényi random graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomGraphConfig {
    /// Number of nodes, ids `0..n`.
    pub n: u32,
    /// Probability that any given pair is connected.
    pub edge_probability: f64,
    /// Seed for the topology (default: 42).
    pub seed: u64,
    /// Smallest integer edge weight, inclusive (default: 1).
    pub min_weight: u32,
    /// Largest integer edge weight, inclusive (default: 10).
    pub max_weight: u32,
    /// Seed for the weights. `None` draws weights from entropy, so only
    /// the topology is reproducible.
    pub weight_seed: Option<u64>,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            n: 10,
            edge_probability: 0.3,
            seed: 42,
            min_weight: 1,
            max_weight: 10,
            weight_seed: None,
        }
    }
}

/// Generate a G(n, p) random graph with integer weights.
pub fn generate_random_graph(config: &RandomGraphConfig) -> Result<AntGraph> {
    let p = config.edge_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(AntrailError::out_of_range("edge_probability", 0.0, 1.0, p));
    }
    if config.min_weight > config.max_weight {
        return Err(AntrailError::invalid_config(
            "min_weight",
            config.min_weight,
            format!("must not exceed max_weight ({})", config.max_weight),
        ));
    }

    let mut topology = ChaCha8Rng::seed_from_u64(config.seed);
    let mut weights = match config.weight_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut graph = AntGraph::with_nodes((0..config.n).map(NodeId));
    for i in 0..config.n {
        for j in (i + 1)..config.n {
            if topology.gen_bool(p) {
                let weight = weights.gen_range(config.min_weight..=config.max_weight);
                graph.add_weighted_edge(NodeId(i), NodeId(j), weight as f64)?;
            }
        }
    }

    debug!(
        n = config.n,
        edges = graph.edge_count(),
        seed = config.seed,
        "generated random graph"
    );
    Ok(graph)
}
