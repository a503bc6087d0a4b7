//! Generate a maze and save it as JSON.

use anyhow::{bail, Context, Result};
use antrail::prelude::*;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Config;

/// On-disk maze: grid size plus open passages as flattened node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeFile {
    pub rows: u32,
    pub cols: u32,
    pub edges: Vec<[u32; 2]>,
}

impl MazeFile {
    pub fn from_maze(maze: &Maze) -> Self {
        let mut edges: Vec<[u32; 2]> = maze
            .edges()
            .map(|(a, b)| {
                let key = EdgeKey::new(maze.node(a), maze.node(b));
                [key.low().as_u32(), key.high().as_u32()]
            })
            .collect();
        edges.sort_unstable();
        Self {
            rows: maze.rows(),
            cols: maze.cols(),
            edges,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read maze: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse maze: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let content = serde_json::to_string(self).context("Failed to serialize maze")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write maze: {}", path.display()))
    }

    /// Every cell becomes a node, including cells without passages.
    pub fn to_graph(&self) -> Result<AntGraph> {
        if self.rows == 0 || self.cols == 0 {
            bail!("Maze has no cells ({} x {})", self.rows, self.cols);
        }
        let cells = self.rows * self.cols;
        let mut graph = AntGraph::with_nodes((0..cells).map(NodeId));
        for &[u, v] in &self.edges {
            if u >= cells || v >= cells {
                bail!("Passage {}-{} is outside the {} x {} grid", u, v, self.rows, self.cols);
            }
            graph.add_edge(NodeId(u), NodeId(v))?;
        }
        Ok(graph)
    }

    pub fn bottom_left(&self) -> NodeId {
        flatten(GridCoord::new(self.rows.saturating_sub(1), 0), self.cols)
    }

    pub fn top_right(&self) -> NodeId {
        flatten(GridCoord::new(0, self.cols.saturating_sub(1)), self.cols)
    }
}

pub fn run(
    rows: Option<u32>,
    cols: Option<u32>,
    extra_edges: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let rows = rows.unwrap_or(config.maze.rows);
    let cols = cols.unwrap_or(config.maze.cols);
    let extra_edges = extra_edges.or(config.maze.extra_edges);
    let seed = seed.or(config.maze.seed);
    let output = output.unwrap_or(config.output.maze_file);

    println!(
        "{} Generating {} maze...",
        "→".blue(),
        format!("{}x{}", rows, cols).cyan()
    );
    let maze = generate_maze_seeded(rows, cols, extra_edges, seed)?;
    let file = MazeFile::from_maze(&maze);
    file.save(&output)?;

    let tree_edges = maze.node_count() - 1;
    println!(
        "  Cells: {}, passages: {} ({} loops)",
        maze.node_count().to_string().cyan(),
        maze.edge_count().to_string().cyan(),
        (maze.edge_count() - tree_edges).to_string().yellow()
    );
    println!("{} Saved to {}", "✓".green().bold(), output.display());

    Ok(())
}
