//! Run the colony on a maze and optionally compare with Dijkstra.

use anyhow::{Context, Result};
use antrail::prelude::*;
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use petgraph::algo::dijkstra;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::maze::MazeFile;
use crate::config::Config;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Grid rows for a generated maze
    #[arg(long)]
    pub rows: Option<u32>,

    /// Grid columns for a generated maze
    #[arg(long)]
    pub cols: Option<u32>,

    /// Load the maze from a file instead of generating one
    #[arg(short, long, conflicts_with_all = ["rows", "cols"])]
    pub maze: Option<PathBuf>,

    /// Ants per iteration
    #[arg(short = 'n', long)]
    pub ants: Option<usize>,

    /// Shortest paths per iteration that reinforce the trail
    #[arg(long)]
    pub best: Option<usize>,

    /// Number of iterations
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Evaporation factor (0.0-1.0)
    #[arg(long)]
    pub decay: Option<f64>,

    /// Pheromone exponent
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Degree heuristic exponent
    #[arg(long)]
    pub beta: Option<f64>,

    /// RNG seed for the colony and a generated maze
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// State log to write
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Also compute the exact shortest path and compare
    #[arg(long)]
    pub compare: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the file configuration.
    fn colony_config(&self, config: &Config) -> ColonyConfig {
        let base = &config.colony;
        ColonyConfig {
            n_ants: self.ants.unwrap_or(base.n_ants),
            n_best: self.best.unwrap_or(base.n_best),
            n_iterations: self.iterations.unwrap_or(base.n_iterations),
            decay: self.decay.unwrap_or(base.decay),
            alpha: self.alpha.unwrap_or(base.alpha),
            beta: self.beta.unwrap_or(base.beta),
            seed: self.seed.or(base.seed),
        }
    }
}

/// Writes every record to the state log and advances the progress bar.
struct ProgressSink {
    recorder: StateRecorder,
    bar: ProgressBar,
    verbose: bool,
}

impl StateSink for ProgressSink {
    fn record(&mut self, record: &StateRecord) -> antrail::core::error::Result<()> {
        self.recorder.append(record)?;
        if self.verbose {
            let iteration_best = record.all_paths.iter().map(|p| p.length).min().unwrap_or(0);
            self.bar.println(format!(
                "  iteration {:>4}: iteration best {:>4}, best so far {:>4}",
                record.iteration, iteration_best, record.shortest_path.length
            ));
        }
        self.bar.set_message(format!("best {}", record.shortest_path.length));
        self.bar.inc(1);
        Ok(())
    }
}

pub fn run(args: RunArgs, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let colony_config = args.colony_config(&config);
    let state_path = args.state.clone().unwrap_or_else(|| config.output.state_log.clone());

    // Load or generate the maze
    let (graph, start, end) = match &args.maze {
        Some(path) => {
            println!("{} Loading maze from {}...", "→".blue(), path.display());
            let file = MazeFile::load(path)?;
            (file.to_graph()?, file.bottom_left(), file.top_right())
        }
        None => {
            let rows = args.rows.unwrap_or(config.maze.rows);
            let cols = args.cols.unwrap_or(config.maze.cols);
            println!(
                "{} Generating {} maze...",
                "→".blue(),
                format!("{}x{}", rows, cols).cyan()
            );
            let seed = args.seed.or(config.maze.seed);
            let maze = generate_maze_seeded(rows, cols, config.maze.extra_edges, seed)?;
            (maze.to_graph()?, maze.bottom_left(), maze.top_right())
        }
    };
    println!(
        "  {} nodes, {} edges, {} {} {}",
        graph.node_count().to_string().cyan(),
        graph.edge_count().to_string().cyan(),
        start.to_string().yellow(),
        "→".blue(),
        end.to_string().yellow()
    );

    let exact = if args.compare {
        Some(shortest_route(&graph, start, end))
    } else {
        None
    };

    let n_iterations = colony_config.n_iterations;
    let mut colony = AntColony::new(graph, colony_config);
    colony.validate(start, end)?;

    println!(
        "{} Running {} iterations of {} ants...",
        "→".blue(),
        n_iterations.to_string().cyan(),
        colony.config().n_ants.to_string().cyan()
    );

    let bar = ProgressBar::new(n_iterations as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} iterations {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    let recorder = StateRecorder::create(&state_path)
        .with_context(|| format!("Failed to create state log: {}", state_path.display()))?;
    let mut sink = ProgressSink {
        recorder,
        bar,
        verbose,
    };

    let started = Instant::now();
    let best = colony.run_with_sink(start, end, &mut sink)?;
    let aco_time = started.elapsed();
    sink.bar.finish_with_message("done");

    println!();
    println!("{} Colony finished!", "✓".green().bold());
    println!("  Best length: {}", best.length.to_string().green());
    println!("  Path: {}", format_path(&best.path));
    println!("  Time: {}", format_duration(aco_time));
    println!("  State log: {}", state_path.display());

    if let Some((route, dijkstra_time)) = exact {
        println!();
        println!("{} Dijkstra comparison", "→".blue());
        match route {
            Some(route) => {
                let optimum = route.len() - 1;
                println!("  Shortest length: {}", optimum.to_string().green());
                println!("  Path: {}", format_path(&route));
                println!("  Time: {}", format_duration(dijkstra_time));
                if best.length == optimum {
                    println!("  {} Colony found an optimal path", "✓".green());
                } else {
                    println!(
                        "  {} Colony path is {} hops longer than optimal",
                        "•".yellow(),
                        (best.length - optimum).to_string().yellow()
                    );
                }
            }
            None => println!("  {} No route from {} to {}", "✗".red(), start, end),
        }
    }

    Ok(())
}

/// Exact shortest route by hop count, with the time it took.
fn shortest_route(graph: &AntGraph, start: NodeId, end: NodeId) -> (Option<Vec<NodeId>>, Duration) {
    let started = Instant::now();
    let distances = dijkstra(graph.as_graphmap(), start, None, |_| 1usize);
    let route = trace_back(graph, &distances, start, end);
    (route, started.elapsed())
}

/// Walk from `end` back to `start` through neighbors one hop closer.
fn trace_back(
    graph: &AntGraph,
    distances: &HashMap<NodeId, usize>,
    start: NodeId,
    end: NodeId,
) -> Option<Vec<NodeId>> {
    let mut remaining = *distances.get(&end)?;
    let mut current = end;
    let mut route = vec![end];
    while current != start {
        remaining = remaining.checked_sub(1)?;
        current = graph
            .neighbors(current)
            .find(|n| distances.get(n) == Some(&remaining))?;
        route.push(current);
    }
    route.reverse();
    Some(route)
}

fn format_path(path: &[NodeId]) -> String {
    const SHOWN: usize = 12;
    let mut parts: Vec<String> = path.iter().take(SHOWN).map(|n| n.to_string()).collect();
    if path.len() > SHOWN {
        parts.push(format!("... ({} more)", path.len() - SHOWN));
    }
    parts.join(" → ")
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() > 0 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{:.2}ms", d.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn trace_back_follows_a_shortest_route() {
        // square 0-1-2-3-0 plus a tail 2-4
        let graph = AntGraph::from_edges([
            (n(0), n(1)),
            (n(1), n(2)),
            (n(2), n(3)),
            (n(3), n(0)),
            (n(2), n(4)),
        ])
        .unwrap();
        let (route, _) = shortest_route(&graph, n(0), n(4));
        let route = route.unwrap();
        assert_eq!(route.len(), 4);
        assert_eq!(route.first(), Some(&n(0)));
        assert_eq!(route.last(), Some(&n(4)));
        for step in route.windows(2) {
            assert!(graph.contains_edge(step[0], step[1]));
        }
    }

    #[test]
    fn unreachable_end_has_no_route() {
        let mut graph = AntGraph::from_edges([(n(0), n(1))]).unwrap();
        graph.add_node(n(2));
        let (route, _) = shortest_route(&graph, n(0), n(2));
        assert!(route.is_none());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::default();
        config.colony.n_ants = 7;
        config.colony.seed = Some(1);
        let args = RunArgs {
            iterations: Some(3),
            decay: Some(0.9),
            ..Default::default()
        };
        let colony = args.colony_config(&config);
        assert_eq!(colony.n_ants, 7);
        assert_eq!(colony.n_iterations, 3);
        assert_eq!(colony.decay, 0.9);
        assert_eq!(colony.seed, Some(1));
    }

    #[test]
    fn long_paths_are_shortened() {
        let path: Vec<NodeId> = (0..20).map(n).collect();
        let shown = format_path(&path);
        assert!(shown.starts_with("0 → 1"));
        assert!(shown.ends_with("(8 more)"));
    }
}
