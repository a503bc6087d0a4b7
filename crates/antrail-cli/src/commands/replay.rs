//! Replay a recorded state log.

use anyhow::{Context, Result};
use antrail::prelude::*;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;

/// Per-record figures shown by `replay`.
#[derive(Debug, Clone, PartialEq)]
struct RecordSummary {
    iteration: usize,
    best_so_far: usize,
    iteration_best: Option<usize>,
    mean_length: Option<f64>,
    total_pheromone: f64,
    strongest: Option<(EdgeKey, f64)>,
}

impl RecordSummary {
    fn of(record: &StateRecord) -> Self {
        let lengths: Vec<usize> = record.all_paths.iter().map(|p| p.length).collect();
        let mean_length = if lengths.is_empty() {
            None
        } else {
            Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
        };
        Self {
            iteration: record.iteration,
            best_so_far: record.shortest_path.length,
            iteration_best: lengths.iter().copied().min(),
            mean_length,
            total_pheromone: record.pheromone.total(),
            strongest: record.pheromone.strongest(),
        }
    }
}

pub fn run(state: Option<PathBuf>, iteration: Option<usize>, improvements: bool) -> Result<()> {
    let path = match state {
        Some(path) => path,
        None => Config::load()?.output.state_log,
    };

    if let Some(iteration) = iteration {
        let record = load_by_iteration(&path, iteration)
            .with_context(|| format!("Failed to replay {}", path.display()))?;
        print_detail(&record);
        return Ok(());
    }

    let records = if improvements {
        let mut best = usize::MAX;
        filter_states(&path, |r| {
            let improved = r.shortest_path.length < best;
            best = best.min(r.shortest_path.length);
            improved
        })
    } else {
        load_all(&path)
    }
    .with_context(|| format!("Failed to replay {}", path.display()))?;

    println!(
        "{} {} ({} records)",
        "→".blue(),
        path.display(),
        records.len().to_string().cyan()
    );
    println!(
        "  {:>9}  {:>9}  {:>9}  {:>9}  {:>10}",
        "iteration", "best", "iter best", "mean", "pheromone"
    );
    for record in &records {
        let s = RecordSummary::of(record);
        println!(
            "  {:>9}  {:>9}  {:>9}  {:>9}  {:>10.3}",
            s.iteration,
            s.best_so_far.to_string().green(),
            s.iteration_best.map_or("-".to_string(), |l| l.to_string()),
            s.mean_length.map_or("-".to_string(), |m| format!("{:.1}", m)),
            s.total_pheromone
        );
    }

    Ok(())
}

fn print_detail(record: &StateRecord) {
    let s = RecordSummary::of(record);
    println!("{} Iteration {}", "→".blue(), s.iteration.to_string().cyan());
    println!("  Ants: {}", record.all_paths.len());
    println!("  Best so far: {}", s.best_so_far.to_string().green());
    if let Some(best) = s.iteration_best {
        println!("  Iteration best: {}", best);
    }
    if let Some(mean) = s.mean_length {
        println!("  Mean length: {:.2}", mean);
    }
    println!("  Total pheromone: {:.4}", s.total_pheromone);
    if let Some((edge, level)) = s.strongest {
        println!("  Strongest trail: {} ({:.4})", edge.to_string().yellow(), level);
    }
    let route: Vec<String> = record
        .shortest_path
        .path
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!("  Best path: {}", route.join(" → "));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId(id)
    }

    #[test]
    fn summary_of_a_record() {
        let mut pheromone =
            PheromoneMap::uniform([EdgeKey::new(n(0), n(1)), EdgeKey::new(n(1), n(2))], 0.5);
        pheromone.set(n(2), n(1), 2.0).unwrap();
        let short = AntPath::new(vec![n(0), n(2)]);
        let record = StateRecord {
            iteration: 4,
            pheromone,
            all_paths: vec![AntPath::new(vec![n(0), n(1), n(2)]), short.clone()],
            shortest_path: short,
        };

        let s = RecordSummary::of(&record);
        assert_eq!(s.iteration, 4);
        assert_eq!(s.best_so_far, 1);
        assert_eq!(s.iteration_best, Some(1));
        assert_eq!(s.mean_length, Some(1.5));
        assert_eq!(s.total_pheromone, 2.5);
        assert_eq!(s.strongest, Some((EdgeKey::new(n(1), n(2)), 2.0)));
    }
}
