//! antrail CLI - ant colony path search from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "antrail")]
#[command(author, version, about = "antrail - Ant colony path search through mazes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new antrail project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Generate a maze and save it
    Maze {
        /// Grid rows (default: from antrail.toml)
        #[arg(long)]
        rows: Option<u32>,

        /// Grid columns (default: from antrail.toml)
        #[arg(long)]
        cols: Option<u32>,

        /// Loop passages added on top of the spanning tree
        #[arg(short, long)]
        extra_edges: Option<usize>,

        /// RNG seed for a reproducible maze
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output file (default: from antrail.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the colony on a maze
    Run(commands::run::RunArgs),

    /// Replay a recorded state log
    Replay {
        /// State log to read (default: from antrail.toml)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Show a single iteration in detail
        #[arg(short, long, conflicts_with = "improvements")]
        iteration: Option<usize>,

        /// Only show iterations where the best path got shorter
        #[arg(long)]
        improvements: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Maze {
            rows,
            cols,
            extra_edges,
            seed,
            output,
        } => commands::maze::run(rows, cols, extra_edges, seed, output),
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Replay {
            state,
            iteration,
            improvements,
        } => commands::replay::run(state, iteration, improvements),
    }
}
