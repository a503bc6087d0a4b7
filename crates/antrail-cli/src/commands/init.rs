//! Initialize a new antrail project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing antrail project...", "→".blue());

    let config = Config::default();

    // Create the data directory the state log and maze file live in
    let data_dir = base_path.join("data");
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    println!("  {} Created {}", "✓".green(), data_dir.display());

    // Create default config
    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        config.save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    let gitignore_path = data_dir.join(".gitignore");
    if !gitignore_path.exists() {
        std::fs::write(&gitignore_path, "*.jsonl\n")?;
        println!("  {} Created {}", "✓".green(), gitignore_path.display());
    }

    println!();
    println!("{} antrail project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} antrail maze --seed 42", "1.".blue());
    println!("  {} antrail run --maze {} --compare", "2.".blue(), config.output.maze_file.display());
    println!("  {} antrail replay --improvements", "3.".blue());

    Ok(())
}
