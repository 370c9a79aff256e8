//! claude-update CLI
//!
//! Usage:
//!   claude-update                  Update the recipe next to the executable
//!   claude-update -r <path>        Update a specific recipe file

use anyhow::{Context, Result};
use clap::Parser;
use claude_update::{output, update};
use std::path::PathBuf;

/// Default recipe location: default.nix next to the executable.
fn default_recipe_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate executable")?;
    let dir = exe
        .parent()
        .context("executable has no parent directory")?;
    Ok(dir.join("default.nix"))
}

#[derive(Parser)]
#[command(name = "claude-update")]
#[command(about = "Sync the claude package recipe with upstream releases")]
#[command(version)]
struct Cli {
    /// Path to the recipe file (defaults to default.nix next to the executable)
    #[arg(short, long)]
    recipe: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let recipe_path = match cli.recipe {
        Some(path) => path,
        None => default_recipe_path()?,
    };

    if let Err(e) = update::run(&recipe_path) {
        output::error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
