use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;

#[derive(Parser, Debug)]
#[command(name = "dungeon", about = "A turn-based dungeon crawl for the terminal")]
struct Args {
    /// Run seed; omit for a time-derived one.
    #[arg(long)]
    seed: Option<u64>,

    /// Save slot written by the in-game save command.
    #[arg(long, default_value_t = 1)]
    slot: u8,

    /// Override the save directory (defaults to the platform data dir).
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn default_save_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "dungeon")
        .context("could not determine a platform data directory")?;
    Ok(dirs.data_dir().join("saves"))
}

fn time_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_nanos() as u64,
        Err(_) => 0,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(time_seed);
    let save_dir = match args.save_dir {
        Some(dir) => dir,
        None => default_save_dir()?,
    };

    let game = core::Game::new(seed, args.slot, save_dir);
    app::app_loop::run(game)
}
