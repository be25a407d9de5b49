use anyhow::{Context, Result};
use clap::Parser;
use smooth_snake::game::GameConfig;
use smooth_snake::logging;
use smooth_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smooth_snake")]
#[command(version, about = "Snake with smooth, interpolated movement")]
struct Cli {
    /// Config file (defaults to ./smooth_snake.toml, then ~/smooth_snake.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid (overrides the config file)
    #[arg(long)]
    grid_size: Option<usize>,

    /// Render frames per second
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path (defaults to smooth_snake.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.unwrap_or_else(logging::default_log_path);
    logging::init(&log_file)?;

    let mut config = GameConfig::load(cli.config.as_deref())?;
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
        config.validate().context("Invalid --grid-size")?;
    }
    log::info!("Starting with {:?}", config);

    let mut human_mode = HumanMode::new(config, cli.fps, cli.seed);
    human_mode.run().await?;

    Ok(())
}
