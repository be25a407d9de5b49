use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::state::Position;

/// File name searched for in the working directory and then in `$HOME`
pub const CONFIG_FILE: &str = "smooth_snake.toml";

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Canvas units per cell (view only)
    pub cell_size: u32,
    /// Step interval at the start of a game
    pub initial_step_interval_ms: u32,
    /// How much the step interval shrinks on every speed-up
    pub step_interval_decrement_ms: u32,
    /// The step interval never drops below this
    pub min_step_interval_ms: u32,
    /// A speed-up happens whenever the score is a multiple of this
    pub speedup_every: u32,
}

/// Invalid combination of configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 2 cells, got {0}")]
    GridTooSmall(usize),
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("minimum step interval must be positive")]
    ZeroMinInterval,
    #[error("initial step interval {initial}ms is below the {floor}ms floor")]
    InitialBelowFloor { initial: u32, floor: u32 },
    #[error("speedup_every must be positive")]
    ZeroSpeedupEvery,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_size: 20,
            initial_step_interval_ms: 150,
            step_interval_decrement_ms: 10,
            min_step_interval_ms: 50,
            speedup_every: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Cell the snake spawns on: the middle of the grid
    pub fn spawn(&self) -> Position {
        let center = (self.grid_size / 2) as i32;
        Position::new(center, center)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.min_step_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.initial_step_interval_ms < self.min_step_interval_ms {
            return Err(ConfigError::InitialBelowFloor {
                initial: self.initial_step_interval_ms,
                floor: self.min_step_interval_ms,
            });
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedupEvery);
        }
        Ok(())
    }

    /// Load the configuration.
    ///
    /// An explicit `path` must exist and parse. Without one, `smooth_snake.toml`
    /// is looked up in the current directory and then in the home directory;
    /// a discovered file that fails to parse is logged and ignored.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                let config: GameConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                log::info!("Loaded config from {}", path.display());
                config
            }
            None => Self::discover(),
        };

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn discover() -> Self {
        for candidate in config_candidates() {
            let Ok(content) = std::fs::read_to_string(&candidate) else {
                continue;
            };
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", candidate.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", candidate.display(), e);
                }
            }
        }

        log::debug!("Using default game config");
        Self::default()
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(CONFIG_FILE));
    }
    candidates
}
