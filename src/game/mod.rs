//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies:
//! the simulation clock and scheduler, the steering router and the step engine.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod router;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use clock::SimulationClock;
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use router::request_direction;
pub use scheduler::{CancellationToken, FrameSignal, FrameTick, Scheduler};
pub use state::{CollisionType, GameState, GameStatus, Position, Segment, Snake};
