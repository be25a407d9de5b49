//! Smooth Snake - a grid Snake game with interpolated motion
//!
//! This library provides:
//! - Core game logic: fixed-step clock, scheduler, steering and step engine (game module)
//! - Interpolated frame snapshots and the TUI view (render module)
//! - Key mapping (input module)
//! - Session stats (metrics module)
//! - The interactive frame loop (modes module)
//! - File logging setup (logging module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
