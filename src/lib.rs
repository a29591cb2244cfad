//! Grid Snake - a classic snake game on a fixed grid
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Tick scheduling driven by engine commands (scheduler module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
