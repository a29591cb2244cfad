//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O, timer or rendering
//! dependencies. The engine is driven from outside: a scheduler calls `tick`,
//! an input source calls `set_direction` and `start`, and a renderer reads
//! `snapshot`.

pub mod collision;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use collision::{check_collision, is_collision};
pub use config::{ConfigError, GameConfig, SpeedRamp};
pub use direction::Direction;
pub use engine::{GameEngine, ScheduleCommand, TickOutcome, TickResult};
pub use food::place_food;
pub use state::{CollisionType, GameStatus, Position, Snake, Snapshot};
