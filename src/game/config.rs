use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// How the tick interval shrinks as the score grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedRamp {
    /// Never speed up
    Constant,
    /// Shave one millisecond off the base interval for every `score_per_ms` points
    Linear { score_per_ms: u32 },
}

impl SpeedRamp {
    /// Milliseconds to subtract from the base interval at the given score
    pub fn reduction_ms(&self, score: u32) -> u64 {
        match *self {
            SpeedRamp::Constant => 0,
            SpeedRamp::Linear { score_per_ms } => u64::from(score / score_per_ms.max(1)),
        }
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the supported maximum of {max} cells per side")]
    GridTooLarge { width: usize, height: usize, max: usize },
    #[error("initial snake length must be non-zero")]
    ZeroSnakeLength,
    #[error("a snake of length {length} does not fit left of the centre of a {width}-wide grid")]
    SnakeDoesNotFit { length: usize, width: usize },
    #[error("grid {width}x{height} leaves no free cell for food next to a snake of length {length}")]
    NoRoomForFood {
        width: usize,
        height: usize,
        length: usize,
    },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("minimum tick interval must be non-zero")]
    ZeroMinInterval,
    #[error("minimum tick interval {min_ms}ms exceeds base interval {base_ms}ms")]
    FloorAboveBase { min_ms: u64, base_ms: u64 },
    #[error("linear speed ramp needs a non-zero score_per_ms")]
    ZeroRampDivisor,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of one grid cell in terminal columns
    pub cell_size: u16,
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Tick interval at score zero, in milliseconds
    pub base_tick_ms: u64,
    /// The tick interval never drops below this, in milliseconds
    pub min_tick_ms: u64,
    /// Points awarded per food eaten
    pub score_per_food: u32,
    pub speed_ramp: SpeedRamp,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 2,
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            base_tick_ms: 150,
            min_tick_ms: 50,
            score_per_food: 10,
            speed_ramp: SpeedRamp::Linear { score_per_ms: 50 },
        }
    }
}

impl GameConfig {
    /// Largest supported grid side; keeps every cell coordinate inside `i32`
    pub const MAX_GRID_SIDE: usize = 4096;

    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON configuration file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the configuration can produce a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if width > Self::MAX_GRID_SIDE || height > Self::MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: Self::MAX_GRID_SIDE,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }
        // The head starts at width / 2 and the body trails to the left
        if self.initial_snake_length - 1 > width / 2 {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                width,
            });
        }
        if width * height <= self.initial_snake_length {
            return Err(ConfigError::NoRoomForFood {
                width,
                height,
                length: self.initial_snake_length,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::FloorAboveBase {
                min_ms: self.min_tick_ms,
                base_ms: self.base_tick_ms,
            });
        }
        if let SpeedRamp::Linear { score_per_ms: 0 } = self.speed_ramp {
            return Err(ConfigError::ZeroRampDivisor);
        }
        Ok(())
    }

    /// Tick interval at score zero
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    /// Tick interval for the given score, clamped to the configured floor
    pub fn tick_interval(&self, score: u32) -> Duration {
        let ms = self
            .base_tick_ms
            .saturating_sub(self.speed_ramp.reduction_ms(score))
            .max(self.min_tick_ms);
        Duration::from_millis(ms)
    }
}
